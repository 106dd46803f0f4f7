use std::collections::HashMap;

use crate::career::career_model::{
    ChoiceOption, PreScreenQuestion, QuestionKind, QuestionOptions, RangeOption,
};
use crate::career::ids::IdSource;
use crate::error::WizardError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestedQuestion {
    pub title: &'static str,
    pub question: &'static str,
    pub kind: QuestionKind,
}

pub const SUGGESTED_QUESTIONS: [SuggestedQuestion; 3] = [
    SuggestedQuestion {
        title: "Notice period",
        question: "How long is your notice period?",
        kind: QuestionKind::Dropdown,
    },
    SuggestedQuestion {
        title: "Work Setup",
        question: "How often are you willing to report to the office each week?",
        kind: QuestionKind::Dropdown,
    },
    SuggestedQuestion {
        title: "Asking salary?",
        question: "How much is your expected salary?",
        kind: QuestionKind::Range,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Min,
    Max,
}

/// Editor for the CV pre-screening question list.
///
/// Every operation either applies fully or returns an error and leaves the
/// list untouched. Options replaced by a type switch are kept per question
/// and per type, so switching back restores them; that cache lives only in
/// the editor and never reaches [`PreScreenEditor::questions`].
#[derive(Debug, Clone, Default)]
pub struct PreScreenEditor {
    questions: Vec<PreScreenQuestion>,
    saved_options: HashMap<String, HashMap<QuestionKind, QuestionOptions>>,
}

impl PreScreenEditor {
    pub fn new(questions: Vec<PreScreenQuestion>) -> Self {
        PreScreenEditor {
            questions,
            saved_options: HashMap::new(),
        }
    }

    pub fn questions(&self) -> &[PreScreenQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn add_blank(&mut self, ids: &dyn IdSource) {
        self.questions.push(PreScreenQuestion {
            id: ids.next_id(),
            title: String::new(),
            options: QuestionOptions::Dropdown(Vec::new()),
        });
    }

    /// Appends the suggestion even if an identical question already exists.
    pub fn add_from_suggestion(&mut self, suggestion: &SuggestedQuestion, ids: &dyn IdSource) {
        let id = ids.next_id();
        let options = match suggestion.kind {
            QuestionKind::Dropdown => QuestionOptions::Dropdown(Vec::new()),
            QuestionKind::Range => QuestionOptions::Range(RangeOption::empty(ids.next_id())),
        };
        self.questions.push(PreScreenQuestion {
            id,
            title: suggestion.question.to_string(),
            options,
        });
    }

    pub fn set_title(&mut self, index: usize, text: &str) -> Result<(), WizardError> {
        self.question_mut(index)?.title = text.to_string();
        Ok(())
    }

    pub fn set_type(
        &mut self,
        index: usize,
        kind: QuestionKind,
        ids: &dyn IdSource,
    ) -> Result<(), WizardError> {
        let question = self.question_mut(index)?;
        if question.kind() == kind {
            return Ok(());
        }

        let question_id = question.id.clone();
        let previous = question.kind();
        let current = question.options.clone();

        let cache = self.saved_options.entry(question_id).or_default();
        cache.insert(previous, current);
        let restored = cache.get(&kind).cloned().unwrap_or_else(|| match kind {
            QuestionKind::Dropdown => QuestionOptions::Dropdown(vec![ChoiceOption {
                id: ids.next_id(),
                label: String::new(),
            }]),
            QuestionKind::Range => QuestionOptions::Range(RangeOption::empty(ids.next_id())),
        });

        self.questions[index].options = restored;
        Ok(())
    }

    pub fn add_option(&mut self, index: usize, ids: &dyn IdSource) -> Result<(), WizardError> {
        let choices = Self::choices_mut(self.question_mut(index)?)?;
        choices.push(ChoiceOption {
            id: ids.next_id(),
            label: String::new(),
        });
        Ok(())
    }

    pub fn set_option_label(
        &mut self,
        index: usize,
        option: usize,
        text: &str,
    ) -> Result<(), WizardError> {
        let choices = Self::choices_mut(self.question_mut(index)?)?;
        let len = choices.len();
        let choice = choices.get_mut(option).ok_or(WizardError::IndexOutOfRange {
            what: "option",
            index: option,
            len,
        })?;
        choice.label = text.to_string();
        Ok(())
    }

    pub fn set_range_bound(
        &mut self,
        index: usize,
        bound: RangeBound,
        value: Option<f64>,
    ) -> Result<(), WizardError> {
        let question = self.question_mut(index)?;
        let found = question.kind();
        let QuestionOptions::Range(range) = &mut question.options else {
            return Err(WizardError::WrongQuestionKind {
                expected: QuestionKind::Range,
                found,
            });
        };
        match bound {
            RangeBound::Min => range.min = value,
            RangeBound::Max => range.max = value,
        }
        Ok(())
    }

    pub fn remove_option(&mut self, index: usize, option: usize) -> Result<(), WizardError> {
        let choices = Self::choices_mut(self.question_mut(index)?)?;
        if option >= choices.len() {
            return Err(WizardError::IndexOutOfRange {
                what: "option",
                index: option,
                len: choices.len(),
            });
        }
        choices.remove(option);
        Ok(())
    }

    pub fn remove_question(&mut self, index: usize) -> Result<(), WizardError> {
        let removed = self.question_mut(index)?.id.clone();
        self.questions.remove(index);
        self.saved_options.remove(&removed);
        Ok(())
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut PreScreenQuestion, WizardError> {
        let len = self.questions.len();
        self.questions.get_mut(index).ok_or(WizardError::IndexOutOfRange {
            what: "question",
            index,
            len,
        })
    }

    fn choices_mut(question: &mut PreScreenQuestion) -> Result<&mut Vec<ChoiceOption>, WizardError> {
        let found = question.kind();
        match &mut question.options {
            QuestionOptions::Dropdown(choices) => Ok(choices),
            QuestionOptions::Range(_) => Err(WizardError::WrongQuestionKind {
                expected: QuestionKind::Dropdown,
                found,
            }),
        }
    }
}
