use crate::career::career_model::{InterviewQuestion, QuestionCategory};
use crate::career::ids::IdSource;
use crate::error::WizardError;

/// Editor for AI interview questions grouped in fixed categories.
/// The category list itself is fixed; only questions and caps change.
#[derive(Debug, Clone, Default)]
pub struct InterviewEditor {
    categories: Vec<QuestionCategory>,
}

impl InterviewEditor {
    pub fn new(categories: Vec<QuestionCategory>) -> Self {
        InterviewEditor { categories }
    }

    pub fn categories(&self) -> &[QuestionCategory] {
        &self.categories
    }

    pub fn question_total(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    pub fn add_question(
        &mut self,
        category: usize,
        text: &str,
        ids: &dyn IdSource,
    ) -> Result<(), WizardError> {
        self.category_mut(category)?
            .questions
            .push(InterviewQuestion::new(ids.next_id(), text));
        Ok(())
    }

    pub fn set_question_text(
        &mut self,
        category: usize,
        question: usize,
        text: &str,
    ) -> Result<(), WizardError> {
        self.question_mut(category, question)?.question = text.to_string();
        Ok(())
    }

    pub fn remove_question(&mut self, category: usize, question: usize) -> Result<(), WizardError> {
        self.question_mut(category, question)?;
        self.categories[category].questions.remove(question);
        Ok(())
    }

    /// Cap on how many of the category's questions are asked per interview.
    pub fn set_question_count(
        &mut self,
        category: usize,
        count: Option<u32>,
    ) -> Result<(), WizardError> {
        self.category_mut(category)?.question_count_to_ask = count;
        Ok(())
    }

    fn category_mut(&mut self, index: usize) -> Result<&mut QuestionCategory, WizardError> {
        let len = self.categories.len();
        self.categories.get_mut(index).ok_or(WizardError::IndexOutOfRange {
            what: "category",
            index,
            len,
        })
    }

    fn question_mut(
        &mut self,
        category: usize,
        index: usize,
    ) -> Result<&mut InterviewQuestion, WizardError> {
        let questions = &mut self.category_mut(category)?.questions;
        let len = questions.len();
        questions.get_mut(index).ok_or(WizardError::IndexOutOfRange {
            what: "interview question",
            index,
            len,
        })
    }
}
