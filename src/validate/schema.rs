use crate::career::career_model::{CareerDraft, QuestionOptions, SalaryInput, salary_amount};
use crate::career::sanitize::{sanitize_description, strip_tags};
use crate::form::form_state::FormField;
use crate::wizard::wizard_model::Step;

pub const DEFAULT_MIN_AI_QUESTIONS: usize = 5;

pub const SALARY_RANGE_MESSAGE: &str = "Minimum salary cannot be greater than maximum salary";

/// Field rules applied by the step validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationSchema {
    /// Interview questions needed across all categories
    pub min_ai_questions: usize,
}

impl Default for ValidationSchema {
    fn default() -> Self {
        Self {
            min_ai_questions: DEFAULT_MIN_AI_QUESTIONS,
        }
    }
}

impl ValidationSchema {
    pub fn new(min_ai_questions: usize) -> Self {
        Self { min_ai_questions }
    }

    /// Error message for `field`, or `None` when it is acceptable.
    pub fn check_field(&self, field: FormField, draft: &CareerDraft) -> Option<String> {
        match field {
            FormField::JobTitle => {
                is_blank(&strip_tags(&draft.job_title)).then(|| "Job title is required".into())
            }
            FormField::EmploymentType => draft
                .employment_type
                .is_none()
                .then(|| "Employment type is required".into()),
            FormField::WorkSetup => draft
                .work_setup
                .is_none()
                .then(|| "Work setup is required".into()),
            FormField::Description => {
                let text = strip_tags(&sanitize_description(&draft.description));
                is_blank(&text).then(|| "Description is required".into())
            }
            FormField::MinimumSalary => check_salary("Minimum salary", draft.minimum_salary.as_ref()),
            FormField::MaximumSalary => check_salary("Maximum salary", draft.maximum_salary.as_ref()),
            FormField::CvScreeningSetting => draft
                .cv_screening_setting
                .is_none()
                .then(|| "CV screening setting is required".into()),
            FormField::CvQuestions => check_cv_questions(draft),
            FormField::AiScreeningSetting => draft
                .ai_screening_setting
                .is_none()
                .then(|| "AI screening setting is required".into()),
            FormField::AiQuestions => self.check_ai_questions(draft),
        }
    }

    fn check_ai_questions(&self, draft: &CareerDraft) -> Option<String> {
        for (i, category) in draft.ai_questions.iter().enumerate() {
            let name = strip_tags(&category.category);
            if is_blank(&name) {
                return Some(format!("Category {} needs a name", i + 1));
            }
            if let Some(pos) = category
                .questions
                .iter()
                .position(|q| is_blank(&strip_tags(&q.question)))
            {
                return Some(format!("{}: question {} is empty", name.trim(), pos + 1));
            }
            if let Some(cap) = category.question_count_to_ask {
                if cap as usize > category.questions.len() {
                    return Some(format!(
                        "{} asks {} questions but only has {}",
                        name.trim(),
                        cap,
                        category.questions.len()
                    ));
                }
            }
        }

        let total = draft.ai_question_total();
        (total < self.min_ai_questions).then(|| {
            format!(
                "Add at least {} interview questions ({} so far)",
                self.min_ai_questions, total
            )
        })
    }

    /// Both bounds numeric and min above max.
    pub fn salary_range_violated(&self, draft: &CareerDraft) -> bool {
        match (
            salary_amount(draft.minimum_salary.as_ref()),
            salary_amount(draft.maximum_salary.as_ref()),
        ) {
            (Some(min), Some(max)) => min > max,
            _ => false,
        }
    }

    /// Whether the recruiter has entered nothing meaningful on `step` yet.
    pub fn is_step_empty(&self, step: Step, draft: &CareerDraft) -> bool {
        match step {
            Step::CareerDetails => {
                is_blank(&draft.job_title)
                    && draft.employment_type.is_none()
                    && draft.work_setup.is_none()
                    && draft.minimum_salary.as_ref().is_none_or(SalaryInput::is_blank)
                    && draft.maximum_salary.as_ref().is_none_or(SalaryInput::is_blank)
                    && is_blank(&strip_tags(&draft.description))
            }
            Step::CvScreening => draft.cv_screening_setting.is_none(),
            Step::AiInterview => {
                draft.ai_screening_setting.is_none()
                    || draft.ai_question_total() < self.min_ai_questions
            }
            Step::Review => false,
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn check_salary(label: &str, input: Option<&SalaryInput>) -> Option<String> {
    let input = input?;
    if let SalaryInput::Text(s) = input {
        if is_blank(s) {
            return None;
        }
    }
    match input.amount() {
        None => Some(format!("{} must be a number", label)),
        Some(v) if v < 0.0 => Some(format!("{} cannot be negative", label)),
        Some(_) => None,
    }
}

fn check_cv_questions(draft: &CareerDraft) -> Option<String> {
    for (i, question) in draft.cv_questions.iter().enumerate() {
        let n = i + 1;
        if is_blank(&strip_tags(&question.title)) {
            return Some(format!("Question {} needs a title", n));
        }
        match &question.options {
            QuestionOptions::Dropdown(choices) => {
                if choices.is_empty() {
                    return Some(format!("Question {} needs at least one option", n));
                }
                if choices.iter().any(|c| is_blank(&strip_tags(&c.label))) {
                    return Some(format!("Question {} has an empty option", n));
                }
            }
            QuestionOptions::Range(range) => {
                if let (Some(min), Some(max)) = (range.min, range.max) {
                    if min > max {
                        return Some(format!("Question {} minimum exceeds maximum", n));
                    }
                }
            }
        }
    }
    None
}
