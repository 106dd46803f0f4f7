use serde::Serialize;

use crate::career::career_model::{
    CareerDraft, CareerStatus, QuestionOptions, SalaryInput, SessionContext, UserIdentity,
    salary_amount,
};
use crate::career::sanitize::{sanitize_description, strip_tags};

/// Body sent to the create/update endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub career: CareerDraft,

    #[serde(rename = "createdBy")]
    pub created_by: UserIdentity,

    #[serde(rename = "lastEditedBy")]
    pub last_edited_by: UserIdentity,

    #[serde(rename = "orgID")]
    pub org_id: String,
}

/// Merge the live form values with status and identity, normalizing salary
/// to numbers (non-numeric becomes null) and stripping markup.
pub fn build_payload(
    values: &CareerDraft,
    status: CareerStatus,
    session: &SessionContext,
) -> SubmissionPayload {
    let mut career = values.clone();

    career.status = Some(status);
    career.minimum_salary = salary_amount(values.minimum_salary.as_ref()).map(SalaryInput::Amount);
    career.maximum_salary = salary_amount(values.maximum_salary.as_ref()).map(SalaryInput::Amount);

    career.job_title = strip_tags(&career.job_title);
    career.work_setup_remarks = strip_tags(&career.work_setup_remarks);
    career.description = sanitize_description(&career.description);

    for question in &mut career.cv_questions {
        question.title = strip_tags(&question.title);
        if let QuestionOptions::Dropdown(choices) = &mut question.options {
            for choice in choices {
                choice.label = strip_tags(&choice.label);
            }
        }
    }
    for category in &mut career.ai_questions {
        category.category = strip_tags(&category.category);
        for question in &mut category.questions {
            question.question = strip_tags(&question.question);
        }
    }

    SubmissionPayload {
        career,
        created_by: session.user.clone(),
        last_edited_by: session.user.clone(),
        org_id: session.org_id.clone(),
    }
}
