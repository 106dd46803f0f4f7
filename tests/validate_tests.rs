use career_wizard::{
    career::career_model::{
        CareerDraft, ChoiceOption, PreScreenQuestion, QuestionOptions, RangeOption, SalaryInput,
    },
    form::form_state::{FormField, FormState},
    validate::{
        schema::{SALARY_RANGE_MESSAGE, ValidationSchema},
        step_validator::{StepCheck, StepValidator},
    },
    wizard::wizard_model::Step,
};

use crate::common::utils::{complete_draft, fill_details};

mod common;

fn form_with(f: impl FnOnce(&mut CareerDraft)) -> FormState {
    let mut draft = complete_draft();
    f(&mut draft);
    FormState::new(draft)
}

// =========================================================================
// Field rules
// =========================================================================

#[test]
fn empty_details_step_lists_required_fields() {
    let validator = StepValidator::default();
    let mut form = FormState::new(CareerDraft::default());

    let check = validator.validate_step(&mut form, Step::CareerDetails);
    assert_eq!(
        check,
        StepCheck::Invalid {
            step: Step::CareerDetails,
            fields: vec![
                FormField::JobTitle,
                FormField::EmploymentType,
                FormField::WorkSetup,
                FormField::Description,
            ],
        }
    );
    assert_eq!(form.error(FormField::JobTitle), Some("Job title is required"));
    assert_eq!(form.first_error(), Some(FormField::JobTitle));
}

#[test]
fn markup_only_title_and_description_count_as_blank() {
    let validator = StepValidator::default();
    let mut form = form_with(|d| {
        d.job_title = "<b> </b>".into();
        d.description = "<p><br></p><script>x</script>".into();
    });

    let check = validator.validate_step(&mut form, Step::CareerDetails);
    assert_eq!(
        check,
        StepCheck::Invalid {
            step: Step::CareerDetails,
            fields: vec![FormField::JobTitle, FormField::Description],
        }
    );
}

#[test]
fn fixing_a_field_clears_its_error() {
    let validator = StepValidator::default();
    let mut form = form_with(|d| d.job_title.clear());

    assert!(!validator.validate_step(&mut form, Step::CareerDetails).is_valid());
    form.update(|d| d.job_title = "QA Lead".into());
    assert!(validator.validate_step(&mut form, Step::CareerDetails).is_valid());
    assert!(form.errors().is_empty());
}

#[test]
fn salary_values_must_be_non_negative_numbers() {
    let schema = ValidationSchema::default();
    let mut draft = complete_draft();

    draft.minimum_salary = Some(SalaryInput::Text("abc".into()));
    assert_eq!(
        schema.check_field(FormField::MinimumSalary, &draft).as_deref(),
        Some("Minimum salary must be a number")
    );

    draft.minimum_salary = Some(SalaryInput::Amount(-1.0));
    assert_eq!(
        schema.check_field(FormField::MinimumSalary, &draft).as_deref(),
        Some("Minimum salary cannot be negative")
    );

    draft.minimum_salary = Some(SalaryInput::Text(" ".into()));
    assert_eq!(schema.check_field(FormField::MinimumSalary, &draft), None, "Blank is optional");

    draft.maximum_salary = Some(SalaryInput::Text("70000".into()));
    assert_eq!(schema.check_field(FormField::MaximumSalary, &draft), None);
}

// =========================================================================
// Cross-field salary rule
// =========================================================================

#[test]
fn min_above_max_blocks_with_range_message() {
    let validator = StepValidator::default();
    let pairs = [(10.0, 5.0), (80_001.0, 80_000.0), (1.0, 0.0)];

    for (min, max) in pairs {
        let mut form = form_with(|d| {
            d.minimum_salary = Some(SalaryInput::Amount(min));
            d.maximum_salary = Some(SalaryInput::Text(max.to_string()));
        });
        let check = validator.validate_step(&mut form, Step::CareerDetails);
        assert_eq!(check, StepCheck::SalaryRange, "min {} max {}", min, max);
        assert_eq!(check.failing_step(), Some(Step::CareerDetails));
        assert_eq!(form.error(FormField::MinimumSalary), Some(SALARY_RANGE_MESSAGE));
        assert_eq!(form.error(FormField::MaximumSalary), Some(SALARY_RANGE_MESSAGE));
    }
}

#[test]
fn range_rule_ignores_equal_or_non_numeric_bounds() {
    let schema = ValidationSchema::default();
    let mut draft = complete_draft();

    draft.minimum_salary = Some(SalaryInput::Amount(5.0));
    draft.maximum_salary = Some(SalaryInput::Amount(5.0));
    assert!(!schema.salary_range_violated(&draft));

    draft.maximum_salary = Some(SalaryInput::Text("n/a".into()));
    assert!(!schema.salary_range_violated(&draft));

    draft.maximum_salary = None;
    assert!(!schema.salary_range_violated(&draft));
}

// =========================================================================
// Question rules
// =========================================================================

#[test]
fn cv_questions_need_title_and_labelled_options() {
    let schema = ValidationSchema::default();
    let mut draft = complete_draft();
    draft.cv_questions = vec![PreScreenQuestion {
        id: "q1".into(),
        title: "Notice period?".into(),
        options: QuestionOptions::Dropdown(vec![ChoiceOption {
            id: "o1".into(),
            label: "".into(),
        }]),
    }];
    assert_eq!(
        schema.check_field(FormField::CvQuestions, &draft).as_deref(),
        Some("Question 1 has an empty option")
    );

    draft.cv_questions[0].options = QuestionOptions::Range(RangeOption {
        id: "r1".into(),
        min: Some(9.0),
        max: Some(3.0),
    });
    assert_eq!(
        schema.check_field(FormField::CvQuestions, &draft).as_deref(),
        Some("Question 1 minimum exceeds maximum")
    );

    draft.cv_questions[0].title = " ".into();
    assert_eq!(
        schema.check_field(FormField::CvQuestions, &draft).as_deref(),
        Some("Question 1 needs a title")
    );
}

#[test]
fn interview_step_requires_minimum_question_count() {
    let validator = StepValidator::new(ValidationSchema::new(5));
    let mut form = form_with(|d| d.ai_questions[4].questions.clear());

    let check = validator.validate_step(&mut form, Step::AiInterview);
    assert_eq!(
        check,
        StepCheck::Invalid {
            step: Step::AiInterview,
            fields: vec![FormField::AiQuestions],
        }
    );
    assert_eq!(
        form.error(FormField::AiQuestions),
        Some("Add at least 5 interview questions (4 so far)")
    );

    let relaxed = StepValidator::new(ValidationSchema::new(4));
    assert!(relaxed.validate_step(&mut form, Step::AiInterview).is_valid());
}

#[test]
fn category_cap_cannot_exceed_question_count() {
    let schema = ValidationSchema::default();
    let mut draft = complete_draft();
    draft.ai_questions[1].question_count_to_ask = Some(3);

    assert_eq!(
        schema.check_field(FormField::AiQuestions, &draft).as_deref(),
        Some("Technical asks 3 questions but only has 1")
    );
}

// =========================================================================
// Ranges and emptiness
// =========================================================================

#[test]
fn validate_all_stops_at_first_failing_step() {
    let validator = StepValidator::default();
    let mut form = form_with(|d| {
        d.cv_screening_setting = None;
        d.ai_screening_setting = None;
    });

    let check = validator.validate_all(&mut form);
    assert_eq!(check.failing_step(), Some(Step::CvScreening));
    assert_eq!(form.error(FormField::AiScreeningSetting), None, "Later steps untouched");
}

#[test]
fn validate_range_excludes_target_step() {
    let validator = StepValidator::default();
    let mut form = form_with(|d| d.ai_screening_setting = None);

    let check = validator.validate_range(&mut form, Step::CareerDetails, Some(Step::AiInterview));
    assert!(check.is_valid());
    assert!(!validator.validate_all(&mut form).is_valid());
}

#[test]
fn step_emptiness_rules() {
    let schema = ValidationSchema::default();
    let blank = CareerDraft::default();

    assert!(schema.is_step_empty(Step::CareerDetails, &blank));
    assert!(schema.is_step_empty(Step::CvScreening, &blank));
    assert!(schema.is_step_empty(Step::AiInterview, &blank));
    assert!(!schema.is_step_empty(Step::Review, &blank));

    let mut details = CareerDraft::default();
    fill_details(&mut details);
    assert!(!schema.is_step_empty(Step::CareerDetails, &details));

    let complete = complete_draft();
    assert!(!schema.is_step_empty(Step::AiInterview, &complete));
}
