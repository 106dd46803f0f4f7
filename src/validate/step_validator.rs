use crate::form::form_state::{FormField, FormState};
use crate::validate::schema::{SALARY_RANGE_MESSAGE, ValidationSchema};
use crate::wizard::wizard_model::{STEPS, Step};

/// Outcome of validating one step or the whole wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum StepCheck {
    Valid,
    /// Required fields of `step` are missing or malformed.
    Invalid { step: Step, fields: Vec<FormField> },
    /// Minimum salary above maximum. Always belongs to the details step.
    SalaryRange,
}

impl StepCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, StepCheck::Valid)
    }

    /// Step the wizard should show after this outcome, if it must move.
    pub fn failing_step(&self) -> Option<Step> {
        match self {
            StepCheck::Valid => None,
            StepCheck::Invalid { step, .. } => Some(*step),
            StepCheck::SalaryRange => Some(Step::CareerDetails),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StepValidator {
    schema: ValidationSchema,
}

impl StepValidator {
    pub fn new(schema: ValidationSchema) -> Self {
        StepValidator { schema }
    }

    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    /// Validate the fields owned by `step`, recording field errors on `form`.
    pub fn validate_step(&self, form: &mut FormState, step: Step) -> StepCheck {
        let fields = step.fields();
        let mut invalid = Vec::new();

        for &field in fields {
            match self.schema.check_field(field, form.values()) {
                Some(message) => {
                    form.set_error(field, message);
                    invalid.push(field);
                }
                None => form.clear_error(field),
            }
        }

        if fields.iter().any(FormField::is_salary) && self.schema.salary_range_violated(form.values()) {
            form.set_error(FormField::MinimumSalary, SALARY_RANGE_MESSAGE);
            form.set_error(FormField::MaximumSalary, SALARY_RANGE_MESSAGE);
            return StepCheck::SalaryRange;
        }

        if invalid.is_empty() {
            StepCheck::Valid
        } else {
            StepCheck::Invalid { step, fields: invalid }
        }
    }

    /// Validate steps in order, stopping at the first failure.
    pub fn validate_all(&self, form: &mut FormState) -> StepCheck {
        self.validate_range(form, Step::CareerDetails, None)
    }

    /// Validate `from` up to (excluding) `until`, or to the end.
    pub fn validate_range(&self, form: &mut FormState, from: Step, until: Option<Step>) -> StepCheck {
        for step in STEPS
            .iter()
            .copied()
            .filter(|s| *s >= from && until.is_none_or(|u| *s < u))
        {
            let check = self.validate_step(form, step);
            if !check.is_valid() {
                return check;
            }
        }
        StepCheck::Valid
    }
}
