use std::collections::BTreeMap;

use crate::career::career_model::CareerDraft;

/// Form fields that carry validation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    JobTitle,
    EmploymentType,
    WorkSetup,
    MinimumSalary,
    MaximumSalary,
    Description,
    CvScreeningSetting,
    CvQuestions,
    AiScreeningSetting,
    AiQuestions,
}

impl FormField {
    /// Wire name of the field in the career record.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::JobTitle => "jobTitle",
            FormField::EmploymentType => "employmentType",
            FormField::WorkSetup => "workSetup",
            FormField::MinimumSalary => "minimumSalary",
            FormField::MaximumSalary => "maximumSalary",
            FormField::Description => "description",
            FormField::CvScreeningSetting => "cvScreeningSetting",
            FormField::CvQuestions => "cvQuestions",
            FormField::AiScreeningSetting => "aiScreeningSetting",
            FormField::AiQuestions => "aiQuestions",
        }
    }

    pub fn is_salary(&self) -> bool {
        matches!(self, FormField::MinimumSalary | FormField::MaximumSalary)
    }
}

/// Live field values plus per-field errors and a change signal.
///
/// Every mutation goes through [`FormState::update`], which bumps the
/// revision and raises the dirty flag; the owner drains the flag with
/// [`FormState::take_dirty`] to arm its autosave timer.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: CareerDraft,
    errors: BTreeMap<FormField, String>,
    revision: u64,
    dirty: bool,
}

impl FormState {
    pub fn new(values: CareerDraft) -> Self {
        FormState {
            values,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &CareerDraft {
        &self.values
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&mut CareerDraft),
    {
        f(&mut self.values);
        self.revision += 1;
        self.dirty = true;
    }

    /// Replace all values. Resets do not count as user changes.
    pub fn reset(&mut self, values: CareerDraft) {
        self.values = values;
        self.errors.clear();
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn set_error(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear_error(&mut self, field: FormField) {
        self.errors.remove(&field);
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<FormField, String> {
        &self.errors
    }

    /// First invalid field in declaration order, for focusing.
    pub fn first_error(&self) -> Option<FormField> {
        self.errors.keys().next().copied()
    }
}
