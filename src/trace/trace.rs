use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::wizard::wizard_model::Step;

/// One JSONL line describing something the wizard did.
#[derive(Debug, Serialize)]
pub struct WizardTrace {
    pub timestamp_ms: u128,
    pub step: usize,
    pub step_title: &'static str,

    pub event: String,

    pub storage_key: Option<String>,
    pub detail: Option<String>,
    pub error: Option<String>,
}

impl WizardTrace {
    pub fn now(step: Step, event: impl ToString) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step: step.index(),
            step_title: step.title(),
            event: event.to_string(),
            storage_key: None,
            detail: None,
            error: None,
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.storage_key = Some(key.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
