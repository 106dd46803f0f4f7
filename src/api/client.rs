use std::rc::Rc;

use crate::api::payload::SubmissionPayload;
use crate::error::WizardError;
use crate::wizard::wizard_model::WizardMode;

pub const ADD_CAREER_PATH: &str = "/api/add-career";
pub const UPDATE_CAREER_PATH: &str = "/api/update-career";

pub fn endpoint_path(mode: WizardMode) -> &'static str {
    match mode {
        WizardMode::Add => ADD_CAREER_PATH,
        WizardMode::Edit => UPDATE_CAREER_PATH,
    }
}

/// Remote create/update surface. Only a 200 answer counts as success.
pub trait CareerApi {
    fn submit(&self, mode: WizardMode, payload: &SubmissionPayload) -> Result<(), WizardError>;
}

impl<T: CareerApi + ?Sized> CareerApi for Rc<T> {
    fn submit(&self, mode: WizardMode, payload: &SubmissionPayload) -> Result<(), WizardError> {
        (**self).submit(mode, payload)
    }
}

// ============================================================================
// HTTP backend
// ============================================================================

pub struct HttpCareerApi {
    pub base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpCareerApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn url_for(&self, mode: WizardMode) -> String {
        format!("{}{}", self.base_url, endpoint_path(mode))
    }
}

impl CareerApi for HttpCareerApi {
    fn submit(&self, mode: WizardMode, payload: &SubmissionPayload) -> Result<(), WizardError> {
        let endpoint = self.url_for(mode);
        let response = self
            .client
            .post(&endpoint)
            .json(payload)
            .send()
            .map_err(|source| WizardError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(WizardError::SubmissionRejected { endpoint, status });
        }
        Ok(())
    }
}
