use serde::Serialize;
use serde_json::Value;

use crate::career::career_model::CareerDraft;
use crate::error::WizardError;

pub const DRAFT_VERSION: u32 = 1;

/// Storage slot shared by every not-yet-persisted career.
pub const NEW_RECORD_KEY: &str = "career_draft";

/// `career_<id>` for a persisted record, the shared new-record slot otherwise.
pub fn storage_key(record_id: Option<&str>) -> String {
    match record_id.filter(|id| !id.is_empty()) {
        Some(id) => format!("career_{}", id),
        None => NEW_RECORD_KEY.to_string(),
    }
}

/// The persisted unit: draft data paired with the wizard step.
#[derive(Debug, Serialize)]
pub struct DraftEnvelope<'a> {
    pub version: u32,
    pub data: &'a CareerDraft,
    pub step: usize,
}

impl<'a> DraftEnvelope<'a> {
    pub fn new(data: &'a CareerDraft, step: usize) -> Self {
        DraftEnvelope {
            version: DRAFT_VERSION,
            data,
            step,
        }
    }

    pub fn to_json(&self) -> Result<String, WizardError> {
        serde_json::to_string(self).map_err(|source| WizardError::JsonSerialize {
            context: "draft envelope".into(),
            source,
        })
    }
}

/// What was found at a storage key.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredDraft {
    Envelope {
        version: u64,
        data: CareerDraft,
        step: Option<usize>,
    },
    /// Pre-envelope drafts stored the flat record with no step.
    Legacy(CareerDraft),
}

impl StoredDraft {
    pub fn data(&self) -> &CareerDraft {
        match self {
            StoredDraft::Envelope { data, .. } => data,
            StoredDraft::Legacy(data) => data,
        }
    }

    pub fn step(&self) -> Option<usize> {
        match self {
            StoredDraft::Envelope { step, .. } => *step,
            StoredDraft::Legacy(_) => None,
        }
    }

    pub fn into_parts(self) -> (CareerDraft, Option<usize>) {
        match self {
            StoredDraft::Envelope { data, step, .. } => (data, step),
            StoredDraft::Legacy(data) => (data, None),
        }
    }
}

/// Parse a stored string into an envelope or a legacy flat draft.
pub fn parse_stored(raw: &str) -> Result<StoredDraft, WizardError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| WizardError::JsonParse {
        context: "stored draft".into(),
        source,
    })?;

    let envelope_parts = match &value {
        Value::Object(map) => map.get("data").map(|data| {
            (
                data.clone(),
                map.get("version").and_then(Value::as_u64),
                map.get("step").and_then(Value::as_u64),
            )
        }),
        _ => None,
    };

    match envelope_parts {
        Some((data, version, step)) => {
            let data: CareerDraft =
                serde_json::from_value(data).map_err(|source| WizardError::JsonParse {
                    context: "draft envelope data".into(),
                    source,
                })?;
            Ok(StoredDraft::Envelope {
                version: version.unwrap_or(DRAFT_VERSION as u64),
                data,
                step: step.map(|s| s as usize),
            })
        }
        None => {
            let data: CareerDraft =
                serde_json::from_value(value).map_err(|source| WizardError::JsonParse {
                    context: "legacy draft".into(),
                    source,
                })?;
            Ok(StoredDraft::Legacy(data))
        }
    }
}
