use crate::career::career_model::CareerDraft;
use crate::draft::envelope::{DraftEnvelope, StoredDraft, parse_stored, storage_key};
use crate::draft::store::KeyValueStore;
use crate::error::WizardError;

/// Result of reading the draft slot on mount.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftLoad {
    Missing,
    Restored(StoredDraft),
    /// The slot held something unreadable and was cleared.
    Discarded { reason: String },
}

/// Draft persistence for one career, bound to its storage key.
pub struct DraftStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl DraftStore {
    pub fn new(backend: Box<dyn KeyValueStore>, record_id: Option<&str>) -> Self {
        DraftStore {
            backend,
            key: storage_key(record_id),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn save(&self, data: &CareerDraft, step: usize) -> Result<(), WizardError> {
        let json = DraftEnvelope::new(data, step).to_json()?;
        self.backend.set(&self.key, &json)
    }

    pub fn load(&self) -> Result<DraftLoad, WizardError> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(DraftLoad::Missing);
        };

        match parse_stored(&raw) {
            Ok(stored) => Ok(DraftLoad::Restored(stored)),
            Err(e) => {
                self.backend.remove(&self.key)?;
                Ok(DraftLoad::Discarded {
                    reason: e.to_string(),
                })
            }
        }
    }

    pub fn clear(&self) -> Result<(), WizardError> {
        self.backend.remove(&self.key)
    }
}
