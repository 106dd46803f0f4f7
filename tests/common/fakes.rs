use std::cell::{Cell, RefCell};
use std::rc::Rc;

use career_wizard::{
    api::{client::CareerApi, payload::SubmissionPayload},
    draft::store::{KeyValueStore, MemoryStore},
    error::WizardError,
    wizard::wizard_model::WizardMode,
};

/// Memory store that counts writes per key.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub writes: RefCell<Vec<(String, String)>>,
    pub removals: Cell<usize>,
}

impl CountingStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn seeded(key: &str, raw: &str) -> Rc<Self> {
        let store = Self::default();
        store.inner.set(key, raw).unwrap();
        Rc::new(store)
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }

    pub fn last_write(&self) -> Option<(String, String)> {
        self.writes.borrow().last().cloned()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).unwrap()
    }
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>, WizardError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WizardError> {
        self.inner.set(key, value)?;
        self.writes
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), WizardError> {
        self.removals.set(self.removals.get() + 1);
        self.inner.remove(key)
    }
}

/// Captures every submission as serialized JSON.
#[derive(Default)]
pub struct RecordingApi {
    pub calls: RefCell<Vec<(WizardMode, serde_json::Value)>>,
    /// When set, every call is rejected with this status
    pub reject_with: Cell<Option<u16>>,
}

impl RecordingApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn rejecting(status: u16) -> Rc<Self> {
        let api = Self::default();
        api.reject_with.set(Some(status));
        Rc::new(api)
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn last_payload(&self) -> serde_json::Value {
        self.calls.borrow().last().expect("no submission").1.clone()
    }
}

impl CareerApi for RecordingApi {
    fn submit(&self, mode: WizardMode, payload: &SubmissionPayload) -> Result<(), WizardError> {
        let json = serde_json::to_value(payload).unwrap();
        self.calls.borrow_mut().push((mode, json));
        match self.reject_with.get() {
            Some(status) => Err(WizardError::SubmissionRejected {
                endpoint: career_wizard::api::client::endpoint_path(mode).to_string(),
                status,
            }),
            None => Ok(()),
        }
    }
}
