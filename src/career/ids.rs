use std::cell::Cell;

use uuid::Uuid;

/// Source of identifiers for entities created on the client.
pub trait IdSource {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs, the default for live wizards.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Predictable `<prefix>-<n>` ids for fixtures and reproducible runs.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: Cell<u64>,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        SequentialIds {
            prefix: prefix.to_string(),
            counter: Cell::new(0),
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter.get()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        format!("{}-{}", self.prefix, n)
    }
}

impl<T: IdSource + ?Sized> IdSource for std::rc::Rc<T> {
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}
