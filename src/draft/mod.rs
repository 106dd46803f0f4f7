pub mod draft_store;
pub mod envelope;
pub mod store;
