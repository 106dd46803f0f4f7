pub mod api;
pub mod career;
pub mod cli;
pub mod draft;
pub mod error;
pub mod form;
pub mod questions;
pub mod trace;
pub mod validate;
pub mod wizard;
