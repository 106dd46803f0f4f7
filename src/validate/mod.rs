pub mod schema;
pub mod step_validator;
