pub mod career_model;
pub mod ids;
pub mod sanitize;
pub mod wire;
