pub mod controller;
pub mod timer;
pub mod wizard_model;
