pub mod interview;
pub mod prescreen;
