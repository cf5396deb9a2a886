pub mod types;
pub mod sim;
