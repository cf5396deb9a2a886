pub mod store;
pub mod gravity;
pub mod time;
