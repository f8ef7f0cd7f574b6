pub mod config;
pub mod notify;
pub mod protocol;
