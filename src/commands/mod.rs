pub mod common;
pub mod configuration;
pub mod core;

pub use configuration::handle_config;
