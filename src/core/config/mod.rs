pub mod defaults;
pub mod service;
pub mod validation;

pub use service::{AppConfig, ConfigError};
pub use validation::validate_config;
