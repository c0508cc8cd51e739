mod app;
mod core;

pub use app::{AppConfig, AppConfigError, ConsentConfig, LoggingConfig};
pub use core::Config;
