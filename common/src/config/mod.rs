mod error;
mod file;
mod format;
mod resolve;

// Re-export the configuration entry points
pub use error::SettingsError;
pub use resolve::{resolve_config, ApiConfig, Overrides};
