//! Application settings: `app-shell.json`, environment overrides and validation.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    ENV_LOCALE,
    ENV_LOG_DIR,
    ENV_RESOURCES_DIR,
    ShellSettings,
    ValidationError,
};
