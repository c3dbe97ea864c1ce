//! Reading `app-shell.json` from the application root.

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    ShellSettings,
};

/// Name of the settings file in the application root.
pub const CONFIG_FILE_NAME: &str = "app-shell.json";

/// Read the settings file under `app_root`.
///
/// A missing file is `Ok(None)`; the caller falls back to defaults. Any other
/// read failure, or JSON that does not describe [`ShellSettings`], is an error
/// so a broken config never silently turns into defaults.
pub(super) fn read_settings_file(app_root: &Path) -> Result<Option<ShellSettings>, ConfigError> {
    let path = app_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE_NAME, app_root);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!("Reading settings from {:?}", path);
    serde_json::from_str(&content).map(Some).map_err(ConfigError::from)
}
