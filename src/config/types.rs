use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::{
    Locale,
    SupportedLocale,
};

/// Environment variable overriding the initial locale.
pub const ENV_LOCALE: &str = "APP_SHELL_LOCALE";
/// Environment variable overriding the resource directory.
pub const ENV_RESOURCES_DIR: &str = "APP_SHELL_RESOURCES_DIR";
/// Environment variable overriding the log directory.
pub const ENV_LOG_DIR: &str = "APP_SHELL_LOG_DIR";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "fallbackLocale")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShellSettings {
    /// Directory of `<languageCode>.json` files, relative to the app root.
    pub resources_dir: String,

    /// Glob used to discover bundled locale files inside `resources_dir`.
    pub resource_pattern: String,

    /// Locale whose strings back up missing keys.
    pub fallback_locale: String,

    /// Locale activated on first start. Defaults to `fallback_locale`.
    pub initial_locale: Option<String>,

    /// Preferences file, relative to the app root.
    pub preferences_file: String,

    /// Directory for rolling log files. Logs go to stderr only when unset.
    pub log_dir: Option<String>,
}

impl ShellSettings {
    /// Apply environment overrides on top of file settings.
    ///
    /// `lookup` is usually `std::env::var`; empty values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(locale) = get(ENV_LOCALE) {
            tracing::debug!("Overriding initial locale from {}: {}", ENV_LOCALE, locale);
            self.initial_locale = Some(locale);
        }
        if let Some(dir) = get(ENV_RESOURCES_DIR) {
            tracing::debug!("Overriding resources directory from {}: {}", ENV_RESOURCES_DIR, dir);
            self.resources_dir = dir;
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            self.log_dir = Some(dir);
        }
    }

    #[must_use]
    pub fn fallback(&self) -> Locale {
        Locale::new(&self.fallback_locale)
    }

    /// Locale to activate when nothing has been persisted yet.
    #[must_use]
    pub fn initial(&self) -> Locale {
        self.initial_locale.as_deref().map_or_else(|| self.fallback(), Locale::new)
    }

    /// # Errors
    /// - Required field is empty
    /// - Fallback locale is not bundled
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.resources_dir.trim().is_empty() {
            errors.push(ValidationError::new(
                "resourcesDir",
                "The directory cannot be empty. Example: \"assets/translations\"",
            ));
        }

        if self.resource_pattern.is_empty() {
            errors.push(ValidationError::new(
                "resourcePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.resource_pattern) {
            errors.push(ValidationError::new(
                "resourcePattern",
                format!("Invalid glob pattern '{}': {e}", self.resource_pattern),
            ));
        }

        if self.fallback_locale.trim().is_empty() {
            errors.push(ValidationError::new(
                "fallbackLocale",
                "The fallback locale cannot be empty. Example: \"en\"",
            ));
        } else if !SupportedLocale::is_supported(&self.fallback()) {
            errors.push(ValidationError::new(
                "fallbackLocale",
                format!(
                    "'{}' is not a supported locale. Supported: {}",
                    self.fallback_locale,
                    supported_list()
                ),
            ));
        }

        if let Some(initial) = &self.initial_locale
            && initial.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "initialLocale",
                "The locale cannot be empty. Please specify a locale (e.g., \"vi\"), or remove this field",
            ));
        }

        if self.preferences_file.trim().is_empty() {
            errors.push(ValidationError::new(
                "preferencesFile",
                "The path cannot be empty. Example: \".app-shell/preferences.json\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Comma-separated supported locale codes for messages.
fn supported_list() -> String {
    SupportedLocale::ALL.iter().map(|locale| locale.code()).collect::<Vec<_>>().join(", ")
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            resources_dir: "assets/translations".to_string(),
            resource_pattern: "*.json".to_string(),
            fallback_locale: SupportedLocale::En.code().to_string(),
            initial_locale: None,
            preferences_file: ".app-shell/preferences.json".to_string(),
            log_dir: None,
        }
    }
}
