//! Locale identifiers and the bundled locale set.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use unic_langid::LanguageIdentifier;

/// Canonicalize a locale identifier.
///
/// Accepts `-` or `_` as the subtag separator and normalizes casing
/// (`EN-us` → `en-US`, `zh_hant_tw` → `zh-Hant-TW`). Identifiers that are not
/// valid language tags are trimmed and lowercased instead of rejected.
#[must_use]
pub fn canonicalize(id: &str) -> String {
    let trimmed = id.trim();
    match trimmed.parse::<LanguageIdentifier>() {
        Ok(langid) => langid.to_string(),
        Err(err) => {
            tracing::debug!(locale = trimmed, %err, "Not a valid language tag, lowercasing");
            trimmed.to_lowercase()
        }
    }
}

/// Canonicalized locale identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(canonicalize(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`en-US` → `en`).
    ///
    /// Bundled resource files are named after this code.
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split_once('-').map_or(self.0.as_str(), |(language, _)| language)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Locale {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

/// Locales the application ships resources for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLocale {
    En,
    Vi,
}

impl SupportedLocale {
    /// Every supported locale, fallback first.
    pub const ALL: &'static [Self] = &[Self::En, Self::Vi];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Vi => "vi",
        }
    }

    #[must_use]
    pub fn locale(self) -> Locale {
        Locale::new(self.code())
    }

    /// Match a locale against the supported set by primary language.
    #[must_use]
    pub fn from_locale(locale: &Locale) -> Option<Self> {
        Self::ALL.iter().copied().find(|supported| supported.code() == locale.language())
    }

    #[must_use]
    pub fn is_supported(locale: &Locale) -> bool {
        Self::from_locale(locale).is_some()
    }
}

impl fmt::Display for SupportedLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
