//! Bundled translation resource loading.

use std::collections::HashMap;
use std::future::Future;
use std::path::{
    Path,
    PathBuf,
};

use globset::Glob;
use ignore::WalkBuilder;
use serde_json::Value;
use unic_langid::LanguageIdentifier;

use super::error::LoaderError;
use super::translation::parse_document;
use crate::locale::{
    Locale,
    SupportedLocale,
};

/// Source of raw translation documents.
///
/// A locale that cannot be loaded yields `None`; failures are never
/// propagated to the caller.
pub trait ResourceLoader: Send + Sync {
    /// Load the nested document for `locale`.
    fn load(&self, locale: &Locale) -> impl Future<Output = Option<Value>> + Send;
}

/// Loads `<languageCode>.json` files from a resource directory.
///
/// A region-specific file (`en-US.json`) is preferred when present, then the
/// language file (`en.json`).
#[derive(Debug, Clone)]
pub struct FsResourceLoader {
    /// Directory holding the per-locale files
    dir: PathBuf,
}

impl FsResourceLoader {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Candidate file paths for a locale, most specific first.
    fn candidates(&self, locale: &Locale) -> Vec<PathBuf> {
        let mut paths = vec![self.dir.join(format!("{locale}.json"))];
        if locale.as_str() != locale.language() {
            paths.push(self.dir.join(format!("{}.json", locale.language())));
        }
        paths
    }
}

impl ResourceLoader for FsResourceLoader {
    async fn load(&self, locale: &Locale) -> Option<Value> {
        for path in self.candidates(locale) {
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    tracing::warn!("Failed to read translation file {:?}: {}", path, e);
                    return None;
                }
            };

            tracing::debug!(locale = %locale, path = %path.display(), "Loaded translation file");
            return parse_document(&content, &path.to_string_lossy());
        }

        tracing::warn!(locale = %locale, dir = %self.dir.display(), "No translation file found");
        None
    }
}

/// Serves documents held in memory, keyed by canonical locale.
///
/// Falls back to the primary language the same way [`FsResourceLoader`] does.
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceLoader {
    /// Documents by canonical locale id
    documents: HashMap<String, Value>,
}

impl MemoryResourceLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document for a locale.
    #[must_use]
    pub fn with_document(mut self, locale: &str, document: Value) -> Self {
        self.documents.insert(Locale::new(locale).as_str().to_string(), document);
        self
    }

    /// Register a document from JSON text; malformed text registers nothing.
    #[must_use]
    pub fn with_json(self, locale: &str, text: &str) -> Self {
        match parse_document(text, locale) {
            Some(document) => self.with_document(locale, document),
            None => self,
        }
    }
}

impl ResourceLoader for MemoryResourceLoader {
    async fn load(&self, locale: &Locale) -> Option<Value> {
        self.documents
            .get(locale.as_str())
            .or_else(|| self.documents.get(locale.language()))
            .cloned()
    }
}

/// Detect a locale from a resource file name.
///
/// Only file stems naming a supported language are treated as locales, so
/// `common.json` or `ui.json` is not mistaken for one.
///
/// # Examples
/// - `translations/en.json` → `en`
/// - `translations/vi_VN.json` → `vi-VN`
/// - `translations/ui.json` → `None`
#[must_use]
pub fn detect_locale_from_path(file_path: &Path) -> Option<Locale> {
    let stem = file_path.file_stem()?.to_string_lossy();
    let langid: LanguageIdentifier = stem.parse().ok()?;
    let locale = Locale::new(&langid.to_string());
    SupportedLocale::is_supported(&locale).then_some(locale)
}

/// Walk the resource directory and list bundled locale files.
///
/// Files are matched against `pattern` relative to `dir`. The result is
/// sorted by locale.
pub fn discover_locales(dir: &Path, pattern: &str) -> Result<Vec<(Locale, PathBuf)>, LoaderError> {
    if !dir.is_dir() {
        return Err(LoaderError::MissingDirectory(dir.display().to_string()));
    }

    let matcher = Glob::new(pattern)
        .map_err(|source| LoaderError::InvalidPattern { pattern: pattern.to_string(), source })?
        .compile_matcher();

    let mut found = Vec::new();
    for result in WalkBuilder::new(dir).hidden(true).git_ignore(false).follow_links(false).build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(dir) else {
            continue;
        };
        if !matcher.is_match(relative_path) {
            continue;
        }

        if let Some(locale) = detect_locale_from_path(path) {
            found.push((locale, path.to_path_buf()));
        }
    }

    found.sort();
    Ok(found)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    #[case("/app/translations/en.json", Some("en"))]
    #[case("/app/translations/vi.json", Some("vi"))]
    #[case("/app/translations/vi_VN.json", Some("vi-VN"))]
    #[case("/app/translations/EN-us.json", Some("en-US"))]
    #[case("/app/translations/common.json", None)]
    #[case("/app/translations/translation.json", None)]
    #[case("/app/translations/app.json", None)]
    #[case("/app/translations/ui.json", None)]
    #[case("/app/translations/ja.json", None)]
    fn test_detect_locale_from_path(#[case] path: &str, #[case] expected: Option<&str>) {
        let result = detect_locale_from_path(Path::new(path));
        assert_eq!(result.as_ref().map(Locale::as_str), expected);
    }

    #[tokio::test]
    async fn fs_loader_reads_language_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.json"), r#"{"hello": "Hello"}"#).unwrap();

        let loader = FsResourceLoader::new(temp_dir.path());
        let document = loader.load(&Locale::new("en-US")).await;

        assert_eq!(document, Some(json!({"hello": "Hello"})));
    }

    #[tokio::test]
    async fn fs_loader_prefers_region_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.json"), r#"{"color": "colour"}"#).unwrap();
        fs::write(temp_dir.path().join("en-US.json"), r#"{"color": "color"}"#).unwrap();

        let loader = FsResourceLoader::new(temp_dir.path());
        let document = loader.load(&Locale::new("en_us")).await;

        assert_eq!(document, Some(json!({"color": "color"})));
    }

    #[tokio::test]
    async fn fs_loader_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();

        let loader = FsResourceLoader::new(temp_dir.path());

        assert!(loader.load(&Locale::new("vi")).await.is_none());
    }

    #[tokio::test]
    async fn fs_loader_malformed_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("vi.json"), "{ invalid").unwrap();

        let loader = FsResourceLoader::new(temp_dir.path());

        assert!(loader.load(&Locale::new("vi")).await.is_none());
    }

    #[tokio::test]
    async fn memory_loader_falls_back_to_language() {
        let loader = MemoryResourceLoader::new().with_document("vi", json!({"hello": "Xin chào"}));

        assert_eq!(loader.load(&Locale::new("vi-VN")).await, Some(json!({"hello": "Xin chào"})));
        assert!(loader.load(&Locale::new("en")).await.is_none());
    }

    #[tokio::test]
    async fn memory_loader_skips_malformed_json() {
        let loader = MemoryResourceLoader::new().with_json("en", "not json");

        assert!(loader.load(&Locale::new("en")).await.is_none());
    }

    #[googletest::test]
    fn discover_locales_lists_locale_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("vi.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("en.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("common.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("ui.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("README.md"), "").unwrap();

        let found = discover_locales(temp_dir.path(), "*.json").unwrap();
        let locales: Vec<String> = found.iter().map(|(locale, _)| locale.to_string()).collect();

        expect_that!(locales, elements_are![eq("en"), eq("vi")]);
    }

    #[googletest::test]
    fn discover_locales_rejects_invalid_pattern() {
        let temp_dir = TempDir::new().unwrap();

        let result = discover_locales(temp_dir.path(), "*.{json");

        expect_that!(
            result.map_err(|e| e.to_string()),
            err(contains_substring("Invalid resource pattern"))
        );
    }

    #[googletest::test]
    fn discover_locales_missing_directory() {
        let temp_dir = TempDir::new().unwrap();

        let result = discover_locales(&temp_dir.path().join("missing"), "*.json");

        expect_that!(
            result.map_err(|e| e.to_string()),
            err(contains_substring("Resource directory not found"))
        );
    }
}
