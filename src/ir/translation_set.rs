//! Resolved translations for one active locale.

use std::sync::Arc;

use serde_json::Value;

use crate::input::translation::{
    Entries,
    flatten_document,
};
use crate::locale::Locale;
use crate::resolve::FallbackChain;

/// Immutable snapshot of the strings for one requested locale.
///
/// Built once per locale activation and replaced, never mutated, when the
/// active locale changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSet {
    /// Canonicalized locale id
    locale: Locale,

    /// Flattened entries of the requested locale
    entries: Arc<Entries>,

    /// Flattened entries of the fallback locale
    fallback_entries: Arc<Entries>,
}

impl TranslationSet {
    #[must_use]
    pub fn new(locale: Locale, entries: Entries, fallback_entries: Entries) -> Self {
        Self { locale, entries: Arc::new(entries), fallback_entries: Arc::new(fallback_entries) }
    }

    /// A set with no entries; every lookup degrades to the key literal.
    #[must_use]
    pub fn empty(locale: Locale) -> Self {
        Self::new(locale, Entries::new(), Entries::new())
    }

    /// Build the set for `locale_id` from its raw documents.
    ///
    /// Missing or malformed documents are passed as `None` and become empty
    /// mappings. When the requested locale is the fallback locale the document
    /// is flattened once and shared by both tiers.
    #[must_use]
    pub fn activate(
        locale_id: &str,
        requested: Option<&Value>,
        fallback_locale: &Locale,
        fallback: Option<&Value>,
    ) -> Self {
        let locale = Locale::new(locale_id);

        if locale == *fallback_locale {
            let entries = Arc::new(flatten_document(requested.or(fallback)));
            tracing::debug!(locale = %locale, keys = entries.len(), "Activated fallback locale");
            return Self { locale, fallback_entries: Arc::clone(&entries), entries };
        }

        let entries = flatten_document(requested);
        let fallback_entries = flatten_document(fallback);
        tracing::debug!(
            locale = %locale,
            keys = entries.len(),
            fallback_keys = fallback_entries.len(),
            "Activated locale"
        );
        Self::new(locale, entries, fallback_entries)
    }

    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    #[must_use]
    pub fn fallback_entries(&self) -> &Entries {
        &self.fallback_entries
    }

    /// Whether both tiers are backed by the same flattened document.
    #[must_use]
    pub fn shares_fallback(&self) -> bool {
        Arc::ptr_eq(&self.entries, &self.fallback_entries)
    }

    /// Resolve a key with the standard fallback chain.
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        FallbackChain::STANDARD.resolve(self, key)
    }

    /// Resolve a list key with the standard fallback chain.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Vec<String> {
        FallbackChain::STANDARD.resolve_list(self, key)
    }
}
