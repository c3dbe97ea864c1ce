//! Key resolution over a [`TranslationSet`].
//!
//! Lookups walk an ordered chain of tiers (requested locale, then fallback
//! locale). Single-key resolution ends with the key literal itself, so a
//! missing translation shows up as its key instead of blank text. List
//! resolution has no literal step: the scan stops at the first index that no
//! tier provides.

use crate::input::translation::join_key;
use crate::ir::TranslationSet;

/// One lookup source within a [`TranslationSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Entries of the requested locale
    Entries,
    /// Entries of the fallback locale
    Fallback,
}

impl Tier {
    /// Look the key up in this tier only.
    #[must_use]
    pub fn get<'a>(self, set: &'a TranslationSet, key: &str) -> Option<&'a str> {
        let entries = match self {
            Self::Entries => set.entries(),
            Self::Fallback => set.fallback_entries(),
        };
        entries.get(key).map(String::as_str)
    }
}

/// Ordered lookup policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackChain {
    /// Tiers consulted in order; the first hit wins
    tiers: &'static [Tier],
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl FallbackChain {
    /// Requested locale first, then the fallback locale.
    pub const STANDARD: Self = Self { tiers: &[Tier::Entries, Tier::Fallback] };

    /// Requested locale only.
    pub const PRIMARY_ONLY: Self = Self { tiers: &[Tier::Entries] };

    #[must_use]
    pub const fn new(tiers: &'static [Tier]) -> Self {
        Self { tiers }
    }

    #[must_use]
    pub const fn tiers(&self) -> &'static [Tier] {
        self.tiers
    }

    /// First value found for `key` across the tiers.
    #[must_use]
    pub fn lookup<'a>(&self, set: &'a TranslationSet, key: &str) -> Option<&'a str> {
        self.tiers.iter().find_map(|tier| tier.get(set, key))
    }

    /// Resolve `key`, returning the key literal when no tier has it.
    #[must_use]
    pub fn resolve(&self, set: &TranslationSet, key: &str) -> String {
        self.lookup(set, key).map_or_else(
            || {
                tracing::trace!(locale = %set.locale(), key, "Missing translation");
                key.to_string()
            },
            str::to_string,
        )
    }

    /// Resolve the list stored under `key` (`key.0`, `key.1`, ...).
    ///
    /// Indices are probed from zero and the scan stops at the first index
    /// missing from every tier, so a gap truncates the list.
    #[must_use]
    pub fn resolve_list(&self, set: &TranslationSet, key: &str) -> Vec<String> {
        (0_usize..)
            .map_while(|index| self.lookup(set, &join_key(key, &index.to_string())))
            .map(str::to_string)
            .collect()
    }
}

/// Resolve `key` against `set` with the standard chain.
#[must_use]
pub fn resolve(set: &TranslationSet, key: &str) -> String {
    FallbackChain::STANDARD.resolve(set, key)
}

/// Resolve the list under `key` against `set` with the standard chain.
#[must_use]
pub fn resolve_list(set: &TranslationSet, key: &str) -> Vec<String> {
    FallbackChain::STANDARD.resolve_list(set, key)
}
