//! 翻訳サービスの共有状態
//!
//! The active [`TranslationSet`] is held as an `Arc` snapshot inside a
//! `tokio::sync::watch` channel. A locale change builds a complete new set and
//! replaces the snapshot; readers holding the previous `Arc` keep a consistent
//! view until they ask for the current one.

use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use tokio::sync::watch;

use crate::input::loader::ResourceLoader;
use crate::ir::TranslationSet;
use crate::locale::{
    Locale,
    SupportedLocale,
};
use crate::prefs::{
    PreferenceStore,
    PreferenceStoreExt,
};

/// Preference key holding the last activated locale.
pub const LOCALE_KEY: &str = "locale";

/// UI-facing translation lookup with locale switching.
pub struct LocaleService<L> {
    /// Source of raw translation documents
    loader: L,
    /// Locale backing up missing keys
    fallback_locale: Locale,
    /// Where the chosen locale is persisted, if anywhere
    prefs: Option<Arc<dyn PreferenceStore>>,
    /// Current snapshot, published to subscribers
    current: watch::Sender<Arc<TranslationSet>>,
    /// Generation of the most recent `set_locale` request
    latest_request: Mutex<u64>,
}

impl<L: ResourceLoader> LocaleService<L> {
    /// Create a service with an empty snapshot for the fallback locale.
    ///
    /// Call [`start`](Self::start) or [`set_locale`](Self::set_locale) to load
    /// resources.
    pub fn new(loader: L, fallback_locale: Locale) -> Self {
        let (current, _) = watch::channel(Arc::new(TranslationSet::empty(fallback_locale.clone())));
        Self { loader, fallback_locale, prefs: None, current, latest_request: Mutex::new(0) }
    }

    /// Persist locale changes to `prefs` and restore from it on start.
    #[must_use]
    pub fn with_preferences(mut self, prefs: Arc<dyn PreferenceStore>) -> Self {
        self.prefs = Some(prefs);
        self
    }

    /// Activate the persisted locale, or `initial` when none was persisted.
    pub async fn start(&self, initial: &Locale) -> Arc<TranslationSet> {
        let persisted = self.prefs.as_ref().and_then(|prefs| prefs.get::<String>(LOCALE_KEY));
        let locale_id = persisted.as_deref().unwrap_or_else(|| initial.as_str());
        tracing::debug!(locale = locale_id, restored = persisted.is_some(), "Starting locale service");
        self.set_locale(locale_id).await
    }

    /// Build the translation set for `locale_id` without publishing it.
    pub async fn load_set(&self, locale_id: &str) -> TranslationSet {
        let locale = Locale::new(locale_id);
        if !SupportedLocale::is_supported(&locale) {
            tracing::warn!(locale = %locale, "Activating unsupported locale, lookups will fall back");
        }

        if locale == self.fallback_locale {
            let document = self.loader.load(&locale).await;
            return TranslationSet::activate(
                locale.as_str(),
                document.as_ref(),
                &self.fallback_locale,
                None,
            );
        }

        let (requested, fallback) =
            futures::future::join(self.loader.load(&locale), self.loader.load(&self.fallback_locale))
                .await;
        TranslationSet::activate(
            locale.as_str(),
            requested.as_ref(),
            &self.fallback_locale,
            fallback.as_ref(),
        )
    }

    /// Switch the active locale and publish the new snapshot.
    ///
    /// When switches overlap, only the most recently requested one is
    /// published and persisted. A superseded request still returns the set it
    /// built, but that set never becomes current.
    pub async fn set_locale(&self, locale_id: &str) -> Arc<TranslationSet> {
        let generation = {
            let mut latest = self.latest_request.lock().unwrap_or_else(PoisonError::into_inner);
            *latest += 1;
            *latest
        };

        let set = Arc::new(self.load_set(locale_id).await);
        self.publish(generation, &set);
        set
    }

    /// Publish `set` if `generation` is still the newest request.
    fn publish(&self, generation: u64, set: &Arc<TranslationSet>) {
        let latest = self.latest_request.lock().unwrap_or_else(PoisonError::into_inner);
        if *latest != generation {
            tracing::debug!(locale = %set.locale(), "Discarding superseded locale switch");
            return;
        }

        self.current.send_replace(Arc::clone(set));
        tracing::info!(locale = %set.locale(), keys = set.entries().len(), "Locale activated");

        if let Some(prefs) = &self.prefs
            && let Err(e) = prefs.save(LOCALE_KEY, set.locale().as_str())
        {
            tracing::warn!("Failed to persist locale: {}", e);
        }

        // Held until persisted so a newer request cannot interleave.
        drop(latest);
    }
}

impl<L> LocaleService<L> {
    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TranslationSet> {
        Arc::clone(&self.current.borrow())
    }

    /// Receive every snapshot published after this call.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<TranslationSet>> {
        self.current.subscribe()
    }

    /// Active canonical locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.current.borrow().locale().clone()
    }

    #[must_use]
    pub const fn fallback_locale(&self) -> &Locale {
        &self.fallback_locale
    }

    #[must_use]
    pub const fn supported_locales(&self) -> &'static [SupportedLocale] {
        SupportedLocale::ALL
    }

    /// Resolve `key` against the current snapshot.
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        self.current.borrow().get(key)
    }

    /// Resolve the list under `key` against the current snapshot.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.current.borrow().get_list(key)
    }
}

impl<L> std::fmt::Debug for LocaleService<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleService")
            .field("locale", &self.locale())
            .field("fallback_locale", &self.fallback_locale)
            .field("prefs", &self.prefs.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use googletest::prelude::*;
    use serde_json::{
        Value,
        json,
    };

    use super::*;
    use crate::input::loader::MemoryResourceLoader;
    use crate::prefs::MemoryStore;

    /// Delays loading one locale to force overlapping switches.
    struct DelayedLoader {
        /// Documents served after the delay
        inner: MemoryResourceLoader,
        /// Locale whose load is delayed
        slow: Locale,
        /// How long the slow load takes
        delay: Duration,
    }

    impl ResourceLoader for DelayedLoader {
        async fn load(&self, locale: &Locale) -> Option<Value> {
            if *locale == self.slow {
                tokio::time::sleep(self.delay).await;
            }
            self.inner.load(locale).await
        }
    }

    fn loader() -> MemoryResourceLoader {
        MemoryResourceLoader::new()
            .with_document(
                "en",
                json!({
                    "home": {"title": "Home", "subtitle": "Welcome"},
                    "tips": ["Swipe", "Tap"]
                }),
            )
            .with_document("vi", json!({"home": {"title": "Trang chủ"}}))
    }

    fn service() -> LocaleService<MemoryResourceLoader> {
        LocaleService::new(loader(), Locale::new("en"))
    }

    #[googletest::test]
    fn new_service_starts_empty() {
        let service = service();

        expect_that!(service.locale().as_str(), eq("en"));
        expect_that!(service.get("home.title"), eq("home.title"));
        expect_that!(service.supported_locales().len(), eq(2));
    }

    #[tokio::test]
    async fn set_locale_resolves_with_fallback() {
        let service = service();

        service.set_locale("VI").await;

        assert_eq!(service.locale().as_str(), "vi");
        assert_eq!(service.get("home.title"), "Trang chủ");
        assert_eq!(service.get("home.subtitle"), "Welcome");
        assert_eq!(service.get("home.missing"), "home.missing");
        assert_eq!(service.get_list("tips"), vec!["Swipe".to_string(), "Tap".to_string()]);
    }

    #[tokio::test]
    async fn fallback_locale_is_loaded_once_and_shared() {
        let service = service();

        let set = service.set_locale("en").await;

        assert!(set.shares_fallback());
        assert_eq!(set.get("home.title"), "Home");
    }

    #[tokio::test]
    async fn old_snapshot_stays_readable_after_switch() {
        let service = service();
        let english = service.set_locale("en").await;

        service.set_locale("vi").await;

        assert_eq!(english.get("home.title"), "Home");
        assert_eq!(service.snapshot().get("home.title"), "Trang chủ");
    }

    #[tokio::test]
    async fn subscribers_see_new_snapshots() {
        let service = service();
        let mut receiver = service.subscribe();

        service.set_locale("vi").await;

        assert!(receiver.has_changed().unwrap());
        let snapshot = receiver.borrow_and_update().clone();
        assert_eq!(snapshot.locale().as_str(), "vi");
    }

    #[tokio::test]
    async fn unsupported_locale_falls_back() {
        let service = service();

        service.set_locale("ja-JP").await;

        assert_eq!(service.locale().as_str(), "ja-JP");
        assert!(service.snapshot().entries().is_empty());
        assert_eq!(service.get("home.title"), "Home");
    }

    #[tokio::test]
    async fn start_restores_persisted_locale() {
        let prefs: Arc<dyn PreferenceStore> = Arc::new(MemoryStore::new());
        let first = service().with_preferences(Arc::clone(&prefs));
        first.set_locale("vi").await;

        let second = service().with_preferences(prefs);
        second.start(&Locale::new("en")).await;

        assert_eq!(second.locale().as_str(), "vi");
    }

    #[tokio::test]
    async fn start_uses_initial_without_persisted_locale() {
        let prefs: Arc<dyn PreferenceStore> = Arc::new(MemoryStore::new());
        let service = service().with_preferences(Arc::clone(&prefs));

        service.start(&Locale::new("vi")).await;

        assert_eq!(service.locale().as_str(), "vi");
        assert_eq!(prefs.get::<String>(LOCALE_KEY), Some("vi".to_string()));
    }

    #[tokio::test]
    async fn latest_locale_request_wins_over_slower_earlier_one() {
        let prefs: Arc<dyn PreferenceStore> = Arc::new(MemoryStore::new());
        let loader = DelayedLoader {
            inner: loader(),
            slow: Locale::new("vi"),
            delay: Duration::from_millis(200),
        };
        let service =
            LocaleService::new(loader, Locale::new("en")).with_preferences(Arc::clone(&prefs));

        let (slow, fast) = tokio::join!(service.set_locale("vi"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            service.set_locale("en").await
        });

        assert_eq!(slow.locale().as_str(), "vi");
        assert_eq!(fast.locale().as_str(), "en");
        assert_eq!(service.locale().as_str(), "en");
        assert_eq!(service.get("home.title"), "Home");
        assert_eq!(prefs.get::<String>(LOCALE_KEY), Some("en".to_string()));
    }
}
