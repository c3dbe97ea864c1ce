//! ロケールサービスの結合テスト

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use app_shell::config::{
    CONFIG_FILE_NAME,
    ConfigManager,
};
use app_shell::input::FsResourceLoader;
use app_shell::prefs::{
    JsonFileStore,
    PreferenceStore,
};
use app_shell::{
    Locale,
    LocaleService,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_app(root: &Path) {
    fs::write(
        root.join(CONFIG_FILE_NAME),
        r#"{"resourcesDir": "translations", "initialLocale": "vi"}"#,
    )
    .unwrap();

    let translations = root.join("translations");
    fs::create_dir_all(&translations).unwrap();
    fs::write(
        translations.join("en.json"),
        r#"{
  "settings": {
    "title": "Settings",
    "haptics": {"label": "Haptic feedback", "modes": ["Off", "Light", "Medium", "Heavy"]}
  },
  "onboarding": {"steps": ["Welcome", "Pick a language", "Done"]}
}"#,
    )
    .unwrap();
    fs::write(
        translations.join("vi.json"),
        r#"{
  "settings": {
    "title": "Cài đặt",
    "haptics": {"modes": ["Tắt", "Nhẹ", "Vừa", "Mạnh"]}
  },
  "onboarding": {"steps": ["Chào mừng", null, "Xong"]}
}"#,
    )
    .unwrap();
}

fn build_service(config: &ConfigManager) -> LocaleService<FsResourceLoader> {
    let prefs: Arc<dyn PreferenceStore> =
        Arc::new(JsonFileStore::open(config.preferences_path()).unwrap());
    LocaleService::new(
        FsResourceLoader::new(config.resources_path()),
        config.get_settings().fallback(),
    )
    .with_preferences(prefs)
}

#[tokio::test]
async fn resolves_bundled_translations_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    write_app(temp_dir.path());

    let mut config = ConfigManager::new();
    config.load_settings_with_env(Some(temp_dir.path().to_path_buf()), |_| None).unwrap();
    let service = build_service(&config);

    service.start(&config.get_settings().initial()).await;

    assert_eq!(service.locale(), Locale::new("vi"));
    assert_eq!(service.get("settings.title"), "Cài đặt");
    assert_eq!(service.get("settings.haptics.label"), "Haptic feedback");
    assert_eq!(service.get("settings.unknown"), "settings.unknown");
    assert_eq!(service.get_list("settings.haptics.modes"), vec!["Tắt", "Nhẹ", "Vừa", "Mạnh"]);
    // index 1 is null in vi and falls through to en
    assert_eq!(service.get_list("onboarding.steps"), vec!["Chào mừng", "Pick a language", "Xong"]);
}

#[tokio::test]
async fn persisted_locale_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    write_app(temp_dir.path());

    let mut config = ConfigManager::new();
    config.load_settings_with_env(Some(temp_dir.path().to_path_buf()), |_| None).unwrap();

    let first = build_service(&config);
    first.set_locale("en_US").await;
    assert_eq!(first.get("settings.title"), "Settings");
    drop(first);

    let second = build_service(&config);
    second.start(&config.get_settings().initial()).await;

    assert_eq!(second.locale().as_str(), "en-US");
    assert_eq!(second.get("onboarding.steps.2"), "Done");
}

#[tokio::test]
async fn corrupt_locale_file_degrades_to_fallback() {
    let temp_dir = TempDir::new().unwrap();
    write_app(temp_dir.path());
    fs::write(temp_dir.path().join("translations/vi.json"), "{ broken").unwrap();

    let mut config = ConfigManager::new();
    config.load_settings_with_env(Some(temp_dir.path().to_path_buf()), |_| None).unwrap();
    let service = build_service(&config);

    let set = service.set_locale("vi").await;

    assert!(set.entries().is_empty());
    assert_eq!(service.get("settings.title"), "Settings");
}
