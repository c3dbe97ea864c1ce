//! Entry point: bootstraps the shell services and resolves translation keys.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;
use std::sync::Arc;

use app_shell::config::ConfigManager;
use app_shell::haptics::{
    HapticController,
    TracingHapticDriver,
};
use app_shell::input::{
    FsResourceLoader,
    discover_locales,
};
use app_shell::logging;
use app_shell::prefs::{
    JsonFileStore,
    PreferenceStore,
};
use app_shell::{
    LocaleService,
    SupportedLocale,
};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Arguments {
    /// Application root containing `app-shell.json`
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Locale to activate (overrides the persisted choice)
    #[arg(long)]
    locale: Option<String>,

    /// Resolve keys as lists (`key.0`, `key.1`, ...)
    #[arg(long)]
    list: bool,

    /// Advance the haptic mode before resolving
    #[arg(long)]
    cycle_haptics: bool,

    /// Dotted translation keys to resolve
    keys: Vec<String>,
}

/// Warn about supported locales that have no bundled resource file.
fn check_bundled_locales(dir: &Path, pattern: &str) {
    match discover_locales(dir, pattern) {
        Ok(found) => {
            for supported in SupportedLocale::ALL {
                if !found.iter().any(|(locale, _)| locale.language() == supported.code()) {
                    tracing::warn!(locale = %supported, dir = %dir.display(), "No bundled translations");
                }
            }
        }
        Err(e) => tracing::warn!("Failed to discover translation files: {}", e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Arguments::parse();

    let mut config_manager = ConfigManager::new();
    let config_result = config_manager.load_settings(Some(args.root.clone()));
    let log_path = config_manager.log_path();
    let _guard = match logging::init(log_path.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            tracing::error!("Failed to open log directory {:?}: {}", log_path, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config_result {
        tracing::error!("{}", e);
        return ExitCode::FAILURE;
    }
    let settings = config_manager.get_settings();

    let resources = config_manager.resources_path();
    check_bundled_locales(&resources, &settings.resource_pattern);

    let prefs: Arc<dyn PreferenceStore> =
        match JsonFileStore::open(config_manager.preferences_path()) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!("Failed to open preferences: {}", e);
                return ExitCode::FAILURE;
            }
        };

    let mut haptics = HapticController::load(TracingHapticDriver, Arc::clone(&prefs));
    if args.cycle_haptics {
        match haptics.cycle() {
            Ok(mode) => tracing::info!(?mode, "Haptic mode changed"),
            Err(e) => tracing::warn!("Failed to persist haptic mode: {}", e),
        }
    }

    let service = LocaleService::new(FsResourceLoader::new(resources), settings.fallback())
        .with_preferences(prefs);
    let set = match &args.locale {
        Some(locale) => service.set_locale(locale).await,
        None => service.start(&settings.initial()).await,
    };

    let mut out = std::io::stdout().lock();
    for key in &args.keys {
        haptics.feedback();
        let written = if args.list {
            writeln!(out, "{key} = {:?}", set.get_list(key))
        } else {
            writeln!(out, "{key} = {}", set.get(key))
        };
        if let Err(e) = written {
            tracing::error!("Failed to write output: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
