//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    ShellSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ShellSettings,

    /// アプリケーションのルートパス
    app_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ShellSettings::default(), app_root: None }
    }

    /// 設定を読み込む（環境変数による上書きを含む）
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, app_root: Option<PathBuf>) -> Result<(), ConfigError> {
        self.load_settings_with_env(app_root, |name| std::env::var(name).ok())
    }

    /// 設定を読み込む
    ///
    /// 設定ファイル → 環境変数 → バリデーションの順に処理する。
    /// 失敗した場合、現在の設定は変更されない。
    pub fn load_settings_with_env(
        &mut self,
        app_root: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for app root: {:?}", app_root);

        let mut settings = if let Some(root) = &app_root {
            loader::read_settings_file(root)?.map_or_else(ShellSettings::default, |file| {
                tracing::debug!("Loaded file settings: {:?}", file);
                file
            })
        } else {
            ShellSettings::default()
        };

        settings.apply_env_overrides(env);

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.app_root = app_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ShellSettings {
        &self.current_settings
    }

    /// アプリケーションルートを取得
    #[must_use]
    pub const fn app_root(&self) -> Option<&PathBuf> {
        self.app_root.as_ref()
    }

    /// 翻訳リソースのディレクトリ
    #[must_use]
    pub fn resources_path(&self) -> PathBuf {
        self.resolve(&self.current_settings.resources_dir)
    }

    /// 設定ファイルのパス
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.resolve(&self.current_settings.preferences_file)
    }

    /// ログディレクトリ（未設定なら `None`）
    #[must_use]
    pub fn log_path(&self) -> Option<PathBuf> {
        self.current_settings.log_dir.as_deref().map(|dir| self.resolve(dir))
    }

    /// ルートからの相対パスを解決する（絶対パスはそのまま）
    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.app_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}
