//! app-shell
//!
//! アプリケーションシェルのサービス群：階層的な翻訳解決、設定、ハプティクス

pub mod config;
pub mod haptics;
pub mod input;
pub mod ir;
pub mod locale;
pub mod logging;
pub mod prefs;
pub mod resolve;
pub mod service;

#[cfg(test)]
mod test_utils;

pub use ir::TranslationSet;
pub use locale::{
    Locale,
    SupportedLocale,
};
pub use service::LocaleService;
