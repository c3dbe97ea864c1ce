//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use crate::input::translation::Entries;
use crate::ir::TranslationSet;
use crate::locale::Locale;

/// テスト用の `Entries` を作成する
pub(crate) fn entries(pairs: &[(&str, &str)]) -> Entries {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

/// テスト用の `TranslationSet` を作成する
///
/// # Arguments
/// * `locale` - ロケール（例: "en", "vi"）
/// * `primary` - 要求ロケールのキーと値
/// * `fallback` - フォールバックロケールのキーと値
pub(crate) fn create_translation_set(
    locale: &str,
    primary: &[(&str, &str)],
    fallback: &[(&str, &str)],
) -> TranslationSet {
    TranslationSet::new(Locale::new(locale), entries(primary), entries(fallback))
}
