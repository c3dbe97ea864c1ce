//! 翻訳データの中間表現

pub mod translation_set;

pub use translation_set::TranslationSet;
