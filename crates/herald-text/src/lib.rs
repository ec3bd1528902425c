//! herald-text
//!
//! Text helpers for message bodies and web output.
//!
//! - **formatter**: ソース形式（plain, html, ...）から (X)HTML への変換
//! - **html**: 最初の段落の抽出、切り詰め、URL エンコード
//! - **slugifier**: URL 用の slug 生成

pub mod error;
pub mod formatter;
pub mod html;
pub mod slugifier;

pub use self::error::TextError;
pub use self::formatter::{Format, Formatter, HtmlFormat, PlainTextFormat};
pub use self::slugifier::{SimpleSlugifier, Slugifier, DEFAULT_DELIMITER};
