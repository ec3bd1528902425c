//! Formatter - 形式名から (X)HTML への変換を振り分ける
//!
//! # 使用例
//! ```ignore
//! let mut formatter = Formatter::with_defaults();
//! formatter.register("shout", |text: &str| Ok::<_, TextError>(text.to_uppercase()));
//! let html = formatter.transform("plain", "line 1\nline 2")?;
//! ```

use crate::error::TextError;
use std::collections::HashMap;
use tracing::debug;

pub const HTML: &str = "html";
pub const PLAIN: &str = "plain";

/// Format はソーステキストを (X)HTML スニペットに変換する
pub trait Format: Send + Sync {
    fn transform(&self, text: &str) -> Result<String, TextError>;
}

impl<F> Format for F
where
    F: Fn(&str) -> Result<String, TextError> + Send + Sync,
{
    fn transform(&self, text: &str) -> Result<String, TextError> {
        self(text)
    }
}

/// 既に (X)HTML なのでそのまま返す
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn transform(&self, text: &str) -> Result<String, TextError> {
        Ok(text.to_string())
    }
}

/// プレーンテキスト: XML 1.0 エスケープして改行を `<br/>` にする
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormat;

impl Format for PlainTextFormat {
    fn transform(&self, text: &str) -> Result<String, TextError> {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&apos;"),
                '\n' => out.push_str("<br/>"),
                // XML 1.0 で表現できない文字は落とす
                c if is_xml10_char(c) => out.push(c),
                _ => {}
            }
        }
        Ok(out)
    }
}

fn is_xml10_char(c: char) -> bool {
    matches!(c, '\t' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Formatter は形式名ごとの `Format` を保持する
#[derive(Default)]
pub struct Formatter {
    formats: HashMap<String, Box<dyn Format>>,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `html` と `plain` を登録済みの Formatter
    pub fn with_defaults() -> Self {
        let mut formatter = Self::new();
        formatter.register(HTML, HtmlFormat);
        formatter.register(PLAIN, PlainTextFormat);
        formatter
    }

    /// 同じ名前で登録済みなら置き換える
    pub fn register<F: Format + 'static>(&mut self, name: impl Into<String>, format: F) {
        self.formats.insert(name.into(), Box::new(format));
    }

    pub fn supports(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    pub fn transform(&self, name: &str, text: &str) -> Result<String, TextError> {
        let Some(format) = self.formats.get(name) else {
            debug!(format = name, "no handler for format");
            return Err(TextError::UnknownFormat(name.to_string()));
        };
        format.transform(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::markup("<span>foo\n</span>", "&lt;span&gt;foo<br/>&lt;/span&gt;")]
    #[case::quotes(r#"say "hi" & 'bye'"#, "say &quot;hi&quot; &amp; &apos;bye&apos;")]
    #[case::control_chars("a\u{0}b\u{1F}c\td", "abc\td")]
    #[case::unicode("zażółć ✓", "zażółć ✓")]
    fn plain_text_is_escaped(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(PlainTextFormat.transform(input).unwrap(), expected);
    }

    #[test]
    fn html_passes_through() {
        let formatter = Formatter::with_defaults();

        assert_eq!(formatter.transform(HTML, "<p>foo</p>").unwrap(), "<p>foo</p>");
    }

    #[test]
    fn unknown_format_fails() {
        let formatter = Formatter::new();

        assert_eq!(
            formatter.transform(HTML, "<p>foo</p>"),
            Err(TextError::UnknownFormat("html".to_string()))
        );
    }

    #[test]
    fn closures_can_be_registered() {
        let mut formatter = Formatter::with_defaults();
        formatter.register("shout", |text: &str| Ok::<_, TextError>(text.to_uppercase()));
        formatter.register("broken", |_: &str| {
            Err::<String, _>(TextError::transform("broken", "always fails"))
        });

        assert!(formatter.supports("shout"));
        assert_eq!(formatter.transform("shout", "bar").unwrap(), "BAR");
        assert!(matches!(
            formatter.transform("broken", "bar"),
            Err(TextError::Transform { .. })
        ));
    }

    #[test]
    fn register_replaces_existing_format() {
        let mut formatter = Formatter::with_defaults();
        formatter.register(PLAIN, HtmlFormat);

        assert_eq!(formatter.transform(PLAIN, "<b>").unwrap(), "<b>");
    }
}
