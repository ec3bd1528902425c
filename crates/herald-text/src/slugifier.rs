//! Slugifier - URL 用の slug 生成

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_DELIMITER: &str = "-";

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("non-word pattern is valid"));

/// Slugifier は複数のテキストから 1 つの slug を作る
pub trait Slugifier: Send + Sync {
    fn slugify(&self, texts: &[&str]) -> String;
}

impl<F> Slugifier for F
where
    F: Fn(&[&str]) -> String + Send + Sync,
{
    fn slugify(&self, texts: &[&str]) -> String {
        self(texts)
    }
}

/// SimpleSlugifier
///
/// 1. テキストを区切り文字で連結
/// 2. NFD で分解して ASCII 以外（結合文字を含む）を落とす
/// 3. 英数字と `_` 以外の連続を区切り文字に置き換え、連続した区切り文字を 1 つにまとめる
/// 4. 先頭と末尾の区切り文字を取り除いて小文字にする
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleSlugifier {
    delimiter: String,
}

impl SimpleSlugifier {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    fn collapse(&self, mut slug: String) -> String {
        if self.delimiter.is_empty() {
            return slug;
        }
        let doubled = self.delimiter.repeat(2);
        while slug.contains(&doubled) {
            slug = slug.replace(&doubled, &self.delimiter);
        }
        slug
    }
}

impl Default for SimpleSlugifier {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl Slugifier for SimpleSlugifier {
    fn slugify(&self, texts: &[&str]) -> String {
        let ascii: String = texts
            .join(&self.delimiter)
            .nfd()
            .filter(char::is_ascii)
            .collect();
        let replaced = NON_WORD.replace_all(&ascii, self.delimiter.as_str());
        let collapsed = self.collapse(replaced.into_owned());

        let delimiter = self.delimiter.as_str();
        let trimmed = collapsed.strip_prefix(delimiter).unwrap_or(&collapsed);
        let trimmed = trimmed.strip_suffix(delimiter).unwrap_or(trimmed);
        trimmed.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::diacritics(&["rąfaĺ"], "rafal")]
    #[case::non_ascii_symbol(&["chillout»development"], "chilloutdevelopment")]
    #[case::punctuation(&["chillout!development"], "chillout-development")]
    #[case::spaces(&["chillout - development"], "chillout-development")]
    #[case::leading(&["---chillout - development"], "chillout-development")]
    #[case::trailing(&["chillout - development---"], "chillout-development")]
    #[case::lowercase(&["ChillOut DevelopmenT"], "chillout-development")]
    #[case::multiple(&["chillout", "development"], "chillout-development")]
    #[case::underscore_kept(&["snake_case value"], "snake_case-value")]
    #[case::nothing_left(&["»«"], "")]
    fn default_slugifier(#[case] texts: &[&str], #[case] expected: &str) {
        assert_eq!(SimpleSlugifier::default().slugify(texts), expected);
    }

    #[test]
    fn custom_delimiter() {
        let slugifier = SimpleSlugifier::new("::");

        assert_eq!(slugifier.slugify(&["foo", "bar"]), "foo::bar");
        assert_eq!(slugifier.slugify(&["  foo", "bar  "]), "foo::bar");
    }

    #[test]
    fn closures_are_slugifiers() {
        let slugifier = |_: &[&str]| "foo".to_string();

        assert_eq!(slugifier.slugify(&["test"]), "foo");
    }
}
