//! HTML snippet helpers.

use regex::Regex;
use std::sync::LazyLock;

/// Appended to truncated text unless another suffix is given.
pub const DEFAULT_SUFFIX: &str = "…";

static FIRST_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<p(?: [^>]*)?>(.*?)</p>").expect("paragraph pattern is valid"));

// last whitespace run (with the character before it) that reaches the end,
// ignoring one trailing line terminator
static WORD_BOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S\s+\S*?(?:\r\n|[\n\r\u{85}\u{2028}\u{2029}])?$")
        .expect("word bound pattern is valid")
});

/// Inner markup of the first `<p>` element, or an empty string when there is none.
pub fn first_paragraph(html: &str) -> &str {
    FIRST_PARAGRAPH
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map_or("", |inner| inner.as_str())
}

/// Cuts `text` at a word boundary near `length` characters and appends `…`.
pub fn truncate(text: &str, length: usize) -> String {
    truncate_with(text, length, DEFAULT_SUFFIX, true)
}

/// Cuts `text` near `length` characters and appends `suffix`.
///
/// Without `word_bound` the result keeps exactly `length` characters.
///
/// With `word_bound` the cut moves to the end of the last complete word,
/// looking up to two characters past `length` to tell whether the word at the
/// cut point ends there. A word that ends one character past `length` is kept
/// whole, so the result can hold `length + 1` characters before the suffix.
/// A line terminator closing that window does not count as the end of a word.
/// A text without any whitespace in the window is cut at `length` exactly.
///
/// Text that already fits is returned unchanged, without the suffix.
pub fn truncate_with(text: &str, length: usize, suffix: &str, word_bound: bool) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }

    let mut cut = byte_offset(text, length);
    if word_bound {
        let window = &text[..byte_offset(text, length + 2)];
        if let Some(found) = WORD_BOUND.find(window) {
            // keep the last character of the word before the whitespace
            let last_char = window[found.start()..].chars().next().map_or(0, char::len_utf8);
            cut = found.start() + last_char;
        }
    }

    let mut truncated = text[..cut].trim().to_string();
    truncated.push_str(suffix);
    truncated
}

/// Byte offset of the `chars`-th character, clamped to the end of `text`.
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(offset, _)| offset)
}

/// Encodes a value for use in a URL query (`application/x-www-form-urlencoded`).
///
/// Alphanumerics and `*-._` pass through, spaces become `+`, and every other
/// byte of the UTF-8 encoding becomes `%XX`.
pub fn url_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
