//! Word tokenization and URL domain extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Words dropped from every token stream.
pub const STOPWORDS: [&str; 12] = [
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Lower-case `text` and return its word tokens of three or more characters,
/// in order of appearance, without stopwords.
pub fn tokenize(text: &str) -> Vec<String> {
    lazy_static! {
        static ref WORD_REGEX: Regex = Regex::new(r"\b\w{3,}\b").unwrap();
    }

    if text.is_empty() {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    WORD_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Host part of a URL: the text after `://` up to the next `/`, with `www.`
/// removed. Empty when the URL has no scheme separator.
pub fn url_domain(url: &str) -> String {
    match url.split_once("://") {
        Some((_, rest)) => rest
            .split('/')
            .next()
            .unwrap_or_default()
            .to_lowercase()
            .replace("www.", ""),
        None => String::new(),
    }
}
