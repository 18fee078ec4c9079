//! Word lists for building and checking the dictionary against the pages.

use std::collections::BTreeSet;

use crate::{
    dictionary::Dictionary,
    page::PAGE_LIMIT,
    source::{fetch_page_text, ResourceSource},
};

/// Lower-cased runs of ASCII letters in `text`.
pub fn words_in(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_lowercase())
}

/// Sorted, de-duplicated vocabulary of every readable page.
pub fn extract_vocabulary(source: &dyn ResourceSource) -> Vec<String> {
    let mut words = BTreeSet::new();
    for n in 1..PAGE_LIMIT as i64 {
        let text = fetch_page_text(source, n);
        words.extend(words_in(&text));
    }
    words.into_iter().collect()
}

pub fn missing_entries<'a>(words: &'a [String], dictionary: &Dictionary) -> Vec<&'a str> {
    words
        .iter()
        .filter(|w| !dictionary.contains(w))
        .map(String::as_str)
        .collect()
}
