use std::fmt;

/// Exclusive upper bound on page numbers.
pub const PAGE_LIMIT: u32 = 100;

/// A page number in `1..100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Page(u32);

impl Page {
    pub const FIRST: Page = Page(1);

    pub fn new(n: i64) -> Option<Self> {
        if n <= 0 || n >= PAGE_LIMIT as i64 {
            return None;
        }
        Some(Page(n as u32))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Option<Self> {
        Self::new(self.0 as i64 + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::new(self.0 as i64 - 1)
    }

    pub fn resource_name(self) -> String {
        format!("data/{}.txt", self.0)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordToken {
    pub index: usize,
    pub text: String,
}

impl WordToken {
    /// Dictionary key for this token: lower-cased, surrounding punctuation
    /// removed. Inner apostrophes and hyphens are kept.
    pub fn lookup_key(&self) -> String {
        normalize_word(&self.text)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}

/// Splits on single spaces. Runs of spaces yield empty tokens so ordinals
/// match the raw text.
pub fn tokenize(text: &str) -> Vec<WordToken> {
    text.split(' ')
        .enumerate()
        .map(|(index, word)| WordToken {
            index,
            text: word.to_string(),
        })
        .collect()
}
