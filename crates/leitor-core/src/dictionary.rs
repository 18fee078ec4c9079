use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::LookupError,
    page::normalize_word,
    source::{ResourceSource, DICTIONARY_RESOURCE},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub translation: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub usage: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DictionaryEntry {
    Gloss(String),
    Detailed(Definition),
}

impl DictionaryEntry {
    pub fn translation(&self) -> &str {
        match self {
            DictionaryEntry::Gloss(text) => text,
            DictionaryEntry::Detailed(def) => &def.translation,
        }
    }

    pub fn meaning(&self) -> Option<&str> {
        match self {
            DictionaryEntry::Detailed(def) if !def.meaning.is_empty() => Some(&def.meaning),
            _ => None,
        }
    }

    pub fn usage(&self) -> Option<&str> {
        match self {
            DictionaryEntry::Detailed(def) if !def.usage.is_empty() => Some(&def.usage),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    entries: HashMap<String, DictionaryEntry>,
}

impl Dictionary {
    pub fn from_json(text: &str) -> Result<Self, LookupError> {
        let raw: HashMap<String, DictionaryEntry> = serde_json::from_str(text)?;
        let entries = raw
            .into_iter()
            .map(|(key, entry)| (key.to_lowercase(), entry))
            .collect();
        Ok(Self { entries })
    }

    pub fn get(&self, word: &str) -> Option<&DictionaryEntry> {
        self.entries.get(&word.to_lowercase())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }
}

/// Loads the dictionary fresh and resolves `word` after normalizing it.
/// `Ok(None)` means the word has no entry.
pub fn lookup(
    source: &dyn ResourceSource,
    word: &str,
) -> Result<Option<DictionaryEntry>, LookupError> {
    let text = source.fetch(DICTIONARY_RESOURCE)?;
    let dictionary = Dictionary::from_json(&text)?;
    Ok(dictionary.get(&normalize_word(word)).cloned())
}
