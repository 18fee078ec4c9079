use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{config, error::StoreError};

const PREFERENCES_FILE: &str = "preferences.json";

/// Reading font size, valid in `(10, 30]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontSize(u8);

impl FontSize {
    pub const DEFAULT: FontSize = FontSize(18);

    pub fn new(size: i64) -> Option<Self> {
        if size <= 10 || size > 30 {
            return None;
        }
        Some(FontSize(size as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Only the exact value `"dark"` selects the dark theme.
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub font_size: FontSize,
    pub theme: Theme,
}

impl Preferences {
    pub fn set_font_size(&mut self, size: i64) -> bool {
        match FontSize::new(size) {
            Some(size) if size != self.font_size => {
                self.font_size = size;
                true
            }
            _ => false,
        }
    }

    /// Free-form entry: non-digits are dropped before parsing, so "2a0"
    /// reads as 20. Empty or out of range input is ignored.
    pub fn set_font_size_input(&mut self, input: &str) -> bool {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        match digits.parse::<i64>() {
            Ok(size) => self.set_font_size(size),
            Err(_) => false,
        }
    }

    pub fn step_font_size(&mut self, delta: i64) -> bool {
        self.set_font_size(self.font_size.get() as i64 + delta)
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}

/// On-disk shape: two string keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPreferences {
    #[serde(rename = "fontSize", default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl StoredPreferences {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            font_size: Some(prefs.font_size.get().to_string()),
            theme: Some(prefs.theme.as_str().to_string()),
        }
    }

    /// Valid stored values override the defaults; anything else is skipped.
    pub fn apply(&self, prefs: &mut Preferences) {
        if let Some(size) = self.font_size.as_deref().and_then(leading_int) {
            prefs.set_font_size(size);
        }
        if let Some(theme) = &self.theme {
            prefs.theme = Theme::from_stored(theme);
        }
    }
}

fn leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

pub trait PreferenceStore {
    fn load(&self) -> Result<StoredPreferences, StoreError>;
    fn save(&self, prefs: &Preferences) -> Result<(), StoreError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn load(&self) -> Result<StoredPreferences, StoreError> {
        (**self).load()
    }

    fn save(&self, prefs: &Preferences) -> Result<(), StoreError> {
        (**self).save(prefs)
    }
}

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_config_dir() -> Result<Self, StoreError> {
        let dir = config::config_root().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(dir.join(PREFERENCES_FILE)))
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> Result<StoredPreferences, StoreError> {
        match fs::read(&self.path) {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(StoredPreferences::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, prefs: &Preferences) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let s = serde_json::to_string_pretty(&StoredPreferences::from_preferences(prefs))?;
        fs::write(&self.path, s)?;
        Ok(())
    }
}

/// Shared in-memory store; clones see the same values.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoredPreferences>>,
}

impl MemoryStore {
    pub fn with(stored: StoredPreferences) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stored)),
        }
    }

    pub fn snapshot(&self) -> StoredPreferences {
        self.inner.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<StoredPreferences, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, prefs: &Preferences) -> Result<(), StoreError> {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = StoredPreferences::from_preferences(prefs);
        }
        Ok(())
    }
}

/// Preferences bound to a store: read once on construction, written on
/// every accepted change. Store failures are logged and never surfaced.
pub struct Settings<S: PreferenceStore> {
    store: S,
    prefs: Preferences,
}

impl<S: PreferenceStore> Settings<S> {
    pub fn load(store: S) -> Self {
        let mut prefs = Preferences::default();
        match store.load() {
            Ok(stored) => stored.apply(&mut prefs),
            Err(err) => warn!(error = %err, "could not load preferences; using defaults"),
        }
        Self { store, prefs }
    }

    pub fn get(&self) -> Preferences {
        self.prefs
    }

    pub fn font_size(&self) -> FontSize {
        self.prefs.font_size
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.prefs) {
            warn!(error = %err, "could not save preferences");
        }
    }

    pub fn set_font_size(&mut self, size: i64) -> bool {
        let changed = self.prefs.set_font_size(size);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn set_font_size_input(&mut self, input: &str) -> bool {
        let changed = self.prefs.set_font_size_input(input);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn step_font_size(&mut self, delta: i64) -> bool {
        let changed = self.prefs.step_font_size(delta);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn toggle_theme(&mut self) {
        self.prefs.toggle_theme();
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_bounds() {
        assert_eq!(FontSize::new(10), None);
        assert_eq!(FontSize::new(31), None);
        assert_eq!(FontSize::new(11).map(FontSize::get), Some(11));
        assert_eq!(FontSize::new(30).map(FontSize::get), Some(30));
    }

    #[test]
    fn out_of_range_sizes_leave_value_unchanged() {
        let mut prefs = Preferences::default();
        for size in [i64::MIN, -1, 0, 5, 10, 31, 100, i64::MAX] {
            assert!(!prefs.set_font_size(size));
            assert_eq!(prefs.font_size, FontSize::DEFAULT);
        }
        for size in 11..=30 {
            assert!(prefs.set_font_size(size));
            assert_eq!(prefs.font_size.get() as i64, size);
            assert!(!prefs.set_font_size(size));
        }
    }

    #[test]
    fn font_size_input_strips_non_digits() {
        let mut prefs = Preferences::default();
        assert!(prefs.set_font_size_input("2a4"));
        assert_eq!(prefs.font_size.get(), 24);
        assert!(!prefs.set_font_size_input("abc"));
        assert!(!prefs.set_font_size_input(""));
        assert!(!prefs.set_font_size_input("99"));
        assert_eq!(prefs.font_size.get(), 24);
    }

    #[test]
    fn step_stops_at_bounds() {
        let mut prefs = Preferences::default();
        prefs.set_font_size(30);
        assert!(!prefs.step_font_size(1));
        prefs.set_font_size(11);
        assert!(!prefs.step_font_size(-1));
        assert!(prefs.step_font_size(1));
        assert_eq!(prefs.font_size.get(), 12);
    }

    #[test]
    fn stored_values_parse_like_the_web_client() {
        let mut prefs = Preferences::default();
        StoredPreferences {
            font_size: Some("22px".into()),
            theme: Some("dark".into()),
        }
        .apply(&mut prefs);
        assert_eq!(prefs.font_size.get(), 22);
        assert_eq!(prefs.theme, Theme::Dark);

        let mut prefs = Preferences::default();
        StoredPreferences {
            font_size: Some("8".into()),
            theme: Some("Dark".into()),
        }
        .apply(&mut prefs);
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn theme_survives_reload() {
        let store = MemoryStore::default();
        let mut settings = Settings::load(store.clone());
        assert_eq!(settings.theme(), Theme::Light);
        settings.toggle_theme();
        drop(settings);

        let reloaded = Settings::load(store.clone());
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert_eq!(store.snapshot().theme.as_deref(), Some("dark"));
    }

    #[test]
    fn rejected_change_is_not_written() {
        let store = MemoryStore::default();
        let mut settings = Settings::load(store.clone());
        assert!(!settings.set_font_size(40));
        assert_eq!(store.snapshot(), StoredPreferences::default());
        assert!(settings.set_font_size(20));
        assert_eq!(store.snapshot().font_size.as_deref(), Some("20"));
    }

    #[test]
    fn file_store_round_trips_and_tolerates_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE);
        let mut settings = Settings::load(FileStore::new(&path));
        settings.set_font_size(26);
        settings.toggle_theme();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"fontSize\": \"26\""));
        assert!(text.contains("\"theme\": \"dark\""));

        let reloaded = Settings::load(FileStore::new(&path));
        assert_eq!(reloaded.font_size().get(), 26);
        assert!(reloaded.theme().is_dark());

        fs::write(&path, "{{{").unwrap();
        let fallback = Settings::load(FileStore::new(&path));
        assert_eq!(fallback.get(), Preferences::default());
    }
}
