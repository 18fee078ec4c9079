use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::ConfigError;

pub const QUALIFIER: &str = "com";
pub const ORGANIZATION: &str = "leitor";
pub const APPLICATION: &str = "leitor";

const CONFIG_FILE: &str = "config.toml";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

pub fn config_root() -> Option<PathBuf> {
    project_dirs().map(|p| p.config_dir().to_path_buf())
}

pub fn data_root() -> Option<PathBuf> {
    project_dirs().map(|p| p.data_local_dir().to_path_buf())
}

pub fn default_config_path() -> Option<PathBuf> {
    config_root().map(|dir| dir.join(CONFIG_FILE))
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory or http(s) base URL holding `data/{n}.txt` and `dictionary.json`.
    pub content: Option<String>,
    pub speech: SpeechConfig,
    pub theme: ThemeConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    /// Program name, or a command template where `{}` is replaced by the text.
    pub engine: String,
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            engine: "espeak-ng".into(),
            voice: Some("en-us".into()),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Named color overrides; unknown names are ignored by the UI.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub header_bg: Option<String>,
    pub header_fg: Option<String>,
    pub accent: Option<String>,
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// A missing file is not an error; the defaults apply.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}
