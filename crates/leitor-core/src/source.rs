use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
    time::Duration,
};

use tracing::debug;

use crate::{error::FetchError, page::Page};

pub const DICTIONARY_RESOURCE: &str = "dictionary.json";

/// Where page texts and the dictionary come from.
pub trait ResourceSource: Send + Sync {
    fn fetch(&self, name: &str) -> Result<String, FetchError>;
}

pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceSource for DirSource {
    fn fetch(&self, name: &str) -> Result<String, FetchError> {
        let path = self.root.join(name);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(FetchError::NotFound(path.display().to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

pub struct HttpSource {
    base: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, name: &str) -> String {
        format!("{}/{}", self.base, name.trim_start_matches('/'))
    }
}

impl ResourceSource for HttpSource {
    fn fetch(&self, name: &str) -> Result<String, FetchError> {
        let resp = self.client.get(self.url(name)).send()?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(name.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(resp.text()?)
    }
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

pub fn open_source(location: &str) -> Result<Box<dyn ResourceSource>, FetchError> {
    if is_remote(location) {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(DirSource::new(location)))
    }
}

/// Text for a page number. Anything out of range or unreadable is the empty
/// page.
pub fn fetch_page_text(source: &dyn ResourceSource, page_number: i64) -> String {
    let Some(page) = Page::new(page_number) else {
        return String::new();
    };
    match source.fetch(&page.resource_name()) {
        Ok(text) => text,
        Err(err) => {
            debug!(page = page_number, error = %err, "page fetch failed; showing empty page");
            String::new()
        }
    }
}
