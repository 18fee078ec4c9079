pub mod config;
pub mod dictionary;
pub mod error;
pub mod nav;
pub mod page;
pub mod popup;
pub mod prefs;
pub mod source;
pub mod speech;
pub mod viewer;
pub mod vocab;

pub use dictionary::{lookup, Dictionary, DictionaryEntry};
pub use page::{tokenize, Page, WordToken};
pub use popup::{LookupState, Popup, PopupGeometry, PopupState};
pub use prefs::{FontSize, Preferences, Settings, Theme};
pub use viewer::Viewer;
