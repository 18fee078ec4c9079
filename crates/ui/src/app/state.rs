use std::{sync::Arc, time::Instant};

use leitor_core::{
    config::ThemeConfig,
    page::normalize_word,
    popup::{Popup, Viewport},
    prefs::{PreferenceStore, Settings},
    source::ResourceSource,
    speech::{Player, SpeechPort},
    viewer::{PageRequest, Viewer},
};
use ratatui::layout::Rect;
use tracing::{debug, warn};

use crate::{
    font_entry_view::FontEntryView,
    popup_view::CELL_GEOMETRY,
    reader_view::{ReaderView, Theme, WordHit},
};

use super::worker::{Job, Reply, Worker};

pub type BoxedSettings = Settings<Box<dyn PreferenceStore>>;
pub type BoxedPlayer = Player<Box<dyn SpeechPort>>;

pub struct App {
    pub viewer: Viewer,
    pub popup: Popup,
    pub settings: BoxedSettings,
    pub player: BoxedPlayer,
    pub view: ReaderView,
    pub font_entry: Option<FontEntryView>,
    pub show_help: bool,
    pub theme_overrides: ThemeConfig,
    pub(super) worker: Worker,
    pub(super) frame: Rect,
}

impl App {
    pub fn new(
        source: Arc<dyn ResourceSource>,
        settings: BoxedSettings,
        player: BoxedPlayer,
    ) -> Self {
        let mut app = Self {
            viewer: Viewer::new(),
            popup: Popup::new(CELL_GEOMETRY),
            settings,
            player,
            view: ReaderView::new(),
            font_entry: None,
            show_help: false,
            theme_overrides: ThemeConfig::default(),
            worker: Worker::new(source),
            frame: Rect::default(),
        };
        app.apply_preferences();
        app
    }

    pub fn with_theme_overrides(mut self, overrides: ThemeConfig) -> Self {
        self.theme_overrides = overrides;
        self.apply_preferences();
        self
    }

    /// Loads the first page and asks `catalog` for installed voices.
    pub fn start(&mut self, page_number: i64, catalog: Option<Box<dyn SpeechPort>>) {
        self.go_to(page_number);
        if let Some(catalog) = catalog {
            self.worker.submit(Job::Voices(catalog));
        }
    }

    pub(super) fn apply_preferences(&mut self) {
        let prefs = self.settings.get();
        self.view.font_size = prefs.font_size;
        self.view.mode = prefs.theme;
        self.view.theme = Theme::for_mode(prefs.theme).with_overrides(&self.theme_overrides);
    }

    fn sync_page(&mut self) {
        self.view.page_number = self.viewer.current_page_number();
        self.view.loading = self.viewer.is_loading();
        self.view.can_go_back = self.viewer.can_go_back();
        self.view.set_tokens(self.viewer.tokens());
    }

    pub fn go_to(&mut self, page_number: i64) {
        let request = self.viewer.go_to(page_number);
        self.show_requested(request);
    }

    fn show_requested(&mut self, request: Option<PageRequest>) {
        self.close_popup();
        if let Some(request) = request {
            debug!(page = %request.page, "page requested");
            self.worker.submit(Job::Page(request));
        }
        self.sync_page();
    }

    pub fn next_page(&mut self) {
        let request = self.viewer.next();
        self.show_requested(request);
    }

    pub fn previous_page(&mut self) {
        if !self.viewer.can_go_back() {
            return;
        }
        let request = self.viewer.previous();
        self.show_requested(request);
    }

    fn prefetch(&mut self) {
        if let Some(request) = self.viewer.prefetch() {
            self.worker.submit(Job::Page(request));
        }
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.frame.width as i32,
            height: self.frame.height as i32,
        }
    }

    /// Opens the popup for the piece of text under `hit`. Blank pieces only
    /// close whatever popup is showing.
    pub fn open_word(&mut self, hit: WordHit) {
        if hit.text.trim().is_empty() {
            self.close_popup();
            return;
        }
        self.player.stop();
        let request = self
            .popup
            .open(&hit.text, hit.x as i32, hit.y as i32, self.viewport());
        self.view.highlight = Some(hit.token);
        self.worker.submit(Job::Lookup(request));
    }

    pub fn close_popup(&mut self) {
        if self.popup.is_open() {
            self.player.stop();
        }
        self.popup.close();
        self.view.highlight = None;
    }

    pub fn replay(&mut self, now: Instant) {
        if let Some(word) = self.popup.word() {
            let text = normalize_word(word);
            if !text.is_empty() {
                self.player.play(&text, now);
            }
        }
    }

    pub fn step_font_size(&mut self, delta: i64) {
        if self.settings.step_font_size(delta) {
            self.close_popup();
            self.apply_preferences();
        }
    }

    pub fn set_font_size_input(&mut self, input: &str) {
        if self.settings.set_font_size_input(input) {
            self.close_popup();
            self.apply_preferences();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.settings.toggle_theme();
        self.apply_preferences();
    }

    /// Records the terminal size; a popup placed for another size is closed.
    pub fn resize(&mut self, frame: Rect) {
        if frame != self.frame {
            if self.frame != Rect::default() {
                self.close_popup();
            }
            self.frame = frame;
        }
        self.view.prepare(frame);
    }

    pub fn apply_reply(&mut self, reply: Reply) {
        match reply {
            Reply::Page(reply) => {
                if self.viewer.complete(reply) {
                    self.sync_page();
                    self.prefetch();
                }
            }
            Reply::Lookup(reply) => {
                if !self.popup.complete(reply) {
                    debug!("discarded lookup for a closed popup");
                }
            }
            Reply::Voices(Ok(voices)) => {
                debug!(count = voices.len(), "voice catalog loaded");
                self.player.set_voices(voices);
            }
            Reply::Voices(Err(err)) => {
                warn!(error = %err, "could not list voices");
            }
        }
    }

    pub fn poll_worker(&mut self) {
        while let Some(reply) = self.worker.try_recv() {
            self.apply_reply(reply);
        }
    }
}
