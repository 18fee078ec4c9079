//! Word lookup popup: placement inside the viewport, lookup sequencing, and
//! the dismissal subscription that lives exactly as long as the popup.

use crate::{dictionary::DictionaryEntry, error::LookupError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Assumed popup box and spacing used for placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopupGeometry {
    pub width: i32,
    pub height: i32,
    pub margin: i32,
    pub gap: i32,
}

impl PopupGeometry {
    pub const DEFAULT: PopupGeometry = PopupGeometry {
        width: 320,
        height: 300,
        margin: 16,
        gap: 10,
    };
}

impl Default for PopupGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Flips left when the box would cross the right margin, clamps to the left
/// margin, and flips above when it would cross the bottom margin. The
/// vertical position is not clamped.
pub fn place(origin: Point, viewport: Viewport, geometry: PopupGeometry) -> Point {
    let mut x = origin.x;
    if origin.x + geometry.width > viewport.width - geometry.margin {
        x = origin.x - geometry.width - geometry.margin;
    }
    if x < geometry.margin {
        x = geometry.margin;
    }

    let mut y = origin.y + geometry.gap;
    if origin.y + geometry.height > viewport.height - geometry.margin {
        y = origin.y - geometry.height - geometry.gap;
    }

    Point { x, y }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupState {
    pub word: String,
    pub origin: Point,
    pub position: Point,
    pub size: (i32, i32),
}

impl PopupState {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.position.x,
            y: self.position.y,
            width: self.size.0,
            height: self.size.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupState {
    Idle,
    Loading,
    Found(DictionaryEntry),
    NotFound,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LookupToken(u64);

/// Work order for the host: resolve `word` and answer with the same token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupRequest {
    pub token: LookupToken,
    pub word: String,
}

#[derive(Debug)]
pub struct LookupReply {
    pub token: LookupToken,
    pub outcome: Result<Option<DictionaryEntry>, LookupError>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissEvent {
    PointerDown { x: i32, y: i32 },
    Escape,
    Scroll,
}

/// Listener set held while a popup is open. Dropping it is the release.
#[derive(Debug)]
pub struct Dismissal {
    bounds: Bounds,
}

impl Dismissal {
    fn acquire(bounds: Bounds) -> Self {
        Self { bounds }
    }

    pub fn should_dismiss(&self, event: DismissEvent) -> bool {
        match event {
            DismissEvent::PointerDown { x, y } => !self.bounds.contains(x, y),
            DismissEvent::Escape | DismissEvent::Scroll => true,
        }
    }
}

struct OpenPopup {
    state: PopupState,
    lookup: LookupState,
    token: LookupToken,
    dismissal: Dismissal,
}

pub struct Popup {
    geometry: PopupGeometry,
    open: Option<OpenPopup>,
    last_token: u64,
}

impl Default for Popup {
    fn default() -> Self {
        Self::new(PopupGeometry::DEFAULT)
    }
}

impl Popup {
    pub fn new(geometry: PopupGeometry) -> Self {
        Self {
            geometry,
            open: None,
            last_token: 0,
        }
    }

    /// Replaces any open popup; a lookup still running for the old one will
    /// be ignored when it completes.
    pub fn open(&mut self, word: &str, x: i32, y: i32, viewport: Viewport) -> LookupRequest {
        self.last_token += 1;
        let token = LookupToken(self.last_token);
        let origin = Point { x, y };
        let state = PopupState {
            word: word.to_string(),
            origin,
            position: place(origin, viewport, self.geometry),
            size: (self.geometry.width, self.geometry.height),
        };
        let dismissal = Dismissal::acquire(state.bounds());
        self.open = Some(OpenPopup {
            state,
            lookup: LookupState::Loading,
            token,
            dismissal,
        });
        LookupRequest {
            token,
            word: word.to_string(),
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn state(&self) -> Option<&PopupState> {
        self.open.as_ref().map(|p| &p.state)
    }

    pub fn lookup_state(&self) -> &LookupState {
        match &self.open {
            Some(p) => &p.lookup,
            None => &LookupState::Idle,
        }
    }

    pub fn word(&self) -> Option<&str> {
        self.state().map(|s| s.word.as_str())
    }

    /// Applies a lookup answer. Returns false when the answer belongs to a
    /// popup that is no longer showing.
    pub fn complete(&mut self, reply: LookupReply) -> bool {
        let Some(open) = self.open.as_mut() else {
            return false;
        };
        if open.token != reply.token {
            return false;
        }
        open.lookup = match reply.outcome {
            Ok(Some(entry)) => LookupState::Found(entry),
            Ok(None) => LookupState::NotFound,
            Err(err) => LookupState::Failed(err.to_string()),
        };
        true
    }

    /// Routes an input event through the dismissal subscription. Returns true
    /// when the popup closed.
    pub fn handle(&mut self, event: DismissEvent) -> bool {
        let dismiss = match &self.open {
            Some(open) => open.dismissal.should_dismiss(event),
            None => false,
        };
        if dismiss {
            self.close();
        }
        dismiss
    }
}
