use leitor_core::{config::ThemeConfig, prefs::Theme as ThemeMode};
use ratatui::prelude::Color;

// Tokyonight-inspired palette for the dark mode.
const TN_BG: Color = Color::Rgb(26, 27, 38); // #1a1b26
const TN_BG_ALT: Color = Color::Rgb(31, 35, 53); // #1f2335
const TN_BG_STRONG: Color = Color::Rgb(65, 72, 104); // #414868
const TN_FG: Color = Color::Rgb(192, 202, 245); // #c0caf5
const TN_BLUE: Color = Color::Rgb(122, 162, 247); // #7aa2f7
const TN_ORANGE: Color = Color::Rgb(255, 158, 100); // #ff9e64

// Tokyonight day variant for the light mode.
const DAY_BG: Color = Color::Rgb(225, 226, 231); // #e1e2e7
const DAY_BG_ALT: Color = Color::Rgb(208, 213, 227); // #d0d5e3
const DAY_BG_STRONG: Color = Color::Rgb(168, 174, 203); // #a8aecb
const DAY_FG: Color = Color::Rgb(55, 96, 191); // #3760bf
const DAY_BLUE: Color = Color::Rgb(46, 126, 233); // #2e7de9
const DAY_ORANGE: Color = Color::Rgb(177, 92, 0); // #b15c00

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub body_bg: Color,
    pub body_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub footer_bg: Color,
    pub footer_fg: Color,
    pub footer_pad_bg: Color,
    pub popup_bg: Color,
    pub popup_border: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            body_bg: DAY_BG,
            body_fg: DAY_FG,
            header_bg: DAY_BG_ALT,
            header_fg: DAY_FG,
            footer_bg: DAY_BG_STRONG,
            footer_fg: DAY_BLUE,
            footer_pad_bg: DAY_BG_ALT,
            popup_bg: DAY_BG_ALT,
            popup_border: DAY_BLUE,
            accent: DAY_ORANGE,
        }
    }

    pub fn dark() -> Self {
        Theme {
            body_bg: TN_BG,
            body_fg: TN_FG,
            header_bg: TN_BG_ALT,
            header_fg: TN_FG,
            footer_bg: TN_BG_STRONG,
            footer_fg: TN_BLUE,
            footer_pad_bg: TN_BG_ALT,
            popup_bg: TN_BG_ALT,
            popup_border: TN_BLUE,
            accent: TN_ORANGE,
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Applies the named colors from the config file; unknown names are
    /// skipped.
    pub fn with_overrides(mut self, overrides: &ThemeConfig) -> Self {
        if let Some(c) = overrides.header_bg.as_deref().and_then(parse_color) {
            self.header_bg = c;
        }
        if let Some(c) = overrides.header_fg.as_deref().and_then(parse_color) {
            self.header_fg = c;
        }
        if let Some(c) = overrides.accent.as_deref().and_then(parse_color) {
            self.accent = c;
        }
        self
    }
}

/// Basic color names or `#rrggbb`.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "darkgray" => Some(Color::DarkGray),
        _ => None,
    }
}
