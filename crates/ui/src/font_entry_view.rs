use ratatui::{prelude::*, widgets::*};
use unicode_segmentation::UnicodeSegmentation;

/// Free-form font size prompt. The text is kept as typed; filtering happens
/// when it is submitted.
pub struct FontEntryView {
    pub input: String,
}

impl FontEntryView {
    pub fn with_value(value: u8) -> Self {
        Self {
            input: value.to_string(),
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.input.grapheme_indices(true).last() {
            self.input.truncate(idx);
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut width = ((area.width as f32) * 0.4) as u16;
        width = width.max(24).min(area.width.saturating_sub(2).max(1));
        let height: u16 = 3;
        let popup_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height: height.min(area.height),
        };

        let block = Block::default()
            .title("Font size 11-30 (Enter set, Esc cancel)")
            .borders(Borders::ALL);
        let prompt = Paragraph::new(format!("> {}", self.input)).block(block);
        f.render_widget(Clear, popup_area);
        f.render_widget(prompt, popup_area);
    }
}
