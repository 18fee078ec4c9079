use leitor_core::popup::{LookupState, Popup, PopupGeometry};
use ratatui::{prelude::*, widgets::*};

use crate::{layout::clip_to_frame, reader_view::Theme};

/// Popup box measured in terminal cells.
pub const CELL_GEOMETRY: PopupGeometry = PopupGeometry {
    width: 40,
    height: 10,
    margin: 1,
    gap: 1,
};

pub fn body_lines(state: &LookupState, theme: &Theme) -> Vec<Line<'static>> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    match state {
        LookupState::Idle => Vec::new(),
        LookupState::Loading => vec![Line::styled("Loading…", dim)],
        LookupState::NotFound => vec![Line::from("Word not found")],
        LookupState::Failed(_) => vec![Line::from("Could not fetch translation")],
        LookupState::Found(entry) => {
            let mut lines = vec![Line::styled(
                entry.translation().to_string(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )];
            if let Some(meaning) = entry.meaning() {
                lines.push(Line::default());
                lines.push(Line::from(meaning.to_string()));
            }
            if let Some(usage) = entry.usage() {
                lines.push(Line::default());
                lines.push(Line::styled(
                    format!("“{usage}”"),
                    Style::default().add_modifier(Modifier::ITALIC),
                ));
            }
            lines
        }
    }
}

/// Draws the open popup, clipped to `frame`. Nothing is drawn when it is
/// closed or lies fully off-screen.
pub fn render(popup: &Popup, theme: &Theme, f: &mut Frame<'_>, frame: Rect) {
    let Some(state) = popup.state() else {
        return;
    };
    let bounds = state.bounds();
    let Some(area) = clip_to_frame(bounds.x, bounds.y, bounds.width, bounds.height, frame)
    else {
        return;
    };

    let block = Block::default()
        .title(Line::from(format!(" {} ", state.word)).bold())
        .title_bottom(Line::from(" Space replay · Esc close ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg).fg(theme.body_fg));
    let body = Paragraph::new(body_lines(popup.lookup_state(), theme))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(body, area);
}

#[cfg(test)]
mod tests {
    use leitor_core::{
        dictionary::{Definition, DictionaryEntry},
        popup::Viewport,
    };
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn text_of(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn lookup_states_have_fixed_messages() {
        let theme = Theme::default();
        assert_eq!(text_of(&body_lines(&LookupState::Loading, &theme)), ["Loading…"]);
        assert_eq!(
            text_of(&body_lines(&LookupState::NotFound, &theme)),
            ["Word not found"]
        );
        assert_eq!(
            text_of(&body_lines(&LookupState::Failed("io".into()), &theme)),
            ["Could not fetch translation"]
        );
    }

    #[test]
    fn detailed_entry_lists_all_fields() {
        let entry = DictionaryEntry::Detailed(Definition {
            translation: "correr".into(),
            meaning: "to move fast".into(),
            usage: "I run every day.".into(),
        });
        let lines = text_of(&body_lines(&LookupState::Found(entry), &Theme::default()));
        assert_eq!(
            lines,
            ["correr", "", "to move fast", "", "“I run every day.”"]
        );
    }

    #[test]
    fn gloss_shows_translation_only() {
        let entry = DictionaryEntry::Gloss("gato".into());
        let lines = text_of(&body_lines(&LookupState::Found(entry), &Theme::default()));
        assert_eq!(lines, ["gato"]);
    }

    #[test]
    fn open_popup_renders_word_and_status() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut popup = Popup::new(CELL_GEOMETRY);
        popup.open(
            "cat",
            5,
            3,
            Viewport {
                width: 80,
                height: 24,
            },
        );
        terminal
            .draw(|f| render(&popup, &Theme::default(), f, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let row: String = (0..80).map(|x| buffer[(x, 4)].symbol()).collect();
        assert!(row.contains(" cat "));
        let row: String = (0..80).map(|x| buffer[(x, 5)].symbol()).collect();
        assert!(row.contains("Loading"));
    }
}
