use leitor_core::{
    nav::page_query,
    page::WordToken,
    prefs::{FontSize, Theme as ThemeMode},
};
use ratatui::{prelude::*, widgets::*};
use unicode_segmentation::UnicodeSegmentation;

mod text;
mod theme;

#[cfg(test)]
mod tests;

pub use text::{layout_words, PlacedWord, WordLayout};
pub use theme::{parse_color, Theme};

/// Reading column width in cells is this budget divided by the font size.
const COLUMN_BUDGET: u16 = 1440;
const HEADER_HEIGHT: u16 = 2;

pub fn column_width(font_size: FontSize, available: u16) -> u16 {
    (COLUMN_BUDGET / font_size.get().max(1) as u16).min(available).max(1)
}

pub struct ContentAreas {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Word under the pointer: its token ordinal and the screen cell where the
/// clicked piece starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordHit {
    pub token: usize,
    /// The piece under the cursor; a token split by a newline yields one
    /// piece per line.
    pub text: String,
    pub x: u16,
    pub y: u16,
}

pub struct ReaderView {
    pub theme: Theme,
    pub mode: ThemeMode,
    pub page_number: i64,
    pub loading: bool,
    pub can_go_back: bool,
    pub font_size: FontSize,
    /// Token drawn as selected while its popup is open.
    pub highlight: Option<usize>,
    tokens: Vec<WordToken>,
    layout: WordLayout,
    laid_out_width: Option<u16>,
    body: Rect,
    scroll: u16,
}

impl Default for ReaderView {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderView {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            mode: ThemeMode::default(),
            page_number: 1,
            loading: false,
            can_go_back: false,
            font_size: FontSize::DEFAULT,
            highlight: None,
            tokens: Vec::new(),
            layout: WordLayout::default(),
            laid_out_width: None,
            body: Rect::default(),
            scroll: 0,
        }
    }

    pub fn set_tokens(&mut self, tokens: Vec<WordToken>) {
        self.tokens = tokens;
        self.laid_out_width = None;
        self.scroll = 0;
    }

    pub fn tokens(&self) -> &[WordToken] {
        &self.tokens
    }

    pub fn body(&self) -> Rect {
        self.body
    }

    pub fn content_areas(&self, area: Rect) -> ContentAreas {
        let col_w = column_width(self.font_size, area.width);
        let left_pad = area.width.saturating_sub(col_w) / 2;
        let centered = Rect {
            x: area.x + left_pad,
            y: area.y,
            width: col_w,
            height: area.height,
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(centered);
        ContentAreas {
            header: chunks[0],
            body: chunks[1],
            footer: chunks[2],
        }
    }

    /// Recomputes the body rect for `area` and reflows words when its width
    /// changed. Call before hit-testing or rendering a new frame.
    pub fn prepare(&mut self, area: Rect) {
        self.body = self.content_areas(area).body;
        if self.laid_out_width != Some(self.body.width) {
            self.layout = layout_words(&self.tokens, self.body.width);
            self.laid_out_width = Some(self.body.width);
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn max_scroll(&self) -> u16 {
        (self.layout.line_count() as u16).saturating_sub(self.body.height)
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<WordHit> {
        if !self.body.contains(Position { x, y }) {
            return None;
        }
        let row = y - self.body.y;
        let placed = self.layout.hit(x - self.body.x, row.saturating_add(self.scroll))?;
        Some(WordHit {
            token: placed.token,
            text: placed.text.clone(),
            x: self.body.x + placed.col,
            y,
        })
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        f.render_widget(
            Block::default().style(Style::default().bg(self.theme.body_bg)),
            area,
        );
        let areas = self.content_areas(area);
        self.render_header(f, areas.header);
        self.render_body(f, areas.body);
        self.render_footer(f, areas.footer);
    }

    fn render_header(&self, f: &mut Frame<'_>, area: Rect) {
        let style = Style::default()
            .bg(self.theme.header_bg)
            .fg(self.theme.header_fg);
        let lines = vec![
            Line::from(Span::styled(
                self.page_number.to_string(),
                style.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "current level",
                style.add_modifier(Modifier::DIM),
            )),
        ];
        let header = Paragraph::new(lines).style(style).alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_body(&self, f: &mut Frame<'_>, area: Rect) {
        let base = Style::default().bg(self.theme.body_bg).fg(self.theme.body_fg);
        if self.loading && self.tokens.is_empty() {
            let loading = Paragraph::new("Loading…")
                .style(base.add_modifier(Modifier::DIM))
                .alignment(Alignment::Center);
            f.render_widget(loading, area);
            return;
        }
        let selected = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let lines: Vec<Line> = self
            .layout
            .lines
            .iter()
            .skip(self.scroll as usize)
            .take(area.height as usize)
            .map(|placed| {
                let mut line = Line::default();
                let mut col: u16 = 0;
                for word in placed {
                    if word.col > col {
                        line.push_span(Span::raw(" ".repeat((word.col - col) as usize)));
                    }
                    let style = if self.highlight == Some(word.token) {
                        selected
                    } else {
                        Style::default()
                    };
                    let text: String = word
                        .text
                        .graphemes(true)
                        .take(word.width as usize)
                        .collect();
                    line.push_span(Span::styled(text, style));
                    col = word.col + word.width;
                }
                line
            })
            .collect();
        f.render_widget(Paragraph::new(lines).style(base), area);
    }

    fn render_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let bar = Style::default().bg(self.theme.footer_pad_bg).fg(self.theme.footer_fg);
        let back_style = if self.can_go_back {
            Style::default().bg(self.theme.footer_bg).fg(self.theme.footer_fg)
        } else {
            Style::default()
                .bg(self.theme.footer_bg)
                .fg(self.theme.footer_fg)
                .add_modifier(Modifier::DIM)
        };
        let left = "‹ p back";
        let right = "next n ›";
        let middle = format!(
            "{} · font {} · {} · ? help",
            page_query(self.page_number),
            self.font_size.get(),
            self.mode.as_str()
        );
        let width = area.width as usize;
        let left_len = left.graphemes(true).count();
        let right_len = right.graphemes(true).count();
        let mut middle_len = middle.graphemes(true).count();
        let mut middle = middle;
        if left_len + right_len + middle_len + 2 > width {
            middle.clear();
            middle_len = 0;
        }
        let free = width.saturating_sub(left_len + right_len + middle_len);
        let pad_left = free / 2;
        let pad_right = free - pad_left;

        let line = Line::from(vec![
            Span::styled(left, back_style),
            Span::styled(" ".repeat(pad_left), bar),
            Span::styled(middle, bar),
            Span::styled(" ".repeat(pad_right), bar),
            Span::styled(
                right,
                Style::default().bg(self.theme.footer_bg).fg(self.theme.footer_fg),
            ),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }
}
