use leitor_core::{
    page::tokenize,
    prefs::{FontSize, Theme as ThemeMode},
};
use ratatui::{backend::TestBackend, layout::Rect, style::Color, Terminal};

use super::{column_width, parse_color, ReaderView, Theme, WordHit};

fn size(n: i64) -> FontSize {
    FontSize::new(n).unwrap()
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn column_shrinks_as_font_grows() {
    assert_eq!(column_width(size(18), 200), 80);
    assert_eq!(column_width(size(30), 200), 48);
    assert_eq!(column_width(size(11), 100), 100);
    assert!(column_width(size(12), 200) > column_width(size(24), 200));
}

#[test]
fn hit_maps_cells_to_tokens_inside_centered_column() {
    let mut view = ReaderView::new();
    view.set_tokens(tokenize("I run fast"));
    view.prepare(Rect::new(0, 0, 120, 24));
    let body = view.body();
    assert_eq!(body.x, 20);
    assert_eq!(body.y, 2);
    assert_eq!(body.width, 80);

    assert_eq!(
        view.hit(23, 2),
        Some(WordHit {
            token: 1,
            text: "run".into(),
            x: 22,
            y: 2
        })
    );
    assert_eq!(view.hit(21, 2), None);
    assert_eq!(view.hit(20, 1), None);
    assert_eq!(view.hit(5, 2), None);
}

#[test]
fn font_change_reflows_on_next_prepare() {
    let mut view = ReaderView::new();
    let text = "word ".repeat(30);
    view.set_tokens(tokenize(text.trim_end()));
    view.prepare(Rect::new(0, 0, 200, 40));
    let wide = view.layout.line_count();
    view.font_size = size(30);
    view.prepare(Rect::new(0, 0, 200, 40));
    assert!(view.layout.line_count() > wide);
}

#[test]
fn scroll_is_bounded_by_content() {
    let mut view = ReaderView::new();
    let text: Vec<String> = (0..50).map(|i| format!("w{i}")).collect();
    view.set_tokens(tokenize(&text.join(" \n")));
    view.prepare(Rect::new(0, 0, 80, 13));
    view.scroll_down(500);
    view.scroll_up(1);
    view.scroll_down(1);
    // 50 lines in a 10-row body
    assert_eq!(view.hit(0, 2).map(|h| h.token), Some(40));
}

#[test]
fn render_shows_level_header_and_words() {
    let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
    let mut view = ReaderView::new();
    view.page_number = 7;
    view.set_tokens(tokenize("The cat sleeps."));
    terminal
        .draw(|f| {
            let area = f.area();
            view.prepare(area);
            view.render(f, area);
        })
        .unwrap();
    let text = buffer_text(&terminal);
    assert!(text.contains('7'));
    assert!(text.contains("current level"));
    assert!(text.contains("The cat sleeps."));
    assert!(text.contains("?page=7 · font 18"));
}

#[test]
fn loading_placeholder_while_page_is_fetched() {
    let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
    let mut view = ReaderView::new();
    view.loading = true;
    terminal
        .draw(|f| {
            let area = f.area();
            view.prepare(area);
            view.render(f, area);
        })
        .unwrap();
    assert!(buffer_text(&terminal).contains("Loading"));
}

#[test]
fn theme_modes_and_overrides() {
    assert_eq!(Theme::for_mode(ThemeMode::Dark), Theme::dark());
    assert_ne!(Theme::light().body_bg, Theme::dark().body_bg);

    let overrides = leitor_core::config::ThemeConfig {
        header_bg: Some("red".into()),
        header_fg: Some("not-a-color".into()),
        accent: Some("#ff9e64".into()),
    };
    let theme = Theme::dark().with_overrides(&overrides);
    assert_eq!(theme.header_bg, Color::Red);
    assert_eq!(theme.header_fg, Theme::dark().header_fg);
    assert_eq!(theme.accent, Color::Rgb(255, 158, 100));
}

#[test]
fn parse_color_accepts_names_and_hex() {
    assert_eq!(parse_color("Blue"), Some(Color::Blue));
    assert_eq!(parse_color("#1a1b26"), Some(Color::Rgb(26, 27, 38)));
    assert_eq!(parse_color("#12"), None);
    assert_eq!(parse_color("#zzzzzz"), None);
    assert_eq!(parse_color("chartreuse"), None);
}

#[test]
fn hit_on_wrapped_token_reports_only_the_visible_piece() {
    let mut view = ReaderView::new();
    view.set_tokens(tokenize("I run.\nRun fast."));
    view.prepare(Rect::new(0, 0, 80, 24));

    let first = view.hit(3, 2).unwrap();
    assert_eq!((first.token, first.text.as_str()), (1, "run."));
    let second = view.hit(1, 3).unwrap();
    assert_eq!((second.token, second.text.as_str()), (1, "Run"));
    assert_eq!((second.x, second.y), (0, 3));
}
