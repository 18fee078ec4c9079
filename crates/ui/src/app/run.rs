use std::{
    io::stdout,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::layout::centered_rect;
use crate::popup_view;

use super::types::{Command, CommandOutcome};
use super::App;

const IDLE_POLL: Duration = Duration::from_millis(100);

const HELP_LINES: [&str; 11] = [
    "q / Ctrl-C: quit",
    "n / Right: next page",
    "p / Left: previous page",
    "j / k or arrows: scroll",
    "+ / -: font size",
    "f: type a font size; Enter to set; Esc to cancel",
    "t: toggle light/dark theme (persists)",
    "click a word: translation popup",
    "Space / Enter: hear the word again",
    "Esc: close popup; x: stop speech",
    "?: toggle this help",
];

impl App {
    /// Waits no longer than the next scheduled utterance.
    pub(super) fn poll_timeout(&self, now: Instant) -> Duration {
        match self.player.next_deadline() {
            Some(due) => due.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.area();
        self.resize(size);
        self.view.render(f, size);
        popup_view::render(&self.popup, &self.view.theme, f, size);
        if let Some(entry) = &self.font_entry {
            entry.render(f, size);
        }
        if self.show_help {
            let popup_area = centered_rect(70, 70, size);
            let help = Paragraph::new(HELP_LINES.join("\n"))
                .block(
                    Block::default()
                        .title("Help (Esc or ? to close)")
                        .borders(Borders::ALL),
                )
                .wrap(Wrap { trim: false });
            f.render_widget(Clear, popup_area);
            f.render_widget(help, popup_area);
        }
    }

    /// Runs the reader until the user quits; returns the last page shown.
    pub fn run(mut self) -> std::io::Result<i64> {
        let mut stdout = stdout();
        let raw_ok = enable_raw_mode().is_ok();
        if raw_ok {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        if !raw_ok {
            // Non-interactive fallback: draw once and exit cleanly
            let _ = terminal.draw(|f| self.draw(f));
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            return Ok(self.viewer.current_page_number());
        }

        let mut exit = false;
        while !exit {
            self.poll_worker();
            self.player.tick(Instant::now());
            terminal.draw(|f| self.draw(f))?;

            match event::poll(self.poll_timeout(Instant::now())) {
                Ok(true) => match event::read() {
                    Ok(Event::Mouse(mouse)) => {
                        if self.font_entry.is_some() || self.show_help {
                            continue;
                        }
                        self.handle_mouse(mouse);
                    }
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if let Some(command) = Command::from_key(&self, key) {
                            if self.apply_command(command, Instant::now()) == CommandOutcome::Exit
                            {
                                exit = true;
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(_) => {
                        exit = true;
                    }
                },
                Ok(false) => {}
                Err(_) => {
                    exit = true;
                }
            }
        }

        self.close_popup();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        Ok(self.viewer.current_page_number())
    }
}
