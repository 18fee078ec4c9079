use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use leitor_core::popup::DismissEvent;

use crate::font_entry_view::FontEntryView;

use super::types::{Command, CommandOutcome, FontEntryCommand};
use super::App;

impl Command {
    pub(super) fn from_key(app: &App, key: KeyEvent) -> Option<Self> {
        if app.font_entry.is_some() {
            return match key.code {
                KeyCode::Esc => Some(Command::FontEntry(FontEntryCommand::Cancel)),
                KeyCode::Enter => Some(Command::FontEntry(FontEntryCommand::Submit)),
                KeyCode::Backspace => Some(Command::FontEntry(FontEntryCommand::Backspace)),
                KeyCode::Char(c) => Some(Command::FontEntry(FontEntryCommand::Insert(c))),
                _ => None,
            };
        }
        if app.show_help {
            return matches!(key.code, KeyCode::Esc | KeyCode::Char('?'))
                .then_some(Command::CloseHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let popup_open = app.popup.is_open();
        match key.code {
            KeyCode::Char('q') => Some(Command::Exit),
            KeyCode::Char('c') if ctrl => Some(Command::Exit),
            KeyCode::Esc => popup_open.then_some(Command::ClosePopup),
            KeyCode::Char(' ') | KeyCode::Enter => popup_open.then_some(Command::Replay),
            KeyCode::Char('x') => Some(Command::StopSpeech),
            KeyCode::Char('n') | KeyCode::Right => Some(Command::NextPage),
            KeyCode::Char('p') | KeyCode::Left => Some(Command::PreviousPage),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::StepFontSize(1)),
            KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::StepFontSize(-1)),
            KeyCode::Char('f') => Some(Command::StartFontEntry),
            KeyCode::Char('t') => Some(Command::ToggleTheme),
            KeyCode::Char('j') | KeyCode::Down => Some(Command::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Command::ScrollUp(1)),
            KeyCode::PageDown => Some(Command::ScrollDown(10)),
            KeyCode::PageUp => Some(Command::ScrollUp(10)),
            KeyCode::Char('?') => Some(Command::ToggleHelp),
            _ => None,
        }
    }
}

impl App {
    pub(super) fn apply_command(&mut self, command: Command, now: Instant) -> CommandOutcome {
        match command {
            Command::Exit => return CommandOutcome::Exit,
            Command::NextPage => {
                self.next_page();
            }
            Command::PreviousPage => {
                self.previous_page();
            }
            Command::StepFontSize(delta) => {
                self.step_font_size(delta);
            }
            Command::StartFontEntry => {
                self.font_entry = Some(FontEntryView::with_value(self.settings.font_size().get()));
            }
            Command::ToggleTheme => {
                self.toggle_theme();
            }
            Command::ClosePopup => {
                self.dismiss(DismissEvent::Escape);
            }
            Command::Replay => {
                self.replay(now);
            }
            Command::StopSpeech => {
                self.player.stop();
            }
            Command::ScrollDown(lines) => {
                self.dismiss(DismissEvent::Scroll);
                self.view.scroll_down(lines);
            }
            Command::ScrollUp(lines) => {
                self.dismiss(DismissEvent::Scroll);
                self.view.scroll_up(lines);
            }
            Command::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            Command::CloseHelp => {
                self.show_help = false;
            }
            Command::FontEntry(entry) => self.apply_font_entry_command(entry),
        }
        CommandOutcome::Continue
    }

    fn apply_font_entry_command(&mut self, command: FontEntryCommand) {
        match command {
            FontEntryCommand::Cancel => {
                self.font_entry = None;
            }
            FontEntryCommand::Submit => {
                if let Some(entry) = self.font_entry.take() {
                    self.set_font_size_input(&entry.input);
                }
            }
            FontEntryCommand::Backspace => {
                if let Some(entry) = &mut self.font_entry {
                    entry.backspace();
                }
            }
            FontEntryCommand::Insert(c) => {
                if let Some(entry) = &mut self.font_entry {
                    entry.push_char(c);
                }
            }
        }
    }
}
