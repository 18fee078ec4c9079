use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use leitor_core::popup::DismissEvent;

use super::App;

const WHEEL_LINES: u16 = 3;

impl App {
    /// Routes `event` through the popup's dismissal subscription and resets
    /// the highlight and speech when it closed the popup.
    pub(super) fn dismiss(&mut self, event: DismissEvent) -> bool {
        if !self.popup.handle(event) {
            return false;
        }
        self.player.stop();
        self.view.highlight = None;
        true
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = (mouse.column as i32, mouse.row as i32);
                if self.popup.is_open() && !self.dismiss(DismissEvent::PointerDown { x, y }) {
                    // press inside the popup
                    return;
                }
                if let Some(hit) = self.view.hit(mouse.column, mouse.row) {
                    self.open_word(hit);
                }
            }
            MouseEventKind::ScrollDown => {
                self.dismiss(DismissEvent::Scroll);
                self.view.scroll_down(WHEEL_LINES);
            }
            MouseEventKind::ScrollUp => {
                self.dismiss(DismissEvent::Scroll);
                self.view.scroll_up(WHEEL_LINES);
            }
            _ => {}
        }
    }
}
