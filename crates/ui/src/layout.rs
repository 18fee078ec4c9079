use ratatui::prelude::*;

/// Rect of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Part of a signed box that lands on `frame`, if any.
pub fn clip_to_frame(x: i32, y: i32, width: i32, height: i32, frame: Rect) -> Option<Rect> {
    let left = x.max(frame.x as i32);
    let top = y.max(frame.y as i32);
    let right = (x + width).min(frame.x as i32 + frame.width as i32);
    let bottom = (y + height).min(frame.y as i32 + frame.height as i32);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect {
        x: left as u16,
        y: top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    })
}
