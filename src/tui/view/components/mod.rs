pub mod footer;
pub mod modal;

use crate::model::Confidence;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn confidence_color(confidence: Option<Confidence>) -> Color {
    match confidence {
        Some(Confidence::High) => Color::Red,
        Some(Confidence::Medium) => Color::Yellow,
        Some(Confidence::Low) => Color::Green,
        None => Color::Gray,
    }
}
