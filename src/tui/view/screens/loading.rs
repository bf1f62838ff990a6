use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::state::ScanProgress;
use crate::tui::view::components::centered_rect;
use crate::tui::view::components::footer::render_loading_footer;
use crate::utils::{format_number, truncate_middle};

pub fn render_loading(f: &mut Frame, progress: &ScanProgress) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(f.area());

    let area = centered_rect(70, 40, chunks[0]);

    let apps_line = match progress.installed_apps {
        Some(n) => format!("{} installed identifiers", format_number(n)),
        None => "Reading installed applications...".to_string(),
    };

    let path = progress
        .current_path
        .as_deref()
        .map(|p| truncate_middle(p, area.width.saturating_sub(4) as usize))
        .unwrap_or_default();

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} ", progress.spinner()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!(
                    "Scanning {} ({}/{})",
                    progress.current_category,
                    progress.locations_done,
                    progress.total_locations
                ),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(Span::styled(path, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(apps_line, Style::default().fg(Color::DarkGray))),
    ];

    let loading = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Leftovers ").borders(Borders::ALL));

    f.render_widget(Clear, area);
    f.render_widget(loading, area);
    render_loading_footer(f, chunks[1]);
}
