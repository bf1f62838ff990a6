use crate::tui::view::components::centered_rect;
use crate::utils::format_size;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub struct ConfirmModalData {
    pub marked_count: usize,
    pub total_size: u64,
    pub dry_run: bool,
}

pub fn render_confirm_modal(f: &mut Frame, data: &ConfirmModalData) {
    let area = centered_rect(60, 35, f.area());

    let warning = if data.dry_run {
        Line::from(Span::styled(
            "Dry run: nothing will be removed.",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default().fg(Color::Red),
        ))
    };

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Delete ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{} items", data.marked_count),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" (", Style::default().fg(Color::White)),
            Span::styled(
                format_size(data.total_size),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(")?", Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        warning,
        Line::from(""),
        Line::from(vec![
            Span::styled("[y/Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Confirm     "),
            Span::styled("[n/Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Back"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Confirm Delete ")
                .borders(Borders::ALL),
        )
        .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

pub fn render_executing_modal(f: &mut Frame, marked_count: usize) {
    let area = centered_rect(50, 20, f.area());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Removing {} items...", marked_count),
            Style::default().fg(Color::Cyan),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
