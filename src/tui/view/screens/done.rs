use crate::cleaner::{CleanResult, RemovalStatus};
use crate::tui::view::components::centered_rect;
use crate::utils::format_size;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const MAX_FAILURES_SHOWN: usize = 8;

pub fn render_done(f: &mut Frame, result: &CleanResult, dry_run: bool) {
    let area = centered_rect(80, 70, f.area());

    let title = if dry_run {
        "Dry Run Complete"
    } else {
        "Cleanup Complete"
    };

    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Removed: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} items", result.success_count),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Failed: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} items", result.failed_count),
                Style::default().fg(if result.failed_count > 0 {
                    Color::Red
                } else {
                    Color::Green
                }),
            ),
        ]),
        Line::from(vec![
            Span::styled("Freed: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_size(result.total_freed),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Duration: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.2}s", result.duration.as_secs_f64()),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];

    let partial = result.partial_count();
    if partial > 0 {
        text.push(Line::from(Span::styled(
            format!(
                "{} container(s) emptied; the OS keeps the outer folder",
                partial
            ),
            Style::default().fg(Color::Yellow),
        )));
    }

    let failures: Vec<_> = result
        .outcomes
        .iter()
        .filter_map(|o| match &o.status {
            RemovalStatus::Failed(msg) => Some((o, msg)),
            _ => None,
        })
        .collect();

    if !failures.is_empty() {
        text.push(Line::from(""));
        for (outcome, msg) in failures.iter().take(MAX_FAILURES_SHOWN) {
            text.push(Line::from(vec![
                Span::styled("✗ ", Style::default().fg(Color::Red)),
                Span::raw(outcome.path.display().to_string()),
                Span::styled(format!(": {}", msg), Style::default().fg(Color::DarkGray)),
            ]));
        }
        if failures.len() > MAX_FAILURES_SHOWN {
            text.push(Line::from(Span::styled(
                format!("... and {} more", failures.len() - MAX_FAILURES_SHOWN),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Press any key to exit",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(text)
        .block(Block::default().title(" Result ").borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
