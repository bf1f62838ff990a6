use crate::tui::logic::{SelectionModel, WindowRow, VISIBLE_ROWS};
use crate::tui::view::components::confidence_color;
use crate::tui::view::components::footer::render_review_footer;
use crate::utils::{format_number, format_size, truncate_middle};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

// window rows plus the list border
const LIST_HEIGHT: u16 = VISIBLE_ROWS as u16 + 2;

pub struct ReviewData<'a> {
    pub selection: &'a SelectionModel,
    pub notice: Option<&'a str>,
    pub dry_run: bool,
}

pub fn render_review(f: &mut Frame, data: &ReviewData) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(LIST_HEIGHT),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_header(f, chunks[0], data);
    render_list(f, chunks[1], data.selection);
    render_detail(f, chunks[2], data);
    render_review_footer(f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect, data: &ReviewData) {
    let selection = data.selection;
    let total: u64 = selection.items().iter().map(|i| i.size).sum();
    let filter = selection
        .filter()
        .map(|c| c.label())
        .unwrap_or("all");

    let mut spans = vec![
        Span::styled(
            " Leftovers ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("Orphaned app files"),
        Span::raw("   "),
        Span::styled(
            format!(
                "{} found ({}) | Marked: {} ({})",
                format_number(selection.items().len()),
                format_size(total),
                format_number(selection.marked_count()),
                format_size(selection.marked_size())
            ),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled(
            format!("[{}: {}]", filter, selection.filtered_len()),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if data.dry_run {
        spans.push(Span::styled(
            "  DRY RUN",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn render_list(f: &mut Frame, area: Rect, selection: &SelectionModel) {
    if selection.filtered_len() == 0 {
        let empty = Paragraph::new(Line::from(Span::styled(
            if selection.items().is_empty() {
                "No leftovers found."
            } else {
                "Nothing at this confidence level. Press 0 to show all."
            },
            Style::default().fg(Color::DarkGray),
        )))
        .block(Block::default().borders(Borders::NONE));
        f.render_widget(empty, area);
        return;
    }

    let name_width = (area.width as usize).saturating_sub(40).max(12);
    let window = selection.window();
    let focused_row = window.iter().position(|row| row.focused);
    let items: Vec<ListItem> = window
        .iter()
        .map(|row| list_row(row, name_width))
        .collect();

    let title = format!(
        " {}-{} of {} ",
        selection.scroll() + 1,
        selection.scroll() + items.len(),
        selection.filtered_len()
    );

    // a terminal shorter than the window still keeps the focused row on screen
    let mut state = ListState::default().with_selected(focused_row);
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    f.render_stateful_widget(list, area, &mut state);
}

fn list_row<'a>(row: &WindowRow<'a>, name_width: usize) -> ListItem<'a> {
    let item = row.item;
    let mark = if row.marked { "[x] " } else { "[ ] " };
    let confidence = item.confidence.map(|c| c.label()).unwrap_or("-");
    let category = item.category.as_deref().unwrap_or("");

    let base = if row.focused {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(
            mark,
            base.fg(if row.marked { Color::Green } else { Color::Gray }),
        ),
        Span::styled(
            format!(
                "{:<width$}",
                truncate_middle(&item.name, name_width),
                width = name_width
            ),
            base.fg(Color::White),
        ),
        Span::styled(format!(" {:>10}", format_size(item.size)), base.fg(Color::Cyan)),
        Span::styled(
            format!(" {:<6}", confidence),
            base.fg(confidence_color(item.confidence)),
        ),
        Span::styled(format!(" {}", category), base.fg(Color::DarkGray)),
    ]);

    ListItem::new(line)
}

fn render_detail(f: &mut Frame, area: Rect, data: &ReviewData) {
    let mut lines = Vec::new();

    if let Some(item) = data.selection.focused() {
        lines.push(Line::from(vec![
            Span::styled("Path: ", Style::default().fg(Color::DarkGray)),
            Span::raw(item.path.display().to_string()),
        ]));
        if let Some(detail) = &item.detail {
            lines.push(Line::from(vec![
                Span::styled("App: ", Style::default().fg(Color::DarkGray)),
                Span::raw(detail.clone()),
            ]));
        }
    }

    if let Some(notice) = data.notice {
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(detail, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Confidence, SelectableItem};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_focused_row_visible_on_short_terminal() {
        let items = (0..20)
            .map(|i| {
                SelectableItem::new(format!("Leftover{i:02}"), PathBuf::from(format!("/tmp/x{i}")), 4096)
                    .with_confidence(Confidence::Medium)
            })
            .collect();
        let mut selection = SelectionModel::new(items);
        selection.move_cursor(VISIBLE_ROWS as isize - 1);
        assert_eq!(selection.scroll(), 0);

        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let data = ReviewData {
            selection: &selection,
            notice: None,
            dry_run: false,
        };
        terminal.draw(|f| render_review(f, &data)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains(&format!("Leftover{:02}", VISIBLE_ROWS - 1)));
    }
}
