use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_review_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("↑↓/jk", Style::default().fg(Color::Cyan)),
        Span::raw(" Nav  "),
        Span::styled("Space", Style::default().fg(Color::Cyan)),
        Span::raw(" Mark  "),
        Span::styled("a", Style::default().fg(Color::Cyan)),
        Span::raw(" All  "),
        Span::styled("1/2/3", Style::default().fg(Color::Cyan)),
        Span::raw(" High/Med/Low  "),
        Span::styled("0", Style::default().fg(Color::Cyan)),
        Span::raw(" Show all  "),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" Delete  "),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" Quit"),
    ]))
    .block(Block::default().borders(Borders::TOP));

    f.render_widget(footer, area);
}

pub fn render_loading_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" Quit"),
    ]))
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}
