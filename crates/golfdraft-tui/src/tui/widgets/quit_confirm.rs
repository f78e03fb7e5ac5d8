// Quit confirmation overlay, drawn on top of everything when
// `ViewState::confirm_quit` is set. Quitting abandons the draft in memory.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::prompt::centered_rect;

const DIALOG_WIDTH: u16 = 34;
const DIALOG_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, area: Rect) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Quit? ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    let key = |k: &'static str, color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let lines = vec![
        Line::from(vec![
            Span::raw(" Really quit? ("),
            key("y", Color::Green),
            Span::raw("/"),
            key("n", Color::Red),
            Span::raw(")"),
        ]),
        Line::from(Span::styled(
            " The draft is not saved.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
