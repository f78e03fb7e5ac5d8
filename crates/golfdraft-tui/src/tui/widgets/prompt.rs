// Single-line text prompt overlay, used for the team count and team renames.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const PROMPT_WIDTH: u16 = 44;
const PROMPT_HEIGHT: u16 = 3;

/// Render a centered prompt showing `label` followed by the typed `buffer`.
pub fn render(frame: &mut Frame, area: Rect, title: &str, label: &str, buffer: &str) {
    let dialog_area = centered_rect(PROMPT_WIDTH, PROMPT_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let text = Line::from(vec![
        Span::raw(format!(" {label}")),
        Span::styled(buffer.to_string(), Style::default().fg(Color::White)),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]);

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

/// Compute a centered rectangle of the given size within `area`, clamped to
/// the space available.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [centered] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(vertical);
    centered
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
