// Tab bar: which main-panel view is active.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Tabs;
use ratatui::Frame;

use golfdraft_core::protocol::TabId;

pub fn render(frame: &mut Frame, area: Rect, active: TabId) {
    let selected = TabId::ALL.iter().position(|t| *t == active).unwrap_or(0);
    let tabs = Tabs::new(tab_labels())
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

/// Labels with their number keys, e.g. "1:Tiers".
pub fn tab_labels() -> Vec<String> {
    TabId::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("{}:{}", i + 1, tab.title()))
        .collect()
}
