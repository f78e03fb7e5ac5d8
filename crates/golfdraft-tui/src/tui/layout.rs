// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Tab Bar (1 row)                                   |
// +--------------------------------------------------+
// | Main Panel (fill)                                 |
// |   Tiers board / Outside golfers / Teams           |
// +--------------------------------------------------+
// | Notice (1 row)                                    |
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: draft phase, team on the clock, pick counter.
    pub status_bar: Rect,
    pub tab_bar: Rect,
    /// Tab-switched content area.
    pub main_panel: Rect,
    /// Last rejection or info message.
    pub notice: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(1), // tab bar
            Constraint::Min(6),    // main panel
            Constraint::Length(1), // notice
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        tab_bar: vertical[1],
        main_panel: vertical[2],
        notice: vertical[3],
        help_bar: vertical[4],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
