// Outside golfers widget: filterable table of undrafted golfers who are not
// in any tier.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

use golfdraft_core::draft::{Candidate, TierSlot};

use crate::tui::{InputMode, ViewState};

/// Render the outside golfers table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let golfers = state.outside_list();
    let can_pick_outside = state
        .snapshot
        .as_deref()
        .and_then(|s| s.current_team())
        .is_some_and(|t| t.can_add(TierSlot::Outside));

    let header = Row::new(vec![
        Cell::from("Rank"),
        Cell::from("Name"),
        Cell::from("Points"),
        Cell::from("Events"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let row_style = if can_pick_outside {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let rows: Vec<Row> = golfers
        .iter()
        .map(|c| Row::new(ranking_cells(c)).style(row_style))
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(build_title(state, golfers.len())),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");

    let selected = (!golfers.is_empty()).then_some(state.outside_cursor);
    let mut table_state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Rank, name, points and events for one golfer; missing values show as "--".
pub fn ranking_cells(candidate: &Candidate) -> [String; 4] {
    let info = &candidate.ranking;
    [
        info.rank.map_or_else(|| "--".into(), |r| r.to_string()),
        candidate.full_name.clone(),
        info.points.map_or_else(|| "--".into(), |p| format!("{p:.2}")),
        info.events.map_or_else(|| "--".into(), |e| e.to_string()),
    ]
}

fn build_title(state: &ViewState, count: usize) -> Line<'static> {
    let mut title = String::from("Outside Golfers");
    let filtering = state.input_mode == InputMode::Filter;
    if filtering || !state.filter_text.is_empty() {
        title.push_str(&format!(" [/{}", state.filter_text));
        if filtering {
            title.push('_');
        }
        title.push(']');
    }
    title.push_str(&format!(" ({count})"));
    Line::from(title)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
