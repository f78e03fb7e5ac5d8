// Roster table widget: every team with its golfers, one column per roster slot.
//
// Used by the Teams tab (with a row cursor) and for the final rosters once
// the draft is complete.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

use golfdraft_core::draft::{Team, ROSTER_SIZE};
use golfdraft_core::protocol::DraftSnapshot;

/// Filler for a roster slot nobody has drafted into.
pub const EMPTY_SLOT: &str = "No Pick";

/// Render the roster table. `cursor` highlights a team row when given.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &DraftSnapshot,
    cursor: Option<usize>,
    title: &str,
) {
    let mut header_cells = vec![Cell::from("Team")];
    header_cells.extend((1..=ROSTER_SIZE).map(|n| Cell::from(format!("Golfer {n}"))));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let on_clock = snapshot.current_team_index();
    let rows: Vec<Row> = snapshot
        .teams()
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let marker = if on_clock == Some(i) { "* " } else { "  " };
            let mut cells = vec![Cell::from(format!("{marker}{}", team.name))];
            cells.extend(roster_cells(team).into_iter().map(Cell::from));
            let style = if on_clock == Some(i) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![Constraint::Min(16)];
    widths.extend(std::iter::repeat_n(Constraint::Fill(1), ROSTER_SIZE));

    let mut table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    if cursor.is_some() {
        table = table
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol(">> ");
    }

    let mut table_state = TableState::default().with_selected(cursor);
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// One display string per roster slot, in pick order, padded with
/// [`EMPTY_SLOT`].
pub fn roster_cells(team: &Team) -> Vec<String> {
    let mut cells: Vec<String> = team
        .picks()
        .iter()
        .map(|p| format!("{} ({})", p.candidate().full_name, p.slot()))
        .collect();
    cells.resize(ROSTER_SIZE, EMPTY_SLOT.to_string());
    cells
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
