// Tier board widget: one column per tier, cells dimmed when the team on the
// clock cannot take them.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use golfdraft_core::draft::{Candidate, TierSlot};
use golfdraft_core::protocol::DraftSnapshot;

use crate::tui::TierCursor;

/// How a tier cell should be drawn for the team on the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellState {
    Eligible,
    /// Undrafted, but the team on the clock cannot take it.
    Ineligible,
    /// Drafted, by the named team.
    Drafted(String),
}

/// Classify `candidate` for the current snapshot.
pub fn cell_state(snapshot: &DraftSnapshot, candidate: &Candidate) -> CellState {
    if !snapshot.is_available(&candidate.id) {
        let owner = snapshot
            .teams()
            .iter()
            .find(|t| t.holds_candidate(&candidate.id))
            .map(|t| t.name.clone())
            .unwrap_or_default();
        return CellState::Drafted(owner);
    }
    if snapshot.can_current_team_add(candidate) {
        CellState::Eligible
    } else {
        CellState::Ineligible
    }
}

/// Render the tier board into the given area.
pub fn render(frame: &mut Frame, area: Rect, snapshot: &DraftSnapshot, cursor: TierCursor) {
    let tiers = snapshot.pool.tiers();
    if tiers.is_empty() {
        super::placeholder::render(frame, area, "No tiers configured.");
        return;
    }

    let columns = Layout::horizontal(vec![Constraint::Ratio(1, tiers.len() as u32); tiers.len()])
        .split(area);

    let team_on_clock = snapshot.current_team();
    for (i, (tier, column)) in tiers.iter().zip(columns.iter()).enumerate() {
        let slot_used = team_on_clock.is_some_and(|t| !t.can_add(TierSlot::Tier(i)));
        let items: Vec<ListItem> = tier
            .iter()
            .map(|c| ListItem::new(cell_line(c, &cell_state(snapshot, c))))
            .collect();

        let title_style = if slot_used {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(format!("{}", TierSlot::Tier(i)), title_style));

        let is_active = cursor.tier == i;
        let list = List::new(items).block(block).highlight_style(if is_active {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });

        let mut list_state = ListState::default().with_selected(is_active.then_some(cursor.row));
        frame.render_stateful_widget(list, *column, &mut list_state);
    }
}

fn cell_line(candidate: &Candidate, state: &CellState) -> Line<'static> {
    match state {
        CellState::Eligible => Line::from(Span::styled(
            candidate.full_name.clone(),
            Style::default().fg(Color::White),
        )),
        CellState::Ineligible => Line::from(Span::styled(
            candidate.full_name.clone(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        )),
        CellState::Drafted(owner) => Line::from(vec![
            Span::styled(
                candidate.full_name.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT),
            ),
            Span::styled(format!(" ({owner})"), Style::default().fg(Color::DarkGray)),
        ]),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
