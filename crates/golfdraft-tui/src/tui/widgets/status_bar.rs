// Status bar widget: draft phase, team on the clock, pick counter, pool.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use golfdraft_core::draft::DraftPhase;
use golfdraft_core::protocol::{DraftSnapshot, PoolStatus};

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [phase] [team on the clock] [pick counter] [pool]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    let snapshot = state.snapshot.as_deref();
    let phase = snapshot.and_then(DraftSnapshot::phase);
    let (label, color) = phase_indicator(phase);
    spans.push(Span::styled(
        format!(" {label} "),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));

    if let Some(draft) = snapshot.and_then(|s| s.state.as_ref()) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        if let Some(team) = draft.current_team() {
            spans.push(Span::styled(
                format!("{} on the clock", team.name),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        }
        spans.push(Span::styled(
            format!("Pick {}/{}", draft.picks_made(), draft.total_picks()),
            Style::default().fg(Color::White),
        ));
    }

    if let Some(snapshot) = snapshot {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        let (text, color) = pool_indicator(&snapshot.pool_status, snapshot.pool.len());
        spans.push(Span::styled(text, Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Label and color for the draft phase; `None` means no draft is set up.
pub fn phase_indicator(phase: Option<DraftPhase>) -> (&'static str, Color) {
    match phase {
        None => ("No draft", Color::Gray),
        Some(DraftPhase::Initializing) => ("Ready", Color::Cyan),
        Some(DraftPhase::Drafting) => ("Drafting", Color::Green),
        Some(DraftPhase::Complete) => ("Draft complete", Color::Magenta),
    }
}

pub fn pool_indicator(status: &PoolStatus, golfers: usize) -> (String, Color) {
    match status {
        PoolStatus::Loading => ("Loading golfers...".to_string(), Color::Yellow),
        PoolStatus::Ready { source } => (format!("{golfers} golfers from {source}"), Color::Gray),
        PoolStatus::Failed(message) => (format!("Pool error: {message}"), Color::Red),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::{buffer_text, drafted_snapshot, fresh_snapshot};

    fn render_line(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(120, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn phase_labels() {
        assert_eq!(phase_indicator(None).0, "No draft");
        assert_eq!(phase_indicator(Some(DraftPhase::Initializing)).0, "Ready");
        assert_eq!(phase_indicator(Some(DraftPhase::Drafting)).0, "Drafting");
        assert_eq!(phase_indicator(Some(DraftPhase::Complete)).0, "Draft complete");
    }

    #[test]
    fn pool_labels() {
        let ready = PoolStatus::Ready {
            source: "data/rankings.json".into(),
        };
        assert_eq!(pool_indicator(&ready, 45).0, "45 golfers from data/rankings.json");
        assert_eq!(
            pool_indicator(&PoolStatus::Failed("timeout".into()), 0).0,
            "Pool error: timeout"
        );
    }

    #[test]
    fn shows_team_on_the_clock_and_counter() {
        let mut state = ViewState::default();
        state.apply_snapshot(drafted_snapshot(false));
        let line = render_line(&state);
        assert!(line.contains("Drafting"));
        assert!(line.contains("Team 2 on the clock"));
        assert!(line.contains("Pick 3/8"));
    }

    #[test]
    fn complete_draft_has_no_team_on_the_clock() {
        let mut state = ViewState::default();
        state.apply_snapshot(drafted_snapshot(true));
        let line = render_line(&state);
        assert!(line.contains("Draft complete"));
        assert!(!line.contains("on the clock"));
        assert!(line.contains("Pick 8/8"));
    }

    #[test]
    fn render_without_snapshot() {
        let state = ViewState::default();
        assert!(render_line(&state).contains("No draft"));

        let mut state = ViewState::default();
        state.apply_snapshot(fresh_snapshot(2));
        assert!(render_line(&state).contains("Team 1 on the clock"));
    }
}
