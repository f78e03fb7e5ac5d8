// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest snapshot from the app plus
// purely local state (tab, cursors, filter, prompts). The app pushes
// `UiUpdate` messages over an mpsc channel; the TUI applies them to
// `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::debug;

use golfdraft_core::draft::Candidate;
use golfdraft_core::protocol::{DraftSnapshot, PoolStatus, TabId, UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// Local UI types
// ---------------------------------------------------------------------------

/// What keystrokes are currently feeding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the outside-golfer name filter.
    Filter,
    /// Typing a team count for a new draft.
    TeamCount { buffer: String },
    /// Typing a new name for the team at `index`.
    RenameTeam { index: usize, buffer: String },
}

/// A one-line message shown above the help bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Cursor over the tier board: a tier column and a row within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierCursor {
    pub tier: usize,
    pub row: usize,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Latest snapshot from the app, if one has arrived.
    pub snapshot: Option<Box<DraftSnapshot>>,
    /// Which tab is active in the main panel.
    pub active_tab: TabId,
    pub tier_cursor: TierCursor,
    pub outside_cursor: usize,
    pub team_cursor: usize,
    /// Current outside-golfer filter text.
    pub filter_text: String,
    pub input_mode: InputMode,
    pub notice: Option<Notice>,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl ViewState {
    /// Install a new snapshot and pull cursors back inside its bounds.
    pub fn apply_snapshot(&mut self, snapshot: DraftSnapshot) {
        self.snapshot = Some(Box::new(snapshot));
        self.clamp_cursors();
    }

    /// Undrafted outside golfers matching the current filter.
    pub fn outside_list(&self) -> Vec<Candidate> {
        self.snapshot
            .as_ref()
            .map(|s| s.outside_candidates(&self.filter_text))
            .unwrap_or_default()
    }

    /// The golfer under the tier-board cursor.
    pub fn tier_selection(&self) -> Option<&Candidate> {
        let snapshot = self.snapshot.as_ref()?;
        snapshot
            .pool
            .tiers()
            .get(self.tier_cursor.tier)?
            .get(self.tier_cursor.row)
    }

    /// The golfer under the outside-list cursor.
    pub fn outside_selection(&self) -> Option<Candidate> {
        self.outside_list().into_iter().nth(self.outside_cursor)
    }

    pub fn team_count(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |s| s.teams().len())
    }

    pub fn clamp_cursors(&mut self) {
        let tier_lens: Vec<usize> = self
            .snapshot
            .as_ref()
            .map(|s| s.pool.tiers().iter().map(Vec::len).collect())
            .unwrap_or_default();
        self.tier_cursor.tier = self.tier_cursor.tier.min(tier_lens.len().saturating_sub(1));
        let rows = tier_lens.get(self.tier_cursor.tier).copied().unwrap_or(0);
        self.tier_cursor.row = self.tier_cursor.row.min(rows.saturating_sub(1));

        let outside = self.outside_list().len();
        self.outside_cursor = self.outside_cursor.min(outside.saturating_sub(1));
        self.team_cursor = self.team_cursor.min(self.team_count().saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            // A fresh snapshot means the last command went through.
            if matches!(state.notice, Some(Notice::Error(_))) {
                state.notice = None;
            }
            let was_complete = state.snapshot.as_ref().is_some_and(|s| s.is_complete());
            if snapshot.is_complete() && !was_complete {
                state.notice = Some(Notice::Info(
                    "Draft complete. Final rosters are on the Tiers tab.".to_string(),
                ));
            }
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::PickRejected { message } => {
            state.notice = Some(Notice::Error(message));
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    render_main_panel(frame, &layout, state);
    render_notice(frame, &layout, state);
    render_help_bar(frame, &layout, state);

    match &state.input_mode {
        InputMode::TeamCount { buffer } => {
            widgets::prompt::render(frame, frame.area(), "New draft", "Number of teams: ", buffer);
        }
        InputMode::RenameTeam { index, buffer } => {
            let title = format!("Rename Team {}", index + 1);
            widgets::prompt::render(frame, frame.area(), &title, "Name: ", buffer);
        }
        InputMode::Normal | InputMode::Filter => {}
    }

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_main_panel(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    widgets::tabs::render(frame, layout.tab_bar, state.active_tab);

    let Some(snapshot) = state.snapshot.as_deref() else {
        widgets::placeholder::render(frame, layout.main_panel, "Waiting for the draft to load...");
        return;
    };
    if snapshot.state.is_none() {
        let message = match &snapshot.pool_status {
            PoolStatus::Loading => "Loading golfers...".to_string(),
            PoolStatus::Failed(e) => format!("Golfers failed to load: {e}"),
            PoolStatus::Ready { .. } => "No draft yet. Press s to set one up.".to_string(),
        };
        widgets::placeholder::render(frame, layout.main_panel, &message);
        return;
    }

    match state.active_tab {
        TabId::Tiers if snapshot.is_complete() => {
            widgets::roster_table::render(frame, layout.main_panel, snapshot, None, "Final Rosters");
        }
        TabId::Tiers => widgets::tiers::render(frame, layout.main_panel, snapshot, state.tier_cursor),
        TabId::Outside => widgets::outside::render(frame, layout.main_panel, state),
        TabId::Teams => widgets::roster_table::render(
            frame,
            layout.main_panel,
            snapshot,
            Some(state.team_cursor),
            "Teams",
        ),
    }
}

fn render_notice(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let line = match &state.notice {
        Some(Notice::Error(msg)) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Some(Notice::Info(msg)) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(Color::Green),
        )),
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(line), layout.notice);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = help_text(state);
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

/// Key hints for the current mode and tab.
pub fn help_text(state: &ViewState) -> &'static str {
    match state.input_mode {
        InputMode::Filter => " type to filter | Enter:Keep | Esc:Clear",
        InputMode::TeamCount { .. } => " digits:Team count | Enter:Start draft | Esc:Cancel",
        InputMode::RenameTeam { .. } => " type a name | Enter:Save | Esc:Cancel",
        InputMode::Normal => match state.active_tab {
            TabId::Tiers => " q:Quit | Tab:Switch | arrows:Move | Enter:Pick | s:New draft",
            TabId::Outside => " q:Quit | Tab:Switch | Up/Down:Move | Enter:Pick | /:Filter | s:New draft",
            TabId::Teams => " q:Quit | Tab:Switch | Up/Down:Move | e:Rename | s:New draft",
        },
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        debug!("UI channel closed, leaving TUI");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e).context("terminal input error")),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
