// Application state and orchestration logic.
//
// The app task is the only owner of the draft. The TUI sends it commands
// over a channel; each one is handled to completion before the next is read,
// and the result is pushed back as a snapshot or a rejection message.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use golfdraft_core::config::Config;
use golfdraft_core::draft::{CandidateId, DraftEngine};
use golfdraft_core::pool::CandidatePool;
use golfdraft_core::protocol::{DraftSnapshot, PoolStatus, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Smallest draft the app will set up. Lower requests are raised to this.
pub const MIN_TEAMS: usize = 2;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub pool: Arc<CandidatePool>,
    pub engine: DraftEngine,
    pub pool_status: PoolStatus,
}

impl AppState {
    pub fn new(config: Config, pool: CandidatePool, pool_status: PoolStatus) -> Self {
        AppState {
            config,
            pool: Arc::new(pool),
            engine: DraftEngine::new(),
            pool_status,
        }
    }

    /// Start a new draft with `team_count` teams, discarding any draft in
    /// progress. Counts below [`MIN_TEAMS`] are raised to it. Names from
    /// `[draft] team_names` are applied to the first teams.
    pub fn setup_draft(&mut self, team_count: usize) -> anyhow::Result<()> {
        if self.pool.is_empty() {
            return Err(anyhow!(
                "cannot start a draft: {}",
                describe_pool_status(&self.pool_status)
            ));
        }

        let team_count = team_count.max(MIN_TEAMS);
        self.engine
            .initialize(team_count, self.pool.tiers())
            .context("draft setup failed")?;

        for (index, name) in self
            .config
            .draft
            .team_names
            .iter()
            .enumerate()
            .take(team_count)
        {
            let name = name.trim();
            if !name.is_empty() {
                self.engine.rename_team(index, name)?;
            }
        }
        Ok(())
    }

    /// Give the golfer with `candidate_id` to the team on the clock. The
    /// tier slot comes from the pool.
    pub fn pick(&mut self, candidate_id: &CandidateId) -> anyhow::Result<()> {
        let candidate = self
            .pool
            .candidate(candidate_id)
            .cloned()
            .ok_or_else(|| anyhow!("golfer {candidate_id} is not in the pool"))?;
        let slot = self.pool.slot_of(candidate_id);
        self.engine.pick(candidate, slot)?;
        Ok(())
    }

    pub fn rename_team(&mut self, index: usize, name: &str) -> anyhow::Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("team name cannot be empty"));
        }
        self.engine.rename_team(index, name)?;
        Ok(())
    }

    /// Build a read-only projection for the TUI.
    pub fn build_snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            state: self.engine.state().cloned(),
            pool: Arc::clone(&self.pool),
            pool_status: self.pool_status.clone(),
        }
    }
}

fn describe_pool_status(status: &PoolStatus) -> String {
    match status {
        PoolStatus::Loading => "golfers are still loading".to_string(),
        PoolStatus::Ready { source } => format!("no golfers were loaded from {source}"),
        PoolStatus::Failed(message) => format!("golfers failed to load ({message})"),
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the application event loop.
///
/// Sends an initial snapshot, then handles user commands until `Quit` arrives
/// or the command channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    send_snapshot(&state, &ui_tx).await;

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => {
                handle_user_command(&mut state, cmd, &ui_tx).await;
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let result = match cmd {
        UserCommand::SetupDraft { team_count } => {
            info!("Setting up draft for {} teams", team_count);
            state.setup_draft(team_count)
        }
        UserCommand::Pick { candidate_id } => {
            debug!("Pick requested: {}", candidate_id);
            state.pick(&candidate_id)
        }
        UserCommand::RenameTeam { index, name } => {
            debug!("Rename requested: team {} -> {:?}", index, name);
            state.rename_team(index, &name)
        }
        UserCommand::Quit => {
            // Handled in the main loop
            Ok(())
        }
    };

    match result {
        Ok(()) => send_snapshot(state, ui_tx).await,
        Err(e) => {
            let message = format!("{e:#}");
            warn!("Command rejected: {}", message);
            let _ = ui_tx.send(UiUpdate::PickRejected { message }).await;
        }
    }
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    let _ = ui_tx.send(UiUpdate::Snapshot(Box::new(snapshot))).await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
