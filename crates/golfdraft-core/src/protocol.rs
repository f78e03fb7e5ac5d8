// Message types exchanged between the app task and the terminal UI.

use std::collections::HashSet;
use std::sync::Arc;

use crate::draft::{Candidate, CandidateId, DraftPhase, DraftState, Team};
use crate::pool::CandidatePool;

// ---------------------------------------------------------------------------
// UI -> app
// ---------------------------------------------------------------------------

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Start a new draft, discarding any draft in progress.
    SetupDraft { team_count: usize },
    /// Give a golfer to the team on the clock. The tier slot is looked up in
    /// the pool by the app.
    Pick { candidate_id: CandidateId },
    RenameTeam { index: usize, name: String },
    Quit,
}

// ---------------------------------------------------------------------------
// App -> UI
// ---------------------------------------------------------------------------

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// Full read-only view of the draft after a command was handled.
    Snapshot(Box<DraftSnapshot>),
    /// A command was refused; the previous snapshot is still current.
    PickRejected { message: String },
}

/// Progress of loading the candidate pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolStatus {
    Loading,
    Ready { source: String },
    Failed(String),
}

/// Which panel the main area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabId {
    #[default]
    Tiers,
    Outside,
    Teams,
}

impl TabId {
    pub const ALL: [TabId; 3] = [TabId::Tiers, TabId::Outside, TabId::Teams];

    pub fn title(self) -> &'static str {
        match self {
            TabId::Tiers => "Tiers",
            TabId::Outside => "Outside",
            TabId::Teams => "Teams",
        }
    }

    pub fn next(self) -> TabId {
        match self {
            TabId::Tiers => TabId::Outside,
            TabId::Outside => TabId::Teams,
            TabId::Teams => TabId::Tiers,
        }
    }

    pub fn prev(self) -> TabId {
        match self {
            TabId::Tiers => TabId::Teams,
            TabId::Outside => TabId::Tiers,
            TabId::Teams => TabId::Outside,
        }
    }
}

/// Read-only projection of the app state.
///
/// `state` is `None` until the first draft is set up.
#[derive(Debug, Clone)]
pub struct DraftSnapshot {
    pub state: Option<DraftState>,
    pub pool: Arc<CandidatePool>,
    pub pool_status: PoolStatus,
}

impl DraftSnapshot {
    pub fn phase(&self) -> Option<DraftPhase> {
        self.state.as_ref().map(DraftState::phase)
    }

    pub fn teams(&self) -> &[Team] {
        self.state.as_ref().map(DraftState::teams).unwrap_or(&[])
    }

    pub fn current_team_index(&self) -> Option<usize> {
        self.state.as_ref().and_then(DraftState::current_team_index)
    }

    pub fn current_team(&self) -> Option<&Team> {
        self.state.as_ref().and_then(DraftState::current_team)
    }

    pub fn is_complete(&self) -> bool {
        self.state.as_ref().is_some_and(DraftState::is_complete)
    }

    /// Whether `id` is still undrafted. Everything is available before setup.
    pub fn is_available(&self, id: &CandidateId) -> bool {
        self.state
            .as_ref()
            .map_or(true, |s| s.is_candidate_available(id))
    }

    /// Whether the team on the clock may take `candidate` right now.
    pub fn can_current_team_add(&self, candidate: &Candidate) -> bool {
        self.is_available(&candidate.id)
            && self.current_team().is_some_and(|team| {
                crate::draft::can_add_golfer(team, candidate, self.pool.slot_of(&candidate.id))
            })
    }

    /// Undrafted outside golfers matching `query`.
    pub fn outside_candidates(&self, query: &str) -> Vec<Candidate> {
        match &self.state {
            Some(state) => self.pool.outside_candidates(state.disabled_ids(), query).to_vec(),
            None => self
                .pool
                .outside_candidates(&HashSet::new(), query)
                .to_vec(),
        }
    }
}
