// Draft engine: setup, pick legality, turn rotation, completion.
//
// All state transitions go through `reduce`, a pure function from the
// current state and a command to the next state. `DraftEngine` owns the
// single live `DraftState` and adds logging around it.

use tracing::{debug, info, warn};

use super::candidate::{Candidate, Tier};
use super::error::DraftError;
use super::pick::{Pick, TierSlot};
use super::state::DraftState;

/// A state transition request for an initialized draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftCommand {
    /// Give `candidate` to the team on the clock.
    Pick { candidate: Candidate, slot: TierSlot },
    /// Replace the display name of the team at `index`.
    RenameTeam { index: usize, name: String },
}

/// Build a fresh draft for `team_count` teams over `tiers`.
///
/// The tier count is taken from `tiers`; the candidates themselves are not
/// inspected. Fails only when there are no teams at all. Callers are expected
/// to enforce a minimum of two teams upstream.
pub fn initialize(team_count: usize, tiers: &[Tier]) -> Result<DraftState, DraftError> {
    if team_count < 1 {
        return Err(DraftError::InvalidConfiguration {
            message: format!("team count must be at least 1, got {team_count}"),
        });
    }
    Ok(DraftState::new(team_count, tiers.len()))
}

/// Apply `command` to `state`, returning the next state.
///
/// `state` is never modified; on error the caller still holds the state it
/// passed in.
pub fn reduce(state: &DraftState, command: DraftCommand) -> Result<DraftState, DraftError> {
    match command {
        DraftCommand::Pick { candidate, slot } => apply_pick(state, candidate, slot),
        DraftCommand::RenameTeam { index, name } => apply_rename(state, index, name),
    }
}

fn apply_pick(
    state: &DraftState,
    candidate: Candidate,
    slot: TierSlot,
) -> Result<DraftState, DraftError> {
    if state.complete {
        return Err(DraftError::DraftAlreadyComplete);
    }

    let team = state
        .teams
        .get(state.current_team_idx)
        .ok_or(DraftError::IndexOutOfRange {
            index: state.current_team_idx,
            len: state.teams.len(),
        })?;
    if let Some(reason) = team.rejection_for(slot) {
        return Err(DraftError::IllegalPick {
            team: team.name.clone(),
            slot,
            reason,
        });
    }

    if state.disabled_ids.contains(&candidate.id) {
        return Err(DraftError::CandidateAlreadyTaken {
            candidate_id: candidate.id,
        });
    }

    let mut next = state.clone();
    next.disabled_ids.insert(candidate.id.clone());
    next.teams[next.current_team_idx].push_pick(Pick::new(candidate, slot));

    if next.all_rosters_full() {
        next.complete = true;
    } else {
        next.current_team_idx = (next.current_team_idx + 1) % next.teams.len();
    }

    Ok(next)
}

fn apply_rename(state: &DraftState, index: usize, name: String) -> Result<DraftState, DraftError> {
    if index >= state.teams.len() {
        return Err(DraftError::IndexOutOfRange {
            index,
            len: state.teams.len(),
        });
    }
    let mut next = state.clone();
    next.teams[index].name = name;
    Ok(next)
}

// ---------------------------------------------------------------------------
// DraftEngine
// ---------------------------------------------------------------------------

/// Owner of the live draft.
///
/// Starts uninitialized; `initialize` installs a fresh state and may be
/// called again at any time to discard the current draft.
#[derive(Debug, Default)]
pub struct DraftEngine {
    state: Option<DraftState>,
}

impl DraftEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live draft, or `None` before the first `initialize`.
    pub fn state(&self) -> Option<&DraftState> {
        self.state.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Replace any current draft with a fresh one.
    pub fn initialize(&mut self, team_count: usize, tiers: &[Tier]) -> Result<&DraftState, DraftError> {
        let state = initialize(team_count, tiers).inspect_err(|e| warn!("Draft setup rejected: {e}"))?;
        info!(
            "Draft initialized: {} teams, {} tiers, {} picks to make",
            team_count,
            state.tier_count(),
            state.total_picks()
        );
        Ok(&*self.state.insert(state))
    }

    /// Whether the team on the clock may take `candidate` from `slot`.
    ///
    /// Returns false when the draft is uninitialized or complete, or when the
    /// candidate is already drafted, so it can drive control disabling
    /// directly.
    pub fn can_current_team_add(&self, candidate: &Candidate, slot: TierSlot) -> bool {
        let Some(state) = &self.state else {
            return false;
        };
        state.is_candidate_available(&candidate.id)
            && state
                .current_team()
                .is_some_and(|team| super::team::can_add_golfer(team, candidate, slot))
    }

    /// Give `candidate` to the team on the clock.
    pub fn pick(&mut self, candidate: Candidate, slot: TierSlot) -> Result<&DraftState, DraftError> {
        let name = candidate.full_name.clone();
        let team_idx = self.state.as_ref().map(|s| s.current_team_idx);
        let state = self.apply(DraftCommand::Pick { candidate, slot })?;

        if let Some(team) = team_idx.and_then(|i| state.team(i)) {
            info!(
                "Pick {}/{}: {} -> {} ({})",
                state.picks_made(),
                state.total_picks(),
                name,
                team.name,
                slot
            );
        }
        if state.is_complete() {
            info!("Draft complete");
        }
        Ok(state)
    }

    pub fn rename_team(&mut self, index: usize, name: impl Into<String>) -> Result<&DraftState, DraftError> {
        self.apply(DraftCommand::RenameTeam {
            index,
            name: name.into(),
        })
    }

    /// Run `command` through `reduce` and install the result.
    pub fn apply(&mut self, command: DraftCommand) -> Result<&DraftState, DraftError> {
        let current = self.state.as_ref().ok_or(DraftError::NotInitialized)?;
        let next = reduce(current, command).inspect_err(|e| warn!("Draft command rejected: {e}"))?;

        if let Err(violation) = next.check_invariants() {
            debug!("Invariant check failed after commit: {violation}");
        }

        Ok(&*self.state.insert(next))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
