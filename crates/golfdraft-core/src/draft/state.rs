// Draft state: teams, turn pointer, drafted golfers, completion.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::candidate::CandidateId;
use super::pick::TierSlot;
use super::team::{Team, ROSTER_SIZE};

/// Lifecycle phase of an initialized draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    /// Teams are configured and nobody has picked yet.
    Initializing,
    /// At least one pick has been made and rosters are not all full.
    Drafting,
    /// Every roster is full. Terminal.
    Complete,
}

/// A broken state invariant, reported by [`DraftState::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("turn pointer {index} outside 0..{len}")]
    TurnPointerOutOfRange { index: usize, len: usize },

    #[error("team {team} holds {picks} picks")]
    RosterOverflow { team: usize, picks: usize },

    #[error("team {team} holds two picks from {slot}")]
    DuplicateTier { team: usize, slot: TierSlot },

    #[error("golfer {id} is drafted {count} times")]
    DuplicateCandidate { id: CandidateId, count: usize },

    #[error("disabled set disagrees with rosters for golfer {id}")]
    DisabledMismatch { id: CandidateId },

    #[error("complete flag is {flag} but rosters say {expected}")]
    CompletionMismatch { flag: bool, expected: bool },
}

/// The complete state of one draft.
///
/// Only the engine mutates this; everyone else observes it.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftState {
    pub(crate) teams: Vec<Team>,
    /// Index of the team on the clock. Frozen once the draft completes.
    pub(crate) current_team_idx: usize,
    /// Every golfer drafted by any team.
    pub(crate) disabled_ids: HashSet<CandidateId>,
    pub(crate) complete: bool,
    /// Number of tiers in the partition this draft was set up with.
    pub(crate) tier_count: usize,
}

impl DraftState {
    /// A fresh draft with `team_count` empty teams named "Team 1".."Team N".
    pub(crate) fn new(team_count: usize, tier_count: usize) -> Self {
        DraftState {
            teams: (0..team_count).map(|i| Team::new(Team::default_name(i))).collect(),
            current_team_idx: 0,
            disabled_ids: HashSet::new(),
            complete: false,
            tier_count,
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, index: usize) -> Option<&Team> {
        self.teams.get(index)
    }

    /// Index of the team on the clock, or `None` once the draft is complete.
    pub fn current_team_index(&self) -> Option<usize> {
        if self.complete {
            None
        } else {
            Some(self.current_team_idx)
        }
    }

    /// The team on the clock, or `None` once the draft is complete.
    pub fn current_team(&self) -> Option<&Team> {
        self.current_team_index().and_then(|i| self.teams.get(i))
    }

    pub fn disabled_ids(&self) -> &HashSet<CandidateId> {
        &self.disabled_ids
    }

    pub fn is_candidate_available(&self, id: &CandidateId) -> bool {
        !self.disabled_ids.contains(id)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn tier_count(&self) -> usize {
        self.tier_count
    }

    /// Picks made so far across all teams.
    pub fn picks_made(&self) -> usize {
        self.teams.iter().map(|t| t.picks().len()).sum()
    }

    /// Picks required to complete the draft.
    pub fn total_picks(&self) -> usize {
        self.teams.len() * ROSTER_SIZE
    }

    pub fn picks_remaining(&self) -> usize {
        self.total_picks().saturating_sub(self.picks_made())
    }

    pub fn phase(&self) -> DraftPhase {
        if self.complete {
            DraftPhase::Complete
        } else if self.picks_made() == 0 {
            DraftPhase::Initializing
        } else {
            DraftPhase::Drafting
        }
    }

    /// Whether every roster is full, computed from the rosters themselves.
    pub(crate) fn all_rosters_full(&self) -> bool {
        !self.teams.is_empty() && self.teams.iter().all(|t| t.picks().len() == ROSTER_SIZE)
    }

    /// Verify every structural invariant, returning the first violation.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if !self.complete && self.current_team_idx >= self.teams.len() {
            return Err(InvariantViolation::TurnPointerOutOfRange {
                index: self.current_team_idx,
                len: self.teams.len(),
            });
        }

        let mut drafted: HashMap<&CandidateId, usize> = HashMap::new();
        for (team_idx, team) in self.teams.iter().enumerate() {
            if team.picks().len() > ROSTER_SIZE {
                return Err(InvariantViolation::RosterOverflow {
                    team: team_idx,
                    picks: team.picks().len(),
                });
            }

            let mut tiers_seen = HashSet::new();
            for pick in team.picks() {
                if let TierSlot::Tier(i) = pick.slot() {
                    if !tiers_seen.insert(i) {
                        return Err(InvariantViolation::DuplicateTier {
                            team: team_idx,
                            slot: pick.slot(),
                        });
                    }
                }
                *drafted.entry(&pick.candidate().id).or_insert(0) += 1;
            }
        }

        if let Some((id, count)) = drafted.iter().find(|(_, count)| **count > 1) {
            return Err(InvariantViolation::DuplicateCandidate {
                id: (*id).clone(),
                count: *count,
            });
        }

        if let Some(id) = self.disabled_ids.iter().find(|id| !drafted.contains_key(*id)) {
            return Err(InvariantViolation::DisabledMismatch { id: id.clone() });
        }
        if let Some(id) = drafted.keys().find(|id| !self.disabled_ids.contains(**id)) {
            return Err(InvariantViolation::DisabledMismatch { id: (*id).clone() });
        }

        let expected = self.all_rosters_full();
        if self.complete != expected {
            return Err(InvariantViolation::CompletionMismatch {
                flag: self.complete,
                expected,
            });
        }

        Ok(())
    }
}
