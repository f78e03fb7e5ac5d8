// A drafting team and its roster rules.

use thiserror::Error;

use super::candidate::{Candidate, CandidateId};
use super::pick::{Pick, TierSlot};

/// Number of picks every team must make before the draft is complete.
pub const ROSTER_SIZE: usize = 4;

/// Why a team cannot take a pick from a given slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalPickReason {
    /// The team already holds `ROSTER_SIZE` picks.
    #[error("has reached the maximum team size of {}", ROSTER_SIZE)]
    RosterFull,
    /// The team already drafted from this tier.
    #[error("already has a golfer from Tier {}", .0 + 1)]
    TierTaken(usize),
}

/// A team participating in the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    /// Display name, editable at any time.
    pub name: String,
    /// Picks in the order they were made. Append-only.
    picks: Vec<Pick>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Team {
            name: name.into(),
            picks: Vec::new(),
        }
    }

    /// Default name for the team at `index` ("Team 1" for index 0).
    pub fn default_name(index: usize) -> String {
        format!("Team {}", index + 1)
    }

    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    pub fn is_full(&self) -> bool {
        self.picks.len() >= ROSTER_SIZE
    }

    /// Roster spots still open.
    pub fn open_slots(&self) -> usize {
        ROSTER_SIZE.saturating_sub(self.picks.len())
    }

    /// Whether the team already drafted from tier `tier`.
    pub fn holds_tier(&self, tier: usize) -> bool {
        self.picks.iter().any(|p| p.slot() == TierSlot::Tier(tier))
    }

    pub fn holds_candidate(&self, id: &CandidateId) -> bool {
        self.picks.iter().any(|p| &p.candidate().id == id)
    }

    /// The reason a pick from `slot` would be rejected, if any.
    ///
    /// A full roster is reported before a tier conflict. Outside picks are
    /// only limited by roster size.
    pub fn rejection_for(&self, slot: TierSlot) -> Option<IllegalPickReason> {
        if self.is_full() {
            return Some(IllegalPickReason::RosterFull);
        }
        match slot {
            TierSlot::Tier(i) if self.holds_tier(i) => Some(IllegalPickReason::TierTaken(i)),
            _ => None,
        }
    }

    pub fn can_add(&self, slot: TierSlot) -> bool {
        self.rejection_for(slot).is_none()
    }

    pub(crate) fn push_pick(&mut self, pick: Pick) {
        self.picks.push(pick);
    }
}

/// Whether `team` may add `candidate` drawn from `slot`.
///
/// Only the team's roster is consulted: global availability of the candidate
/// is enforced separately by the draft state.
pub fn can_add_golfer(team: &Team, _candidate: &Candidate, slot: TierSlot) -> bool {
    team.can_add(slot)
}
