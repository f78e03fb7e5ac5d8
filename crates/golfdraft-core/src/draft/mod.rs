// Tiered draft engine: data model, legality rules, and state transitions.

pub mod candidate;
pub mod engine;
pub mod error;
pub mod outside;
pub mod pick;
pub mod state;
pub mod team;

pub use candidate::{Candidate, CandidateId, RankingInfo, Tier};
pub use engine::{initialize, reduce, DraftCommand, DraftEngine};
pub use error::DraftError;
pub use outside::{list_outside_candidates, OutsideCandidates};
pub use pick::{Pick, TierSlot};
pub use state::{DraftPhase, DraftState, InvariantViolation};
pub use team::{can_add_golfer, IllegalPickReason, Team, ROSTER_SIZE};
