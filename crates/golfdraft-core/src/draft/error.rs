// Draft engine error types.

use thiserror::Error;

use super::candidate::CandidateId;
use super::pick::TierSlot;
use super::team::IllegalPickReason;

/// A rejected draft operation. The draft state is untouched whenever one of
/// these is returned, so the caller can retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("{team} cannot draft from {slot}: {reason}")]
    IllegalPick {
        team: String,
        slot: TierSlot,
        reason: IllegalPickReason,
    },

    #[error("golfer {candidate_id} has already been drafted")]
    CandidateAlreadyTaken { candidate_id: CandidateId },

    #[error("the draft is already complete")]
    DraftAlreadyComplete,

    #[error("team index {index} is out of range for {len} teams")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no draft has been set up yet")]
    NotInitialized,
}
