// Individual pick representation.

use std::fmt;


use super::candidate::Candidate;

/// Where a pick was drawn from: a specific tier, or outside every tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierSlot {
    /// Zero-based index into the tier partition.
    Tier(usize),
    Outside,
}

impl TierSlot {
    pub fn tier_index(self) -> Option<usize> {
        match self {
            TierSlot::Tier(i) => Some(i),
            TierSlot::Outside => None,
        }
    }

    pub fn is_outside(self) -> bool {
        matches!(self, TierSlot::Outside)
    }
}

impl From<Option<usize>> for TierSlot {
    fn from(index: Option<usize>) -> Self {
        index.map_or(TierSlot::Outside, TierSlot::Tier)
    }
}

impl fmt::Display for TierSlot {
    /// Tiers display one-based ("Tier 1" is index 0).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierSlot::Tier(i) => write!(f, "Tier {}", i + 1),
            TierSlot::Outside => f.write_str("Outside"),
        }
    }
}

/// A candidate drafted by a team, tagged with the slot it consumed.
///
/// Picks have no setters; once created they are never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    candidate: Candidate,
    slot: TierSlot,
}

impl Pick {
    pub fn new(candidate: Candidate, slot: TierSlot) -> Self {
        Pick { candidate, slot }
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn slot(&self) -> TierSlot {
        self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_slot_from_option() {
        assert_eq!(TierSlot::from(Some(2)), TierSlot::Tier(2));
        assert_eq!(TierSlot::from(None), TierSlot::Outside);
    }

    #[test]
    fn tier_slot_accessors() {
        assert_eq!(TierSlot::Tier(0).tier_index(), Some(0));
        assert_eq!(TierSlot::Outside.tier_index(), None);
        assert!(TierSlot::Outside.is_outside());
        assert!(!TierSlot::Tier(3).is_outside());
    }

    #[test]
    fn tier_slot_display_is_one_based() {
        assert_eq!(TierSlot::Tier(0).to_string(), "Tier 1");
        assert_eq!(TierSlot::Tier(3).to_string(), "Tier 4");
        assert_eq!(TierSlot::Outside.to_string(), "Outside");
    }

    #[test]
    fn pick_exposes_candidate_and_slot() {
        let pick = Pick::new(Candidate::new("9", "Tom Hoge"), TierSlot::Outside);
        assert_eq!(pick.candidate().full_name, "Tom Hoge");
        assert_eq!(pick.slot(), TierSlot::Outside);
    }
}
