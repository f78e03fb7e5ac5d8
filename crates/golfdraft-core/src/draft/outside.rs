// Golfers outside every tier, filtered for the outside-pick list.

use std::collections::HashSet;

use super::candidate::{Candidate, CandidateId, Tier};

/// A lazy, restartable view over the outside golfers.
///
/// Nothing is cached: every call to [`OutsideCandidates::iter`] rescans the
/// pool, so the view always reflects the inputs it borrows.
#[derive(Debug, Clone)]
pub struct OutsideCandidates<'a> {
    pool: &'a [Candidate],
    tiers: &'a [Tier],
    disabled: &'a HashSet<CandidateId>,
    needle: String,
}

impl<'a> OutsideCandidates<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Candidate> + '_ {
        self.pool.iter().filter(move |c| {
            !self.disabled.contains(&c.id)
                && !in_any_tier(self.tiers, &c.id)
                && c.name_contains(&self.needle)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_vec(&self) -> Vec<Candidate> {
        self.iter().cloned().collect()
    }
}

fn in_any_tier(tiers: &[Tier], id: &CandidateId) -> bool {
    tiers.iter().any(|tier| tier.iter().any(|c| &c.id == id))
}

/// Golfers from `pool` that are undrafted, in no tier, and whose name
/// contains `query` (case-insensitive). Pool order is preserved.
pub fn list_outside_candidates<'a>(
    pool: &'a [Candidate],
    tiers: &'a [Tier],
    disabled: &'a HashSet<CandidateId>,
    query: &str,
) -> OutsideCandidates<'a> {
    OutsideCandidates {
        pool,
        tiers,
        disabled,
        needle: query.to_lowercase(),
    }
}
