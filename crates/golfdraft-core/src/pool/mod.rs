// The candidate pool: the ranked golfer list partitioned into tiers.

pub mod rankings;
pub mod source;

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::config::Config;
use crate::draft::{list_outside_candidates, Candidate, CandidateId, OutsideCandidates, Tier, TierSlot};

pub use rankings::{parse_rankings_csv, parse_rankings_json};
pub use source::{source_from_config, FileSource, HttpSource, RankingsSource};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid rankings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid rankings CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("rankings request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unsupported rankings file {path}: expected a .json or .csv extension")]
    UnsupportedFormat { path: String },

    #[error("pool.source = \"api\" requires rapidapi_key in config/credentials.toml")]
    MissingApiKey,

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// CandidatePool
// ---------------------------------------------------------------------------

/// Every draftable golfer plus the tier partition over a subset of them.
///
/// Immutable once built. Tier membership is structural: a golfer is in tier
/// `i` exactly when it appears in `tiers()[i]`.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    tiers: Vec<Tier>,
    positions: HashMap<CandidateId, usize>,
    tier_of: HashMap<CandidateId, usize>,
}

impl CandidatePool {
    /// Build a pool from an explicit tier partition.
    ///
    /// Fails if a pool id repeats, a tier member is missing from the pool, or
    /// a golfer appears in more than one tier slot.
    pub fn new(candidates: Vec<Candidate>, tiers: Vec<Tier>) -> Result<Self, PoolError> {
        let mut positions = HashMap::with_capacity(candidates.len());
        for (i, c) in candidates.iter().enumerate() {
            if positions.insert(c.id.clone(), i).is_some() {
                return Err(PoolError::Validation(format!(
                    "player {} appears twice in the pool",
                    c.id
                )));
            }
        }

        let mut tier_of = HashMap::new();
        for (tier_idx, tier) in tiers.iter().enumerate() {
            for c in tier {
                if !positions.contains_key(&c.id) {
                    return Err(PoolError::Validation(format!(
                        "tier {} lists player {} who is not in the pool",
                        tier_idx + 1,
                        c.id
                    )));
                }
                if let Some(prev) = tier_of.insert(c.id.clone(), tier_idx) {
                    return Err(PoolError::Validation(format!(
                        "player {} is listed in tier {} and tier {}",
                        c.id,
                        prev + 1,
                        tier_idx + 1
                    )));
                }
            }
        }

        Ok(CandidatePool {
            candidates,
            tiers,
            positions,
            tier_of,
        })
    }

    /// Slice a ranked list into `tier_count` consecutive tiers of `tier_size`.
    /// Golfers ranked below the last tier are outside. Short lists leave the
    /// trailing tiers short or empty.
    pub fn from_ranked(
        candidates: Vec<Candidate>,
        tier_count: usize,
        tier_size: usize,
    ) -> Result<Self, PoolError> {
        let tiers: Vec<Tier> = (0..tier_count)
            .map(|t| {
                candidates
                    .iter()
                    .skip(t.saturating_mul(tier_size))
                    .take(tier_size)
                    .cloned()
                    .collect()
            })
            .collect();
        Self::new(candidates, tiers)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidate(&self, id: &CandidateId) -> Option<&Candidate> {
        self.positions.get(id).map(|&i| &self.candidates[i])
    }

    pub fn tier_of(&self, id: &CandidateId) -> Option<usize> {
        self.tier_of.get(id).copied()
    }

    /// The slot a pick of `id` would consume.
    pub fn slot_of(&self, id: &CandidateId) -> TierSlot {
        TierSlot::from(self.tier_of(id))
    }

    /// Undrafted golfers outside every tier whose name matches `query`.
    pub fn outside_candidates<'a>(
        &'a self,
        disabled: &'a HashSet<CandidateId>,
        query: &str,
    ) -> OutsideCandidates<'a> {
        list_outside_candidates(&self.candidates, &self.tiers, disabled, query)
    }
}

/// Fetch the ranked list from the configured source and build the tiered pool.
pub async fn load_pool(config: &Config) -> Result<CandidatePool, PoolError> {
    let source = source_from_config(config)?;
    let ranked = source.fetch().await?;
    if ranked.is_empty() {
        return Err(PoolError::Validation(format!(
            "{} returned no golfers",
            source.describe()
        )));
    }

    let pool = CandidatePool::from_ranked(ranked, config.pool.tier_count, config.pool.tier_size)?;
    info!(
        "Loaded {} golfers from {} into {} tiers of up to {}",
        pool.len(),
        source.describe(),
        pool.tier_count(),
        config.pool.tier_size
    );
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(n: usize) -> Vec<Candidate> {
        (1..=n)
            .map(|i| Candidate::new(i.to_string(), format!("Golfer {i}")))
            .collect()
    }

    #[test]
    fn from_ranked_slices_consecutive_tiers() {
        let pool = CandidatePool::from_ranked(ranked(45), 4, 10).unwrap();
        assert_eq!(pool.tier_count(), 4);
        assert!(pool.tiers().iter().all(|t| t.len() == 10));
        assert_eq!(pool.tiers()[0][0].id.as_str(), "1");
        assert_eq!(pool.tiers()[3][9].id.as_str(), "40");

        assert_eq!(pool.tier_of(&"1".into()), Some(0));
        assert_eq!(pool.tier_of(&"11".into()), Some(1));
        assert_eq!(pool.tier_of(&"40".into()), Some(3));
        assert_eq!(pool.tier_of(&"41".into()), None);
        assert_eq!(pool.slot_of(&"41".into()), TierSlot::Outside);
        assert_eq!(pool.slot_of(&"21".into()), TierSlot::Tier(2));
    }

    #[test]
    fn from_ranked_with_huge_tier_size_puts_everyone_in_tier_one() {
        let pool = CandidatePool::from_ranked(ranked(5), 4, usize::MAX).unwrap();
        assert_eq!(pool.tiers()[0].len(), 5);
        assert!(pool.tiers()[1..].iter().all(Vec::is_empty));
        assert_eq!(pool.slot_of(&"5".into()), TierSlot::Tier(0));
    }

    #[test]
    fn from_ranked_with_short_list_keeps_tier_count() {
        let pool = CandidatePool::from_ranked(ranked(12), 4, 10).unwrap();
        assert_eq!(pool.tier_count(), 4);
        assert_eq!(pool.tiers()[0].len(), 10);
        assert_eq!(pool.tiers()[1].len(), 2);
        assert!(pool.tiers()[2].is_empty());
        assert!(pool.tiers()[3].is_empty());
    }

    #[test]
    fn outside_candidates_excludes_tiers() {
        let pool = CandidatePool::from_ranked(ranked(6), 2, 2).unwrap();
        let disabled: HashSet<CandidateId> = ["5".into()].into_iter().collect();
        let ids: Vec<_> = pool
            .outside_candidates(&disabled, "")
            .iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["6"]);
    }

    #[test]
    fn candidate_lookup() {
        let pool = CandidatePool::from_ranked(ranked(3), 1, 1).unwrap();
        assert_eq!(pool.candidate(&"2".into()).map(|c| c.full_name.as_str()), Some("Golfer 2"));
        assert!(pool.candidate(&"99".into()).is_none());
    }

    #[test]
    fn new_rejects_tier_member_missing_from_pool() {
        let pool = ranked(2);
        let tiers = vec![vec![Candidate::new("9", "Ghost")]];
        assert!(matches!(
            CandidatePool::new(pool, tiers),
            Err(PoolError::Validation(_))
        ));
    }

    #[test]
    fn new_rejects_golfer_in_two_tiers() {
        let pool = ranked(2);
        let tiers = vec![vec![pool[0].clone()], vec![pool[0].clone()]];
        assert!(matches!(
            CandidatePool::new(pool, tiers),
            Err(PoolError::Validation(_))
        ));
    }

    #[test]
    fn new_rejects_duplicate_pool_ids() {
        let pool = vec![Candidate::new("1", "Tom Kim"), Candidate::new("1", "Tom Hoge")];
        assert!(matches!(
            CandidatePool::new(pool, vec![]),
            Err(PoolError::Validation(_))
        ));
    }

    #[test]
    fn default_pool_is_empty() {
        let pool = CandidatePool::default();
        assert!(pool.is_empty());
        assert_eq!(pool.tier_count(), 0);
    }
}
