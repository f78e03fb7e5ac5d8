// Draftable candidates and their ranking metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a candidate (the ranking provider's player ID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        CandidateId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        CandidateId(s.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(s: String) -> Self {
        CandidateId(s)
    }
}

/// Ranking metadata attached to a candidate.
///
/// The draft engine never reads these fields; they are carried through
/// unchanged so the presentation layer can show them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingInfo {
    pub rank: Option<u32>,
    pub previous_rank: Option<u32>,
    pub points: Option<f64>,
    pub previous_points: Option<f64>,
    pub events: Option<u32>,
}

/// A golfer that can be drafted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub full_name: String,
    #[serde(default)]
    pub ranking: RankingInfo,
}

impl Candidate {
    /// Create a candidate with no ranking metadata.
    pub fn new(id: impl Into<CandidateId>, full_name: impl Into<String>) -> Self {
        Candidate {
            id: id.into(),
            full_name: full_name.into(),
            ranking: RankingInfo::default(),
        }
    }

    pub fn with_ranking(mut self, ranking: RankingInfo) -> Self {
        self.ranking = ranking;
        self
    }

    /// Case-insensitive substring match against the display name.
    ///
    /// `needle` must already be lowercased.
    pub fn name_contains(&self, needle: &str) -> bool {
        needle.is_empty() || self.full_name.to_lowercase().contains(needle)
    }
}

/// An ordered bracket of candidates, in ranking order.
pub type Tier = Vec<Candidate>;
