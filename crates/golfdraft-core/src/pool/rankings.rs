// Ranking list parsing: the provider's JSON payload and a flat CSV export.

use std::collections::HashSet;
use std::io::Read;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::PoolError;
use crate::draft::{Candidate, CandidateId, RankingInfo};

// ---------------------------------------------------------------------------
// Raw serde structs (private)
// ---------------------------------------------------------------------------

/// Top level of the provider's stats response. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct RawRankingsPayload {
    rankings: Vec<RawRankingEntry>,
}

/// One entry in `rankings`. The provider is loose about number types, so
/// every numeric field is kept as a raw JSON value and coerced later.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRankingEntry {
    #[serde(default)]
    player_id: Value,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    rank: Value,
    #[serde(default)]
    previous_rank: Value,
    #[serde(default)]
    total_points: Value,
    #[serde(default)]
    previous_points: Value,
    #[serde(default)]
    events: Value,
}

/// Flat CSV row: `id,full_name[,rank,previous_rank,points,previous_points,events]`.
#[derive(Debug, Deserialize)]
struct RawCsvRow {
    id: String,
    full_name: String,
    #[serde(default)]
    rank: Option<u32>,
    #[serde(default)]
    previous_rank: Option<u32>,
    #[serde(default)]
    points: Option<f64>,
    #[serde(default)]
    previous_points: Option<f64>,
    #[serde(default)]
    events: Option<u32>,
}

// ---------------------------------------------------------------------------
// Value coercion helpers
// ---------------------------------------------------------------------------

/// Read a number that may arrive as a JSON number, a numeric string, or an
/// extended-JSON wrapper such as `{"$numberInt": "3"}`.
fn loose_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        Value::Object(map) => map.values().next().and_then(loose_f64),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite())
}

fn loose_u32(value: &Value) -> Option<u32> {
    loose_f64(value)
        .filter(|v| *v >= 0.0 && *v <= u32::MAX as f64)
        .map(|v| v.round() as u32)
}

fn loose_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.values().next().and_then(loose_id),
        _ => None,
    }
    .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Shared row handling
// ---------------------------------------------------------------------------

/// Accumulates parsed rows, skipping blank ones and rejecting duplicate ids.
#[derive(Default)]
struct RankedListBuilder {
    seen: HashSet<CandidateId>,
    candidates: Vec<Candidate>,
}

impl RankedListBuilder {
    fn push(
        &mut self,
        row: usize,
        id: Option<String>,
        full_name: Option<String>,
        ranking: RankingInfo,
    ) -> Result<(), PoolError> {
        let full_name = full_name.map(|n| n.trim().to_string()).unwrap_or_default();
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            warn!("skipping ranking row {row}: missing player id");
            return Ok(());
        };
        if full_name.is_empty() {
            warn!("skipping ranking row {row}: player {id} has no name");
            return Ok(());
        }

        let id = CandidateId::new(id);
        if !self.seen.insert(id.clone()) {
            return Err(PoolError::Validation(format!(
                "duplicate player id {id} at ranking row {row}"
            )));
        }
        self.candidates
            .push(Candidate::new(id, full_name).with_ranking(ranking));
        Ok(())
    }

    fn finish(self) -> Vec<Candidate> {
        self.candidates
    }
}

// ---------------------------------------------------------------------------
// Public parsers
// ---------------------------------------------------------------------------

/// Parse the provider's `{"rankings": [...]}` payload into a ranked list.
/// Order is preserved; it is the ranking order.
pub fn parse_rankings_json<R: Read>(rdr: R) -> Result<Vec<Candidate>, PoolError> {
    let payload: RawRankingsPayload = serde_json::from_reader(rdr)?;
    let mut builder = RankedListBuilder::default();

    for (row, raw) in payload.rankings.into_iter().enumerate() {
        let ranking = RankingInfo {
            rank: loose_u32(&raw.rank),
            previous_rank: loose_u32(&raw.previous_rank),
            points: loose_f64(&raw.total_points),
            previous_points: loose_f64(&raw.previous_points),
            events: loose_u32(&raw.events),
        };
        builder.push(row + 1, loose_id(&raw.player_id), raw.full_name, ranking)?;
    }

    Ok(builder.finish())
}

/// Parse a CSV ranking export. Malformed rows are logged and skipped.
pub fn parse_rankings_csv<R: Read>(rdr: R) -> Result<Vec<Candidate>, PoolError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut builder = RankedListBuilder::default();

    for (row, result) in reader.deserialize::<RawCsvRow>().enumerate() {
        match result {
            Ok(raw) => {
                let ranking = RankingInfo {
                    rank: raw.rank,
                    previous_rank: raw.previous_rank,
                    points: raw.points.filter(|p| p.is_finite()),
                    previous_points: raw.previous_points.filter(|p| p.is_finite()),
                    events: raw.events,
                };
                builder.push(row + 1, Some(raw.id), Some(raw.full_name), ranking)?;
            }
            Err(e) => {
                warn!("skipping malformed ranking row {}: {}", row + 1, e);
            }
        }
    }

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_keeps_ranking_order_and_metadata() {
        let json = r#"{
            "year": "2025",
            "rankings": [
                {"playerId": "46046", "fullName": "Scottie Scheffler", "rank": 1,
                 "previousRank": "1", "totalPoints": "3,023.5", "events": 19},
                {"playerId": 28237, "fullName": "Rory McIlroy", "rank": {"$numberInt": "2"}}
            ]
        }"#;
        let list = parse_rankings_json(json.as_bytes()).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id.as_str(), "46046");
        assert_eq!(list[0].full_name, "Scottie Scheffler");
        assert_eq!(list[0].ranking.rank, Some(1));
        assert_eq!(list[0].ranking.previous_rank, Some(1));
        assert_eq!(list[0].ranking.points, Some(3023.5));
        assert_eq!(list[0].ranking.events, Some(19));

        assert_eq!(list[1].id.as_str(), "28237");
        assert_eq!(list[1].ranking.rank, Some(2));
        assert_eq!(list[1].ranking.points, None);
    }

    #[test]
    fn json_skips_rows_without_id_or_name() {
        let json = r#"{"rankings": [
            {"fullName": "No Id"},
            {"playerId": "1", "fullName": "  "},
            {"playerId": "2", "fullName": "Tom Kim"}
        ]}"#;
        let list = parse_rankings_json(json.as_bytes()).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].full_name, "Tom Kim");
    }

    #[test]
    fn json_rejects_duplicate_ids() {
        let json = r#"{"rankings": [
            {"playerId": "1", "fullName": "Tom Kim"},
            {"playerId": "1", "fullName": "Tom Hoge"}
        ]}"#;
        assert!(matches!(
            parse_rankings_json(json.as_bytes()),
            Err(PoolError::Validation(_))
        ));
    }

    #[test]
    fn json_without_rankings_field_is_an_error() {
        assert!(matches!(
            parse_rankings_json(r#"{"players": []}"#.as_bytes()),
            Err(PoolError::Json(_))
        ));
    }

    #[test]
    fn csv_with_optional_columns() {
        let csv_data = "\
id,full_name,rank,previous_rank,points,previous_points,events
46046,Scottie Scheffler,1,1,3023.5,2900,19
28237,Rory McIlroy,2,,,,
";
        let list = parse_rankings_csv(csv_data.as_bytes()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].ranking.points, Some(3023.5));
        assert_eq!(list[0].ranking.previous_points, Some(2900.0));
        assert_eq!(list[1].ranking.rank, Some(2));
        assert_eq!(list[1].ranking.previous_rank, None);
    }

    #[test]
    fn csv_with_only_required_columns() {
        let csv_data = "id,full_name\n1,Tom Kim\n2,Tom Hoge\n";
        let list = parse_rankings_csv(csv_data.as_bytes()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].full_name, "Tom Hoge");
        assert_eq!(list[1].ranking, RankingInfo::default());
    }

    #[test]
    fn csv_skips_malformed_rows() {
        let csv_data = "id,full_name,rank\n1,Tom Kim,abc\n2,Tom Hoge,5\n";
        let list = parse_rankings_csv(csv_data.as_bytes()).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id.as_str(), "2");
    }

    #[test]
    fn csv_rejects_duplicate_ids() {
        let csv_data = "id,full_name\n1,Tom Kim\n1,Tom Kim\n";
        assert!(matches!(
            parse_rankings_csv(csv_data.as_bytes()),
            Err(PoolError::Validation(_))
        ));
    }

    #[test]
    fn loose_numbers() {
        assert_eq!(loose_f64(&Value::from(3.5)), Some(3.5));
        assert_eq!(loose_f64(&Value::from(" 12 ")), Some(12.0));
        assert_eq!(loose_f64(&Value::from("n/a")), None);
        assert_eq!(loose_f64(&Value::Null), None);
        assert_eq!(loose_u32(&Value::from(-1)), None);
        assert_eq!(loose_id(&Value::from(42)), Some("42".to_string()));
        assert_eq!(loose_id(&Value::from("")), None);
    }
}
