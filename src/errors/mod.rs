use serde::Serialize;
use thiserror::Error;

use crate::domain::{MatchId, PlayerId};

/// Analyzer outcomes that exclude a single item without failing the whole run
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("match {match_id} has {point_events} point events, at least 2 are needed")]
    InsufficientData { match_id: MatchId, point_events: usize },

    #[error("failed to look up {what} {id}: {reason}")]
    LookupFailure {
        what: &'static str,
        id: i64,
        reason: String,
    },

    #[error("dropped malformed event in match {match_id}: {reason}")]
    MalformedEvent { match_id: MatchId, reason: String },

    #[error("analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    pub fn lookup(what: &'static str, id: i64, err: &anyhow::Error) -> Self {
        AnalysisError::LookupFailure {
            what,
            id,
            reason: format!("{:#}", err),
        }
    }
}

/// Counts of items left out of a computation, and why
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExclusionReport {
    pub no_live_scoring: usize,
    pub insufficient_data: usize,
    pub lookup_failures: usize,
    /// Analyzed matches whose match sample was dropped; their point and game
    /// samples still count
    pub below_match_floor: usize,
    pub failed_pages: usize,
}

impl ExclusionReport {
    /// Matches left out entirely
    pub fn total(&self) -> usize {
        self.no_live_scoring + self.insufficient_data + self.lookup_failures
    }
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failure_keeps_error_chain() {
        let err = anyhow::anyhow!("connection reset").context("Failed to fetch from: x");
        let failure = AnalysisError::lookup("opponent rating", 42, &err);

        match failure {
            AnalysisError::LookupFailure { what, id, reason } => {
                assert_eq!(what, "opponent rating");
                assert_eq!(id, 42);
                assert!(reason.contains("connection reset"));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_exclusion_total_counts_whole_matches_only() {
        let report = ExclusionReport {
            no_live_scoring: 3,
            insufficient_data: 1,
            lookup_failures: 1,
            below_match_floor: 2,
            failed_pages: 4,
        };
        assert_eq!(report.total(), 5);
        assert_eq!(parse_context("score"), "Failed to parse score");
    }
}
