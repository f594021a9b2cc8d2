use log::{info, warn};

use crate::config::TimingProfile;
use crate::domain::MatchId;
use crate::errors::AnalysisError;
use crate::providers::LiveScoreSource;
use crate::timing::{MatchDetail, build_match_detail, normalize_events};

/// Timing detail of a single match, without the cross-match match floor.
///
/// A match that was not live scored comes back as `InsufficientData` with
/// zero point events, the same as one with too little scoring to measure.
pub async fn analyze_match<L: LiveScoreSource>(
    source: &L,
    match_id: MatchId,
    profile: &TimingProfile,
) -> Result<MatchDetail, AnalysisError> {
    info!("Analyzing match {}", match_id);

    let events = source
        .fetch_events(match_id)
        .await
        .map_err(|e| {
            let failure = AnalysisError::lookup("live score", match_id, &e);
            warn!("{}", failure);
            failure
        })?
        .unwrap_or_default();

    let games = normalize_events(match_id, &events)?;
    Ok(build_match_detail(match_id, &games, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DecisionKind, ScoreEvent};
    use anyhow::Result;
    use chrono::{NaiveDate, TimeDelta};

    struct OneMatch(Option<Vec<ScoreEvent>>);

    impl LiveScoreSource for OneMatch {
        async fn fetch_events(&self, match_id: MatchId) -> Result<Option<Vec<ScoreEvent>>> {
            if match_id < 0 {
                anyhow::bail!("bad gateway");
            }
            Ok(self.0.clone())
        }
    }

    fn events(seconds: &[i64]) -> Vec<ScoreEvent> {
        let start = NaiveDate::from_ymd_opt(2024, 9, 9)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        seconds
            .iter()
            .enumerate()
            .map(|(i, s)| ScoreEvent {
                match_id: 1,
                game_number: Some(1),
                timestamp: start + TimeDelta::seconds(*s),
                points_left: i as u32,
                points_right: 0,
                decision: DecisionKind::Point,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_short_match_is_still_shown() {
        let source = OneMatch(Some(events(&[0, 15, 45])));
        let detail = analyze_match(&source, 1, &TimingProfile::detail()).await.unwrap();

        assert_eq!(detail.match_length_seconds, 45.0);
        assert_eq!(detail.points.average_seconds(), Some(22.5));
        assert_eq!(detail.games_won_left, 1);
    }

    #[tokio::test]
    async fn test_missing_and_failed_scoring() {
        let none = OneMatch(None);
        assert_eq!(
            analyze_match(&none, 1, &TimingProfile::detail()).await,
            Err(AnalysisError::InsufficientData {
                match_id: 1,
                point_events: 0
            })
        );

        let failed = analyze_match(&none, -1, &TimingProfile::detail()).await;
        assert!(matches!(failed, Err(AnalysisError::LookupFailure { .. })));
    }
}
