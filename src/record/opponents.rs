use futures_util::stream::{self, StreamExt};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;

use crate::domain::{MatchId, MatchSummary, PlayerId};
use crate::errors::AnalysisError;
use crate::providers::RatingLookup;

/// Mean rating of the opponents met in the most recent matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpponentRating {
    /// `None` when no rating could be resolved
    pub average: Option<f64>,
    /// Candidate matches in the window
    pub considered: usize,
    pub resolved: usize,
    pub without_opponent: usize,
    pub unrated: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopOpponent {
    pub player_id: PlayerId,
    pub name: String,
    pub rating: f64,
    pub last_match_id: MatchId,
    pub won_last_match: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastMatch {
    pub match_id: MatchId,
    pub opponent: String,
    pub won: Option<bool>,
    pub score: String,
    pub date: chrono::NaiveDateTime,
}

enum Lookup {
    Rated(f64),
    Unrated,
    Failed,
}

/// Average opponent rating over the first `window` matches of `matches`,
/// which are expected most recent first.
///
/// The window bounds candidate matches: a missing opponent id, a player
/// without a rating or a failed lookup is skipped and not replaced by an
/// older match.
pub async fn average_opponent_rating<R: RatingLookup>(
    matches: &[MatchSummary],
    player_id: PlayerId,
    window: usize,
    ratings: &R,
    max_concurrent: usize,
) -> OpponentRating {
    let candidates: Vec<&MatchSummary> = matches
        .iter()
        .filter(|m| m.involves(player_id))
        .take(window)
        .collect();

    let opponent_ids: Vec<PlayerId> = candidates
        .iter()
        .filter_map(|m| m.opponent_of(player_id).and_then(|p| p.id))
        .collect();
    let without_opponent = candidates.len() - opponent_ids.len();

    let lookups = resolve_in_order(&opponent_ids, ratings, max_concurrent).await;
    summarize_lookups(candidates.len(), without_opponent, lookups)
}

/// Highest-rated distinct opponents, each with the latest match against them
pub async fn top_opponents<R: RatingLookup>(
    matches: &[MatchSummary],
    player_id: PlayerId,
    limit: usize,
    ratings: &R,
    max_concurrent: usize,
) -> Vec<TopOpponent> {
    let latest = latest_match_per_opponent(matches, player_id);
    let ids: Vec<PlayerId> = latest.iter().map(|(id, _)| *id).collect();
    let lookups = resolve_in_order(&ids, ratings, max_concurrent).await;

    let mut rated: Vec<TopOpponent> = latest
        .into_iter()
        .zip(lookups)
        .filter_map(|((opponent_id, m), lookup)| match lookup {
            Lookup::Rated(rating) if rating > 0.0 => Some(TopOpponent {
                player_id: opponent_id,
                name: m
                    .opponent_of(player_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                rating,
                last_match_id: m.match_id,
                won_last_match: m.did_win(player_id),
            }),
            _ => None,
        })
        .collect();

    // stable: equal ratings keep most-recent-first order
    rated.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    rated.truncate(limit);
    rated
}

/// Most recent match of `matches` (expected most recent first)
pub fn last_match(matches: &[MatchSummary], player_id: PlayerId) -> Option<LastMatch> {
    let m = matches.iter().find(|m| m.involves(player_id))?;
    Some(LastMatch {
        match_id: m.match_id,
        opponent: m
            .opponent_of(player_id)
            .map(|p| p.name.clone())
            .unwrap_or_default(),
        won: m.did_win(player_id),
        score: m.score_for(player_id),
        date: m.date,
    })
}

fn latest_match_per_opponent(
    matches: &[MatchSummary],
    player_id: PlayerId,
) -> Vec<(PlayerId, &MatchSummary)> {
    let mut seen: HashSet<PlayerId> = HashSet::new();
    let mut latest = Vec::new();

    for m in matches.iter().filter(|m| m.involves(player_id)) {
        let Some(opponent_id) = m.opponent_of(player_id).and_then(|p| p.id) else {
            continue;
        };
        if seen.insert(opponent_id) {
            latest.push((opponent_id, m));
        }
    }

    latest
}

/// Concurrent lookups, results in the order of `ids`
async fn resolve_in_order<R: RatingLookup>(
    ids: &[PlayerId],
    ratings: &R,
    max_concurrent: usize,
) -> Vec<Lookup> {
    stream::iter(ids.iter().copied())
        .map(|id| resolve_one(id, ratings))
        .buffered(max_concurrent.max(1))
        .collect()
        .await
}

async fn resolve_one<R: RatingLookup>(player_id: PlayerId, ratings: &R) -> Lookup {
    match ratings.current_rating(player_id).await {
        Ok(Some(rating)) => Lookup::Rated(rating),
        Ok(None) => {
            debug!("Opponent {} has no rating", player_id);
            Lookup::Unrated
        }
        Err(e) => {
            let failure = AnalysisError::lookup("opponent rating", player_id, &e);
            warn!("{}", failure);
            Lookup::Failed
        }
    }
}

fn summarize_lookups(considered: usize, without_opponent: usize, lookups: Vec<Lookup>) -> OpponentRating {
    let mut sum = 0.0;
    let mut resolved = 0;
    let mut unrated = 0;
    let mut failed = 0;

    for lookup in lookups {
        match lookup {
            Lookup::Rated(rating) => {
                sum += rating;
                resolved += 1;
            }
            Lookup::Unrated => unrated += 1,
            Lookup::Failed => failed += 1,
        }
    }

    OpponentRating {
        average: (resolved > 0).then(|| sum / resolved as f64),
        considered,
        resolved,
        without_opponent,
        unrated,
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameScore, MatchStatus, Participant, Side};
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    struct FakeRatings(HashMap<PlayerId, f64>);

    impl RatingLookup for FakeRatings {
        async fn current_rating(&self, player_id: PlayerId) -> Result<Option<f64>> {
            if player_id >= 900 {
                anyhow::bail!("rating service unavailable");
            }
            Ok(self.0.get(&player_id).copied())
        }
    }

    fn ratings() -> FakeRatings {
        FakeRatings(HashMap::from([(10, 4.0), (11, 5.0), (12, 6.0), (13, 0.0)]))
    }

    fn played(match_id: MatchId, day: u32, opponent: Option<PlayerId>, won: bool) -> MatchSummary {
        let subject = Participant {
            id: Some(1),
            name: "Subject".into(),
        };
        let other = Participant {
            id: opponent,
            name: format!("Opponent {}", opponent.unwrap_or_default()),
        };
        let (participant_a, participant_b) = if won { (subject, other) } else { (other, subject) };

        MatchSummary {
            match_id,
            date: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            participant_a,
            participant_b,
            winner_side: Some(Side::A),
            games: vec![GameScore { points_a: 11, points_b: 4 }; 3],
            status: MatchStatus::Completed,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_failed_and_missing_lookups_are_skipped() {
        let matches = vec![
            played(5, 5, Some(10), true),
            played(4, 4, Some(901), false),
            played(3, 3, None, true),
            played(2, 2, Some(12), true),
            played(1, 1, Some(11), false),
        ];

        let result = average_opponent_rating(&matches, 1, 4, &ratings(), 2).await;
        assert_eq!(result.considered, 4);
        assert_eq!(result.resolved, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.without_opponent, 1);
        // window does not reach back to match 1
        assert_eq!(result.average, Some(5.0));
    }

    #[tokio::test]
    async fn test_no_resolved_rating_is_none() {
        let matches = vec![played(1, 1, Some(950), true)];
        let result = average_opponent_rating(&matches, 1, 15, &ratings(), 4).await;
        assert_eq!(result.average, None);
        assert_eq!(result.failed, 1);
    }

    #[tokio::test]
    async fn test_top_opponents_are_distinct_and_sorted() {
        let matches = vec![
            played(6, 6, Some(11), true),
            played(5, 5, Some(12), false),
            played(4, 4, Some(11), false),
            played(3, 3, Some(13), true),
            played(2, 2, Some(10), true),
            played(1, 1, Some(902), true),
        ];

        let top = top_opponents(&matches, 1, 2, &ratings(), 3).await;
        let ids: Vec<PlayerId> = top.iter().map(|o| o.player_id).collect();
        assert_eq!(ids, vec![12, 11]);
        assert_eq!(top[0].won_last_match, Some(false));
        assert_eq!(top[1].last_match_id, 6);
        assert_eq!(top[1].won_last_match, Some(true));
    }

    #[test]
    fn test_last_match_from_subject_view() {
        let matches = vec![played(9, 9, Some(10), false), played(8, 8, Some(11), true)];
        let last = last_match(&matches, 1).unwrap();

        assert_eq!(last.match_id, 9);
        assert_eq!(last.opponent, "Opponent 10");
        assert_eq!(last.won, Some(false));
        assert_eq!(last.score, "4-11, 4-11, 4-11");
        assert!(last_match(&matches, 77).is_none());
    }
}
