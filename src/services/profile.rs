use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;

use crate::config::settings::RecordSettings;
use crate::domain::{PlayerDetails, PlayerId, RankingEntry, RatingEntry, SearchResult};
use crate::pagination::PaginationConfig;
use crate::providers::{MatchProvider, ProfileSource, RatingLookup};
use crate::record::{
    self, LastMatch, MatchListing, OpponentRating, PeakRating, RatingChanges, RecordSummary, TierProgress,
    TopOpponent, WeeklyRankings,
};
use crate::services::match_history::fetch_player_matches;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    pub record: RecordSummary,
    pub opponents: OpponentRating,
    pub failed_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub player_id: PlayerId,
    pub details: Option<PlayerDetails>,
    /// `None` when the player has no current rating
    pub rating: Option<TierProgress>,
    pub highest_rating: Option<PeakRating>,
    pub weekly_rankings: Option<WeeklyRankings>,
    /// `None` when the ranking history could not be loaded
    pub rating_changes: Option<RatingChanges>,
    pub top_opponents: Vec<TopOpponent>,
    pub last_match: Option<LastMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMatches {
    pub player_id: PlayerId,
    pub player_name: Option<String>,
    pub matches: Vec<MatchListing>,
    pub failed_pages: usize,
}

/// Record, rating and opponent views of a player
pub struct ProfileService<C> {
    client: C,
    settings: RecordSettings,
    pagination: PaginationConfig,
    max_concurrent: usize,
}

impl<C> ProfileService<C>
where
    C: MatchProvider + RatingLookup + ProfileSource,
{
    pub fn new(client: C, settings: RecordSettings, pagination: PaginationConfig, max_concurrent: usize) -> Self {
        Self {
            client,
            settings,
            pagination,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Win/loss record and the average rating of the last `window` opponents
    pub async fn record(&self, player_id: PlayerId, window: usize) -> PlayerRecord {
        info!("=== Record for player {} ===", player_id);
        let history = fetch_player_matches(&self.client, player_id, &self.pagination).await;

        let summary = record::summarize_record(&history.matches, player_id, &self.settings.categories);
        let opponents = record::average_opponent_rating(
            &history.matches,
            player_id,
            window,
            &self.client,
            self.max_concurrent,
        )
        .await;

        info!(
            "  → {}W/{}L, opponent rating from {} of {} matches",
            summary.total_wins, summary.total_losses, opponents.resolved, opponents.considered
        );

        PlayerRecord {
            player_id,
            record: summary,
            opponents,
            failed_pages: history.failed_pages,
        }
    }

    /// Details, rating tier, rankings, rating movement up to `today`, top
    /// opponents and last match
    pub async fn profile(&self, player_id: PlayerId, today: NaiveDate) -> PlayerProfile {
        info!("=== Profile for player {} ===", player_id);

        let details = self.details(player_id).await;
        let rating = self.current_rating(player_id).await.map(record::tier_progress);

        let rankings = self.ranking_history(player_id).await;
        let division = self.settings.ranking_division;
        let rating_changes = rankings
            .as_deref()
            .map(|entries| record::rating_changes(entries, division, today));
        let highest_rating = rankings
            .as_deref()
            .and_then(|entries| record::highest_rating(entries, division));
        let weekly_rankings = rankings.as_deref().and_then(record::weekly_rankings);

        let history = fetch_player_matches(&self.client, player_id, &self.pagination).await;
        let top_opponents = record::top_opponents(
            &history.matches,
            player_id,
            self.settings.top_opponents,
            &self.client,
            self.max_concurrent,
        )
        .await;

        PlayerProfile {
            player_id,
            details,
            rating,
            highest_rating,
            weekly_rankings,
            rating_changes,
            top_opponents,
            last_match: record::last_match(&history.matches, player_id),
        }
    }

    /// Finished matches, most recent first, at most `limit` of them
    pub async fn matches(&self, player_id: PlayerId, limit: Option<usize>) -> PlayerMatches {
        info!("=== Matches of player {} ===", player_id);
        let player_name = self.details(player_id).await.and_then(|d| d.name);
        let history = fetch_player_matches(&self.client, player_id, &self.pagination).await;

        PlayerMatches {
            player_id,
            matches: record::match_listing(&history.matches, player_id, player_name.as_deref(), limit),
            player_name,
            failed_pages: history.failed_pages,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let results = self.client.search_players(query).await?;
        info!("  → {} results for {:?}", results.len(), query);
        Ok(results)
    }

    async fn current_rating(&self, player_id: PlayerId) -> Option<f64> {
        match self.client.fetch_ratings(player_id).await {
            Ok(entries) => find_rating(&entries, self.settings.rating_type),
            Err(e) => {
                warn!("Could not load ratings of player {}: {:#}", player_id, e);
                None
            }
        }
    }

    async fn details(&self, player_id: PlayerId) -> Option<PlayerDetails> {
        match self.client.fetch_player_details(player_id).await {
            Ok(details) => Some(details),
            Err(e) => {
                warn!("Could not load details of player {}: {:#}", player_id, e);
                None
            }
        }
    }

    async fn ranking_history(&self, player_id: PlayerId) -> Option<Vec<RankingEntry>> {
        match self.client.fetch_ranking_history(player_id).await {
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!("Could not load ranking history of player {}: {:#}", player_id, e);
                None
            }
        }
    }
}

fn find_rating(entries: &[RatingEntry], rating_type: &str) -> Option<f64> {
    entries
        .iter()
        .find(|e| e.rating_type == rating_type)
        .map(|e| e.rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameScore, MatchPage, MatchStatus, MatchSummary, Participant, RankingEntry, Side};
    use crate::record::{RankMovement, RatingTier};
    use chrono::TimeDelta;

    const PLAYER: PlayerId = 1;

    struct FakeProfile {
        matches: Vec<MatchSummary>,
        ratings_down: bool,
    }

    fn ranking(day_offset: i64, rating: f64, ranking: Option<u32>) -> RankingEntry {
        RankingEntry {
            division: "All".into(),
            rating_group: "Open".into(),
            period: day(day_offset),
            rating,
            ranking,
        }
    }

    impl MatchProvider for FakeProfile {
        async fn fetch_match_page(&self, _player_id: PlayerId, page: usize) -> Result<MatchPage> {
            let matches = if page == 1 { self.matches.clone() } else { Vec::new() };
            Ok(matches.into())
        }
    }

    impl RatingLookup for FakeProfile {
        async fn current_rating(&self, player_id: PlayerId) -> Result<Option<f64>> {
            Ok(Some(player_id as f64 / 10.0))
        }
    }

    impl ProfileSource for FakeProfile {
        async fn fetch_player_details(&self, _player_id: PlayerId) -> Result<PlayerDetails> {
            if self.ratings_down {
                anyhow::bail!("details unavailable");
            }
            Ok(PlayerDetails {
                name: Some("Subject".into()),
                member: Some(true),
                ..PlayerDetails::default()
            })
        }

        async fn fetch_ratings(&self, _player_id: PlayerId) -> Result<Vec<RatingEntry>> {
            if self.ratings_down {
                anyhow::bail!("ratings unavailable");
            }
            Ok(vec![
                RatingEntry {
                    rating_type: "Doubles Rating".into(),
                    rating: 2.0,
                },
                RatingEntry {
                    rating_type: "Singles International Rating".into(),
                    rating: 4.75,
                },
            ])
        }

        async fn fetch_ranking_history(&self, _player_id: PlayerId) -> Result<Vec<RankingEntry>> {
            Ok(vec![ranking(0, 4.5, Some(30)), ranking(20, 4.75, Some(24))])
        }

        async fn search_players(&self, query: &str) -> Result<Vec<SearchResult>> {
            Ok(vec![SearchResult {
                id: Some(PLAYER),
                name: query.to_string(),
                kind: "Player".into(),
                location: None,
            }])
        }
    }

    fn day(n: i64) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + TimeDelta::days(n)
    }

    fn played(match_id: i64, opponent: PlayerId, won: bool, games: usize) -> MatchSummary {
        let subject = Participant {
            id: Some(PLAYER),
            name: "Subject".into(),
        };
        let other = Participant {
            id: Some(opponent),
            name: format!("P{}", opponent),
        };
        let (participant_a, participant_b) = if won { (subject, other) } else { (other, subject) };
        MatchSummary {
            match_id,
            date: day(match_id),
            participant_a,
            participant_b,
            winner_side: Some(Side::A),
            games: vec![GameScore { points_a: 11, points_b: 9 }; games],
            status: MatchStatus::Completed,
            description: None,
        }
    }

    fn service(ratings_down: bool) -> ProfileService<FakeProfile> {
        let client = FakeProfile {
            matches: vec![
                played(1, 40, true, 3),
                played(2, 50, false, 5),
                played(3, 60, true, 3),
            ],
            ratings_down,
        };
        ProfileService::new(client, RecordSettings::default(), PaginationConfig::new(10), 2)
    }

    #[tokio::test]
    async fn test_record_and_opponent_window() {
        let result = service(false).record(PLAYER, 2).await;

        assert_eq!(result.record.total_wins, 2);
        assert_eq!(result.record.total_losses, 1);
        assert_eq!(result.record.win_percentage, 67);
        assert_eq!(result.record.per_category["4-game"].wins, 0);
        // most recent two: matches 3 and 2
        assert_eq!(result.opponents.considered, 2);
        assert!((result.opponents.average.unwrap() - 5.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_profile_views() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let profile = service(false).profile(PLAYER, today).await;

        let rating = profile.rating.unwrap();
        assert_eq!(rating.tier, RatingTier::Advanced);
        assert_eq!(profile.rating_changes.unwrap().year_to_date, Some(0.25));
        assert_eq!(profile.details.unwrap().member, Some(true));

        let peak = profile.highest_rating.unwrap();
        assert_eq!(peak.rating, 4.75);
        assert_eq!(peak.date, day(20).date());

        let weekly = profile.weekly_rankings.unwrap();
        assert_eq!(weekly.as_of, day(20).date());
        assert_eq!(weekly.divisions[0].movement, RankMovement::Up(6));
        assert_eq!(profile.top_opponents[0].player_id, 60);
        assert_eq!(profile.last_match.unwrap().match_id, 3);
    }

    #[tokio::test]
    async fn test_missing_ratings_do_not_fail_profile() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let profile = service(true).profile(PLAYER, today).await;
        assert!(profile.rating.is_none());
        assert!(profile.details.is_none());
        assert!(profile.weekly_rankings.is_some());
        assert_eq!(profile.top_opponents.len(), 3);
    }

    #[tokio::test]
    async fn test_match_listing_most_recent_first() {
        let listing = service(false).matches(PLAYER, Some(2)).await;

        assert_eq!(listing.player_name.as_deref(), Some("Subject"));
        let ids: Vec<i64> = listing.matches.iter().map(|m| m.match_id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(listing.matches[1].won, Some(false));
        assert_eq!(listing.matches[1].score, "9-11, 9-11, 9-11, 9-11, 9-11");
        assert_eq!(listing.matches[1].opponent, "P50");
    }
}
