//! Collaborators the analyzers read from. The HTTP implementation lives in
//! `api::FederationClient`; tests plug in in-memory fakes.

use anyhow::Result;
use std::future::Future;

use crate::domain::{MatchId, MatchPage, PlayerDetails, PlayerId, RankingEntry, RatingEntry, ScoreEvent, SearchResult};

/// Paginated match history of one player
pub trait MatchProvider: Sync {
    fn fetch_match_page(
        &self,
        player_id: PlayerId,
        page: usize,
    ) -> impl Future<Output = Result<MatchPage>> + Send;
}

/// Raw live-scoring events of a match; `Ok(None)` when the match was not live scored
pub trait LiveScoreSource: Sync {
    fn fetch_events(
        &self,
        match_id: MatchId,
    ) -> impl Future<Output = Result<Option<Vec<ScoreEvent>>>> + Send;
}

/// Current rating of a player; `Ok(None)` when the player has none
pub trait RatingLookup: Sync {
    fn current_rating(
        &self,
        player_id: PlayerId,
    ) -> impl Future<Output = Result<Option<f64>>> + Send;
}

/// Player details, rating lists, ranking history and player search
pub trait ProfileSource: Sync {
    fn fetch_player_details(
        &self,
        player_id: PlayerId,
    ) -> impl Future<Output = Result<PlayerDetails>> + Send;

    fn fetch_ratings(
        &self,
        player_id: PlayerId,
    ) -> impl Future<Output = Result<Vec<RatingEntry>>> + Send;

    fn fetch_ranking_history(
        &self,
        player_id: PlayerId,
    ) -> impl Future<Output = Result<Vec<RankingEntry>>> + Send;

    fn search_players(&self, query: &str) -> impl Future<Output = Result<Vec<SearchResult>>> + Send;
}
