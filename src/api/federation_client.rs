use anyhow::Result;
use log::{debug, info, warn};
use serde_json::Value;

use crate::api::models::{
    MatchPageResponse, RankingResponse, RatingResponse, SearchResponse, UserResponse,
};
use crate::api::parsers::{self, ScoreParser, profile};
use crate::config::settings::ClientSettings;
use crate::domain::{
    MatchId, MatchPage, MatchSummary, PlayerDetails, PlayerId, RankingEntry, RatingEntry, ScoreEvent, SearchResult,
};
use crate::http::RateLimitedClient;
use crate::pagination;
use crate::providers::{LiveScoreSource, MatchProvider, ProfileSource, RatingLookup};

/// Client for the squash federation API, reached through the site's proxy
pub struct FederationClient {
    client: RateLimitedClient,
    scores: ScoreParser,
    base_url: String,
}

impl FederationClient {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;

        Ok(Self {
            client,
            scores: ScoreParser::new()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    // --- URL Building ---

    fn build_matches_url(&self, player_id: PlayerId, page: usize) -> String {
        let base = format!("{}/user/{}/matches", self.base_url, player_id);
        pagination::build_page_path(&base, page)
    }

    fn build_live_score_url(&self, match_id: MatchId) -> String {
        format!("{}/liveScoreDetails?match_id={}", self.base_url, match_id)
    }

    fn build_player_url(&self, player_id: PlayerId) -> String {
        format!("{}/user/{}", self.base_url, player_id)
    }

    fn build_user_url(&self, player_id: PlayerId, resource: &str) -> String {
        format!("{}/user/{}/{}", self.base_url, player_id, resource)
    }

    fn build_search_url(&self, query: &str) -> String {
        format!(
            "{}/resources/res/search/{}",
            self.base_url,
            profile::encode_search_query(query)
        )
    }

    // --- Mapping ---

    fn map_matches(&self, page: MatchPageResponse) -> Vec<MatchSummary> {
        page.matches
            .iter()
            .filter_map(|raw| match parsers::to_match_summary(raw, &self.scores) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    warn!("Skipping match {}: {:#}", raw.match_id, e);
                    None
                }
            })
            .collect()
    }
}

impl MatchProvider for FederationClient {
    async fn fetch_match_page(&self, player_id: PlayerId, page: usize) -> Result<MatchPage> {
        let url = self.build_matches_url(player_id, page);
        info!("  → Matches page {} for player {}", page, player_id);

        let response: MatchPageResponse = self.client.get_json(&url).await?;
        let records = response.matches.len();
        Ok(MatchPage {
            matches: self.map_matches(response),
            records,
        })
    }
}

impl LiveScoreSource for FederationClient {
    async fn fetch_events(&self, match_id: MatchId) -> Result<Option<Vec<ScoreEvent>>> {
        let url = self.build_live_score_url(match_id);

        let raw = match self.client.get_optional_json::<Option<Vec<Value>>>(&url).await? {
            Some(Some(raw)) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        let parsed = parsers::parse_events(match_id, raw);
        if parsed.malformed > 0 {
            debug!(
                "Match {}: dropped {} malformed live-score events",
                match_id, parsed.malformed
            );
        }

        Ok(Some(parsed.events))
    }
}

impl RatingLookup for FederationClient {
    async fn current_rating(&self, player_id: PlayerId) -> Result<Option<f64>> {
        let url = self.build_user_url(player_id, "ratings-top");
        let entries: Vec<RatingResponse> = self.client.get_json(&url).await?;
        Ok(profile::top_rating(&entries))
    }
}

impl ProfileSource for FederationClient {
    async fn fetch_player_details(&self, player_id: PlayerId) -> Result<PlayerDetails> {
        let url = self.build_player_url(player_id);
        let user: UserResponse = self.client.get_json(&url).await?;
        Ok(profile::to_player_details(user))
    }

    async fn fetch_ratings(&self, player_id: PlayerId) -> Result<Vec<RatingEntry>> {
        let url = self.build_user_url(player_id, "ratings");
        let entries: Vec<RatingResponse> = self.client.get_json(&url).await?;
        Ok(profile::to_rating_entries(entries))
    }

    async fn fetch_ranking_history(&self, player_id: PlayerId) -> Result<Vec<RankingEntry>> {
        let url = self.build_user_url(player_id, "rankings");
        let entries: Vec<RankingResponse> = self.client.get_json(&url).await?;
        Ok(profile::to_ranking_entries(entries))
    }

    async fn search_players(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = self.build_search_url(query);
        info!("Searching players: {}", url);

        let entries: Vec<SearchResponse> = self.client.get_json(&url).await?;
        Ok(profile::to_search_results(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FederationClient {
        let settings = ClientSettings {
            base_url: "http://proxy.test/proxy/".to_string(),
            ..ClientSettings::default()
        };
        FederationClient::new(&settings).unwrap()
    }

    #[test]
    fn test_urls_follow_proxy_routes() {
        let c = client();
        assert_eq!(
            c.build_matches_url(170053, 2),
            "http://proxy.test/proxy/user/170053/matches/page/2"
        );
        assert_eq!(
            c.build_live_score_url(55),
            "http://proxy.test/proxy/liveScoreDetails?match_id=55"
        );
        assert_eq!(c.build_player_url(9), "http://proxy.test/proxy/user/9");
        assert_eq!(
            c.build_user_url(9, "ratings-top"),
            "http://proxy.test/proxy/user/9/ratings-top"
        );
        assert_eq!(
            c.build_search_url("jane doe"),
            "http://proxy.test/proxy/resources/res/search/jane+doe"
        );
    }

    #[test]
    fn test_unmappable_matches_are_skipped() {
        let page: MatchPageResponse = serde_json::from_str(
            r#"{"matches": [
                {"Matchid": 1, "MatchDate": "2024-01-01T00:00:00", "wid1": 1, "oid1": 2, "Status": "C"},
                {"Matchid": 2, "MatchDate": "", "wid1": 1, "oid1": 2, "Status": "C"}
            ]}"#,
        )
        .unwrap();

        let matches = client().map_matches(page);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_id, 1);
    }
}
