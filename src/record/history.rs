use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::{MatchId, MatchSummary, PlayerId};

const UNKNOWN_OPPONENT: &str = "Opponent";

/// One row of a player's match history, seen from the player's side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchListing {
    pub match_id: MatchId,
    pub date: NaiveDateTime,
    pub won: Option<bool>,
    pub score: String,
    pub description: Option<String>,
    pub opponent: String,
}

/// Listing of `matches` (expected most recent first), at most `limit` rows.
///
/// An opponent name equal to the player's own name is replaced, since the
/// federation sometimes reports the player on both sides.
pub fn match_listing(
    matches: &[MatchSummary],
    player_id: PlayerId,
    player_name: Option<&str>,
    limit: Option<usize>,
) -> Vec<MatchListing> {
    let own_name = player_name.map(collapse_whitespace);

    matches
        .iter()
        .filter(|m| m.involves(player_id))
        .take(limit.unwrap_or(usize::MAX))
        .map(|m| MatchListing {
            match_id: m.match_id,
            date: m.date,
            won: m.did_win(player_id),
            score: m.score_for(player_id),
            description: m.description.clone(),
            opponent: opponent_name(m, player_id, own_name.as_deref()),
        })
        .collect()
}

fn opponent_name(m: &MatchSummary, player_id: PlayerId, own_name: Option<&str>) -> String {
    let name = m
        .opponent_of(player_id)
        .map(|p| collapse_whitespace(&p.name))
        .unwrap_or_default();

    if name.is_empty() || Some(name.as_str()) == own_name {
        UNKNOWN_OPPONENT.to_string()
    } else {
        name
    }
}

fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
