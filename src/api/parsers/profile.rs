use log::debug;

use crate::api::models::{RankingResponse, RatingResponse, SearchResponse, UserResponse};
use crate::domain::{self, PlayerDetails, RankingEntry, RatingEntry, SearchResult};

/// First usable rating of a `ratings-top` response
pub fn top_rating(entries: &[RatingResponse]) -> Option<f64> {
    entries
        .first()
        .and_then(|entry| entry.rating)
        .filter(|r| r.is_finite())
}

pub fn to_rating_entries(entries: Vec<RatingResponse>) -> Vec<RatingEntry> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let rating = entry.rating.filter(|r| r.is_finite())?;
            Some(RatingEntry {
                rating_type: entry.rating_type_name.unwrap_or_default(),
                rating,
            })
        })
        .collect()
}

/// Entries without a parseable period or rating are skipped
pub fn to_ranking_entries(entries: Vec<RankingResponse>) -> Vec<RankingEntry> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let rating = entry.rating.filter(|r| r.is_finite())?;
            let period = entry.ranking_period.as_deref()?;
            match domain::parse_timestamp(period) {
                Ok(period) => Some(RankingEntry {
                    division: entry.division_name.unwrap_or_default(),
                    rating_group: entry.rating_group.unwrap_or_default(),
                    period,
                    rating,
                    ranking: entry.ranking,
                }),
                Err(e) => {
                    debug!("Skipping ranking entry: {}", e);
                    None
                }
            }
        })
        .collect()
}

pub fn to_player_details(user: UserResponse) -> PlayerDetails {
    let paid_through = non_blank(user.paid_thru).and_then(|raw| match domain::parse_timestamp(&raw) {
        Ok(date) => Some(date.date()),
        Err(e) => {
            debug!("Ignoring membership date: {}", e);
            None
        }
    });

    PlayerDetails {
        location: location(user.city, user.state, user.zip),
        name: non_blank(user.name),
        first_name: non_blank(user.first_name),
        member: user.is_member,
        gender: non_blank(user.gender),
        affiliation: user.main_affiliation.and_then(|a| non_blank(a.descr)),
        paid_through,
    }
}

/// `City, State Zip` when all three are known, otherwise the city alone
fn location(city: Option<String>, state: Option<String>, zip: Option<String>) -> Option<String> {
    let city = non_blank(city)?;
    match (non_blank(state), non_blank(zip)) {
        (Some(state), Some(zip)) => Some(format!("{}, {} {}", city, state, zip)),
        _ => Some(city),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn to_search_results(entries: Vec<SearchResponse>) -> Vec<SearchResult> {
    entries
        .into_iter()
        .map(|entry| SearchResult {
            id: entry.object_id,
            name: entry.object_name,
            kind: entry.object_type,
            location: entry.object_location.filter(|l| !l.trim().is_empty()),
        })
        .collect()
}

/// Spaces become `+`, everything else is percent-encoded
pub fn encode_search_query(query: &str) -> String {
    urlencoding::encode(query.trim()).replace("%20", "+")
}
