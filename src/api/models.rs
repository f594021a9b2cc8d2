use serde::Deserialize;

// --- API Response Structures ---

/// One page of a player's match history
#[derive(Debug, Deserialize)]
pub struct MatchPageResponse {
    #[serde(default)]
    pub matches: Vec<MatchResponse>,
}

/// Raw match record; `wid1` is the winner, `oid1` the other player
#[derive(Debug, Clone, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "Matchid", alias = "matchId")]
    pub match_id: i64,
    #[serde(rename = "MatchDate", default)]
    pub match_date: Option<String>,
    #[serde(default)]
    pub wid1: Option<i64>,
    #[serde(default)]
    pub oid1: Option<i64>,
    #[serde(default)]
    pub hplayer1: Option<String>,
    #[serde(default)]
    pub vplayer1: Option<String>,
    #[serde(rename = "Score", default)]
    pub score: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "Descr", default)]
    pub description: Option<String>,
}

/// Raw live-scoring event
#[derive(Debug, Deserialize)]
pub struct LiveScoreEventResponse {
    #[serde(rename = "Game_Number", default)]
    pub game_number: Option<i64>,
    #[serde(rename = "StartDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "Points_left", default)]
    pub points_left: Option<u32>,
    #[serde(rename = "Points_right", default)]
    pub points_right: Option<u32>,
    #[serde(rename = "Decision", default)]
    pub decision: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RatingResponse {
    #[serde(rename = "ratingTypeName", default)]
    pub rating_type_name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RankingResponse {
    #[serde(rename = "DivisionName", default)]
    pub division_name: Option<String>,
    #[serde(rename = "RankingPeriod", default)]
    pub ranking_period: Option<String>,
    #[serde(rename = "Rating", default)]
    pub rating: Option<f64>,
    #[serde(rename = "RatingGroupDescr", default)]
    pub rating_group: Option<String>,
    #[serde(rename = "Ranking", default)]
    pub ranking: Option<u32>,
}

/// Player record behind `/user/{id}`
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "isMember", default)]
    pub is_member: Option<bool>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "City", default)]
    pub city: Option<String>,
    #[serde(rename = "State", default)]
    pub state: Option<String>,
    #[serde(rename = "Zip", default)]
    pub zip: Option<String>,
    #[serde(rename = "mainAffiliation", default)]
    pub main_affiliation: Option<AffiliationResponse>,
    #[serde(rename = "PAID_THRU", default)]
    pub paid_thru: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AffiliationResponse {
    #[serde(default)]
    pub descr: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "ObjectId", default)]
    pub object_id: Option<i64>,
    #[serde(rename = "ObjectName", default)]
    pub object_name: String,
    #[serde(rename = "ObjectType", default)]
    pub object_type: String,
    #[serde(rename = "ObjectLocation", default)]
    pub object_location: Option<String>,
}
