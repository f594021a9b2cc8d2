use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

pub type MatchId = i64;
pub type PlayerId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    Completed,
    Retired,
    Other,
}

impl MatchStatus {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "C" => MatchStatus::Completed,
            "RE" => MatchStatus::Retired,
            _ => MatchStatus::Other,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Retired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    A,
    B,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub id: Option<PlayerId>,
    pub name: String,
}

/// Final points of one game, participant A first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameScore {
    pub points_a: u32,
    pub points_b: u32,
}

/// One match as reported by the match provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub date: NaiveDateTime,
    pub participant_a: Participant,
    pub participant_b: Participant,
    pub winner_side: Option<Side>,
    pub games: Vec<GameScore>,
    pub status: MatchStatus,
    pub description: Option<String>,
}

impl MatchSummary {
    pub fn side_of(&self, player_id: PlayerId) -> Option<Side> {
        if self.participant_a.id == Some(player_id) {
            Some(Side::A)
        } else if self.participant_b.id == Some(player_id) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.side_of(player_id).is_some()
    }

    /// `None` when the player did not take part or the winner is unknown
    pub fn did_win(&self, player_id: PlayerId) -> Option<bool> {
        let side = self.side_of(player_id)?;
        self.winner_side.map(|winner| winner == side)
    }

    pub fn opponent_of(&self, player_id: PlayerId) -> Option<&Participant> {
        match self.side_of(player_id)? {
            Side::A => Some(&self.participant_b),
            Side::B => Some(&self.participant_a),
        }
    }

    /// Grouping label such as `3-game`
    pub fn category(&self) -> String {
        format!("{}-game", self.games.len())
    }

    /// Score text as seen by `player_id`, retirements flagged
    pub fn score_for(&self, player_id: PlayerId) -> String {
        if self.games.is_empty() {
            return "N/A".to_string();
        }

        let flip = self.side_of(player_id) == Some(Side::B);
        let games: Vec<String> = self
            .games
            .iter()
            .map(|g| {
                if flip {
                    format!("{}-{}", g.points_b, g.points_a)
                } else {
                    format!("{}-{}", g.points_a, g.points_b)
                }
            })
            .collect();

        let mut score = games.join(", ");
        if self.status == MatchStatus::Retired {
            score.push_str(" (RE)");
        }
        score
    }
}

/// One page of match history; `records` counts what the page held before
/// unmappable records were dropped, so a page is only short when the API
/// sent fewer records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchPage {
    pub matches: Vec<MatchSummary>,
    pub records: usize,
}

impl From<Vec<MatchSummary>> for MatchPage {
    fn from(matches: Vec<MatchSummary>) -> Self {
        Self {
            records: matches.len(),
            matches,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecisionKind {
    Point,
    Other,
}

impl DecisionKind {
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("point") {
            DecisionKind::Point
        } else {
            DecisionKind::Other
        }
    }
}

/// Raw live-scoring event; `game_number` is kept as reported
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEvent {
    pub match_id: MatchId,
    pub game_number: Option<i64>,
    pub timestamp: NaiveDateTime,
    pub points_left: u32,
    pub points_right: u32,
    pub decision: DecisionKind,
}

impl ScoreEvent {
    pub fn is_point(&self) -> bool {
        self.decision == DecisionKind::Point
    }

    pub fn valid_game_number(&self) -> Option<u32> {
        self.game_number
            .filter(|g| *g > 0)
            .and_then(|g| u32::try_from(g).ok())
    }
}

/// Point events of one game, ascending by timestamp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedGame {
    pub match_id: MatchId,
    pub game_number: u32,
    pub points: Vec<ScoreEvent>,
}

impl NormalizedGame {
    pub fn first_point(&self) -> Option<&ScoreEvent> {
        self.points.first()
    }

    pub fn last_point(&self) -> Option<&ScoreEvent> {
        self.points.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingEntry {
    pub rating_type: String,
    pub rating: f64,
}

/// One row of the ranking history; `ranking` is the position within
/// `division` + `rating_group`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub division: String,
    pub rating_group: String,
    pub period: NaiveDateTime,
    pub rating: f64,
    pub ranking: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerDetails {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub member: Option<bool>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub affiliation: Option<String>,
    pub paid_through: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub id: Option<i64>,
    pub name: String,
    pub kind: String,
    pub location: Option<String>,
}

impl SearchResult {
    pub fn is_player(&self) -> bool {
        self.kind == "Player" && self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_match() -> MatchSummary {
        MatchSummary {
            match_id: 7,
            date: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            participant_a: Participant {
                id: Some(1),
                name: "Winner".into(),
            },
            participant_b: Participant {
                id: Some(2),
                name: "Loser".into(),
            },
            winner_side: Some(Side::A),
            games: vec![
                GameScore { points_a: 11, points_b: 5 },
                GameScore { points_a: 9, points_b: 11 },
                GameScore { points_a: 11, points_b: 7 },
            ],
            status: MatchStatus::Retired,
            description: None,
        }
    }

    #[test]
    fn test_win_and_opponent_resolution() {
        let m = sample_match();
        assert_eq!(m.did_win(1), Some(true));
        assert_eq!(m.did_win(2), Some(false));
        assert_eq!(m.did_win(3), None);
        assert_eq!(m.opponent_of(2).map(|p| p.name.as_str()), Some("Winner"));
    }

    #[test]
    fn test_score_is_flipped_for_loser() {
        let m = sample_match();
        assert_eq!(m.score_for(1), "11-5, 9-11, 11-7 (RE)");
        assert_eq!(m.score_for(2), "5-11, 11-9, 7-11 (RE)");
        assert_eq!(m.category(), "3-game");
    }

    #[test]
    fn test_game_number_validation() {
        let mut event = ScoreEvent {
            match_id: 1,
            game_number: Some(0),
            timestamp: sample_match().date,
            points_left: 0,
            points_right: 0,
            decision: DecisionKind::from_label("Point"),
        };
        assert!(event.is_point());
        assert_eq!(event.valid_game_number(), None);

        event.game_number = Some(2);
        assert_eq!(event.valid_game_number(), Some(2));
    }
}
