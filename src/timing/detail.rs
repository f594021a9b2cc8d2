use serde::Serialize;

use super::aggregator::summarize;
use super::extractor::{extract_durations, game_length, point_intervals};
use super::types::{DurationKind, DurationSample, TimingSummary};
use crate::config::TimingProfile;
use crate::domain::{MatchId, NormalizedGame};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameDetail {
    pub game_number: u32,
    pub final_left: u32,
    pub final_right: u32,
    pub length_seconds: f64,
    pub points: TimingSummary,
}

/// Everything shown for one match on its own
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetail {
    pub match_id: MatchId,
    pub match_length_seconds: f64,
    pub games_won_left: u32,
    pub games_won_right: u32,
    pub points: TimingSummary,
    pub games: TimingSummary,
    pub per_game: Vec<GameDetail>,
    pub rejected_points: usize,
}

pub fn build_match_detail(
    match_id: MatchId,
    games: &[NormalizedGame],
    profile: &TimingProfile,
) -> MatchDetail {
    let durations = extract_durations(match_id, games, profile);
    let per_game: Vec<GameDetail> = games
        .iter()
        .filter_map(|game| game_detail(match_id, game, profile))
        .collect();

    let games_won_left = per_game.iter().filter(|g| g.final_left > g.final_right).count() as u32;
    let games_won_right = per_game.iter().filter(|g| g.final_right > g.final_left).count() as u32;

    MatchDetail {
        match_id,
        match_length_seconds: durations.match_seconds,
        games_won_left,
        games_won_right,
        points: summarize(&durations.points),
        games: summarize(&durations.games),
        per_game,
        rejected_points: durations.rejected_points,
    }
}

fn game_detail(match_id: MatchId, game: &NormalizedGame, profile: &TimingProfile) -> Option<GameDetail> {
    let last = game.last_point()?;
    let length_seconds = game_length(game)?;

    let samples: Vec<DurationSample> = point_intervals(game)
        .into_iter()
        .filter(|s| profile.point_bounds.accepts(*s))
        .map(|s| DurationSample::new(match_id, DurationKind::Point, s))
        .collect();

    Some(GameDetail {
        game_number: game.game_number,
        final_left: last.points_left,
        final_right: last.points_right,
        length_seconds,
        points: summarize(&samples),
    })
}
