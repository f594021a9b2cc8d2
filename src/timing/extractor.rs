use log::debug;

use super::types::{DurationKind, DurationSample, MatchDurations};
use crate::config::{SinglePointGames, TimingProfile};
use crate::domain::{self, MatchId, NormalizedGame};

/// Turn a match's normalized games into point, game and match durations
pub fn extract_durations(
    match_id: MatchId,
    games: &[NormalizedGame],
    profile: &TimingProfile,
) -> MatchDurations {
    let (points, rejected_points) = point_durations(match_id, games, profile);
    let game_samples = game_durations(match_id, games, profile.single_point_games);
    let match_seconds = match_length(games).unwrap_or(0.0);
    let match_duration = accept_match(match_id, match_seconds, profile.min_match_seconds);

    MatchDurations {
        match_id,
        points,
        games: game_samples,
        match_duration,
        match_seconds,
        rejected_points,
    }
}

/// Intervals between consecutive points of the same game
pub fn point_intervals(game: &NormalizedGame) -> Vec<f64> {
    game.points
        .windows(2)
        .map(|pair| domain::seconds_between(pair[0].timestamp, pair[1].timestamp))
        .collect()
}

/// First to last point of a game; zero for a single point, `None` when empty
pub fn game_length(game: &NormalizedGame) -> Option<f64> {
    let first = game.first_point()?;
    let last = game.last_point()?;
    Some(domain::seconds_between(first.timestamp, last.timestamp))
}

/// First point to last point across every game
pub fn match_length(games: &[NormalizedGame]) -> Option<f64> {
    let first = games
        .iter()
        .filter_map(|g| g.first_point())
        .map(|p| p.timestamp)
        .min()?;
    let last = games
        .iter()
        .filter_map(|g| g.last_point())
        .map(|p| p.timestamp)
        .max()?;
    Some(domain::seconds_between(first, last))
}

fn point_durations(
    match_id: MatchId,
    games: &[NormalizedGame],
    profile: &TimingProfile,
) -> (Vec<DurationSample>, usize) {
    let mut accepted = Vec::new();
    let mut rejected = 0;

    for game in games {
        for seconds in point_intervals(game) {
            if profile.point_bounds.accepts(seconds) {
                accepted.push(DurationSample::new(match_id, DurationKind::Point, seconds));
            } else {
                debug!(
                    "Match {} game {}: point of {:.2}s outside {} bounds",
                    match_id, game.game_number, seconds, profile.name
                );
                rejected += 1;
            }
        }
    }

    (accepted, rejected)
}

fn game_durations(
    match_id: MatchId,
    games: &[NormalizedGame],
    single_point_games: SinglePointGames,
) -> Vec<DurationSample> {
    games
        .iter()
        .filter(|game| counts_as_game(game, single_point_games))
        .filter_map(game_length)
        .map(|seconds| DurationSample::new(match_id, DurationKind::Game, seconds))
        .collect()
}

fn counts_as_game(game: &NormalizedGame, policy: SinglePointGames) -> bool {
    match game.points.len() {
        0 => false,
        1 => policy == SinglePointGames::Include,
        _ => true,
    }
}

fn accept_match(match_id: MatchId, seconds: f64, floor: Option<f64>) -> Option<DurationSample> {
    if floor.is_some_and(|min| seconds < min) {
        debug!("Match {}: length {:.0}s is below the match floor", match_id, seconds);
        return None;
    }
    Some(DurationSample::new(match_id, DurationKind::Match, seconds))
}
