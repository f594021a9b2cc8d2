use log::debug;
use std::collections::BTreeMap;

use crate::domain::{MatchId, NormalizedGame, ScoreEvent};
use crate::errors::AnalysisError;

const MIN_POINT_EVENTS: usize = 2;

/// Split a match's raw events into per-game point sequences.
///
/// Games come back in ascending game number; points within a game are
/// sorted by timestamp, keeping input order on ties. Events without a
/// positive game number are dropped. Fewer than two point events across
/// the whole match is `InsufficientData`.
pub fn normalize_events(
    match_id: MatchId,
    events: &[ScoreEvent],
) -> Result<Vec<NormalizedGame>, AnalysisError> {
    let grouped = group_by_game(match_id, events);
    let point_events = count_points(&grouped);

    if point_events < MIN_POINT_EVENTS {
        return Err(AnalysisError::InsufficientData {
            match_id,
            point_events,
        });
    }

    Ok(build_games(match_id, grouped))
}

fn group_by_game(match_id: MatchId, events: &[ScoreEvent]) -> BTreeMap<u32, Vec<ScoreEvent>> {
    let mut games: BTreeMap<u32, Vec<ScoreEvent>> = BTreeMap::new();
    let mut dropped = 0;

    for event in events {
        let Some(game_number) = event.valid_game_number() else {
            dropped += 1;
            continue;
        };

        let points = games.entry(game_number).or_default();
        if event.is_point() {
            points.push(event.clone());
        }
    }

    if dropped > 0 {
        debug!("Match {}: dropped {} events without a game number", match_id, dropped);
    }

    games
}

fn count_points(games: &BTreeMap<u32, Vec<ScoreEvent>>) -> usize {
    games.values().map(Vec::len).sum()
}

fn build_games(match_id: MatchId, games: BTreeMap<u32, Vec<ScoreEvent>>) -> Vec<NormalizedGame> {
    games
        .into_iter()
        .map(|(game_number, mut points)| {
            sort_by_time(&mut points);
            NormalizedGame {
                match_id,
                game_number,
                points,
            }
        })
        .collect()
}

fn sort_by_time(points: &mut [ScoreEvent]) {
    // stable: equal timestamps keep their feed order
    points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
}
