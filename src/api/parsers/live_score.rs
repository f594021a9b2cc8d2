use log::debug;
use serde_json::Value;

use crate::api::models::LiveScoreEventResponse;
use crate::domain::{self, DecisionKind, MatchId, ScoreEvent};
use crate::errors::AnalysisError;

/// Events that could be mapped, plus how many were dropped as malformed
#[derive(Debug, Default)]
pub struct ParsedEvents {
    pub events: Vec<ScoreEvent>,
    pub malformed: usize,
}

/// Map raw events one at a time so a single bad record only drops itself
pub fn parse_events(match_id: MatchId, raw: Vec<Value>) -> ParsedEvents {
    let mut parsed = ParsedEvents::default();

    for value in raw {
        match to_score_event(match_id, value) {
            Ok(event) => parsed.events.push(event),
            Err(err) => {
                debug!("{}", err);
                parsed.malformed += 1;
            }
        }
    }

    parsed
}

fn to_score_event(match_id: MatchId, value: Value) -> Result<ScoreEvent, AnalysisError> {
    let raw: LiveScoreEventResponse =
        serde_json::from_value(value).map_err(|e| malformed(match_id, e.to_string()))?;

    let start = raw
        .start_date
        .as_deref()
        .ok_or_else(|| malformed(match_id, "missing StartDate".to_string()))?;
    let timestamp =
        domain::parse_timestamp(start).map_err(|e| malformed(match_id, e.to_string()))?;

    Ok(ScoreEvent {
        match_id,
        game_number: raw.game_number,
        timestamp,
        points_left: raw.points_left.unwrap_or(0),
        points_right: raw.points_right.unwrap_or(0),
        decision: raw
            .decision
            .as_deref()
            .map(DecisionKind::from_label)
            .unwrap_or(DecisionKind::Other),
    })
}

fn malformed(match_id: MatchId, reason: String) -> AnalysisError {
    AnalysisError::MalformedEvent { match_id, reason }
}
