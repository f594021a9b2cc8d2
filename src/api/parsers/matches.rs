use anyhow::{Context, Result};

use super::score::ScoreParser;
use crate::api::models::MatchResponse;
use crate::domain::{self, MatchStatus, MatchSummary, Participant, Side};

/// Map a raw match record onto the domain summary
pub fn to_match_summary(raw: &MatchResponse, scores: &ScoreParser) -> Result<MatchSummary> {
    let date_str = raw
        .match_date
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .with_context(|| format!("Match {} has no date", raw.match_id))?;
    let date = domain::parse_timestamp(date_str)?;

    Ok(MatchSummary {
        match_id: raw.match_id,
        date,
        participant_a: participant(raw.wid1, raw.hplayer1.as_deref()),
        participant_b: participant(raw.oid1, raw.vplayer1.as_deref()),
        winner_side: raw.wid1.map(|_| Side::A),
        games: raw.score.as_deref().map(|s| scores.parse(s)).unwrap_or_default(),
        status: MatchStatus::from_code(raw.status.as_deref().unwrap_or_default()),
        description: non_empty(raw.description.as_deref()),
    })
}

fn participant(id: Option<i64>, name: Option<&str>) -> Participant {
    Participant {
        id: id.filter(|id| *id > 0),
        name: non_empty(name).unwrap_or_else(|| "Opponent".to_string()),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
