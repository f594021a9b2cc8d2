use serde::Serialize;

use crate::domain::MatchId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DurationKind {
    Point,
    Game,
    Match,
}

/// One accepted duration measurement, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationSample {
    pub match_id: MatchId,
    pub kind: DurationKind,
    pub seconds: f64,
}

impl DurationSample {
    pub fn new(match_id: MatchId, kind: DurationKind, seconds: f64) -> Self {
        Self {
            match_id,
            kind,
            seconds,
        }
    }
}

/// Durations pulled out of one match's live scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDurations {
    pub match_id: MatchId,
    pub points: Vec<DurationSample>,
    pub games: Vec<DurationSample>,
    /// Present only when the match passed the profile's match-length floor
    pub match_duration: Option<DurationSample>,
    /// First to last point, unfiltered
    pub match_seconds: f64,
    pub rejected_points: usize,
}

impl MatchDurations {
    pub fn below_match_floor(&self) -> bool {
        self.match_duration.is_none()
    }

    pub fn samples(&self) -> impl Iterator<Item = &DurationSample> {
        self.points
            .iter()
            .chain(self.games.iter())
            .chain(self.match_duration.iter())
    }
}

/// A sample at one end of the range, with the match it came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extreme {
    pub seconds: f64,
    pub match_id: MatchId,
}

/// Summary of one duration kind; never a made-up zero when nothing was measured
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TimingSummary {
    Unavailable,
    Measured {
        average_seconds: f64,
        minimum: Extreme,
        maximum: Extreme,
        sample_count: usize,
    },
}

impl TimingSummary {
    pub fn is_available(&self) -> bool {
        matches!(self, TimingSummary::Measured { .. })
    }

    pub fn average_seconds(&self) -> Option<f64> {
        match self {
            TimingSummary::Measured { average_seconds, .. } => Some(*average_seconds),
            TimingSummary::Unavailable => None,
        }
    }

    pub fn minimum(&self) -> Option<Extreme> {
        match self {
            TimingSummary::Measured { minimum, .. } => Some(*minimum),
            TimingSummary::Unavailable => None,
        }
    }

    pub fn maximum(&self) -> Option<Extreme> {
        match self {
            TimingSummary::Measured { maximum, .. } => Some(*maximum),
            TimingSummary::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingReport {
    pub points: TimingSummary,
    pub games: TimingSummary,
    pub matches: TimingSummary,
}
