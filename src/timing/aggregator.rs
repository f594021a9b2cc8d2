use super::types::{DurationKind, DurationSample, Extreme, MatchDurations, TimingReport, TimingSummary};

/// Running mean/min/max of one duration kind. On equal values the
/// sample seen first stays the extreme.
#[derive(Debug, Default, Clone)]
pub struct SummaryAccumulator {
    sum: f64,
    count: usize,
    minimum: Option<Extreme>,
    maximum: Option<Extreme>,
}

impl SummaryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: &DurationSample) {
        let candidate = Extreme {
            seconds: sample.seconds,
            match_id: sample.match_id,
        };

        self.sum += sample.seconds;
        self.count += 1;

        if self.minimum.is_none_or(|min| candidate.seconds < min.seconds) {
            self.minimum = Some(candidate);
        }
        if self.maximum.is_none_or(|max| candidate.seconds > max.seconds) {
            self.maximum = Some(candidate);
        }
    }

    pub fn finish(&self) -> TimingSummary {
        match (self.minimum, self.maximum) {
            (Some(minimum), Some(maximum)) if self.count > 0 => TimingSummary::Measured {
                average_seconds: self.sum / self.count as f64,
                minimum,
                maximum,
                sample_count: self.count,
            },
            _ => TimingSummary::Unavailable,
        }
    }
}

/// Folds per-match durations into a report, in the order they are added
#[derive(Debug, Default, Clone)]
pub struct TimingFold {
    points: SummaryAccumulator,
    games: SummaryAccumulator,
    matches: SummaryAccumulator,
}

impl TimingFold {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, sample: &DurationSample) {
        match sample.kind {
            DurationKind::Point => self.points.push(sample),
            DurationKind::Game => self.games.push(sample),
            DurationKind::Match => self.matches.push(sample),
        }
    }

    pub fn add_match(&mut self, durations: &MatchDurations) {
        for sample in durations.samples() {
            self.add_sample(sample);
        }
    }

    pub fn finish(&self) -> TimingReport {
        TimingReport {
            points: self.points.finish(),
            games: self.games.finish(),
            matches: self.matches.finish(),
        }
    }
}

/// Summarize `samples` as one population whatever their kind; callers pass
/// samples of a single kind, `aggregate` splits mixed sets
pub fn summarize<'a, I>(samples: I) -> TimingSummary
where
    I: IntoIterator<Item = &'a DurationSample>,
{
    let mut acc = SummaryAccumulator::new();
    for sample in samples {
        acc.push(sample);
    }
    acc.finish()
}

/// Summarize a mixed set of samples, one summary per kind
pub fn aggregate(samples: &[DurationSample]) -> TimingReport {
    let mut fold = TimingFold::new();
    for sample in samples {
        fold.add_sample(sample);
    }
    fold.finish()
}

/// Summarize several matches; callers pass them in a fixed order
pub fn aggregate_matches(matches: &[MatchDurations]) -> TimingReport {
    let mut fold = TimingFold::new();
    for durations in matches {
        fold.add_match(durations);
    }
    fold.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(match_id: i64, kind: DurationKind, seconds: f64) -> DurationSample {
        DurationSample::new(match_id, kind, seconds)
    }

    #[test]
    fn test_empty_input_is_unavailable() {
        let report = aggregate(&[]);
        assert_eq!(report.points, TimingSummary::Unavailable);
        assert_eq!(report.games, TimingSummary::Unavailable);
        assert_eq!(report.matches, TimingSummary::Unavailable);
        assert_eq!(report.points.average_seconds(), None);
    }

    #[test]
    fn test_kinds_are_kept_apart() {
        let samples = vec![
            sample(1, DurationKind::Point, 10.0),
            sample(1, DurationKind::Point, 20.0),
            sample(1, DurationKind::Game, 600.0),
        ];

        let report = aggregate(&samples);
        assert_eq!(report.points.average_seconds(), Some(15.0));
        assert_eq!(report.games.average_seconds(), Some(600.0));
        assert!(!report.matches.is_available());
    }

    #[test]
    fn test_extremes_point_back_to_matches() {
        let samples = vec![
            sample(1, DurationKind::Match, 300.0),
            sample(2, DurationKind::Match, 600.0),
        ];

        let summary = summarize(&samples);
        assert_eq!(
            summary,
            TimingSummary::Measured {
                average_seconds: 450.0,
                minimum: Extreme { seconds: 300.0, match_id: 1 },
                maximum: Extreme { seconds: 600.0, match_id: 2 },
                sample_count: 2,
            }
        );
    }

    #[test]
    fn test_summarize_pools_what_it_is_given() {
        let samples = vec![
            sample(1, DurationKind::Point, 10.0),
            sample(2, DurationKind::Game, 50.0),
        ];

        let pooled = summarize(&samples);
        assert_eq!(pooled.average_seconds(), Some(30.0));

        let report = aggregate(&samples);
        assert_eq!(report.points.average_seconds(), Some(10.0));
        assert_eq!(report.games.average_seconds(), Some(50.0));
    }

    #[test]
    fn test_first_sample_wins_ties() {
        let samples = vec![
            sample(4, DurationKind::Point, 8.0),
            sample(2, DurationKind::Point, 8.0),
            sample(9, DurationKind::Point, 8.0),
        ];

        let summary = summarize(&samples);
        assert_eq!(summary.minimum().map(|e| e.match_id), Some(4));
        assert_eq!(summary.maximum().map(|e| e.match_id), Some(4));
    }

    #[test]
    fn test_rerun_is_identical() {
        let samples = vec![
            sample(3, DurationKind::Point, 7.5),
            sample(1, DurationKind::Game, 420.0),
            sample(2, DurationKind::Point, 12.25),
            sample(2, DurationKind::Match, 1800.0),
        ];

        assert_eq!(aggregate(&samples), aggregate(&samples));
    }
}
