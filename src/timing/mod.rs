pub mod aggregator;
pub mod detail;
pub mod extractor;
pub mod normalizer;
pub mod types;

pub use aggregator::{TimingFold, aggregate, aggregate_matches, summarize};
pub use detail::{GameDetail, MatchDetail, build_match_detail};
pub use extractor::extract_durations;
pub use normalizer::normalize_events;
pub use types::{DurationKind, DurationSample, Extreme, MatchDurations, TimingReport, TimingSummary};
