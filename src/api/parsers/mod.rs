pub mod live_score;
pub mod matches;
pub mod profile;
pub mod score;

pub use live_score::{ParsedEvents, parse_events};
pub use matches::to_match_summary;
pub use score::ScoreParser;
