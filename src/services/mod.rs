pub mod match_detail;
pub mod match_history;
pub mod profile;
pub mod timing_insights;

pub use match_detail::analyze_match;
pub use match_history::{MatchHistory, fetch_player_matches};
pub use profile::{PlayerMatches, PlayerProfile, PlayerRecord, ProfileService};
pub use timing_insights::{MatchOutcome, TimingInsights, TimingInsightsService};
