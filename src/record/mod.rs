pub mod history;
pub mod opponents;
pub mod rankings;
pub mod rating_changes;
pub mod summary;
pub mod tiers;

pub use history::{MatchListing, match_listing};
pub use opponents::{LastMatch, OpponentRating, TopOpponent, average_opponent_rating, last_match, top_opponents};
pub use rankings::{DivisionRanking, PeakRating, RankMovement, WeeklyRankings, highest_rating, weekly_rankings};
pub use rating_changes::{MonthChange, RatingChanges, rating_changes};
pub use summary::{MatchResult, RecordSummary, WinLoss, summarize_record, summarize_results, win_percentage};
pub use tiers::{RatingTier, TierProgress, tier_for, tier_progress};
