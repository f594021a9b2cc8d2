mod collection;
pub mod dates;
pub mod models;
mod progress;

pub use collection::MatchIndex;
pub use dates::{parse_timestamp, seconds_between};
pub use models::*;
pub use progress::FetchProgress;
