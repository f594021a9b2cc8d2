pub mod settings;

pub use settings::{AppConfig, PointBounds, SinglePointGames, TimingProfile};
