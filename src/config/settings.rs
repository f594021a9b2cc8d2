use anyhow::{Context, Result};
use serde::Serialize;

const DEFAULT_PROXY_URL: &str = "http://localhost:5000/proxy";
/// Records the federation API returns on a full match page
const MATCH_PAGE_SIZE: usize = 5;

/// Inclusive/exclusive window a single inter-point interval must fall in
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointBounds {
    pub min_seconds: f64,
    pub max_seconds: f64,
    pub min_exclusive: bool,
}

impl PointBounds {
    pub fn accepts(&self, seconds: f64) -> bool {
        self.above_min(seconds) && seconds <= self.max_seconds
    }

    fn above_min(&self, seconds: f64) -> bool {
        if self.min_exclusive {
            seconds > self.min_seconds
        } else {
            seconds >= self.min_seconds
        }
    }
}

/// Whether a game with a single recorded point contributes a zero-length game duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SinglePointGames {
    Include,
    Exclude,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingProfile {
    pub name: &'static str,
    pub point_bounds: PointBounds,
    pub min_match_seconds: Option<f64>,
    pub single_point_games: SinglePointGames,
}

impl TimingProfile {
    /// Stricter bounds used when comparing timings across many matches
    pub fn aggregate() -> Self {
        Self {
            name: "aggregate",
            point_bounds: PointBounds {
                min_seconds: 4.0,
                max_seconds: 150.0,
                min_exclusive: false,
            },
            min_match_seconds: Some(240.0),
            single_point_games: SinglePointGames::Include,
        }
    }

    /// Looser bounds used when showing a single match on its own
    pub fn detail() -> Self {
        Self {
            name: "detail",
            point_bounds: PointBounds {
                min_seconds: 0.0,
                max_seconds: 120.0,
                min_exclusive: true,
            },
            min_match_seconds: None,
            single_point_games: SinglePointGames::Include,
        }
    }

    pub fn with_single_point_games(mut self, policy: SinglePointGames) -> Self {
        self.single_point_games = policy;
        self
    }
}

#[derive(Debug, Clone)]
pub struct TimingSettings {
    pub aggregate: TimingProfile,
    pub detail: TimingProfile,
    pub max_concurrent_fetches: usize,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            aggregate: TimingProfile::aggregate(),
            detail: TimingProfile::detail(),
            max_concurrent_fetches: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordSettings {
    pub opponent_window: usize,
    pub top_opponents: usize,
    pub categories: Vec<String>,
    pub rating_type: &'static str,
    pub ranking_division: &'static str,
}

impl Default for RecordSettings {
    fn default() -> Self {
        Self {
            opponent_window: 15,
            top_opponents: 5,
            categories: vec!["3-game".into(), "4-game".into(), "5-game".into()],
            rating_type: "Singles International Rating",
            ranking_division: "All",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub match_page_size: usize,
    pub max_match_pages: Option<usize>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROXY_URL.to_string(),
            rate_limit_ms: 100, // 10 req/sec
            user_agent: "SquashInsights/1.0",
            timeout_secs: 10,
            match_page_size: MATCH_PAGE_SIZE,
            max_match_pages: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub timing: TimingSettings,
    pub record: RecordSettings,
    pub client: ClientSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            timing: TimingSettings::default(),
            record: RecordSettings::default(),
            client: ClientSettings::default(),
        }
    }

    /// Defaults overridden by `SQUASH_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(url) = lookup("SQUASH_PROXY_URL") {
            config.client.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup("SQUASH_RATE_LIMIT_MS") {
            config.client.rate_limit_ms = parse_var("SQUASH_RATE_LIMIT_MS", &value)?;
        }
        if let Some(value) = lookup("SQUASH_TIMEOUT_SECS") {
            config.client.timeout_secs = parse_var("SQUASH_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = lookup("SQUASH_MATCH_PAGE_SIZE") {
            config.client.match_page_size = parse_positive("SQUASH_MATCH_PAGE_SIZE", &value)?;
        }
        if let Some(value) = lookup("SQUASH_MAX_CONCURRENT_FETCHES") {
            config.timing.max_concurrent_fetches =
                parse_positive("SQUASH_MAX_CONCURRENT_FETCHES", &value)?;
        }

        Ok(config)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("{} has an invalid value: {:?}", name, value))
}

fn parse_positive(name: &str, value: &str) -> Result<usize> {
    let parsed: usize = parse_var(name, value)?;
    if parsed == 0 {
        anyhow::bail!("{} must be greater than zero", name);
    }
    Ok(parsed)
}
