use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::GameScore;

/// Parses score strings such as `11-5,9-11,11-7`
pub struct ScoreParser {
    game_regex: Regex,
}

impl ScoreParser {
    pub fn new() -> Result<Self> {
        let game_regex = Self::compile_regex()?;
        Ok(Self { game_regex })
    }

    /// Games that do not look like `a-b` are skipped
    pub fn parse(&self, score: &str) -> Vec<GameScore> {
        score
            .split(',')
            .filter_map(|game| self.parse_game(game))
            .collect()
    }

    fn parse_game(&self, game: &str) -> Option<GameScore> {
        let caps = self.game_regex.captures(game)?;
        let points_a = caps.get(1)?.as_str().parse().ok()?;
        let points_b = caps.get(2)?.as_str().parse().ok()?;
        Some(GameScore { points_a, points_b })
    }

    fn compile_regex() -> Result<Regex> {
        Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*$").context("Failed to compile game score regex")
    }
}
