use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{MatchSummary, PlayerId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32,
}

impl WinLoss {
    fn record(&mut self, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }
}

/// Resolved outcome of one match from the subject's point of view
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub category: String,
    pub won: bool,
}

impl MatchResult {
    /// `None` when the subject did not play or the winner is unknown
    pub fn for_player(summary: &MatchSummary, player_id: PlayerId) -> Option<Self> {
        let won = summary.did_win(player_id)?;
        Some(Self {
            category: summary.category(),
            won,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSummary {
    pub total_wins: u32,
    pub total_losses: u32,
    pub win_percentage: u32,
    pub per_category: BTreeMap<String, WinLoss>,
}

impl RecordSummary {
    pub fn total_matches(&self) -> u32 {
        self.total_wins + self.total_losses
    }
}

/// Win/loss record of `player_id` over `matches`.
///
/// Every label in `categories` shows up in the breakdown, as `0/0` when
/// no match falls in it.
pub fn summarize_record(
    matches: &[MatchSummary],
    player_id: PlayerId,
    categories: &[String],
) -> RecordSummary {
    let results: Vec<MatchResult> = matches
        .iter()
        .filter_map(|m| MatchResult::for_player(m, player_id))
        .collect();
    summarize_results(&results, categories)
}

pub fn summarize_results(results: &[MatchResult], categories: &[String]) -> RecordSummary {
    let mut per_category: BTreeMap<String, WinLoss> = categories
        .iter()
        .map(|label| (label.clone(), WinLoss::default()))
        .collect();
    let mut totals = WinLoss::default();

    for result in results {
        totals.record(result.won);
        per_category
            .entry(result.category.clone())
            .or_default()
            .record(result.won);
    }

    RecordSummary {
        total_wins: totals.wins,
        total_losses: totals.losses,
        win_percentage: win_percentage(totals.wins, totals.losses),
        per_category,
    }
}

/// Rounded to the nearest integer; zero when nothing was played
pub fn win_percentage(wins: u32, losses: u32) -> u32 {
    let total = wins + losses;
    if total == 0 {
        return 0;
    }
    (wins as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(category: &str, won: bool) -> MatchResult {
        MatchResult {
            category: category.to_string(),
            won,
        }
    }

    fn categories() -> Vec<String> {
        vec!["3-game".into(), "4-game".into(), "5-game".into()]
    }

    #[test]
    fn test_six_wins_four_losses() {
        let mut results = Vec::new();
        for i in 0..10 {
            results.push(result("3-game", i < 6));
        }

        let summary = summarize_results(&results, &categories());
        assert_eq!(summary.total_wins, 6);
        assert_eq!(summary.total_losses, 4);
        assert_eq!(summary.win_percentage, 60);
        assert_eq!(summary.total_matches(), 10);
    }

    #[test]
    fn test_empty_categories_are_zero_not_missing() {
        let results = vec![result("3-game", true), result("5-game", false)];
        let summary = summarize_results(&results, &categories());

        assert_eq!(summary.per_category["3-game"], WinLoss { wins: 1, losses: 0 });
        assert_eq!(summary.per_category["4-game"], WinLoss::default());
        assert_eq!(summary.per_category["5-game"], WinLoss { wins: 0, losses: 1 });
    }

    #[test]
    fn test_unlisted_category_is_still_counted() {
        let summary = summarize_results(&[result("2-game", true)], &categories());
        assert_eq!(summary.per_category["2-game"], WinLoss { wins: 1, losses: 0 });
        assert_eq!(summary.per_category.len(), 4);
    }

    #[test]
    fn test_win_percentage_rounding() {
        assert_eq!(win_percentage(0, 0), 0);
        assert_eq!(win_percentage(1, 2), 33);
        assert_eq!(win_percentage(2, 1), 67);
        assert_eq!(win_percentage(1, 7), 13); // 12.5 rounds up
        assert_eq!(win_percentage(3, 0), 100);
    }
}
