use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::domain::RankingEntry;

/// Change of a ranking position since the previous week; a lower position is better
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "direction", content = "places")]
pub enum RankMovement {
    Up(u32),
    Down(u32),
    Unchanged,
    New,
}

impl RankMovement {
    fn between(previous: Option<u32>, current: u32) -> Self {
        match previous {
            None => RankMovement::New,
            Some(previous) if previous > current => RankMovement::Up(previous - current),
            Some(previous) if previous < current => RankMovement::Down(current - previous),
            Some(_) => RankMovement::Unchanged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionRanking {
    pub division: String,
    pub rating_group: String,
    pub ranking: u32,
    pub movement: RankMovement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyRankings {
    pub as_of: NaiveDate,
    pub previous: Option<NaiveDate>,
    pub divisions: Vec<DivisionRanking>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakRating {
    pub rating: f64,
    pub date: NaiveDate,
}

/// Highest rating of `division` over the whole history; the earliest entry wins ties
pub fn highest_rating(entries: &[RankingEntry], division: &str) -> Option<PeakRating> {
    let mut history: Vec<&RankingEntry> = entries.iter().filter(|e| e.division == division).collect();
    history.sort_by_key(|e| e.period);

    let mut peak: Option<&RankingEntry> = None;
    for entry in history {
        if peak.is_none_or(|p| entry.rating > p.rating) {
            peak = Some(entry);
        }
    }

    peak.map(|e| PeakRating {
        rating: e.rating,
        date: e.period.date(),
    })
}

/// Rankings of the latest ranking day, each compared with the day before it
/// under the same division and rating group.
///
/// Entries without a ranking position are not listed.
pub fn weekly_rankings(entries: &[RankingEntry]) -> Option<WeeklyRankings> {
    let days: BTreeSet<NaiveDate> = entries.iter().map(|e| e.period.date()).collect();
    let mut latest_first = days.iter().rev();
    let as_of = *latest_first.next()?;
    let previous = latest_first.next().copied();

    let previous_positions: HashMap<(&str, &str), u32> = entries
        .iter()
        .filter(|e| Some(e.period.date()) == previous)
        .filter_map(|e| Some(((e.division.as_str(), e.rating_group.as_str()), e.ranking?)))
        .collect();

    let divisions = entries
        .iter()
        .filter(|e| e.period.date() == as_of)
        .filter_map(|e| {
            let ranking = e.ranking?;
            let before = previous_positions
                .get(&(e.division.as_str(), e.rating_group.as_str()))
                .copied();
            Some(DivisionRanking {
                division: e.division.clone(),
                rating_group: e.rating_group.clone(),
                ranking,
                movement: RankMovement::between(before, ranking),
            })
        })
        .collect();

    Some(WeeklyRankings {
        as_of,
        previous,
        divisions,
    })
}
