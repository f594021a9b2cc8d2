use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::RankingEntry;

const MONTHS_SHOWN: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthChange {
    pub year: i32,
    pub month: u32,
    /// Last minus first rating of the month; `None` when the month has no entries
    pub change: Option<f64>,
}

impl MonthChange {
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingChanges {
    /// Most recent month first
    pub months: Vec<MonthChange>,
    pub year_to_date: Option<f64>,
}

/// Month-over-month rating movement for the twelve months ending at `reference`.
///
/// Only entries of `division` are used. Year-to-date needs at least two
/// entries in the reference year.
pub fn rating_changes(entries: &[RankingEntry], division: &str, reference: NaiveDate) -> RatingChanges {
    let mut history: Vec<&RankingEntry> = entries.iter().filter(|e| e.division == division).collect();
    history.sort_by_key(|e| e.period);

    let by_month = group_by_month(&history);
    let months = last_months(reference, MONTHS_SHOWN)
        .into_iter()
        .map(|(year, month)| MonthChange {
            year,
            month,
            change: by_month.get(&(year, month)).and_then(|ratings| month_change(ratings)),
        })
        .collect();

    let this_year: Vec<f64> = history
        .iter()
        .filter(|e| e.period.year() == reference.year())
        .map(|e| e.rating)
        .collect();

    RatingChanges {
        months,
        year_to_date: first_to_last(&this_year),
    }
}

fn group_by_month(history: &[&RankingEntry]) -> BTreeMap<(i32, u32), Vec<f64>> {
    let mut months: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for entry in history {
        months
            .entry((entry.period.year(), entry.period.month()))
            .or_default()
            .push(entry.rating);
    }
    months
}

/// `count` (year, month) pairs walking back from `reference`'s month
fn last_months(reference: NaiveDate, count: usize) -> Vec<(i32, u32)> {
    let mut year = reference.year();
    let mut month = reference.month();
    let mut months = Vec::with_capacity(count);

    for _ in 0..count {
        months.push((year, month));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }

    months
}

/// A month with a single entry is a real zero change
fn month_change(ratings: &[f64]) -> Option<f64> {
    Some(ratings.last()? - ratings.first()?)
}

fn first_to_last(ratings: &[f64]) -> Option<f64> {
    match ratings {
        [first, .., last] => Some(last - first),
        _ => None,
    }
}
