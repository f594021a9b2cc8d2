use log::{info, warn};
use serde::Serialize;

use crate::domain::{MatchSummary, PlayerId};
use crate::errors::AnalysisError;
use crate::pagination::{PageIterator, PaginationConfig};
use crate::providers::MatchProvider;

/// Finished matches of one player, most recent first
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchHistory {
    pub matches: Vec<MatchSummary>,
    pub pages_fetched: usize,
    pub failed_pages: usize,
}

/// Walk every page until a short page, keeping completed and retired matches
/// the player took part in.
///
/// A page that fails to load ends the walk; what was gathered so far is kept.
pub async fn fetch_player_matches<P: MatchProvider>(
    provider: &P,
    player_id: PlayerId,
    config: &PaginationConfig,
) -> MatchHistory {
    let mut pages = PageIterator::new(config.clone());
    let mut history = MatchHistory::default();

    while !pages.has_reached_max() {
        let page = pages.current_page();
        let fetched = match provider.fetch_match_page(player_id, page).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("{}", AnalysisError::lookup("match page", page as i64, &e));
                history.failed_pages += 1;
                break;
            }
        };

        history.pages_fetched += 1;
        history.matches.extend(fetched.matches);

        if pages.is_last_page(fetched.records) {
            break;
        }
        pages.advance();
    }

    keep_finished(&mut history.matches, player_id);
    sort_most_recent_first(&mut history.matches);

    info!(
        "  → {} finished matches for player {} over {} pages",
        history.matches.len(),
        player_id,
        history.pages_fetched
    );
    history
}

fn keep_finished(matches: &mut Vec<MatchSummary>, player_id: PlayerId) {
    matches.retain(|m| m.status.is_finished() && m.involves(player_id));
}

fn sort_most_recent_first(matches: &mut [MatchSummary]) {
    matches.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchPage, MatchStatus, Participant, Side};
    use anyhow::Result;
    use chrono::{NaiveDate, TimeDelta};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct PagedMatches {
        pages: Vec<Vec<MatchSummary>>,
        fail_on: Option<usize>,
        calls: AtomicUsize,
    }

    impl MatchProvider for PagedMatches {
        async fn fetch_match_page(&self, _player_id: PlayerId, page: usize) -> Result<MatchPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(page) {
                anyhow::bail!("proxy timed out");
            }
            Ok(self.pages.get(page - 1).cloned().unwrap_or_default().into())
        }
    }

    fn summary(match_id: i64, day: i64, subject: Option<i64>, status: MatchStatus) -> MatchSummary {
        MatchSummary {
            match_id,
            date: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                + TimeDelta::days(day),
            participant_a: Participant {
                id: subject,
                name: "A".into(),
            },
            participant_b: Participant {
                id: Some(99),
                name: "B".into(),
            },
            winner_side: Some(Side::A),
            games: Vec::new(),
            status,
            description: None,
        }
    }

    fn provider(pages: Vec<Vec<MatchSummary>>, fail_on: Option<usize>) -> PagedMatches {
        PagedMatches {
            pages,
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_short_page_stops_and_filters() {
        let p = provider(
            vec![
                vec![
                    summary(1, 1, Some(7), MatchStatus::Completed),
                    summary(2, 5, Some(7), MatchStatus::Other),
                ],
                vec![
                    summary(3, 3, Some(7), MatchStatus::Retired),
                    summary(4, 9, Some(8), MatchStatus::Completed),
                ],
                vec![summary(5, 7, Some(7), MatchStatus::Completed)],
                vec![summary(6, 8, Some(7), MatchStatus::Completed)],
            ],
            None,
        );

        let history = fetch_player_matches(&p, 7, &PaginationConfig::new(2)).await;

        let ids: Vec<i64> = history.matches.iter().map(|m| m.match_id).collect();
        assert_eq!(ids, vec![5, 3, 1]);
        assert_eq!(history.pages_fetched, 3);
        assert_eq!(p.calls.load(Ordering::SeqCst), 3);
        assert_eq!(history.failed_pages, 0);
    }

    #[tokio::test]
    async fn test_failed_page_keeps_earlier_matches() {
        let p = provider(
            vec![vec![
                summary(1, 1, Some(7), MatchStatus::Completed),
                summary(2, 2, Some(7), MatchStatus::Completed),
            ]],
            Some(2),
        );

        let history = fetch_player_matches(&p, 7, &PaginationConfig::new(2)).await;
        assert_eq!(history.matches.len(), 2);
        assert_eq!(history.failed_pages, 1);
    }

    #[tokio::test]
    async fn test_max_pages_bounds_the_walk() {
        let full = vec![
            summary(1, 1, Some(7), MatchStatus::Completed),
            summary(2, 2, Some(7), MatchStatus::Completed),
        ];
        let p = provider(vec![full.clone(), full.clone(), full], None);

        let config = PaginationConfig::new(2).with_max_pages(2);
        let history = fetch_player_matches(&p, 7, &config).await;
        assert_eq!(history.pages_fetched, 2);
    }

    #[tokio::test]
    async fn test_default_page_size_walks_every_full_page() {
        let page = |first: i64| -> Vec<MatchSummary> {
            (first..first + 5)
                .map(|id| summary(id, id, Some(7), MatchStatus::Completed))
                .collect()
        };
        let p = provider(vec![page(1), page(6), page(11)], None);

        let config = crate::config::settings::AppConfig::new();
        let pagination = PaginationConfig::new(config.client.match_page_size);
        let history = fetch_player_matches(&p, 7, &pagination).await;

        assert_eq!(history.matches.len(), 15);
        // three full pages, then the empty fourth ends the walk
        assert_eq!(history.pages_fetched, 4);
        assert_eq!(history.matches[0].match_id, 15);
    }

    struct LossyPages;

    impl MatchProvider for LossyPages {
        async fn fetch_match_page(&self, _player_id: PlayerId, page: usize) -> Result<MatchPage> {
            // page 1 held two records but only one could be mapped
            Ok(match page {
                1 => MatchPage {
                    matches: vec![summary(1, 1, Some(7), MatchStatus::Completed)],
                    records: 2,
                },
                _ => vec![summary(2, 2, Some(7), MatchStatus::Completed)].into(),
            })
        }
    }

    #[tokio::test]
    async fn test_dropped_records_do_not_shorten_a_page() {
        let history = fetch_player_matches(&LossyPages, 7, &PaginationConfig::new(2)).await;
        assert_eq!(history.pages_fetched, 2);
        assert_eq!(history.matches.len(), 2);
    }
}
