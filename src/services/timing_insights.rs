use futures_util::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::pin::pin;
use tokio::sync::watch;

use crate::config::TimingProfile;
use crate::domain::{FetchProgress, MatchId, MatchIndex, PlayerId};
use crate::errors::{AnalysisError, ExclusionReport};
use crate::pagination::PaginationConfig;
use crate::providers::{LiveScoreSource, MatchProvider};
use crate::services::match_history::fetch_player_matches;
use crate::timing::{MatchDurations, TimingFold, TimingReport, extract_durations, normalize_events};

/// What happened to one match's live scoring
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Analyzed(MatchDurations),
    NoLiveScoring,
    InsufficientData,
    LookupFailed(AnalysisError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingInsights {
    pub player_id: PlayerId,
    pub matches_considered: usize,
    pub matches_analyzed: usize,
    pub report: TimingReport,
    pub exclusions: ExclusionReport,
}

/// Cross-match point, game and match timings for one player
pub struct TimingInsightsService<C> {
    client: C,
    profile: TimingProfile,
    pagination: PaginationConfig,
    max_concurrent: usize,
}

impl<C> TimingInsightsService<C>
where
    C: MatchProvider + LiveScoreSource,
{
    pub fn new(client: C, profile: TimingProfile, pagination: PaginationConfig, max_concurrent: usize) -> Self {
        Self {
            client,
            profile,
            pagination,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Runs to completion unless `cancel` flips to `true`, in which case all
    /// in-flight fetches are dropped and nothing partial is returned.
    pub async fn run(
        &self,
        player_id: PlayerId,
        cancel: watch::Receiver<bool>,
    ) -> Result<TimingInsights, AnalysisError> {
        tokio::select! {
            biased;
            _ = cancelled(cancel) => {
                warn!("Timing insights for player {} cancelled", player_id);
                Err(AnalysisError::Cancelled)
            }
            insights = self.analyze(player_id) => Ok(insights),
        }
    }

    async fn analyze(&self, player_id: PlayerId) -> TimingInsights {
        info!("=== Timing insights for player {} ===", player_id);

        // Step 1: Match history
        let history = fetch_player_matches(&self.client, player_id, &self.pagination).await;
        let match_ids: BTreeSet<MatchId> = history.matches.iter().map(|m| m.match_id).collect();

        // Step 2: Live scoring, fetched concurrently
        let outcomes = self.collect_outcomes(&match_ids).await;

        // Step 3: Fold in match id order
        let mut exclusions = ExclusionReport {
            failed_pages: history.failed_pages,
            ..ExclusionReport::default()
        };
        let (report, analyzed) = fold_outcomes(&outcomes, &mut exclusions);

        info!(
            "=== {} of {} matches analyzed ({} below match floor), {} excluded ===",
            analyzed,
            match_ids.len(),
            exclusions.below_match_floor,
            exclusions.total()
        );

        TimingInsights {
            player_id,
            matches_considered: match_ids.len(),
            matches_analyzed: analyzed,
            report,
            exclusions,
        }
    }

    async fn collect_outcomes(&self, match_ids: &BTreeSet<MatchId>) -> MatchIndex<MatchOutcome> {
        let mut progress = FetchProgress::new(match_ids.len());
        let mut index = MatchIndex::new();

        let mut arrivals = pin!(
            stream::iter(match_ids.iter().copied())
                .map(|match_id| self.analyze_match(match_id))
                .buffer_unordered(self.max_concurrent)
        );

        while let Some((match_id, outcome)) = arrivals.next().await {
            update_progress(&mut progress, &outcome);
            index.add(match_id, outcome);
        }

        index
    }

    async fn analyze_match(&self, match_id: MatchId) -> (MatchId, MatchOutcome) {
        let outcome = match self.client.fetch_events(match_id).await {
            Err(e) => {
                let failure = AnalysisError::lookup("live score", match_id, &e);
                warn!("{}", failure);
                MatchOutcome::LookupFailed(failure)
            }
            Ok(None) => MatchOutcome::NoLiveScoring,
            Ok(Some(events)) => match normalize_events(match_id, &events) {
                Ok(games) => MatchOutcome::Analyzed(extract_durations(match_id, &games, &self.profile)),
                Err(e) => {
                    debug!("{}", e);
                    MatchOutcome::InsufficientData
                }
            },
        };
        (match_id, outcome)
    }
}

/// Ascending match id order keeps first-seen tie-breaks reproducible
pub fn fold_outcomes(
    outcomes: &MatchIndex<MatchOutcome>,
    exclusions: &mut ExclusionReport,
) -> (TimingReport, usize) {
    let mut fold = TimingFold::new();
    let mut analyzed = 0;

    for (_, outcome) in outcomes.iter() {
        match outcome {
            MatchOutcome::Analyzed(durations) => {
                if durations.below_match_floor() {
                    exclusions.below_match_floor += 1;
                }
                fold.add_match(durations);
                analyzed += 1;
            }
            MatchOutcome::NoLiveScoring => exclusions.no_live_scoring += 1,
            MatchOutcome::InsufficientData => exclusions.insufficient_data += 1,
            MatchOutcome::LookupFailed(_) => exclusions.lookup_failures += 1,
        }
    }

    (fold.finish(), analyzed)
}

fn update_progress(progress: &mut FetchProgress, outcome: &MatchOutcome) {
    match outcome {
        MatchOutcome::Analyzed(_) => progress.increment_analyzed(),
        MatchOutcome::NoLiveScoring | MatchOutcome::InsufficientData => progress.increment_without_data(),
        MatchOutcome::LookupFailed(_) => progress.increment_failed(),
    }
}

/// Resolves once `true` is sent; a dropped sender never cancels
async fn cancelled(mut cancel: watch::Receiver<bool>) {
    while !*cancel.borrow() {
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
