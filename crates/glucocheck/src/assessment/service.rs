use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::advisory::AdvisoryGateway;
use super::domain::AnswerSet;
use super::history::{HistoryEntry, HistoryError, HistoryStore};
use super::report;
use super::scoring::{AssessmentScorer, RecommendationResult, ScoringRubric};
use super::trends::{analyze_trends, TrendReport};

/// Result of one submission: the stored entry plus whatever trend the history now supports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub recorded_at: DateTime<Utc>,
    pub recommendation: RecommendationResult,
    pub history_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<TrendReport>,
    #[serde(skip)]
    pub entry: HistoryEntry,
}

/// Service composing the advisory gateway, the local scorer, and the history store.
pub struct AssessmentService<S, A> {
    store: Arc<S>,
    advisor: Arc<A>,
    scorer: AssessmentScorer,
}

impl<S, A> AssessmentService<S, A>
where
    S: HistoryStore + 'static,
    A: AdvisoryGateway + 'static,
{
    pub fn new(store: Arc<S>, advisor: Arc<A>, rubric: ScoringRubric) -> Self {
        Self {
            store,
            advisor,
            scorer: AssessmentScorer::new(rubric),
        }
    }

    pub fn scorer(&self) -> &AssessmentScorer {
        &self.scorer
    }

    /// Score one answer set, consulting the advisory gateway once and falling back to the rubric.
    pub async fn recommend(&self, answers: &AnswerSet) -> RecommendationResult {
        let advisory = match self.advisor.analyze(answers).await {
            Ok(analysis) => Some(analysis),
            Err(err) => {
                warn!(error = %err, "advisory analysis unavailable; scoring locally");
                None
            }
        };

        self.scorer.score(answers, advisory)
    }

    pub async fn submit(&self, answers: AnswerSet) -> SubmissionOutcome {
        self.submit_at(answers, Utc::now()).await
    }

    /// Submit with an explicit timestamp. History failures never block the recommendation.
    pub async fn submit_at(
        &self,
        answers: AnswerSet,
        recorded_at: DateTime<Utc>,
    ) -> SubmissionOutcome {
        let recommendation = self.recommend(&answers).await;
        let entry = HistoryEntry::new(answers, recommendation.clone(), recorded_at);

        let pending = entry.clone();
        let history = match self.on_store(move |store| store.append(pending)).await {
            Ok(history) => history,
            Err(err) => {
                warn!(error = %err, "failed to append history entry");
                Vec::new()
            }
        };

        info!(
            tier = recommendation.tier.tag(),
            score = recommendation.score,
            history_length = history.len(),
            "assessment recorded"
        );

        SubmissionOutcome {
            recorded_at,
            trends: analyze_trends(&history),
            history_length: history.len(),
            recommendation,
            entry,
        }
    }

    /// Every stored entry in insertion order.
    pub async fn read_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        self.on_store(|store| store.read_all()).await
    }

    /// Like [`read_history`](Self::read_history), but an unreadable store reads as empty.
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.read_history().await.unwrap_or_else(|err| {
            warn!(error = %err, "failed to read history");
            Vec::new()
        })
    }

    pub async fn trends(&self) -> Option<TrendReport> {
        analyze_trends(&self.history().await)
    }

    pub fn report(
        &self,
        answers: &AnswerSet,
        result: &RecommendationResult,
        generated_at: DateTime<Utc>,
    ) -> String {
        report::render_markdown(answers, result, generated_at)
    }

    /// Runs a store call on the blocking pool; file stores do synchronous I/O.
    async fn on_store<T, F>(&self, op: F) -> Result<T, HistoryError>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T, HistoryError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|err| HistoryError::Unavailable(err.to_string()))?
    }
}
