//! Questionnaire scoring, history, trend analysis, and report export.

pub mod advisory;
pub mod domain;
pub mod history;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod trends;

#[cfg(test)]
pub(crate) mod tests;

pub use advisory::{AdvisoryAnalysis, AdvisoryError, AdvisoryGateway, DisabledAdvisor, OpenAiAdvisor};
pub use domain::{
    AgeRange, AnswerSet, Area, AreaScores, DesiredFeature, GlucoseMonitoring,
    MedicationFrequency, YesNo, MAX_SCORE,
};
pub use history::{
    HistoryEntry, HistoryError, HistoryScores, HistoryStore, InMemoryHistoryStore,
    JsonFileHistoryStore,
};
pub use report::{render_markdown, suggested_file_name, write_history_csv, ReportError};
pub use router::assessment_router;
pub use scoring::{
    AssessmentScorer, AssessmentSource, RecommendationResult, RecommendationTier, ScoringRubric,
};
pub use service::{AssessmentService, SubmissionOutcome};
pub use trends::{analyze_trends, analyze_trends_in, AreaTrend, TrendDirection, TrendReport};
