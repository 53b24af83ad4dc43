//! Remote advisory analysis of a questionnaire.
//!
//! The advisory call is optional: callers treat every [`AdvisoryError`] as a signal to score
//! locally instead.

mod openai;
mod payload;
mod prompt;

pub use openai::OpenAiAdvisor;
pub use payload::parse_analysis;
pub use prompt::{build_prompt, SYSTEM_INSTRUCTION};

use super::domain::{AnswerSet, AreaScores};
use super::scoring::RecommendationTier;
use async_trait::async_trait;

/// Analysis returned by the advisory collaborator after lenient defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryAnalysis {
    pub tier: RecommendationTier,
    pub title: String,
    pub message: String,
    pub recommendations: Vec<String>,
    pub areas: AreaScores,
    pub glucose_insights: Option<String>,
    pub medication_insights: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("advisory API key is missing")]
    MissingCredential,
    #[error("advisory transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("advisory API error: {0}")]
    Status(u16),
    #[error("advisory response had no message content")]
    EmptyResponse,
    #[error("advisory response could not be parsed: {0}")]
    Malformed(String),
}

/// Outbound hook to whatever produces advisory analyses.
#[async_trait]
pub trait AdvisoryGateway: Send + Sync {
    async fn analyze(&self, answers: &AnswerSet) -> Result<AdvisoryAnalysis, AdvisoryError>;
}

/// Gateway used when no credential is configured; every call falls back to local scoring.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAdvisor;

#[async_trait]
impl AdvisoryGateway for DisabledAdvisor {
    async fn analyze(&self, _answers: &AnswerSet) -> Result<AdvisoryAnalysis, AdvisoryError> {
        Err(AdvisoryError::MissingCredential)
    }
}
