mod insights;
mod policy;
mod rubric;
mod rules;

pub use insights::{glucose_insight, medication_insight};
pub use policy::RecommendationTier;
pub use rubric::ScoringRubric;

use super::advisory::AdvisoryAnalysis;
use super::domain::{AnswerSet, AreaScores, MAX_SCORE};
use serde::{Deserialize, Serialize};

/// Where a recommendation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentSource {
    Local,
    Advisory,
}

/// Scored outcome of one questionnaire, ready for presentation or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    #[serde(rename = "type")]
    pub tier: RecommendationTier,
    pub title: String,
    pub message: String,
    pub recommendations: Vec<String>,
    pub areas: AreaScores,
    pub score: u8,
    pub max_score: u8,
    pub glucose_insights: String,
    pub medication_insights: String,
    pub source: AssessmentSource,
}

/// Stateless scorer applying the rubric, or adopting an advisory analysis when one is supplied.
#[derive(Debug, Clone, Default)]
pub struct AssessmentScorer {
    rubric: ScoringRubric,
}

impl AssessmentScorer {
    pub fn new(rubric: ScoringRubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &ScoringRubric {
        &self.rubric
    }

    pub fn score(
        &self,
        answers: &AnswerSet,
        advisory: Option<AdvisoryAnalysis>,
    ) -> RecommendationResult {
        match advisory {
            Some(analysis) => adopt_advisory(answers, analysis),
            None => self.score_locally(answers),
        }
    }

    fn score_locally(&self, answers: &AnswerSet) -> RecommendationResult {
        let areas = rules::score_answers(answers);
        let score = areas.overall();
        let tier = RecommendationTier::for_score(score, &self.rubric);
        let recommendations =
            policy::build_recommendations(&areas, answers.uses_health_app, &self.rubric);

        RecommendationResult {
            tier,
            title: tier.title().to_string(),
            message: tier.message().to_string(),
            recommendations,
            areas,
            score,
            max_score: MAX_SCORE,
            glucose_insights: glucose_insight(answers.glucose_monitoring).to_string(),
            medication_insights: medication_insight(answers.medication_frequency).to_string(),
            source: AssessmentSource::Local,
        }
    }
}

fn adopt_advisory(answers: &AnswerSet, analysis: AdvisoryAnalysis) -> RecommendationResult {
    let AdvisoryAnalysis {
        tier,
        title,
        message,
        recommendations,
        areas,
        glucose_insights,
        medication_insights,
    } = analysis;
    let areas: AreaScores = areas.clamped();

    RecommendationResult {
        tier,
        title,
        message,
        recommendations,
        score: areas.overall(),
        areas,
        max_score: MAX_SCORE,
        glucose_insights: glucose_insights
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| glucose_insight(answers.glucose_monitoring).to_string()),
        medication_insights: medication_insights
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| medication_insight(answers.medication_frequency).to_string()),
        source: AssessmentSource::Advisory,
    }
}
