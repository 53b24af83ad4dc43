use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::assessment::advisory::{AdvisoryAnalysis, AdvisoryError, AdvisoryGateway};
use crate::assessment::domain::{
    AgeRange, AnswerSet, AreaScores, DesiredFeature, GlucoseMonitoring, MedicationFrequency,
    YesNo, MAX_SCORE,
};
use crate::assessment::history::{
    HistoryEntry, HistoryError, HistoryStore, InMemoryHistoryStore,
};
use crate::assessment::scoring::{
    glucose_insight, medication_insight, AssessmentSource, RecommendationResult,
    RecommendationTier, ScoringRubric,
};
use crate::assessment::service::AssessmentService;

/// Knowledge 8, medication 6, monitoring 7, lifestyle 8; overall 7.
pub(crate) fn sample_answers() -> AnswerSet {
    AnswerSet {
        age_range: AgeRange::From45To50,
        knowledge_about_diabetes: YesNo::Yes,
        medication_frequency: MedicationFrequency::AlmostAlways,
        healthy_habits: "Hago ejercicio tres veces por semana".to_string(),
        glucose_monitoring: GlucoseMonitoring::EveryDay,
        uses_health_app: YesNo::No,
        app_helpful_reason: "Me ayudaría a recordar la medicación".to_string(),
        desired_features: BTreeSet::from([
            DesiredFeature::GlucoseTracking,
            DesiredFeature::MedicationReminders,
        ]),
    }
}

/// Knowledge 4, medication 3, monitoring 3, lifestyle 4; overall 4.
pub(crate) fn struggling_answers() -> AnswerSet {
    AnswerSet {
        age_range: AgeRange::From50To60,
        knowledge_about_diabetes: YesNo::No,
        medication_frequency: MedicationFrequency::Rarely,
        healthy_habits: String::new(),
        glucose_monitoring: GlucoseMonitoring::Rarely,
        uses_health_app: YesNo::No,
        app_helpful_reason: String::new(),
        desired_features: BTreeSet::new(),
    }
}

pub(crate) fn march(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// History entry recorded on `day` of March 2025 with the given scores.
pub(crate) fn entry_with_scores(day: u32, overall: u8, areas: [u8; 4]) -> HistoryEntry {
    let [knowledge, medication, monitoring, lifestyle] = areas;
    let answers = sample_answers();
    let tier = RecommendationTier::for_score(overall, &ScoringRubric::default());
    let result = RecommendationResult {
        tier,
        title: tier.title().to_string(),
        message: tier.message().to_string(),
        recommendations: Vec::new(),
        areas: AreaScores {
            knowledge,
            medication,
            monitoring,
            lifestyle,
        },
        score: overall,
        max_score: MAX_SCORE,
        glucose_insights: glucose_insight(answers.glucose_monitoring).to_string(),
        medication_insights: medication_insight(answers.medication_frequency).to_string(),
        source: AssessmentSource::Local,
    };
    HistoryEntry::new(answers, result, march(day))
}

pub(crate) fn advisory_analysis() -> AdvisoryAnalysis {
    AdvisoryAnalysis {
        tier: RecommendationTier::Positive,
        title: "Buen trabajo".to_string(),
        message: "Sus hábitos son consistentes.".to_string(),
        recommendations: vec!["Mantenga sus controles diarios.".to_string()],
        areas: AreaScores {
            knowledge: 9,
            medication: 9,
            monitoring: 8,
            lifestyle: 8,
        },
        glucose_insights: None,
        medication_insights: Some("Su adherencia es muy buena.".to_string()),
    }
}

/// Advisor returning a fixed analysis and counting calls.
#[derive(Debug)]
pub(crate) struct FixedAdvisor {
    analysis: AdvisoryAnalysis,
    calls: AtomicUsize,
}

impl FixedAdvisor {
    pub(crate) fn new(analysis: AdvisoryAnalysis) -> Self {
        Self {
            analysis,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdvisoryGateway for FixedAdvisor {
    async fn analyze(&self, _answers: &AnswerSet) -> Result<AdvisoryAnalysis, AdvisoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.analysis.clone())
    }
}

/// Advisor that always fails with an upstream status.
#[derive(Debug, Default)]
pub(crate) struct FailingAdvisor {
    calls: AtomicUsize,
}

impl FailingAdvisor {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdvisoryGateway for FailingAdvisor {
    async fn analyze(&self, _answers: &AnswerSet) -> Result<AdvisoryAnalysis, AdvisoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AdvisoryError::Status(503))
    }
}

pub(crate) struct UnavailableStore;

impl HistoryStore for UnavailableStore {
    fn append(&self, _entry: HistoryEntry) -> Result<Vec<HistoryEntry>, HistoryError> {
        Err(HistoryError::Unavailable("disk full".to_string()))
    }

    fn read_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Err(HistoryError::Unavailable("disk full".to_string()))
    }
}

pub(crate) fn local_service() -> (
    AssessmentService<InMemoryHistoryStore, FailingAdvisor>,
    Arc<InMemoryHistoryStore>,
) {
    let store = Arc::new(InMemoryHistoryStore::default());
    let service = AssessmentService::new(
        store.clone(),
        Arc::new(FailingAdvisor::default()),
        ScoringRubric::default(),
    );
    (service, store)
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(crate) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf8 body")
}
