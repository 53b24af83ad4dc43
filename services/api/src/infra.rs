use async_trait::async_trait;
use chrono::NaiveDate;
use glucocheck::assessment::{
    AdvisoryAnalysis, AdvisoryError, AdvisoryGateway, AnswerSet, AssessmentService,
    DisabledAdvisor, HistoryEntry, HistoryError, HistoryStore, InMemoryHistoryStore,
    JsonFileHistoryStore, OpenAiAdvisor, ScoringRubric,
};
use glucocheck::config::{AdvisoryConfig, AppConfig, HistoryConfig};
use glucocheck::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// History backend chosen from `APP_HISTORY_PATH`.
pub(crate) enum ConfiguredStore {
    Memory(InMemoryHistoryStore),
    File(JsonFileHistoryStore),
}

impl ConfiguredStore {
    pub(crate) fn from_config(config: &HistoryConfig) -> Self {
        match &config.path {
            Some(path) => {
                info!(path = %path.display(), "persisting history to file");
                Self::File(JsonFileHistoryStore::new(path.clone()))
            }
            None => {
                info!("no history path configured; keeping history in memory");
                Self::Memory(InMemoryHistoryStore::default())
            }
        }
    }
}

impl HistoryStore for ConfiguredStore {
    fn append(&self, entry: HistoryEntry) -> Result<Vec<HistoryEntry>, HistoryError> {
        match self {
            Self::Memory(store) => store.append(entry),
            Self::File(store) => store.append(entry),
        }
    }

    fn read_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match self {
            Self::Memory(store) => store.read_all(),
            Self::File(store) => store.read_all(),
        }
    }
}

/// Advisory gateway chosen from the configured credential.
pub(crate) enum ConfiguredAdvisor {
    Remote(OpenAiAdvisor),
    Disabled(DisabledAdvisor),
}

impl ConfiguredAdvisor {
    pub(crate) fn from_config(config: &AdvisoryConfig, offline: bool) -> Self {
        if offline || !config.is_enabled() {
            info!(offline, "advisory analysis disabled; using local scoring");
            Self::Disabled(DisabledAdvisor)
        } else {
            info!(model = %config.model, "advisory analysis enabled");
            Self::Remote(OpenAiAdvisor::new(config.clone()))
        }
    }
}

#[async_trait]
impl AdvisoryGateway for ConfiguredAdvisor {
    async fn analyze(&self, answers: &AnswerSet) -> Result<AdvisoryAnalysis, AdvisoryError> {
        match self {
            Self::Remote(advisor) => advisor.analyze(answers).await,
            Self::Disabled(advisor) => advisor.analyze(answers).await,
        }
    }
}

pub(crate) type AppService = AssessmentService<ConfiguredStore, ConfiguredAdvisor>;

pub(crate) fn build_service(config: &AppConfig, offline: bool) -> AppService {
    AssessmentService::new(
        Arc::new(ConfiguredStore::from_config(&config.history)),
        Arc::new(ConfiguredAdvisor::from_config(&config.advisory, offline)),
        ScoringRubric::default(),
    )
}

pub(crate) fn read_answers(path: &Path) -> Result<AnswerSet, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
