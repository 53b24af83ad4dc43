mod file;
mod memory;

pub use file::JsonFileHistoryStore;
pub use memory::InMemoryHistoryStore;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerSet, Area};
use super::scoring::RecommendationResult;

const FALLBACK_SCORE: u8 = 5;

/// Scores captured at submission time. Missing values read as the neutral midpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryScores {
    #[serde(default)]
    pub overall: Option<u8>,
    #[serde(default)]
    pub areas: BTreeMap<Area, u8>,
}

impl HistoryScores {
    pub fn from_result(result: &RecommendationResult) -> Self {
        Self {
            overall: Some(result.score),
            areas: result.areas.iter().collect(),
        }
    }

    pub fn overall_or_default(&self) -> u8 {
        self.overall
            .filter(|score| *score > 0)
            .unwrap_or(FALLBACK_SCORE)
    }

    pub fn area_or_default(&self, area: Area) -> u8 {
        self.areas
            .get(&area)
            .copied()
            .filter(|score| *score > 0)
            .unwrap_or(FALLBACK_SCORE)
    }
}

/// One persisted submission. Serialized keys match the layout history files have always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "date")]
    pub recorded_at: DateTime<Utc>,
    #[serde(rename = "formData")]
    pub answers: AnswerSet,
    pub analysis: RecommendationResult,
    #[serde(default)]
    pub scores: HistoryScores,
}

impl HistoryEntry {
    pub fn new(
        answers: AnswerSet,
        analysis: RecommendationResult,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        let scores = HistoryScores::from_result(&analysis);
        Self {
            recorded_at,
            answers,
            analysis,
            scores,
        }
    }
}

/// Append-only storage for submissions, returned in insertion order.
pub trait HistoryStore: Send + Sync {
    fn append(&self, entry: HistoryEntry) -> Result<Vec<HistoryEntry>, HistoryError>;
    fn read_all(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history file io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("history file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}
