use super::super::domain::{AreaScores, MAX_SCORE};
use super::super::scoring::RecommendationTier;
use super::{AdvisoryAnalysis, AdvisoryError};
use serde_json::{Map, Value};

const DEFAULT_TITLE: &str = "Análisis de sus respuestas";
const DEFAULT_MESSAGE: &str = "Basado en sus respuestas, hemos realizado un análisis de sus hábitos y conocimientos sobre diabetes.";
const DEFAULT_AREA_SCORE: u8 = 5;

/// Maps the JSON object produced by the model onto an analysis.
///
/// Only an unparsable body or a non-object fails; each missing or mistyped field takes its
/// default on its own.
pub fn parse_analysis(content: &str) -> Result<AdvisoryAnalysis, AdvisoryError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|err| AdvisoryError::Malformed(err.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| AdvisoryError::Malformed("expected a JSON object".to_string()))?;

    let tier = text_field(object, "tipo")
        .map(|tag| RecommendationTier::from_tag(&tag))
        .unwrap_or(RecommendationTier::Warning);

    Ok(AdvisoryAnalysis {
        tier,
        title: text_field(object, "titulo").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        message: text_field(object, "mensaje").unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
        recommendations: list_field(object, "recomendaciones"),
        areas: AreaScores {
            knowledge: area_field(object, "area_conocimiento"),
            medication: area_field(object, "area_medicacion"),
            monitoring: area_field(object, "area_monitoreo"),
            lifestyle: area_field(object, "area_estilo_vida"),
        },
        glucose_insights: text_field(object, "glucoseInsights"),
        medication_insights: text_field(object, "medicationInsights"),
    })
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn list_field(object: &Map<String, Value>, key: &str) -> Vec<String> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Zero counts as absent, matching how the advisory contract has always been read.
fn area_field(object: &Map<String, Value>, key: &str) -> u8 {
    let raw = match object.get(key) {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match raw {
        Some(score) if score.is_finite() && score != 0.0 => {
            score.round().clamp(0.0, f64::from(MAX_SCORE)) as u8
        }
        _ => DEFAULT_AREA_SCORE,
    }
}
