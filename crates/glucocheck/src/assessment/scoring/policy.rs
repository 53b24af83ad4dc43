use super::super::domain::{Area, AreaScores, YesNo};
use super::rubric::ScoringRubric;
use serde::{Deserialize, Serialize};

/// Message tier chosen from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationTier {
    Positive,
    Warning,
    Alert,
}

impl RecommendationTier {
    pub fn for_score(overall: u8, rubric: &ScoringRubric) -> Self {
        if overall >= rubric.positive_cutoff {
            Self::Positive
        } else if overall >= rubric.warning_cutoff {
            Self::Warning
        } else {
            Self::Alert
        }
    }

    /// Lenient parse of a tier tag; anything unrecognized is a warning.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "positive" => Self::Positive,
            "alert" => Self::Alert,
            _ => Self::Warning,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Warning => "warning",
            Self::Alert => "alert",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Buen control",
            Self::Warning => "Control moderado",
            Self::Alert => "Control insuficiente",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Positive => "¡Excelente control de su diabetes!",
            Self::Warning => "Control moderado de su diabetes",
            Self::Alert => "Control insuficiente de su diabetes",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Positive => "Está haciendo un gran trabajo en el manejo de su diabetes. Continúe con estos buenos hábitos y manténgase en contacto con su equipo médico para seguir mejorando su calidad de vida.",
            Self::Warning => "Está en el camino correcto, pero hay aspectos que podrían mejorar. Con pequeños ajustes en su rutina diaria, puede lograr un mejor control de su diabetes y prevenir complicaciones futuras.",
            Self::Alert => "Es importante mejorar el control de su diabetes. Los resultados muestran que hay áreas que requieren atención inmediata. No se desanime, con el apoyo adecuado y cambios en sus hábitos, puede mejorar significativamente su salud.",
        }
    }
}

const HEALTH_APP_ADVICE: &str = "Considere usar aplicaciones móviles específicas para diabetes que le ayuden a registrar y controlar sus niveles de glucosa, medicación y hábitos diarios.";

pub(crate) const fn area_advice(area: Area) -> [&'static str; 2] {
    match area {
        Area::Knowledge => [
            "Considere participar en programas educativos sobre diabetes para ampliar sus conocimientos sobre la enfermedad.",
            "Busque información confiable en asociaciones de diabetes reconocidas y consulte regularmente con su médico para aclarar dudas.",
        ],
        Area::Medication => [
            "Establezca recordatorios diarios para no olvidar tomar su medicación según lo prescrito por su médico.",
            "Utilice un pastillero organizador semanal para facilitar el seguimiento de su medicación.",
        ],
        Area::Monitoring => [
            "Monitoree su glucosa con mayor frecuencia, idealmente al menos dos veces al día (mañana y noche).",
            "Lleve un registro detallado de sus niveles de glucosa para identificar patrones y compartirlo con su médico.",
        ],
        Area::Lifestyle => [
            "Incorpore actividad física regular a su rutina, como caminar 30 minutos diarios.",
            "Siga una dieta equilibrada, limitando los carbohidratos refinados y controlando el tamaño de las porciones.",
        ],
    }
}

/// Advice for every area under the threshold, in fixed area order, then the app suggestion.
pub(crate) fn build_recommendations(
    areas: &AreaScores,
    uses_health_app: YesNo,
    rubric: &ScoringRubric,
) -> Vec<String> {
    let mut recommendations: Vec<String> = areas
        .iter()
        .filter(|(_, score)| *score < rubric.advice_threshold)
        .flat_map(|(area, _)| area_advice(area))
        .map(str::to_string)
        .collect();

    if !uses_health_app.is_yes() {
        recommendations.push(HEALTH_APP_ADVICE.to_string());
    }

    recommendations
}
