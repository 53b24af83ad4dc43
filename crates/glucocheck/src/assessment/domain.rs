use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Respondent's age bracket as offered by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum AgeRange {
    #[serde(rename = "40-45")]
    From40To45,
    #[serde(rename = "45-50")]
    From45To50,
    #[serde(rename = "50-60")]
    From50To60,
}

impl AgeRange {
    pub const fn label(self) -> &'static str {
        match self {
            Self::From40To45 => "40-45 años",
            Self::From45To50 => "45-50 años",
            Self::From50To60 => "50-60 años",
        }
    }
}

impl From<String> for AgeRange {
    fn from(value: String) -> Self {
        match value.trim() {
            "45-50" => Self::From45To50,
            "50-60" => Self::From50To60,
            _ => Self::From40To45,
        }
    }
}

/// Plain yes/no answer. Anything other than an exact `yes` reads as `no`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Sí",
            Self::No => "No",
        }
    }

    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<String> for YesNo {
    fn from(value: String) -> Self {
        if value.trim() == "yes" {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// How consistently the respondent takes prescribed medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum MedicationFrequency {
    Daily,
    AlmostAlways,
    Rarely,
}

impl MedicationFrequency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "Todos los días",
            Self::AlmostAlways => "Casi siempre",
            Self::Rarely => "Rara vez",
        }
    }
}

impl From<String> for MedicationFrequency {
    fn from(value: String) -> Self {
        match value.trim() {
            "daily" => Self::Daily,
            "almostAlways" => Self::AlmostAlways,
            _ => Self::Rarely,
        }
    }
}

/// How often the respondent checks blood glucose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum GlucoseMonitoring {
    Every12Hours,
    EveryDay,
    Rarely,
}

impl GlucoseMonitoring {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Every12Hours => "Cada 12 horas",
            Self::EveryDay => "Cada día",
            Self::Rarely => "Casi nunca lo hago",
        }
    }
}

impl From<String> for GlucoseMonitoring {
    fn from(value: String) -> Self {
        match value.trim() {
            "every12Hours" => Self::Every12Hours,
            "everyDay" => Self::EveryDay,
            _ => Self::Rarely,
        }
    }
}

/// Features the respondent would like to see in a diabetes app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DesiredFeature {
    GlucoseTracking,
    MedicationReminders,
    MealPlans,
    ExerciseRoutines,
    HealthcareContacts,
}

impl DesiredFeature {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::GlucoseTracking,
            Self::MedicationReminders,
            Self::MealPlans,
            Self::ExerciseRoutines,
            Self::HealthcareContacts,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GlucoseTracking => "Registro de niveles de glucosa",
            Self::MedicationReminders => "Recordatorios de medicación",
            Self::MealPlans => "Planes de alimentación",
            Self::ExerciseRoutines => "Rutinas de ejercicio",
            Self::HealthcareContacts => "Contacto de profesionales de salud",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|feature| feature.tag() == tag.trim())
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::GlucoseTracking => "glucoseTracking",
            Self::MedicationReminders => "medicationReminders",
            Self::MealPlans => "mealPlans",
            Self::ExerciseRoutines => "exerciseRoutines",
            Self::HealthcareContacts => "healthcareContacts",
        }
    }
}

/// One submitted questionnaire. Field names on the wire follow the form's camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSet {
    pub age_range: AgeRange,
    pub knowledge_about_diabetes: YesNo,
    pub medication_frequency: MedicationFrequency,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub healthy_habits: String,
    pub glucose_monitoring: GlucoseMonitoring,
    pub uses_health_app: YesNo,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub app_helpful_reason: String,
    #[serde(default, deserialize_with = "known_features")]
    pub desired_features: BTreeSet<DesiredFeature>,
}

impl AnswerSet {
    pub fn wants(&self, feature: DesiredFeature) -> bool {
        self.desired_features.contains(&feature)
    }
}

/// The four areas every assessment is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Knowledge,
    Medication,
    Monitoring,
    Lifestyle,
}

impl Area {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Knowledge,
            Self::Medication,
            Self::Monitoring,
            Self::Lifestyle,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge",
            Self::Medication => "medication",
            Self::Monitoring => "monitoring",
            Self::Lifestyle => "lifestyle",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Knowledge => "Conocimiento",
            Self::Medication => "Medicación",
            Self::Monitoring => "Monitoreo",
            Self::Lifestyle => "Estilo de vida",
        }
    }
}

pub const MAX_SCORE: u8 = 10;

/// Per-area scores, each within `0..=MAX_SCORE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaScores {
    pub knowledge: u8,
    pub medication: u8,
    pub monitoring: u8,
    pub lifestyle: u8,
}

impl AreaScores {
    pub fn get(&self, area: Area) -> u8 {
        match area {
            Area::Knowledge => self.knowledge,
            Area::Medication => self.medication,
            Area::Monitoring => self.monitoring,
            Area::Lifestyle => self.lifestyle,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Area, u8)> + '_ {
        Area::ordered().into_iter().map(|area| (area, self.get(area)))
    }

    /// Rounded mean of the four areas, halves rounding up.
    pub fn overall(&self) -> u8 {
        let total: u16 = self.iter().map(|(_, score)| u16::from(score)).sum();
        ((total + 2) / 4) as u8
    }

    pub(crate) fn clamped(self) -> Self {
        Self {
            knowledge: self.knowledge.min(MAX_SCORE),
            medication: self.medication.min(MAX_SCORE),
            monitoring: self.monitoring.min(MAX_SCORE),
            lifestyle: self.lifestyle.min(MAX_SCORE),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

fn known_features<'de, D>(deserializer: D) -> Result<BTreeSet<DesiredFeature>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(tags
        .unwrap_or_default()
        .iter()
        .filter_map(|tag| DesiredFeature::from_tag(tag))
        .collect())
}
