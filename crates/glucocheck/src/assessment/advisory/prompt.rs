use super::super::domain::{AnswerSet, DesiredFeature};
use std::fmt::Write as _;

pub const SYSTEM_INSTRUCTION: &str = "Eres un asistente especializado en diabetes tipo 1 que analiza respuestas de cuestionarios para proporcionar recomendaciones personalizadas. Usa un tono empático y comprensivo. Tu objetivo es clasificar los hábitos del paciente en 'buenos hábitos', 'hábitos irregulares' o 'falta de control' basado en sus respuestas. Proporciona recomendaciones específicas y adaptadas. Devuelve tu respuesta en formato JSON con la siguiente estructura: { tipo: 'positive'|'warning'|'alert', titulo: string, mensaje: string, recomendaciones: string[], area_conocimiento: 0-10, area_medicacion: 0-10, area_monitoreo: 0-10, area_estilo_vida: 0-10, glucoseInsights: string, medicationInsights: string }";

const UNSPECIFIED: &str = "No especificado";

pub fn build_prompt(answers: &AnswerSet) -> String {
    let mut prompt = String::new();

    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Analiza las siguientes respuestas de un paciente con diabetes tipo 1:"
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Rango de edad: {}", answers.age_range.label());
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Conocimiento sobre diabetes tipo 1: {}",
        answers.knowledge_about_diabetes.label()
    );
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Frecuencia de medicación: {}",
        answers.medication_frequency.label()
    );
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Hábitos saludables: {}",
        or_unspecified(&answers.healthy_habits)
    );
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Control de glucosa: {}",
        answers.glucose_monitoring.label()
    );
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Uso de apps de salud: {}",
        answers.uses_health_app.label()
    );
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Opinión sobre aplicaciones para diabetes: {}",
        or_unspecified(&answers.app_helpful_reason)
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Funciones deseadas en una app:");
    for feature in DesiredFeature::ordered() {
        if answers.wants(feature) {
            let _ = writeln!(prompt, "- {}", feature.label());
        }
    }
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Proporciona un análisis detallado, califica las áreas en una escala de 0-10 y da recomendaciones personalizadas con un tono empático y comprensivo."
    );

    prompt
}

fn or_unspecified(text: &str) -> &str {
    if text.is_empty() {
        UNSPECIFIED
    } else {
        text
    }
}
