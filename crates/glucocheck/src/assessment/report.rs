use std::fmt::Write as _;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};

use super::domain::{AnswerSet, Area, DesiredFeature};
use super::history::HistoryEntry;
use super::scoring::{AssessmentSource, RecommendationResult};

const APP_NAME: &str = "DiabetesControl";
const DISCLAIMER: &str = "Esta información no sustituye el consejo médico profesional. Consulte siempre a su médico para el manejo de su diabetes. Las recomendaciones se basan en sus respuestas y pueden cambiar según su situación médica específica.";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn suggested_file_name(date: NaiveDate) -> String {
    format!("{APP_NAME}_Recomendaciones_{}.md", date.format("%Y-%m-%d"))
}

/// Renders the recommendation and answer summary as a Markdown document.
pub fn render_markdown(
    answers: &AnswerSet,
    result: &RecommendationResult,
    generated_at: DateTime<Utc>,
) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# {APP_NAME}");
    let _ = writeln!(doc, "## Resultados del Cuestionario y Recomendaciones");
    let _ = writeln!(doc, "Fecha: {}", generated_at.format("%d/%m/%Y"));
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## Recomendaciones");
    let _ = writeln!(doc, "### {} ({})", result.title, result.tier.label());
    let _ = writeln!(doc, "{}", result.message);
    let _ = writeln!(doc);

    if !result.recommendations.is_empty() {
        let _ = writeln!(doc, "**Recomendaciones específicas:**");
        for recommendation in &result.recommendations {
            let _ = writeln!(doc, "- {recommendation}");
        }
        let _ = writeln!(doc);
    }

    let _ = writeln!(doc, "## Análisis Personalizado");
    let _ = writeln!(doc, "**Sobre su control de glucosa:** {}", result.glucose_insights);
    let _ = writeln!(doc);
    let _ = writeln!(doc, "**Sobre su medicación:** {}", result.medication_insights);
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## Evaluación por Áreas");
    for (area, score) in result.areas.iter() {
        let _ = writeln!(doc, "- {}: {}/{}", area.label(), score, result.max_score);
    }
    let _ = writeln!(
        doc,
        "- **Puntuación General: {}/{}**",
        result.score, result.max_score
    );
    if result.source == AssessmentSource::Advisory {
        let _ = writeln!(doc, "_Análisis generado con asistencia de IA._");
    }
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## Resumen de Respuestas");
    let _ = writeln!(doc, "| Pregunta | Respuesta |");
    let _ = writeln!(doc, "| --- | --- |");
    for (question, answer) in answer_rows(answers) {
        let _ = writeln!(doc, "| {} | {} |", question, escape_cell(&answer));
    }
    let _ = writeln!(doc);

    let _ = writeln!(doc, "**Nota importante:** {DISCLAIMER}");
    let _ = writeln!(doc);
    let _ = writeln!(
        doc,
        "_{APP_NAME} - Generado el {}_",
        generated_at.format("%d/%m/%Y %H:%M:%S")
    );

    doc
}

fn answer_rows(answers: &AnswerSet) -> Vec<(&'static str, String)> {
    let features: Vec<&str> = DesiredFeature::ordered()
        .into_iter()
        .filter(|feature| answers.wants(*feature))
        .map(DesiredFeature::label)
        .collect();
    let features = if features.is_empty() {
        "Ninguna seleccionada".to_string()
    } else {
        features.join(", ")
    };

    vec![
        ("Rango de edad", answers.age_range.label().to_string()),
        (
            "Conocimiento sobre diabetes tipo 1",
            answers.knowledge_about_diabetes.label().to_string(),
        ),
        (
            "Frecuencia de medicación",
            answers.medication_frequency.label().to_string(),
        ),
        ("Hábitos saludables", or_unspecified(&answers.healthy_habits)),
        (
            "Control de glucosa",
            answers.glucose_monitoring.label().to_string(),
        ),
        (
            "Uso de apps de salud",
            answers.uses_health_app.label().to_string(),
        ),
        (
            "Opinión sobre aplicaciones para diabetes",
            or_unspecified(&answers.app_helpful_reason),
        ),
        ("Funciones deseadas en una app", features),
    ]
}

fn or_unspecified(text: &str) -> String {
    if text.trim().is_empty() {
        "No especificado".to_string()
    } else {
        text.to_string()
    }
}

fn escape_cell(raw: &str) -> String {
    raw.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Writes one CSV row per history entry, oldest first.
pub fn write_history_csv<W: Write>(writer: W, entries: &[HistoryEntry]) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut header = vec!["date", "type", "overall"];
    header.extend(Area::ordered().map(Area::key));
    header.push("source");
    csv_writer.write_record(&header)?;

    for entry in entries {
        let source = match entry.analysis.source {
            AssessmentSource::Local => "local",
            AssessmentSource::Advisory => "advisory",
        };
        let mut record = vec![
            entry.recorded_at.to_rfc3339(),
            entry.analysis.tier.tag().to_string(),
            entry.scores.overall_or_default().to_string(),
        ];
        record.extend(
            Area::ordered().map(|area| entry.scores.area_or_default(area).to_string()),
        );
        record.push(source.to_string());
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::scoring::AssessmentScorer;
    use crate::assessment::tests::common::{entry_with_scores, sample_answers};
    use chrono::TimeZone;

    #[test]
    fn markdown_contains_every_section() {
        let answers = sample_answers();
        let result = AssessmentScorer::default().score(&answers, None);
        let generated_at = Utc
            .with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp");

        let doc = render_markdown(&answers, &result, generated_at);

        assert!(doc.starts_with("# DiabetesControl"));
        assert!(doc.contains("Fecha: 14/03/2025"));
        assert!(doc.contains(&result.title));
        assert!(doc.contains("## Evaluación por Áreas"));
        assert!(doc.contains(&format!("Puntuación General: {}/10", result.score)));
        assert!(doc.contains("| Frecuencia de medicación | Casi siempre |"));
        assert!(doc.contains("Nota importante"));
        for recommendation in &result.recommendations {
            assert!(doc.contains(recommendation.as_str()));
        }
    }

    #[test]
    fn empty_answers_are_marked_unspecified() {
        let mut answers = sample_answers();
        answers.healthy_habits.clear();
        answers.desired_features.clear();
        let result = AssessmentScorer::default().score(&answers, None);

        let doc = render_markdown(&answers, &result, Utc::now());

        assert!(doc.contains("| Hábitos saludables | No especificado |"));
        assert!(doc.contains("| Funciones deseadas en una app | Ninguna seleccionada |"));
    }

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).expect("valid date");
        assert_eq!(
            suggested_file_name(date),
            "DiabetesControl_Recomendaciones_2025-01-07.md"
        );
    }

    #[test]
    fn history_csv_has_row_per_entry() {
        let entries = vec![
            entry_with_scores(1, 4, [4, 3, 3, 4]),
            entry_with_scores(2, 7, [8, 6, 7, 6]),
        ];
        let mut buffer = Vec::new();

        write_history_csv(&mut buffer, &entries).expect("csv writes");

        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "date,type,overall,knowledge,medication,monitoring,lifestyle,source"
        );
        assert!(lines[2].ends_with(",7,8,6,7,6,local"));
    }
}
