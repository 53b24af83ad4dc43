use crate::infra::{build_service, read_answers};
use clap::Args;
use glucocheck::assessment::{
    render_markdown, suggested_file_name, write_history_csv, RecommendationResult, TrendReport,
};
use glucocheck::config::AppConfig;
use glucocheck::error::AppError;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding the questionnaire answers (camelCase form keys)
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Write a Markdown report to this path; a directory gets the dated default file name
    #[arg(long)]
    pub(crate) report: Option<PathBuf>,
    /// Score locally without calling the advisory API
    #[arg(long)]
    pub(crate) offline: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct HistoryArgs {
    /// Export the full history as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

pub(crate) async fn run_assess(config: &AppConfig, args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        answers,
        report,
        offline,
    } = args;

    let answers = read_answers(&answers)?;
    let service = build_service(config, offline);
    let outcome = service.submit(answers).await;

    print_recommendation(&outcome.recommendation);
    println!(
        "\nRecorded at {} ({} assessments in history)",
        outcome.recorded_at.format("%d/%m/%Y %H:%M"),
        outcome.history_length
    );
    if let Some(trends) = &outcome.trends {
        print_trends(trends);
    }

    if let Some(target) = report {
        let target = if target.is_dir() {
            target.join(suggested_file_name(outcome.recorded_at.date_naive()))
        } else {
            target
        };
        let document = render_markdown(
            &outcome.entry.answers,
            &outcome.recommendation,
            outcome.recorded_at,
        );
        std::fs::write(&target, document)?;
        println!("\nReport written to {}", target.display());
    }

    Ok(())
}

pub(crate) async fn run_history(config: &AppConfig, args: HistoryArgs) -> Result<(), AppError> {
    let service = build_service(config, true);
    let entries = service.read_history().await?;

    if entries.is_empty() {
        println!("No assessments recorded yet");
    } else {
        println!("Assessment history ({} entries)", entries.len());
        for entry in &entries {
            println!(
                "- {} | {} | {}/{}",
                entry.recorded_at.format("%d/%m/%Y %H:%M"),
                entry.analysis.tier.label(),
                entry.scores.overall_or_default(),
                entry.analysis.max_score
            );
        }
    }

    if let Some(path) = args.csv {
        let writer = BufWriter::new(File::create(&path)?);
        write_history_csv(writer, &entries)?;
        println!("CSV written to {}", path.display());
    }

    Ok(())
}

pub(crate) async fn run_trends(config: &AppConfig) -> Result<(), AppError> {
    let service = build_service(config, true);
    match service.trends().await {
        Some(trends) => print_trends(&trends),
        None => println!("At least two assessments are needed to show trends"),
    }
    Ok(())
}

pub(crate) fn print_recommendation(result: &RecommendationResult) {
    println!("{} ({})", result.title, result.tier.label());
    println!("{}", result.message);
    println!("Overall score: {}/{}", result.score, result.max_score);
    for (area, score) in result.areas.iter() {
        println!("  - {}: {}/{}", area.label(), score, result.max_score);
    }
    if !result.recommendations.is_empty() {
        println!("Recommendations:");
        for recommendation in &result.recommendations {
            println!("  - {recommendation}");
        }
    }
    println!("Glucose: {}", result.glucose_insights);
    println!("Medication: {}", result.medication_insights);
}

pub(crate) fn print_trends(trends: &TrendReport) {
    println!(
        "\nTrends over {} assessments ({})",
        trends.overall_scores.len(),
        trends.dates.join(", ")
    );
    println!(
        "- Overall: {} {:?}",
        trends.overall_trend.label(),
        trends.overall_scores
    );
    for area in &trends.areas {
        println!(
            "- {}: {} (latest {}) {:?}",
            area.area.label(),
            area.trend.label(),
            area.latest_score,
            area.scores
        );
    }
    let names = |areas: &[glucocheck::assessment::Area]| {
        areas
            .iter()
            .map(|area| area.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("Strengths: {}", names(&trends.strength_areas));
    println!("Needs attention: {}", names(&trends.improvement_areas));
}
