use crate::commands::{print_recommendation, print_trends};
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Args;
use glucocheck::assessment::{
    render_markdown, AgeRange, AnswerSet, AssessmentService, DesiredFeature, DisabledAdvisor,
    GlucoseMonitoring, InMemoryHistoryStore, MedicationFrequency, ScoringRubric, YesNo,
};
use glucocheck::error::AppError;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date of the first synthetic submission (YYYY-MM-DD). Defaults to three weeks ago.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Print the Markdown report for the final submission.
    #[arg(long)]
    pub(crate) markdown: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { start, markdown } = args;
    let start = start.unwrap_or_else(|| Utc::now().date_naive() - Duration::weeks(3));

    println!("Diabetes self-care questionnaire demo (local scoring, in-memory history)");
    let service = AssessmentService::new(
        Arc::new(InMemoryHistoryStore::default()),
        Arc::new(DisabledAdvisor),
        ScoringRubric::default(),
    );

    let journey = demo_journey();
    let count = journey.len();
    let mut last = None;
    for (week, answers) in journey.into_iter().enumerate() {
        let date = start + Duration::weeks(week as i64);
        let recorded_at = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));
        let outcome = service.submit_at(answers, recorded_at).await;

        println!(
            "\nWeek {} of {} ({})",
            week + 1,
            count,
            date.format("%d/%m/%Y")
        );
        print_recommendation(&outcome.recommendation);
        last = Some(outcome);
    }

    match service.trends().await {
        Some(trends) => print_trends(&trends),
        None => println!("\nNot enough history for trends"),
    }

    if let (true, Some(outcome)) = (markdown, last) {
        println!(
            "\n{}",
            render_markdown(
                &outcome.entry.answers,
                &outcome.recommendation,
                outcome.recorded_at
            )
        );
    }

    Ok(())
}

/// A respondent who gradually adopts better habits.
fn demo_journey() -> Vec<AnswerSet> {
    let base = AnswerSet {
        age_range: AgeRange::From45To50,
        knowledge_about_diabetes: YesNo::No,
        medication_frequency: MedicationFrequency::Rarely,
        healthy_habits: String::new(),
        glucose_monitoring: GlucoseMonitoring::Rarely,
        uses_health_app: YesNo::No,
        app_helpful_reason: "Me cuesta recordar los controles".to_string(),
        desired_features: BTreeSet::from([
            DesiredFeature::GlucoseTracking,
            DesiredFeature::MedicationReminders,
        ]),
    };

    let mut second = base.clone();
    second.medication_frequency = MedicationFrequency::AlmostAlways;
    second.glucose_monitoring = GlucoseMonitoring::EveryDay;
    second.healthy_habits = "Intento comer menos azúcar".to_string();

    let mut third = second.clone();
    third.knowledge_about_diabetes = YesNo::Yes;
    third.medication_frequency = MedicationFrequency::Daily;
    third.glucose_monitoring = GlucoseMonitoring::Every12Hours;
    third.uses_health_app = YesNo::Yes;
    third.healthy_habits = "Salgo a caminar cada tarde y cuido la dieta".to_string();

    vec![base, second, third]
}
