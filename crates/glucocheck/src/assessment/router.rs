use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use super::advisory::AdvisoryGateway;
use super::domain::AnswerSet;
use super::history::HistoryStore;
use super::report::suggested_file_name;
use super::service::AssessmentService;

/// Router exposing submission, history, trend, and report endpoints.
pub fn assessment_router<S, A>(service: Arc<AssessmentService<S, A>>) -> Router
where
    S: HistoryStore + 'static,
    A: AdvisoryGateway + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(submit_handler::<S, A>))
        .route("/api/v1/assessments/history", get(history_handler::<S, A>))
        .route("/api/v1/assessments/trends", get(trends_handler::<S, A>))
        .route("/api/v1/assessments/report", post(report_handler::<S, A>))
        .with_state(service)
}

pub(crate) async fn submit_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    Json(answers): Json<AnswerSet>,
) -> Response
where
    S: HistoryStore + 'static,
    A: AdvisoryGateway + 'static,
{
    let outcome = service.submit(answers).await;
    (StatusCode::CREATED, Json(outcome)).into_response()
}

pub(crate) async fn history_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
) -> Response
where
    S: HistoryStore + 'static,
    A: AdvisoryGateway + 'static,
{
    let entries = service.history().await;
    (StatusCode::OK, Json(entries)).into_response()
}

pub(crate) async fn trends_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
) -> Response
where
    S: HistoryStore + 'static,
    A: AdvisoryGateway + 'static,
{
    match service.trends().await {
        Some(report) => (StatusCode::OK, Json(report)).into_response(),
        None => {
            let payload = json!({
                "error": "at least two assessments are needed to compute trends",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn report_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    Json(answers): Json<AnswerSet>,
) -> Response
where
    S: HistoryStore + 'static,
    A: AdvisoryGateway + 'static,
{
    let generated_at = Utc::now();
    let result = service.recommend(&answers).await;
    let body = service.report(&answers, &result, generated_at);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        suggested_file_name(generated_at.date_naive())
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
