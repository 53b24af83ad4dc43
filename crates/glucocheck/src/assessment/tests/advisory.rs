use super::common::*;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::assessment::advisory::{AdvisoryError, AdvisoryGateway, OpenAiAdvisor};
use crate::assessment::scoring::RecommendationTier;
use crate::config::AdvisoryConfig;

async fn spawn_completion_server(status: StatusCode, completion: Value) -> String {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(request): Json<Value>| {
            let completion = completion.clone();
            async move {
                let authorized = headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    == Some("Bearer sk-test");
                let well_formed = request["response_format"]["type"] == "json_object"
                    && request["messages"][1]["content"]
                        .as_str()
                        .is_some_and(|prompt| prompt.contains("Casi siempre"));
                if !authorized || !well_formed {
                    return (StatusCode::BAD_REQUEST, Json(json!({})));
                }
                (status, Json(completion))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server runs");
    });
    format!("http://{addr}/v1")
}

fn config_for(base_url: String) -> AdvisoryConfig {
    AdvisoryConfig {
        api_key: Some("sk-test".to_string()),
        base_url,
        ..AdvisoryConfig::default()
    }
}

fn completion_with(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn parses_completion_content_into_analysis() {
    let content = json!({
        "tipo": "positive",
        "titulo": "Muy buen control",
        "mensaje": "Siga así.",
        "recomendaciones": ["Mantenga su rutina."],
        "area_conocimiento": 9,
        "area_medicacion": "8",
        "area_monitoreo": 0,
        "area_estilo_vida": 7,
        "medicationInsights": "Toma su medicación casi siempre."
    })
    .to_string();
    let base_url = spawn_completion_server(StatusCode::OK, completion_with(&content)).await;
    let advisor = OpenAiAdvisor::new(config_for(base_url));

    let analysis = advisor
        .analyze(&sample_answers())
        .await
        .expect("advisory succeeds");

    assert_eq!(analysis.tier, RecommendationTier::Positive);
    assert_eq!(analysis.title, "Muy buen control");
    assert_eq!(analysis.areas.knowledge, 9);
    assert_eq!(analysis.areas.medication, 8);
    assert_eq!(analysis.areas.monitoring, 5);
    assert!(analysis.glucose_insights.is_none());
}

#[tokio::test]
async fn upstream_errors_surface_as_status() {
    let base_url =
        spawn_completion_server(StatusCode::TOO_MANY_REQUESTS, json!({ "error": "rate" })).await;
    let advisor = OpenAiAdvisor::new(config_for(base_url));

    let result = advisor.analyze(&sample_answers()).await;

    assert!(matches!(result, Err(AdvisoryError::Status(429))));
}

#[tokio::test]
async fn completion_without_content_is_empty() {
    let base_url = spawn_completion_server(StatusCode::OK, json!({ "choices": [] })).await;
    let advisor = OpenAiAdvisor::new(config_for(base_url));

    let result = advisor.analyze(&sample_answers()).await;

    assert!(matches!(result, Err(AdvisoryError::EmptyResponse)));
}

#[tokio::test]
async fn non_json_content_is_malformed() {
    let base_url =
        spawn_completion_server(StatusCode::OK, completion_with("lo siento, no puedo")).await;
    let advisor = OpenAiAdvisor::new(config_for(base_url));

    let result = advisor.analyze(&sample_answers()).await;

    assert!(matches!(result, Err(AdvisoryError::Malformed(_))));
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let advisor = OpenAiAdvisor::new(AdvisoryConfig {
        base_url: "http://127.0.0.1:9/v1".to_string(),
        ..AdvisoryConfig::default()
    });

    let result = advisor.analyze(&sample_answers()).await;

    assert!(matches!(result, Err(AdvisoryError::MissingCredential)));
}
