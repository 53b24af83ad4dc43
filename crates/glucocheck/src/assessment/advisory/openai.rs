use super::super::domain::AnswerSet;
use super::{build_prompt, parse_analysis, AdvisoryAnalysis, AdvisoryError, AdvisoryGateway};
use super::SYSTEM_INSTRUCTION;
use crate::config::AdvisoryConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Chat-completions client asking the model for a JSON analysis of the answers.
#[derive(Debug, Clone)]
pub struct OpenAiAdvisor {
    client: reqwest::Client,
    config: AdvisoryConfig,
}

impl OpenAiAdvisor {
    pub fn new(config: AdvisoryConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: AdvisoryConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl AdvisoryGateway for OpenAiAdvisor {
    async fn analyze(&self, answers: &AnswerSet) -> Result<AdvisoryAnalysis, AdvisoryError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AdvisoryError::MissingCredential)?;

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTION },
                { "role": "user", "content": build_prompt(answers) },
            ],
            "temperature": self.config.temperature,
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisoryError::Status(status.as_u16()));
        }

        let raw = response.text().await?;
        let completion: ChatCompletion =
            serde_json::from_str(&raw).map_err(|err| AdvisoryError::Malformed(err.to_string()))?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AdvisoryError::EmptyResponse)?;

        debug!(model = %self.config.model, "advisory analysis received");
        parse_analysis(&content)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
