//! Student summaries generated by an Ollama-compatible runtime.
//!
//! The client is stateless: one prompt in, one generated text out. It never retries and is
//! always called after the repository has handed back an owned record, so no storage lock is
//! held while the request is in flight.

use crate::config::Config;
use crate::model::Student;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced while generating a student summary.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// Provider could not be reached or the client could not be built.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Interface implemented by summary providers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Generate a short natural-language summary of `student`.
    async fn summarize(&self, student: &Student) -> Result<String, SummarizationClientError>;
}

/// Build the fixed-template prompt describing a student.
///
/// The generated text handed back to callers has leading and trailing whitespace trimmed;
/// models tend to pad their replies with newlines.
pub fn build_prompt(student: &Student) -> String {
    format!(
        "Generate a brief summary for a student named {}, who is {} years old and has the email {}.",
        student.name, student.age, student.email
    )
}

/// Build the summary client described by `config`.
pub fn get_summarization_client(
    config: &Config,
) -> Result<Box<dyn SummarizationClient>, SummarizationClientError> {
    Ok(Box::new(OllamaSummarizationClient::new(
        config.ollama_url.clone(),
        config.summary_model.clone(),
    )?))
}

/// Client for the `/api/generate` endpoint of an Ollama runtime.
pub struct OllamaSummarizationClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizationClient {
    /// Create a client targeting `base_url` with the given model.
    pub fn new(base_url: String, model: String) -> Result<Self, SummarizationClientError> {
        let http = Client::builder()
            .user_agent("student-api/summary")
            .build()
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to build HTTP client: {error}"
                ))
            })?;
        Ok(Self {
            http,
            base_url,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl SummarizationClient for OllamaSummarizationClient {
    async fn summarize(&self, student: &Student) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "model": self.model,
            "prompt": build_prompt(student),
            "stream": false,
        });

        tracing::debug!(student_id = student.id, model = %self.model, "Requesting summary");
        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "Ollama endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode Ollama response: {error}"
            ))
        })?;

        Ok(body.response.trim().to_string())
    }
}
