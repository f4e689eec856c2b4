//! Resume parsing strategies, tried in order by `ResumeParser`.
//!
//! - `BackendStrategy` hands the raw file to the job-board backend.
//! - `ProviderStrategy` extracts text locally and asks the inference provider
//!   to structure it. PDF text extraction is CPU-bound and runs inside
//!   `spawn_blocking`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::backend::{BackendClient, BackendError};
use crate::provider::prompts::resume_extraction_prompt;
use crate::provider::{parse_json_output, InferenceProvider, ProviderError};
use crate::resume::models::{ParsedResume, ParsedResumeWire, ResumeUpload};

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("backend: {0}")]
    Backend(#[from] BackendError),

    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    #[error("could not read resume text: {0}")]
    Extraction(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait ResumeParseStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    async fn parse(&self, upload: &ResumeUpload) -> Result<ParsedResume, StrategyError>;
}

pub struct BackendStrategy {
    client: BackendClient,
}

impl BackendStrategy {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResumeParseStrategy for BackendStrategy {
    fn name(&self) -> &'static str {
        "backend"
    }

    async fn parse(&self, upload: &ResumeUpload) -> Result<ParsedResume, StrategyError> {
        Ok(self.client.parse_resume(upload).await?)
    }
}

pub struct ProviderStrategy {
    provider: Arc<dyn InferenceProvider>,
    model_id: String,
}

impl ProviderStrategy {
    pub fn new(provider: Arc<dyn InferenceProvider>, model_id: String) -> Self {
        Self { provider, model_id }
    }
}

#[async_trait]
impl ResumeParseStrategy for ProviderStrategy {
    fn name(&self) -> &'static str {
        "provider"
    }

    async fn parse(&self, upload: &ResumeUpload) -> Result<ParsedResume, StrategyError> {
        let text = extract_text(upload).await?;
        debug!(chars = text.len(), "Extracted resume text for provider parsing");

        let output = self
            .provider
            .generate_text(&self.model_id, &resume_extraction_prompt(&text))
            .await?;
        let wire: ParsedResumeWire = parse_json_output(&output)?;
        Ok(wire.into())
    }
}

async fn extract_text(upload: &ResumeUpload) -> Result<String, StrategyError> {
    let text = if upload.is_pdf() {
        let bytes = upload.bytes.clone();
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| StrategyError::Extraction(format!("PDF extraction task failed: {e}")))?
            .map_err(|e| StrategyError::Extraction(e.to_string()))?
    } else {
        String::from_utf8_lossy(&upload.bytes).into_owned()
    };

    if text.trim().is_empty() {
        return Err(StrategyError::Extraction(
            "the file contains no readable text".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::sync::Mutex;

    struct CannedProvider {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl InferenceProvider for CannedProvider {
        async fn generate_text(&self, _model_id: &str, prompt: &str) -> Result<String, ProviderError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(ProviderError::Api {
                    status: *status,
                    message: None,
                }),
            }
        }
    }

    fn text_upload(body: &'static str) -> ResumeUpload {
        ResumeUpload {
            file_name: "resume.txt".to_string(),
            content_type: Some("text/plain".to_string()),
            bytes: Bytes::from_static(body.as_bytes()),
            user_id: "1".to_string(),
        }
    }

    fn strategy(reply: Result<String, u16>) -> (ProviderStrategy, Arc<CannedProvider>) {
        let provider = Arc::new(CannedProvider {
            reply,
            prompts: Mutex::new(Vec::new()),
        });
        (
            ProviderStrategy::new(provider.clone(), "test-model".to_string()),
            provider,
        )
    }

    #[tokio::test]
    async fn test_provider_strategy_structures_text() {
        let (strategy, provider) = strategy(Ok(
            "```json\n{\"name\": \"Jane Smith\", \"skills\": [\"React\", \"Node.js\"]}\n```".to_string(),
        ));

        let parsed = strategy
            .parse(&text_upload("Jane Smith\nReact, Node.js"))
            .await
            .unwrap();
        assert_eq!(parsed.name, "Jane Smith");
        assert_eq!(parsed.skills, vec!["React", "Node.js"]);
        assert_eq!(parsed.confidence, 0.95);
        assert!(provider.prompts.lock().unwrap()[0].contains("React, Node.js"));
    }

    #[tokio::test]
    async fn test_blank_file_never_reaches_provider() {
        let (strategy, provider) = strategy(Ok("{}".to_string()));
        let err = strategy.parse(&text_upload("  \n ")).await.unwrap_err();
        assert!(matches!(err, StrategyError::Extraction(_)));
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_is_typed() {
        let (strategy, _) = strategy(Err(503));
        let err = strategy.parse(&text_upload("Jane")).await.unwrap_err();
        assert!(matches!(
            err,
            StrategyError::Provider(ProviderError::Api { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_unparseable_model_output() {
        let (strategy, _) = strategy(Ok("I could not find a resume.".to_string()));
        let err = strategy.parse(&text_upload("Jane")).await.unwrap_err();
        assert!(matches!(err, StrategyError::Provider(ProviderError::Parse(_))));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_extraction_error() {
        let (strategy, _) = strategy(Ok("{}".to_string()));
        let upload = ResumeUpload {
            file_name: "resume.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: Bytes::from_static(b"%PDF-1.4 truncated"),
            user_id: "1".to_string(),
        };
        let err = strategy.parse(&upload).await.unwrap_err();
        assert!(matches!(err, StrategyError::Extraction(_)));
    }
}
