/// Inference provider client. The only module that talks to the hosted model API.
///
/// Every call is a single attempt bounded by the configured timeout. Callers that
/// need a fallback (resume parsing) sequence it themselves; nothing here retries.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const MAX_NEW_TOKENS: u32 = 512;
const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Provider returned no generated text")]
    EmptyOutput,

    #[error("Provider call timed out after {0:?}")]
    Timeout(Duration),
}

/// Text generation seam. Services hold an `Arc<dyn InferenceProvider>` so tests
/// can swap the HTTP client for a scripted fake.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn generate_text(&self, model_id: &str, prompt: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct ProviderClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl ProviderClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
            timeout,
        }
    }

    /// POSTs `body` to `{base}/models/{model_id}` and returns the decoded JSON body.
    pub async fn query<B: Serialize + ?Sized>(
        &self,
        model_id: &str,
        body: &B,
    ) -> Result<Value, ProviderError> {
        let url = format!("{}/models/{}", self.base_url, model_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(model_id, status = status.as_u16(), "Inference provider returned an error");
            let message = serde_json::from_str::<ProviderErrorBody>(&body)
                .ok()
                .map(|b| b.error);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        debug!(model_id, bytes = bytes.len(), "Inference call succeeded");
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn classify(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::Http(err)
        }
    }
}

#[async_trait]
impl InferenceProvider for ProviderClient {
    async fn generate_text(&self, model_id: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = InferenceRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                return_full_text: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let value = self.query(model_id, &request).await?;
        let generated: Vec<GeneratedText> = serde_json::from_value(value)?;

        generated
            .into_iter()
            .map(|g| g.generated_text)
            .find(|text| !text.trim().is_empty())
            .ok_or(ProviderError::EmptyOutput)
    }
}

/// Deserializes model output that is supposed to be JSON. Tolerates markdown
/// fences and prose around a single top-level object.
pub fn parse_json_output<T: DeserializeOwned>(text: &str) -> Result<T, ProviderError> {
    let text = strip_json_fences(text);
    match serde_json::from_str(text) {
        Ok(parsed) => Ok(parsed),
        Err(err) => match (text.find('{'), text.rfind('}')) {
            (Some(start), Some(end)) if start < end => {
                Ok(serde_json::from_str(&text[start..=end])?)
            }
            _ => Err(ProviderError::Parse(err)),
        },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
