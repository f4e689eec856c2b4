/// Client for the job-board backend: resume parsing and account registration.
use std::time::Duration;

use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::resume::models::{ParsedResume, ParsedResumeWire, ResumeUpload};

pub mod handlers;

const PARSE_RESUME_ENDPOINT: &str = "/api/resumes/parse";
const REGISTER_ENDPOINT: &str = "/api/auth/register";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Backend call timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl RegistrationRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err("Please fill in all required fields".to_string());
        }
        if self.user_type == "company"
            && self
                .company_name
                .as_deref()
                .map_or(true, |c| c.trim().is_empty())
        {
            return Err("Please enter your company name".to_string());
        }
        if self.password.chars().count() < 8 {
            return Err("Password must be at least 8 characters".to_string());
        }
        if !looks_like_email(self.email.trim()) {
            return Err("Please enter a valid email address".to_string());
        }
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.contains('@') => domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.')),
        _ => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub token: String,
    pub user: Value,
}

#[derive(Debug, Deserialize)]
struct BackendMessage {
    message: Option<String>,
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            timeout,
        }
    }

    /// Uploads the resume as multipart (`file`, `userId`) and normalizes the reply.
    pub async fn parse_resume(&self, upload: &ResumeUpload) -> Result<ParsedResume, BackendError> {
        let url = format!("{}{}", self.base_url, PARSE_RESUME_ENDPOINT);

        let mut part = Part::bytes(upload.bytes.to_vec()).file_name(upload.file_name.clone());
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new()
            .part("file", part)
            .text("userId", upload.user_id.clone());

        info!(url = %url, file = %upload.file_name, "Calling resume parsing backend");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let wire: ParsedResumeWire = self.read_json(response).await?;
        Ok(wire.into())
    }

    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResponse, BackendError> {
        let url = format!("{}{}", self.base_url, REGISTER_ENDPOINT);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        self.read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Backend returned an error");
            let message = serde_json::from_str::<BackendMessage>(&body)
                .ok()
                .and_then(|m| m.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("Backend request failed with status {status}"));
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn classify(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else {
            BackendError::Http(err)
        }
    }
}
