use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

use crate::matching::skills::MatchMode;

const DEFAULT_INFERENCE_API_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_MODEL_ID: &str = "mistralai/Mistral-7B-Instruct-v0.2";
const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub inference_api_url: String,
    pub inference_api_key: String,
    pub resume_model_id: String,
    pub interview_model_id: String,
    pub backend_url: String,
    pub provider_timeout: Duration,
    pub skill_match_mode: MatchMode,
    pub seed_demo_notifications: bool,
    pub interview_ai_tips: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let resume_model_id = optional_env("RESUME_MODEL_ID", DEFAULT_MODEL_ID);

        Ok(Config {
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            inference_api_url: trim_base_url(&optional_env(
                "INFERENCE_API_URL",
                DEFAULT_INFERENCE_API_URL,
            )),
            inference_api_key: require_env("INFERENCE_API_KEY")?,
            interview_model_id: optional_env("INTERVIEW_MODEL_ID", &resume_model_id),
            resume_model_id,
            backend_url: trim_base_url(&optional_env("BACKEND_URL", DEFAULT_BACKEND_URL)),
            provider_timeout: Duration::from_secs(
                optional_env("PROVIDER_TIMEOUT_SECS", "30")
                    .parse::<u64>()
                    .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            skill_match_mode: optional_env("SKILL_MATCH_MODE", "fuzzy")
                .parse::<MatchMode>()
                .map_err(|e| anyhow!("SKILL_MATCH_MODE must be 'fuzzy' or 'exact': {e}"))?,
            seed_demo_notifications: parse_flag(
                "SEED_DEMO_NOTIFICATIONS",
                &optional_env("SEED_DEMO_NOTIFICATIONS", "false"),
            )?,
            interview_ai_tips: parse_flag(
                "INTERVIEW_AI_TIPS",
                &optional_env("INTERVIEW_AI_TIPS", "false"),
            )?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("{key} must be a boolean, got '{other}'"),
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert!(parse_flag("X", "true").unwrap());
        assert!(parse_flag("X", "ON").unwrap());
        assert!(parse_flag("X", "1").unwrap());
        assert!(!parse_flag("X", "false").unwrap());
        assert!(!parse_flag("X", "").unwrap());
    }

    #[test]
    fn test_parse_flag_rejects_garbage() {
        let err = parse_flag("SEED_DEMO_NOTIFICATIONS", "maybe").unwrap_err();
        assert!(err.to_string().contains("SEED_DEMO_NOTIFICATIONS"));
    }

    #[test]
    fn test_trim_base_url_strips_trailing_slashes() {
        assert_eq!(
            trim_base_url("https://api-inference.huggingface.co//"),
            "https://api-inference.huggingface.co"
        );
        assert_eq!(trim_base_url("http://localhost:8080"), "http://localhost:8080");
    }
}
