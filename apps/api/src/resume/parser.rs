use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::cancel::CancelSignal;
use crate::resume::models::{ParsedResume, ResumeUpload};
use crate::resume::strategies::{ResumeParseStrategy, StrategyError};

/// One strategy that did not produce a resume, in attempt order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyFailure {
    pub strategy: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeParseOutcome {
    pub resume: ParsedResume,
    /// Name of the strategy that succeeded.
    pub strategy: &'static str,
    /// Earlier strategies that failed before the successful one.
    pub failed_attempts: Vec<StrategyFailure>,
}

#[derive(Debug, Error)]
pub enum ResumeParseError {
    #[error("resume parsing was cancelled")]
    Cancelled,

    #[error("all {} resume parsing strategies failed", .0.len())]
    Exhausted(Vec<StrategyFailure>),

    #[error("no resume parsing strategies configured")]
    NoStrategies,
}

/// Tries each strategy in order until one succeeds. Each attempt is bounded by
/// `timeout`; a fired `CancelSignal` abandons the in-flight attempt and skips
/// the rest.
pub struct ResumeParser {
    strategies: Vec<Arc<dyn ResumeParseStrategy>>,
    timeout: Duration,
}

impl ResumeParser {
    pub fn new(strategies: Vec<Arc<dyn ResumeParseStrategy>>, timeout: Duration) -> Self {
        Self {
            strategies,
            timeout,
        }
    }

    pub async fn parse(
        &self,
        upload: &ResumeUpload,
        cancel: &CancelSignal,
    ) -> Result<ResumeParseOutcome, ResumeParseError> {
        if self.strategies.is_empty() {
            return Err(ResumeParseError::NoStrategies);
        }

        let mut failures = Vec::new();

        for strategy in &self.strategies {
            if cancel.is_cancelled() {
                return Err(ResumeParseError::Cancelled);
            }

            let attempt = tokio::time::timeout(self.timeout, strategy.parse(upload));
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(strategy = strategy.name(), "Resume parsing cancelled mid-attempt");
                    return Err(ResumeParseError::Cancelled);
                }
                result = attempt => result.unwrap_or(Err(StrategyError::Timeout(self.timeout))),
            };

            match result {
                Ok(resume) => {
                    info!(
                        strategy = strategy.name(),
                        fallbacks = failures.len(),
                        "Resume parsed"
                    );
                    return Ok(ResumeParseOutcome {
                        resume,
                        strategy: strategy.name(),
                        failed_attempts: failures,
                    });
                }
                Err(e) => {
                    warn!(strategy = strategy.name(), "Resume parsing strategy failed: {e}");
                    failures.push(StrategyFailure {
                        strategy: strategy.name().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Err(ResumeParseError::Exhausted(failures))
    }
}
