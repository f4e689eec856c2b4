use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::notifications::models::ApplicationStatus;

/// A candidate's application to a catalog job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: u64,
    pub job_id: u32,
    pub job_title: String,
    pub company: String,
    pub applicant_id: u64,
    pub applicant_name: String,
    pub employer_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    pub job_id: u32,
    pub applicant_id: u64,
    pub applicant_name: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

impl ApplicationSubmission {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.applicant_name.trim().is_empty() {
            return Err(AppError::Validation("applicantName cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// An employer's decision on an application.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerResponse {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub employer_notes: Option<String>,
}

impl EmployerResponse {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.status == ApplicationStatus::Pending {
            return Err(AppError::Validation(
                "status must be ACCEPTED or REJECTED".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trims optional free text; blank becomes `None`.
pub(crate) fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_not_a_response() {
        let response: EmployerResponse =
            serde_json::from_str(r#"{"status": "PENDING"}"#).unwrap();
        assert!(matches!(response.validate(), Err(AppError::Validation(_))));

        let response: EmployerResponse =
            serde_json::from_str(r#"{"status": "REJECTED", "employerNotes": "Thanks"}"#).unwrap();
        assert!(response.validate().is_ok());
        assert_eq!(response.employer_notes.as_deref(), Some("Thanks"));
    }

    #[test]
    fn test_blank_applicant_name_rejected() {
        let submission = ApplicationSubmission {
            job_id: 1,
            applicant_id: 2,
            applicant_name: " ".to_string(),
            cover_letter: None,
        };
        assert!(submission.validate().is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  hi ".to_string())), Some("hi".to_string()));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }
}
