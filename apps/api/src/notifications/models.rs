use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewApplication,
    StatusChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Employer,
    Applicant,
}

/// Caller-supplied fields of a new notification; the store assigns the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInput {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub job_id: u32,
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub applicant_id: Option<u64>,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub employer_id: Option<u64>,
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
}

impl NotificationInput {
    /// Each kind must name the user who owns it: the employer for
    /// `new_application`, the applicant (with the new status) for `status_change`.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.job_title.trim().is_empty() {
            return Err(AppError::Validation("jobTitle cannot be empty".to_string()));
        }
        if self.company.trim().is_empty() {
            return Err(AppError::Validation("company cannot be empty".to_string()));
        }
        match self.kind {
            NotificationKind::NewApplication if self.employer_id.is_none() => Err(
                AppError::Validation("new_application notifications require employerId".to_string()),
            ),
            NotificationKind::StatusChange if self.applicant_id.is_none() => Err(
                AppError::Validation("status_change notifications require applicantId".to_string()),
            ),
            NotificationKind::StatusChange if self.status.is_none() => Err(AppError::Validation(
                "status_change notifications require status".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// A stored application-lifecycle event. Only `is_read` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub job_id: u32,
    pub job_title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

impl NotificationEvent {
    pub fn from_input(id: String, input: NotificationInput, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: input.kind,
            job_id: input.job_id,
            job_title: input.job_title,
            company: input.company,
            applicant_id: input.applicant_id,
            applicant_name: input.applicant_name,
            employer_id: input.employer_id,
            status: input.status,
            timestamp,
            is_read: false,
        }
    }

    /// Employers see applications to their jobs; applicants see status changes
    /// on their own applications.
    pub fn is_visible_to(&self, user_id: u64, role: UserRole) -> bool {
        match role {
            UserRole::Employer => {
                self.kind == NotificationKind::NewApplication && self.employer_id == Some(user_id)
            }
            UserRole::Applicant => {
                self.kind == NotificationKind::StatusChange && self.applicant_id == Some(user_id)
            }
        }
    }
}
