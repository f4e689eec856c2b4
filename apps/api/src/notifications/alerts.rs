use serde::Serialize;
use tracing::info;

use crate::notifications::models::{ApplicationStatus, NotificationEvent, NotificationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Default,
    Destructive,
}

/// Transient user-facing alert raised when a notification is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
}

impl Alert {
    pub fn for_event(event: &NotificationEvent) -> Self {
        match event.kind {
            NotificationKind::NewApplication => Alert {
                title: "New Application Received".to_string(),
                description: format!(
                    "{} has applied for {}",
                    event.applicant_name.as_deref().unwrap_or("A candidate"),
                    event.job_title
                ),
                severity: AlertSeverity::Default,
            },
            NotificationKind::StatusChange => {
                let title = if event.status == Some(ApplicationStatus::Accepted) {
                    "Congratulations! Your application was accepted"
                } else {
                    "Your application status has been updated"
                };
                Alert {
                    title: title.to_string(),
                    description: format!(
                        "Status for {} at {} is now {}",
                        event.job_title,
                        event.company,
                        event.status.map(|s| s.label()).unwrap_or("updated")
                    ),
                    severity: if event.status == Some(ApplicationStatus::Rejected) {
                        AlertSeverity::Destructive
                    } else {
                        AlertSeverity::Default
                    },
                }
            }
        }
    }
}

/// Outbound alert hook (toast bridge, e-mail, push).
pub trait AlertSink: Send + Sync {
    fn publish(&self, alert: &Alert) -> Result<(), AlertError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Default sink: alerts go to the log.
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn publish(&self, alert: &Alert) -> Result<(), AlertError> {
        info!(
            severity = ?alert.severity,
            title = %alert.title,
            "{}",
            alert.description
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::models::NotificationInput;
    use chrono::Utc;

    fn status_event(status: ApplicationStatus) -> NotificationEvent {
        NotificationEvent::from_input(
            "1".to_string(),
            NotificationInput {
                kind: NotificationKind::StatusChange,
                job_id: 3,
                job_title: "UX/UI Designer".to_string(),
                company: "DesignWave".to_string(),
                applicant_id: Some(2),
                applicant_name: None,
                employer_id: None,
                status: Some(status),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_accepted_alert() {
        let alert = Alert::for_event(&status_event(ApplicationStatus::Accepted));
        assert!(alert.title.starts_with("Congratulations"));
        assert_eq!(
            alert.description,
            "Status for UX/UI Designer at DesignWave is now accepted"
        );
        assert_eq!(alert.severity, AlertSeverity::Default);
    }

    #[test]
    fn test_rejected_alert_is_destructive() {
        let alert = Alert::for_event(&status_event(ApplicationStatus::Rejected));
        assert_eq!(alert.title, "Your application status has been updated");
        assert_eq!(alert.severity, AlertSeverity::Destructive);
    }

    #[test]
    fn test_new_application_alert_names_applicant() {
        let event = NotificationEvent::from_input(
            "2".to_string(),
            NotificationInput {
                kind: NotificationKind::NewApplication,
                job_id: 1,
                job_title: "Senior Frontend Developer".to_string(),
                company: "TechCorp".to_string(),
                applicant_id: Some(9),
                applicant_name: Some("Jane Smith".to_string()),
                employer_id: Some(1),
                status: Some(ApplicationStatus::Pending),
            },
            Utc::now(),
        );
        let alert = Alert::for_event(&event);
        assert_eq!(alert.title, "New Application Received");
        assert_eq!(
            alert.description,
            "Jane Smith has applied for Senior Frontend Developer"
        );
    }
}
