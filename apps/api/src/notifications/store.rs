//! Application-lifecycle events with read state and per-user views.
//!
//! Writes go through an injected `NotificationRepository`; every call is one
//! linearized repository operation, so concurrent users never observe a
//! half-applied `mark_all_read`. Alerts are published after the write succeeds;
//! a failing sink is logged and never rolls the write back.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::notifications::alerts::{Alert, AlertSink};
use crate::notifications::models::{
    ApplicationStatus, NotificationEvent, NotificationInput, NotificationKind, UserRole,
};
use crate::notifications::repository::NotificationRepository;

#[derive(Clone)]
pub struct NotificationStore {
    repo: Arc<dyn NotificationRepository>,
    alerts: Arc<dyn AlertSink>,
}

impl NotificationStore {
    pub fn new(repo: Arc<dyn NotificationRepository>, alerts: Arc<dyn AlertSink>) -> Self {
        Self { repo, alerts }
    }

    pub fn create(&self, input: NotificationInput) -> Result<NotificationEvent, AppError> {
        input.validate()?;

        let event = NotificationEvent::from_input(Uuid::new_v4().to_string(), input, Utc::now());
        self.repo.insert(event.clone())?;

        info!(
            id = %event.id,
            kind = ?event.kind,
            job_id = event.job_id,
            "Notification created"
        );

        if let Err(e) = self.alerts.publish(&Alert::for_event(&event)) {
            warn!(id = %event.id, "Failed to publish notification alert: {e}");
        }

        Ok(event)
    }

    /// Events visible to the user, newest first. Events sharing a timestamp are
    /// ordered by most recent insertion.
    pub fn list(&self, user_id: u64, role: UserRole) -> Result<Vec<NotificationEvent>, AppError> {
        let mut visible: Vec<(usize, NotificationEvent)> = self
            .repo
            .all()?
            .into_iter()
            .enumerate()
            .filter(|(_, event)| event.is_visible_to(user_id, role))
            .collect();

        visible.sort_by(|(a_idx, a), (b_idx, b)| {
            b.timestamp.cmp(&a.timestamp).then(b_idx.cmp(a_idx))
        });

        Ok(visible.into_iter().map(|(_, event)| event).collect())
    }

    pub fn unread_count(&self, user_id: u64, role: UserRole) -> Result<usize, AppError> {
        Ok(self
            .list(user_id, role)?
            .iter()
            .filter(|event| !event.is_read)
            .count())
    }

    /// Idempotent. Unknown ids are a no-op; the return value says whether the id existed.
    pub fn mark_read(&self, id: &str) -> Result<bool, AppError> {
        let found = self.repo.mark_read(id)?;
        if !found {
            info!(id, "mark_read for unknown notification ignored");
        }
        Ok(found)
    }

    /// Marks every event in the user's view as read; returns how many changed.
    pub fn mark_all_read(&self, user_id: u64, role: UserRole) -> Result<usize, AppError> {
        let changed = self
            .repo
            .mark_read_where(&|event: &NotificationEvent| event.is_visible_to(user_id, role))?;
        info!(user_id, ?role, changed, "Marked notifications read");
        Ok(changed)
    }

    /// Loads the sample events the job board demo ships with. No alerts are raised.
    pub fn seed_demo(&self) -> Result<(), AppError> {
        let now = Utc::now();
        let samples = [
            NotificationEvent {
                id: Uuid::new_v4().to_string(),
                kind: NotificationKind::NewApplication,
                job_id: 1,
                job_title: "Senior Frontend Developer".to_string(),
                company: "TechCorp".to_string(),
                applicant_id: None,
                applicant_name: Some("Jane Smith".to_string()),
                employer_id: Some(1),
                status: Some(ApplicationStatus::Pending),
                timestamp: now - Duration::hours(2),
                is_read: false,
            },
            NotificationEvent {
                id: Uuid::new_v4().to_string(),
                kind: NotificationKind::StatusChange,
                job_id: 3,
                job_title: "UX/UI Designer".to_string(),
                company: "DesignWave".to_string(),
                applicant_id: Some(2),
                applicant_name: None,
                employer_id: None,
                status: Some(ApplicationStatus::Accepted),
                timestamp: now - Duration::hours(24),
                is_read: true,
            },
        ];
        for event in samples {
            self.repo.insert(event)?;
        }
        Ok(())
    }
}
