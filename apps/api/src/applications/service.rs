//! Job application lifecycle.
//!
//! Submitting an application notifies the job's employer; an employer response
//! notifies the applicant. Applications live in memory behind a single mutex, so
//! the duplicate check and the insert are one step.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{info, warn};

use crate::applications::models::{
    non_blank, ApplicationSubmission, EmployerResponse, JobApplication,
};
use crate::errors::AppError;
use crate::matching::catalog::JobCatalog;
use crate::notifications::models::{
    ApplicationStatus, NotificationInput, NotificationKind, UserRole,
};
use crate::notifications::NotificationStore;

#[derive(Default)]
struct Book {
    applications: Vec<JobApplication>,
    last_id: u64,
}

pub struct ApplicationService {
    catalog: Arc<JobCatalog>,
    notifications: NotificationStore,
    book: Mutex<Book>,
}

impl ApplicationService {
    pub fn new(catalog: Arc<JobCatalog>, notifications: NotificationStore) -> Self {
        Self {
            catalog,
            notifications,
            book: Mutex::new(Book::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Book>, AppError> {
        self.book
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("application book lock poisoned")))
    }

    /// Files a pending application. One application per applicant and job.
    pub fn submit(&self, submission: ApplicationSubmission) -> Result<JobApplication, AppError> {
        submission.validate()?;
        let job = self.catalog.get(submission.job_id).ok_or_else(|| {
            AppError::NotFound(format!("Job {} not found", submission.job_id))
        })?;

        let application = {
            let mut book = self.lock()?;
            let duplicate = book
                .applications
                .iter()
                .any(|a| a.job_id == job.id && a.applicant_id == submission.applicant_id);
            if duplicate {
                return Err(AppError::Validation(
                    "You have already applied to this job".to_string(),
                ));
            }

            book.last_id += 1;
            let application = JobApplication {
                id: book.last_id,
                job_id: job.id,
                job_title: job.title.clone(),
                company: job.company.clone(),
                applicant_id: submission.applicant_id,
                applicant_name: submission.applicant_name.trim().to_string(),
                employer_id: job.employer_id,
                cover_letter: non_blank(submission.cover_letter),
                status: ApplicationStatus::Pending,
                applied_at: Utc::now(),
                status_updated_at: None,
                employer_notes: None,
            };
            book.applications.push(application.clone());
            application
        };

        info!(
            id = application.id,
            job_id = application.job_id,
            applicant_id = application.applicant_id,
            "Application submitted"
        );

        self.notify(
            application.id,
            NotificationInput {
                kind: NotificationKind::NewApplication,
                job_id: application.job_id,
                job_title: application.job_title.clone(),
                company: application.company.clone(),
                applicant_id: Some(application.applicant_id),
                applicant_name: Some(application.applicant_name.clone()),
                employer_id: Some(application.employer_id),
                status: Some(ApplicationStatus::Pending),
            },
        );

        Ok(application)
    }

    /// Records the employer's decision. Notes are kept from earlier responses
    /// when the new one carries none.
    pub fn respond(&self, id: u64, response: EmployerResponse) -> Result<JobApplication, AppError> {
        response.validate()?;

        let application = {
            let mut book = self.lock()?;
            let application = book
                .applications
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
            application.status = response.status;
            application.status_updated_at = Some(Utc::now());
            if let Some(notes) = non_blank(response.employer_notes) {
                application.employer_notes = Some(notes);
            }
            application.clone()
        };

        info!(id, status = application.status.label(), "Application status updated");

        self.notify(
            application.id,
            NotificationInput {
                kind: NotificationKind::StatusChange,
                job_id: application.job_id,
                job_title: application.job_title.clone(),
                company: application.company.clone(),
                applicant_id: Some(application.applicant_id),
                applicant_name: Some(application.applicant_name.clone()),
                employer_id: Some(application.employer_id),
                status: Some(application.status),
            },
        );

        Ok(application)
    }

    pub fn get(&self, id: u64) -> Result<JobApplication, AppError> {
        self.lock()?
            .applications
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
    }

    /// Employers see applications to their jobs, applicants their own. Newest first.
    pub fn list(&self, user_id: u64, role: UserRole) -> Result<Vec<JobApplication>, AppError> {
        Ok(self
            .lock()?
            .applications
            .iter()
            .rev()
            .filter(|a| match role {
                UserRole::Employer => a.employer_id == user_id,
                UserRole::Applicant => a.applicant_id == user_id,
            })
            .cloned()
            .collect())
    }

    // The application is already stored; a failed notification is logged only.
    fn notify(&self, application_id: u64, input: NotificationInput) {
        if let Err(e) = self.notifications.create(input) {
            warn!(application_id, "Failed to record application notification: {e}");
        }
    }
}
