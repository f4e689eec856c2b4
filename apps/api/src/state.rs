use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::applications::ApplicationService;
use crate::backend::BackendClient;
use crate::cancel::InFlightRequests;
use crate::config::Config;
use crate::interview::InterviewAdvisor;
use crate::matching::catalog::JobCatalog;
use crate::matching::ranker::JobRanker;
use crate::matching::skills::SkillMatcher;
use crate::notifications::alerts::TracingAlertSink;
use crate::notifications::repository::InMemoryNotificationRepository;
use crate::notifications::NotificationStore;
use crate::provider::{InferenceProvider, ProviderClient};
use crate::resume::strategies::{BackendStrategy, ProviderStrategy, ResumeParseStrategy};
use crate::resume::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<JobCatalog>,
    pub matcher: SkillMatcher,
    pub ranker: JobRanker,
    pub notifications: NotificationStore,
    pub applications: Arc<ApplicationService>,
    /// Backend first, provider second.
    pub resume_parser: Arc<ResumeParser>,
    pub interview_advisor: Arc<InterviewAdvisor>,
    pub backend: BackendClient,
    /// Requests that can be cancelled via `DELETE /api/v1/requests/:id`.
    pub in_flight: InFlightRequests,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider: Arc<dyn InferenceProvider> = Arc::new(ProviderClient::new(
            config.inference_api_url.clone(),
            config.inference_api_key.clone(),
            config.provider_timeout,
        ));
        let backend = BackendClient::new(config.backend_url.clone(), config.provider_timeout);

        let strategies: Vec<Arc<dyn ResumeParseStrategy>> = vec![
            Arc::new(BackendStrategy::new(backend.clone())),
            Arc::new(ProviderStrategy::new(
                provider.clone(),
                config.resume_model_id.clone(),
            )),
        ];
        let resume_parser = ResumeParser::new(strategies, config.provider_timeout);

        let interview_advisor = InterviewAdvisor::new(
            config.interview_ai_tips.then(|| provider.clone()),
            config.interview_model_id.clone(),
            config.provider_timeout,
        );

        let notifications = NotificationStore::new(
            Arc::new(InMemoryNotificationRepository::new()),
            Arc::new(TracingAlertSink),
        );
        if config.seed_demo_notifications {
            notifications.seed_demo()?;
            info!("Seeded demo notifications");
        }

        let catalog = Arc::new(JobCatalog::seeded());
        let applications = ApplicationService::new(catalog.clone(), notifications.clone());
        let matcher = SkillMatcher::new(config.skill_match_mode);

        Ok(AppState {
            catalog,
            matcher,
            ranker: JobRanker::new(matcher),
            notifications,
            applications: Arc::new(applications),
            resume_parser: Arc::new(resume_parser),
            interview_advisor: Arc::new(interview_advisor),
            backend,
            in_flight: InFlightRequests::new(),
        })
    }
}
