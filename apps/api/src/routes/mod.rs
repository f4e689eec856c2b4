pub mod health;
pub mod requests;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::assessment::handlers as assessment;
use crate::backend::handlers as auth;
use crate::interview::handlers as interview;
use crate::matching::handlers as matching;
use crate::notifications::handlers as notifications;
use crate::resume::handlers as resume;
use crate::state::AppState;

const RESUME_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs and matching
        .route("/api/v1/jobs", get(matching::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(matching::handle_get_job))
        .route("/api/v1/matching/skills", post(matching::handle_match_skills))
        .route("/api/v1/matching/jobs", post(matching::handle_match_jobs))
        // Remote readiness
        .route(
            "/api/v1/assessments/remote-readiness",
            post(assessment::handle_score_assessment),
        )
        .route(
            "/api/v1/assessments/remote-readiness/questions",
            get(assessment::handle_list_questions),
        )
        // Notifications
        .route(
            "/api/v1/notifications",
            get(notifications::handle_list_notifications)
                .post(notifications::handle_create_notification),
        )
        .route(
            "/api/v1/notifications/unread-count",
            get(notifications::handle_unread_count),
        )
        .route(
            "/api/v1/notifications/read-all",
            post(notifications::handle_mark_all_read),
        )
        .route(
            "/api/v1/notifications/:id/read",
            post(notifications::handle_mark_read),
        )
        // Applications
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications)
                .post(applications::handle_submit_application),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::handle_get_application),
        )
        .route(
            "/api/v1/applications/:id/status",
            put(applications::handle_respond_to_application),
        )
        // Provider-backed, cancellable
        .route(
            "/api/v1/resumes/parse",
            post(resume::handle_parse_resume).layer(DefaultBodyLimit::max(RESUME_UPLOAD_LIMIT)),
        )
        .route(
            "/api/v1/interviews/recommendations",
            post(interview::handle_interview_recommendations),
        )
        .route(
            "/api/v1/requests/:id",
            delete(requests::handle_cancel_request),
        )
        .route("/api/v1/auth/register", post(auth::handle_register))
        .with_state(state)
}
