use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::applications::models::{ApplicationSubmission, EmployerResponse, JobApplication};
use crate::errors::{AppError, AppJson};
use crate::notifications::handlers::UserViewQuery;
use crate::state::AppState;

/// POST /api/v1/applications
pub async fn handle_submit_application(
    State(state): State<AppState>,
    AppJson(submission): AppJson<ApplicationSubmission>,
) -> Result<(StatusCode, Json<JobApplication>), AppError> {
    let application = state.applications.submit(submission)?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications?userId=&role=
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(query): Query<UserViewQuery>,
) -> Result<Json<Vec<JobApplication>>, AppError> {
    Ok(Json(state.applications.list(query.user_id, query.role)?))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<JobApplication>, AppError> {
    Ok(Json(state.applications.get(id)?))
}

/// PUT /api/v1/applications/:id/status
pub async fn handle_respond_to_application(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    AppJson(response): AppJson<EmployerResponse>,
) -> Result<Json<JobApplication>, AppError> {
    Ok(Json(state.applications.respond(id, response)?))
}
