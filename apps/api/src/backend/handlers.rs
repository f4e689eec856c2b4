use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::backend::{RegistrationRequest, RegistrationResponse};
use crate::errors::{AppError, AppJson};
use crate::state::AppState;

/// POST /api/v1/auth/register
/// Validates the signup form locally, then forwards it to the backend.
pub async fn handle_register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    request.validate().map_err(AppError::Validation)?;

    let registered = state.backend.register(&request).await?;
    info!(user_type = %request.user_type, "Account registered");

    Ok((StatusCode::CREATED, Json(registered)))
}
