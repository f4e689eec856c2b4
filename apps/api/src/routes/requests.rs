use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::errors::AppError;
use crate::state::AppState;

/// DELETE /api/v1/requests/:id
/// Cancels an in-flight resume parse or interview recommendation.
pub async fn handle_cancel_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.in_flight.cancel(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("No in-flight request with id {id}")))
    }
}
