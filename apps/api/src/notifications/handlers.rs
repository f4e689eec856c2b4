use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppJson};
use crate::notifications::models::{NotificationEvent, NotificationInput, UserRole};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserViewQuery {
    pub user_id: u64,
    pub role: UserRole,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub unread_count: usize,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: usize,
}

/// POST /api/v1/notifications
pub async fn handle_create_notification(
    State(state): State<AppState>,
    AppJson(input): AppJson<NotificationInput>,
) -> Result<(StatusCode, Json<NotificationEvent>), AppError> {
    let event = state.notifications.create(input)?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/notifications?userId=&role=
pub async fn handle_list_notifications(
    State(state): State<AppState>,
    Query(query): Query<UserViewQuery>,
) -> Result<Json<Vec<NotificationEvent>>, AppError> {
    Ok(Json(state.notifications.list(query.user_id, query.role)?))
}

/// GET /api/v1/notifications/unread-count?userId=&role=
pub async fn handle_unread_count(
    State(state): State<AppState>,
    Query(query): Query<UserViewQuery>,
) -> Result<Json<UnreadCountResponse>, AppError> {
    let unread_count = state.notifications.unread_count(query.user_id, query.role)?;
    Ok(Json(UnreadCountResponse { unread_count }))
}

/// POST /api/v1/notifications/:id/read
///
/// Always 204: marking an unknown id is a no-op.
pub async fn handle_mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.notifications.mark_read(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
pub async fn handle_mark_all_read(
    State(state): State<AppState>,
    AppJson(query): AppJson<UserViewQuery>,
) -> Result<Json<MarkAllReadResponse>, AppError> {
    let updated = state
        .notifications
        .mark_all_read(query.user_id, query.role)?;
    Ok(Json(MarkAllReadResponse { updated }))
}
