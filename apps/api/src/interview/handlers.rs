use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;

use crate::errors::{AppError, AppJson};
use crate::interview::advisor::{InterviewRecommendation, InterviewRequest};
use crate::state::AppState;

/// POST /api/v1/interviews/recommendations
pub async fn handle_interview_recommendations(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(request): AppJson<InterviewRequest>,
) -> Result<Json<InterviewRecommendation>, AppError> {
    let (cancel, _guard) = state.in_flight.track(&headers)?;

    let recommendation = state
        .interview_advisor
        .advise(&request, Utc::now().date_naive(), &cancel)
        .await?;

    Ok(Json(recommendation))
}
