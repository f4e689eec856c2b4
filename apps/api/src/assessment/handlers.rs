use axum::Json;
use tracing::info;

use crate::assessment::questions::{Question, QUESTIONS};
use crate::assessment::scorer::{score_assessment, AssessmentAnswers, AssessmentReport};
use crate::errors::{AppError, AppJson};

/// GET /api/v1/assessments/remote-readiness/questions
pub async fn handle_list_questions() -> Json<&'static [Question]> {
    Json(&QUESTIONS[..])
}

/// POST /api/v1/assessments/remote-readiness
pub async fn handle_score_assessment(
    AppJson(answers): AppJson<AssessmentAnswers>,
) -> Result<Json<AssessmentReport>, AppError> {
    let report = score_assessment(&answers)?;
    info!(score = report.score, "Scored remote readiness assessment");
    Ok(Json(report))
}
