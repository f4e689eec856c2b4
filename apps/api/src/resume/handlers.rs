use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};

use crate::errors::AppError;
use crate::resume::models::ResumeUpload;
use crate::resume::parser::ResumeParseOutcome;
use crate::state::AppState;

/// POST /api/v1/resumes/parse
///
/// Multipart fields: `file` (the resume) and `userId`. Send `x-request-id` to be
/// able to cancel the parse through `DELETE /api/v1/requests/:id`.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<ResumeParseOutcome>, AppError> {
    let (cancel, _guard) = state.in_flight.track(&headers)?;

    let upload = read_upload(multipart).await?;
    let outcome = state.resume_parser.parse(&upload, &cancel).await?;

    Ok(Json(outcome))
}

async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut file = None;
    let mut user_id = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read file: {e}")))?;
                file = Some((file_name, content_type, bytes));
            }
            "userId" => {
                user_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Could not read userId: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::Validation("Please select a resume file to upload".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("The uploaded file is empty".to_string()));
    }
    let user_id = user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))?;

    Ok(ResumeUpload {
        file_name,
        content_type,
        bytes,
        user_id,
    })
}
