//! Axum route handlers for the job catalog and matching API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::{AppError, AppJson};
use crate::matching::catalog::Job;
use crate::matching::ranker::RankedJobs;
use crate::matching::skills::{MatchResult, SkillSet};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobSearchQuery {
    pub q: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatchRequest {
    pub candidate_skills: SkillSet,
    pub required_skills: SkillSet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchRequest {
    pub candidate_skills: SkillSet,
    /// Restrict ranking to these catalog ids. Absent means the whole catalog.
    #[serde(default)]
    pub job_ids: Option<Vec<u32>>,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Json<Vec<Job>> {
    Json(
        state
            .catalog
            .search(query.q.as_deref(), query.location.as_deref()),
    )
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Job>, AppError> {
    state
        .catalog
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// POST /api/v1/matching/skills
pub async fn handle_match_skills(
    State(state): State<AppState>,
    AppJson(request): AppJson<SkillMatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let result = state
        .matcher
        .match_skills(&request.candidate_skills, &request.required_skills)?;
    Ok(Json(result))
}

/// POST /api/v1/matching/jobs
///
/// Ranks the catalog (or the requested subset) for the candidate.
/// An empty selection yields `matches: []` rather than an error.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    AppJson(request): AppJson<JobMatchRequest>,
) -> Result<Json<RankedJobs>, AppError> {
    let jobs: Vec<Job> = match &request.job_ids {
        Some(ids) => ids
            .iter()
            .map(|id| {
                state
                    .catalog
                    .get(*id)
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
            })
            .collect::<Result<_, _>>()?,
        None => state.catalog.all().to_vec(),
    };

    tracing::info!(
        candidate_skills = request.candidate_skills.len(),
        jobs = jobs.len(),
        "Ranking jobs for candidate"
    );

    let ranked = state
        .ranker
        .rank_concurrent(&request.candidate_skills, &jobs)
        .await?;
    Ok(Json(ranked))
}
