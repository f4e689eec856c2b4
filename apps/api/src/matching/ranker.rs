//! Job ranking. Scores every catalog job for a candidate and orders them.
//!
//! Each job is scored independently, so the async entry point fans scoring out
//! onto `spawn_blocking` workers. Join handles are awaited in catalog order, which
//! re-joins the results deterministically before the stable sort.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::matching::catalog::Job;
use crate::matching::skills::{MatchResult, SkillMatcher, SkillSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    #[serde(flatten)]
    pub job: Job,
    pub match_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedJobs {
    pub matches: Vec<JobMatch>,
    /// Full match analysis for the top-ranked job only.
    pub analysis_details: Option<MatchResult>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JobRanker {
    matcher: SkillMatcher,
}

impl JobRanker {
    pub fn new(matcher: SkillMatcher) -> Self {
        Self { matcher }
    }

    /// Synchronous ranking.
    pub fn rank(&self, candidate: &SkillSet, jobs: &[Job]) -> Result<RankedJobs, AppError> {
        let results = jobs
            .iter()
            .map(|job| score_job(&self.matcher, candidate, job))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(assemble(jobs, results))
    }

    /// Concurrent ranking: one blocking task per job, re-joined in catalog order.
    pub async fn rank_concurrent(
        &self,
        candidate: &SkillSet,
        jobs: &[Job],
    ) -> Result<RankedJobs, AppError> {
        let handles: Vec<_> = jobs
            .iter()
            .map(|job| {
                let matcher = self.matcher;
                let candidate = candidate.clone();
                let job = job.clone();
                tokio::task::spawn_blocking(move || score_job(&matcher, &candidate, &job))
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = handle.await.map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in job ranking: {e}"))
            })??;
            results.push(result);
        }

        Ok(assemble(jobs, results))
    }
}

fn score_job(
    matcher: &SkillMatcher,
    candidate: &SkillSet,
    job: &Job,
) -> Result<MatchResult, AppError> {
    matcher
        .match_skills(candidate, &job.required_skills)
        .map_err(|e| match e {
            AppError::DivisionGuard(_) => {
                AppError::DivisionGuard(format!("job {} has no required skills", job.id))
            }
            other => other,
        })
}

/// `results[i]` must belong to `jobs[i]`.
fn assemble(jobs: &[Job], results: Vec<MatchResult>) -> RankedJobs {
    let mut indexed: Vec<(usize, MatchResult)> = results.into_iter().enumerate().collect();
    // `sort_by` is stable: equal scores keep catalog order.
    indexed.sort_by(|a, b| b.1.score.cmp(&a.1.score));

    let analysis_details = indexed.first().map(|(_, result)| result.clone());
    let matches: Vec<JobMatch> = indexed
        .into_iter()
        .map(|(idx, result)| JobMatch {
            job: jobs[idx].clone(),
            match_score: result.score,
        })
        .collect();

    debug!(
        jobs = matches.len(),
        top_score = analysis_details.as_ref().map(|r| r.score),
        "Ranked job catalog"
    );

    RankedJobs {
        matches,
        analysis_details,
    }
}
