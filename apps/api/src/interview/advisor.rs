//! Interview scheduling recommendations.
//!
//! Slots, interviewers and baseline tips are derived from the job title and the
//! request date. When a provider is configured, one extra generation call adds
//! role-specific tips; if that call fails the baseline answer is still returned.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cancel::CancelSignal;
use crate::errors::AppError;
use crate::provider::prompts::interview_tips_prompt;
use crate::provider::{parse_json_output, InferenceProvider, ProviderError};

const BUSINESS_DAYS_AHEAD: usize = 3;
const SLOTS: [&str; 2] = ["10:00 AM", "2:00 PM"];
const MAX_AI_TIPS: usize = 3;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequest {
    pub company: String,
    pub job_title: String,
    /// Day to plan from; defaults to today (UTC).
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecommendation {
    pub suggested_times: Vec<String>,
    pub suggested_interviewers: Vec<String>,
    pub preparation_tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleFamily {
    Engineering,
    Design,
    Management,
    Other,
}

impl RoleFamily {
    fn of(job_title: &str) -> Self {
        let title = job_title.to_lowercase();
        if title.contains("developer") || title.contains("engineer") {
            RoleFamily::Engineering
        } else if title.contains("design") {
            RoleFamily::Design
        } else if title.contains("manager") {
            RoleFamily::Management
        } else {
            RoleFamily::Other
        }
    }

    fn interviewers(self) -> &'static [&'static str] {
        match self {
            RoleFamily::Engineering => &["Alex Johnson, Tech Lead", "Sarah Lee, Senior Developer"],
            RoleFamily::Design => &["Michael Chen, Design Director", "Emma Wilson, UX Manager"],
            RoleFamily::Management => &[
                "David Brown, Department Director",
                "Lisa Garcia, Operations Head",
            ],
            RoleFamily::Other => &["Taylor Kim, Team Lead"],
        }
    }

    fn tips(self) -> &'static [&'static str] {
        match self {
            RoleFamily::Engineering => &[
                "Be ready to discuss your technical skills and problem-solving approach",
                "Prepare examples of challenging technical problems you've solved",
            ],
            RoleFamily::Design => &[
                "Prepare to showcase your portfolio and discuss your design process",
                "Research current design trends in the industry",
            ],
            RoleFamily::Management => &[
                "Prepare examples of your leadership and decision-making skills",
                "Be ready to discuss your management style and approach to team development",
            ],
            RoleFamily::Other => &[],
        }
    }
}

/// Two slots on each of the next three business days after `from`.
///
/// Dates too close to the end of the calendar have no three business days left
/// and are rejected.
pub fn suggested_times(from: NaiveDate) -> Result<Vec<String>, AppError> {
    let days: Vec<NaiveDate> = (1..)
        .map_while(|offset| from.checked_add_days(Days::new(offset)))
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .take(BUSINESS_DAYS_AHEAD)
        .collect();
    if days.len() < BUSINESS_DAYS_AHEAD {
        return Err(AppError::Validation(format!(
            "date {from} leaves fewer than {BUSINESS_DAYS_AHEAD} business days to schedule"
        )));
    }

    Ok(days
        .into_iter()
        .flat_map(|day| {
            SLOTS
                .iter()
                .map(move |slot| format!("{} at {slot}", day.format("%-m/%-d/%Y")))
        })
        .collect())
}

/// The deterministic part of the recommendation.
pub fn baseline(
    company: &str,
    job_title: &str,
    from: NaiveDate,
) -> Result<InterviewRecommendation, AppError> {
    let suggested_times = suggested_times(from)?;
    let family = RoleFamily::of(job_title);

    let mut suggested_interviewers = vec!["John Smith, HR Manager".to_string()];
    suggested_interviewers.extend(family.interviewers().iter().map(|s| s.to_string()));

    let mut preparation_tips = vec![
        format!("Research {company}'s recent projects and news"),
        "Prepare questions about the company culture".to_string(),
        "Review the job description and prepare examples of relevant experience".to_string(),
    ];
    preparation_tips.extend(family.tips().iter().map(|s| s.to_string()));

    Ok(InterviewRecommendation {
        suggested_times,
        suggested_interviewers,
        preparation_tips,
    })
}

#[derive(Debug, Deserialize)]
struct GeneratedTips {
    #[serde(default)]
    tips: Vec<String>,
}

pub struct InterviewAdvisor {
    provider: Option<Arc<dyn InferenceProvider>>,
    model_id: String,
    timeout: Duration,
}

impl InterviewAdvisor {
    /// `provider = None` disables generated tips.
    pub fn new(
        provider: Option<Arc<dyn InferenceProvider>>,
        model_id: String,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            model_id,
            timeout,
        }
    }

    pub async fn advise(
        &self,
        request: &InterviewRequest,
        today: NaiveDate,
        cancel: &CancelSignal,
    ) -> Result<InterviewRecommendation, AppError> {
        let company = request.company.trim();
        let job_title = request.job_title.trim();
        if company.is_empty() || job_title.is_empty() {
            return Err(AppError::Validation(
                "company and jobTitle are required".to_string(),
            ));
        }

        let mut recommendation = baseline(company, job_title, request.date.unwrap_or(today))?;

        let Some(provider) = &self.provider else {
            return Ok(recommendation);
        };
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        let prompt = interview_tips_prompt(company, job_title);
        let call = tokio::time::timeout(self.timeout, provider.generate_text(&self.model_id, &prompt));
        let generated = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AppError::Cancelled),
            result = call => result
                .unwrap_or(Err(ProviderError::Timeout(self.timeout)))
                .and_then(|text| parse_json_output::<GeneratedTips>(&text)),
        };

        match generated {
            Ok(GeneratedTips { tips }) => {
                let before = recommendation.preparation_tips.len();
                for tip in tips.into_iter().map(|t| t.trim().to_string()) {
                    if recommendation.preparation_tips.len() - before == MAX_AI_TIPS {
                        break;
                    }
                    if !tip.is_empty() && !recommendation.preparation_tips.contains(&tip) {
                        recommendation.preparation_tips.push(tip);
                    }
                }
                info!(
                    added = recommendation.preparation_tips.len() - before,
                    "Added generated interview tips"
                );
            }
            Err(e) => warn!("Generated interview tips unavailable, using baseline: {e}"),
        }

        Ok(recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::cancel_pair;
    use async_trait::async_trait;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct CannedTips(Result<&'static str, u16>);

    #[async_trait]
    impl InferenceProvider for CannedTips {
        async fn generate_text(&self, _model_id: &str, _prompt: &str) -> Result<String, ProviderError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(ProviderError::Api {
                    status,
                    message: None,
                }),
            }
        }
    }

    struct Silent;

    #[async_trait]
    impl InferenceProvider for Silent {
        async fn generate_text(&self, _model_id: &str, _prompt: &str) -> Result<String, ProviderError> {
            std::future::pending().await
        }
    }

    fn request(job_title: &str) -> InterviewRequest {
        InterviewRequest {
            company: "TechCorp".to_string(),
            job_title: job_title.to_string(),
            date: Some(day(2024, 3, 11)),
        }
    }

    fn advisor(provider: Option<Arc<dyn InferenceProvider>>) -> InterviewAdvisor {
        InterviewAdvisor::new(provider, "test-model".to_string(), Duration::from_secs(30))
    }

    #[test]
    fn test_monday_gets_next_three_weekdays() {
        // 2024-03-11 is a Monday.
        let times = suggested_times(day(2024, 3, 11)).unwrap();
        assert_eq!(
            times,
            vec![
                "3/12/2024 at 10:00 AM",
                "3/12/2024 at 2:00 PM",
                "3/13/2024 at 10:00 AM",
                "3/13/2024 at 2:00 PM",
                "3/14/2024 at 10:00 AM",
                "3/14/2024 at 2:00 PM",
            ]
        );
    }

    #[test]
    fn test_friday_skips_weekend() {
        let times = suggested_times(day(2024, 3, 15)).unwrap();
        assert_eq!(times.len(), 6);
        assert_eq!(times[0], "3/18/2024 at 10:00 AM");
        assert_eq!(times[5], "3/20/2024 at 2:00 PM");
        assert!(times.iter().all(|t| !t.starts_with("3/16/") && !t.starts_with("3/17/")));
    }

    #[test]
    fn test_last_calendar_days_are_rejected() {
        assert!(matches!(
            suggested_times(NaiveDate::MAX),
            Err(AppError::Validation(_))
        ));
        let near_end = NaiveDate::MAX.checked_sub_days(Days::new(2)).unwrap();
        assert!(matches!(suggested_times(near_end), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_late_but_schedulable_date_still_gets_six_slots() {
        let from = NaiveDate::MAX.checked_sub_days(Days::new(14)).unwrap();
        assert_eq!(suggested_times(from).unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_request_dated_at_calendar_end_is_rejected() {
        let request: InterviewRequest = serde_json::from_value(serde_json::json!({
            "company": "TechCorp",
            "jobTitle": "Frontend Developer",
            "date": NaiveDate::MAX,
        }))
        .unwrap();
        assert_eq!(request.date, Some(NaiveDate::MAX));
        let result = advisor(None)
            .advise(&request, day(2024, 3, 11), &CancelSignal::never())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_engineering_titles_get_technical_interviewers() {
        for title in ["Backend Developer", "Site Reliability Engineer"] {
            let rec = baseline("ServerTech", title, day(2024, 3, 11)).unwrap();
            assert_eq!(
                rec.suggested_interviewers,
                vec![
                    "John Smith, HR Manager",
                    "Alex Johnson, Tech Lead",
                    "Sarah Lee, Senior Developer"
                ]
            );
            assert_eq!(rec.preparation_tips.len(), 5);
        }
    }

    #[test]
    fn test_design_wins_over_manager() {
        let rec = baseline("DesignWave", "UX Design Manager", day(2024, 3, 11)).unwrap();
        assert!(rec
            .suggested_interviewers
            .contains(&"Michael Chen, Design Director".to_string()));
    }

    #[test]
    fn test_other_titles_get_team_lead_and_base_tips() {
        let rec = baseline("InnovateLabs", "Data Analyst", day(2024, 3, 11)).unwrap();
        assert_eq!(
            rec.suggested_interviewers,
            vec!["John Smith, HR Manager", "Taylor Kim, Team Lead"]
        );
        assert_eq!(rec.preparation_tips.len(), 3);
        assert_eq!(
            rec.preparation_tips[0],
            "Research InnovateLabs's recent projects and news"
        );
    }

    #[tokio::test]
    async fn test_without_provider_returns_baseline() {
        let rec = advisor(None)
            .advise(&request("Product Manager"), day(2030, 1, 1), &CancelSignal::never())
            .await
            .unwrap();
        assert_eq!(
            rec,
            baseline("TechCorp", "Product Manager", day(2024, 3, 11)).unwrap()
        );
    }

    #[tokio::test]
    async fn test_generated_tips_are_appended_and_capped() {
        let provider = CannedTips(Ok(
            r#"{"tips": ["Review React hooks", "Review React hooks", "", "Know the TechCorp stack", "Sleep well", "Extra"]}"#,
        ));
        let rec = advisor(Some(Arc::new(provider)))
            .advise(&request("Frontend Developer"), day(2024, 3, 11), &CancelSignal::never())
            .await
            .unwrap();
        assert_eq!(
            &rec.preparation_tips[5..],
            &["Review React hooks", "Know the TechCorp stack", "Sleep well"]
        );
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_baseline() {
        let rec = advisor(Some(Arc::new(CannedTips(Err(503)))))
            .advise(&request("Frontend Developer"), day(2024, 3, 11), &CancelSignal::never())
            .await
            .unwrap();
        assert_eq!(rec.preparation_tips.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out_to_baseline() {
        let rec = advisor(Some(Arc::new(Silent)))
            .advise(&request("Frontend Developer"), day(2024, 3, 11), &CancelSignal::never())
            .await
            .unwrap();
        assert_eq!(rec.preparation_tips.len(), 5);
    }

    #[tokio::test]
    async fn test_cancelled_request_returns_cancelled() {
        let (handle, signal) = cancel_pair();
        handle.cancel();
        let result = advisor(Some(Arc::new(Silent)))
            .advise(&request("Frontend Developer"), day(2024, 3, 11), &signal)
            .await;
        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let result = advisor(None)
            .advise(&request("  "), day(2024, 3, 11), &CancelSignal::never())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
