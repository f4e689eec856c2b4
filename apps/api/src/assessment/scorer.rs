//! Readiness scoring.
//!
//! Each answer contributes `3 - answer` points; the percentage of the maximum
//! picks a tier. Strengths and improvement areas come from the per-question
//! statements: answers 0–1 count as a strength, 2–3 as an improvement area.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::questions::{Question, OPTIONS_PER_QUESTION, QUESTIONS};
use crate::errors::AppError;

const MAX_POINTS_PER_QUESTION: i64 = (OPTIONS_PER_QUESTION - 1) as i64;
const STRENGTH_CUTOFF: i64 = 1;
const FALLBACK_STRENGTH: &str =
    "You've taken the first step by assessing your remote work readiness";

/// Question id → chosen option index. Deserializes from `{"1": 0, "2": 3, ...}`.
pub type AssessmentAnswers = BTreeMap<u32, i64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub score: u32,
    pub title: String,
    pub description: String,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
}

struct Tier {
    min_score: u32,
    title: &'static str,
    description: &'static str,
}

// Checked top-down; the last tier catches everything.
static TIERS: [Tier; 4] = [
    Tier {
        min_score: 80,
        title: "Excellent Remote Work Readiness",
        description: "You have the ideal setup and skills for remote work. You're well-equipped to thrive in a distributed team environment.",
    },
    Tier {
        min_score: 60,
        title: "Good Remote Work Readiness",
        description: "You have most of the necessary elements for remote work success, but there are some areas where you could improve.",
    },
    Tier {
        min_score: 40,
        title: "Average Remote Work Readiness",
        description: "You have some of the basics in place, but there are significant areas that need improvement before you can thrive in a remote environment.",
    },
    Tier {
        min_score: 0,
        title: "Needs Improvement",
        description: "Your current setup and practices may make remote work challenging. Consider addressing the key improvement areas listed below.",
    },
];

pub fn score_assessment(answers: &AssessmentAnswers) -> Result<AssessmentReport, AppError> {
    validate(answers)?;

    let mut total_points = 0_i64;
    let mut strengths = Vec::new();
    let mut improvement_areas = Vec::new();

    for question in &QUESTIONS {
        let answer = answers[&question.id];
        total_points += MAX_POINTS_PER_QUESTION - answer;
        if answer <= STRENGTH_CUTOFF {
            strengths.push(question.strength.to_string());
        } else {
            improvement_areas.push(question.improvement.to_string());
        }
    }

    if strengths.is_empty() {
        strengths.push(FALLBACK_STRENGTH.to_string());
    }

    let max_points = MAX_POINTS_PER_QUESTION * QUESTIONS.len() as i64;
    let score = ((total_points as f64 / max_points as f64) * 100.0).round() as u32;
    let tier = tier_for(score);

    Ok(AssessmentReport {
        score,
        title: tier.title.to_string(),
        description: tier.description.to_string(),
        strengths,
        improvement_areas,
    })
}

fn tier_for(score: u32) -> &'static Tier {
    TIERS
        .iter()
        .find(|tier| score >= tier.min_score)
        .unwrap_or(&TIERS[TIERS.len() - 1])
}

fn validate(answers: &AssessmentAnswers) -> Result<(), AppError> {
    let mut problems = Vec::new();

    let missing: Vec<String> = QUESTIONS
        .iter()
        .filter(|q| !answers.contains_key(&q.id))
        .map(|q| q.id.to_string())
        .collect();
    if !missing.is_empty() {
        problems.push(format!("missing answers for questions {}", missing.join(", ")));
    }

    for (id, answer) in answers {
        if !QUESTIONS.iter().any(|q: &Question| q.id == *id) {
            problems.push(format!("unknown question id {id}"));
        } else if !(0..=MAX_POINTS_PER_QUESTION).contains(answer) {
            problems.push(format!(
                "answer {answer} for question {id} is outside 0..={MAX_POINTS_PER_QUESTION}"
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(values: [i64; 5]) -> AssessmentAnswers {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as u32 + 1, *v))
            .collect()
    }

    #[test]
    fn test_all_best_answers_score_100() {
        let report = score_assessment(&answers([0, 0, 0, 0, 0])).unwrap();
        assert_eq!(report.score, 100);
        assert!(report.title.starts_with("Excellent"));
        assert_eq!(report.strengths.len(), 5);
        assert!(report.improvement_areas.is_empty());
    }

    #[test]
    fn test_all_worst_answers_score_0() {
        let report = score_assessment(&answers([3, 3, 3, 3, 3])).unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.title, "Needs Improvement");
        assert_eq!(report.improvement_areas.len(), 5);
        assert_eq!(report.strengths, vec![FALLBACK_STRENGTH.to_string()]);
    }

    #[test]
    fn test_tier_boundaries() {
        // 12/15 = 80
        assert!(score_assessment(&answers([0, 0, 1, 1, 1])).unwrap().title.starts_with("Excellent"));
        // 11/15 = 73
        assert!(score_assessment(&answers([1, 1, 1, 1, 0])).unwrap().title.starts_with("Good"));
        // 9/15 = 60
        assert!(score_assessment(&answers([1, 1, 1, 2, 1])).unwrap().title.starts_with("Good"));
        // 6/15 = 40
        let report = score_assessment(&answers([2, 2, 1, 2, 2])).unwrap();
        assert_eq!(report.score, 40);
        assert!(report.title.starts_with("Average"));
        // 5/15 = 33
        assert_eq!(
            score_assessment(&answers([2, 2, 2, 2, 2])).unwrap().title,
            "Needs Improvement"
        );
    }

    #[test]
    fn test_strengths_and_improvements_follow_each_answer() {
        let report = score_assessment(&answers([0, 3, 1, 2, 0])).unwrap();
        assert_eq!(
            report.strengths,
            vec![
                QUESTIONS[0].strength.to_string(),
                QUESTIONS[2].strength.to_string(),
                QUESTIONS[4].strength.to_string(),
            ]
        );
        assert_eq!(
            report.improvement_areas,
            vec![
                QUESTIONS[1].improvement.to_string(),
                QUESTIONS[3].improvement.to_string(),
            ]
        );
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let input = answers([1, 2, 0, 3, 1]);
        assert_eq!(score_assessment(&input).unwrap(), score_assessment(&input).unwrap());
    }

    #[test]
    fn test_missing_answer_is_rejected() {
        let mut input = answers([0, 0, 0, 0, 0]);
        input.remove(&3);
        let err = score_assessment(&input).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("questions 3")));
    }

    #[test]
    fn test_out_of_range_answer_is_rejected() {
        let err = score_assessment(&answers([0, 4, 0, 0, 0])).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("question 2")));
        assert!(score_assessment(&answers([0, 0, -1, 0, 0])).is_err());
    }

    #[test]
    fn test_unknown_question_is_rejected() {
        let mut input = answers([0, 0, 0, 0, 0]);
        input.insert(6, 0);
        let err = score_assessment(&input).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("unknown question id 6")));
    }

    #[test]
    fn test_answers_deserialize_from_string_keys() {
        let input: AssessmentAnswers =
            serde_json::from_str(r#"{"1":0,"2":0,"3":0,"4":0,"5":0}"#).unwrap();
        assert_eq!(score_assessment(&input).unwrap().score, 100);
    }
}
