//! Skill matching: compares a candidate's skills against a job's requirements.
//!
//! Two comparison modes:
//! - `Fuzzy` (default): a candidate skill covers a requirement when either name
//!   contains the other, case-insensitively. "Java" therefore covers "JavaScript".
//! - `Exact`: names are lowercased, mapped through `SYNONYMS`, and compared for equality.
//!
//! Scores are always expressed over the requirement list, so a candidate listing
//! many overlapping skills can never push a score past 100.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Aliases collapsed to one canonical name in `Exact` mode.
const SYNONYMS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ecmascript", "javascript"),
    ("ts", "typescript"),
    ("node", "node.js"),
    ("nodejs", "node.js"),
    ("reactjs", "react"),
    ("react.js", "react"),
    ("k8s", "kubernetes"),
    ("golang", "go"),
    ("postgres", "postgresql"),
    ("ml", "machine learning"),
    ("ci cd", "ci/cd"),
    ("cicd", "ci/cd"),
    ("amazon web services", "aws"),
    ("ux", "user experience"),
];

// ────────────────────────────────────────────────────────────────────────────
// SkillSet
// ────────────────────────────────────────────────────────────────────────────

/// Largest skill list accepted from a request body.
pub const MAX_SKILLS: usize = 500;

/// Ordered set of skill names, unique under case-insensitive comparison.
///
/// The first spelling seen wins; insertion order is kept so output is deterministic.
/// Serializes as a plain JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet {
    names: Vec<String>,
    // Lowercased `names`, for O(1) membership.
    keys: HashSet<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a skill unless an equal (case-insensitive) one is present.
    /// Blank names are ignored. Returns whether the set changed.
    pub fn insert(&mut self, skill: impl Into<String>) -> bool {
        let skill = skill.into();
        let trimmed = skill.trim();
        if trimmed.is_empty() || !self.keys.insert(trimmed.to_lowercase()) {
            return false;
        }
        self.names.push(trimmed.to_string());
        true
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.keys.contains(&skill.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for SkillSet {
    type Error = String;

    fn try_from(skills: Vec<String>) -> Result<Self, Self::Error> {
        if skills.len() > MAX_SKILLS {
            return Err(format!(
                "at most {MAX_SKILLS} skills are allowed, got {}",
                skills.len()
            ));
        }
        Ok(skills.into_iter().collect())
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.names
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Match mode
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Fuzzy,
    Exact,
}

impl MatchMode {
    /// True if `candidate` covers `required` under this mode.
    pub fn relates(self, candidate: &str, required: &str) -> bool {
        let candidate = candidate.trim().to_lowercase();
        let required = required.trim().to_lowercase();
        if candidate.is_empty() || required.is_empty() {
            return false;
        }
        match self {
            MatchMode::Fuzzy => candidate.contains(&required) || required.contains(&candidate),
            MatchMode::Exact => canonical(&candidate) == canonical(&required),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fuzzy" => Ok(MatchMode::Fuzzy),
            "exact" => Ok(MatchMode::Exact),
            other => Err(format!("unknown skill match mode '{other}'")),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Fuzzy => f.write_str("fuzzy"),
            MatchMode::Exact => f.write_str("exact"),
        }
    }
}

fn canonical(lowered: &str) -> &str {
    SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(lowered)
}

// ────────────────────────────────────────────────────────────────────────────
// Matching
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
    pub score: u32, // 0 – 100
    pub recommendations: Vec<String>,
}

/// Stateless matcher. Cheap to copy; holds only the comparison mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillMatcher {
    mode: MatchMode,
}

impl SkillMatcher {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn match_skills(
        &self,
        candidate: &SkillSet,
        required: &SkillSet,
    ) -> Result<MatchResult, AppError> {
        if required.is_empty() {
            return Err(AppError::DivisionGuard(
                "requiredSkills must contain at least one skill".to_string(),
            ));
        }

        let mut matched_skills = SkillSet::new();
        let mut missing_skills = SkillSet::new();

        for requirement in required.iter() {
            let covered = candidate
                .iter()
                .any(|skill| self.mode.relates(skill, requirement));
            if covered {
                matched_skills.insert(requirement);
            } else {
                missing_skills.insert(requirement);
            }
        }

        let score = percent(matched_skills.len(), required.len());
        let recommendations = build_recommendations(score, &missing_skills);

        Ok(MatchResult {
            matched_skills,
            missing_skills,
            score,
            recommendations,
        })
    }
}

/// `round(100 * part / whole)`; `whole` must be non-zero.
fn percent(part: usize, whole: usize) -> u32 {
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

fn build_recommendations(score: u32, missing: &SkillSet) -> Vec<String> {
    let mut recommendations = Vec::with_capacity(2);

    let tier = if score < 50 {
        "This job may not be a strong match for your current skills. Consider upskilling or looking for more relevant positions."
    } else if score < 80 {
        "You have a decent match with this job. Highlight your existing relevant skills in your application."
    } else {
        "You're a great match for this position! Make sure to showcase your extensive experience with these skills."
    };
    recommendations.push(tier.to_string());

    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().collect();
        recommendations.push(format!(
            "Consider developing skills in: {}",
            names.join(", ")
        ));
    }

    recommendations
}
