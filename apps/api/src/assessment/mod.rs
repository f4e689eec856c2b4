// Remote-work readiness assessment: fixed questionnaire, deterministic scoring.

pub mod handlers;
pub mod questions;
pub mod scorer;
