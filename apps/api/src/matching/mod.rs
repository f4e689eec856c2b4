// Skill matching and job ranking.
// Scoring is pure and CPU-bound; nothing here calls the inference provider.

pub mod catalog;
pub mod handlers;
pub mod ranker;
pub mod skills;
