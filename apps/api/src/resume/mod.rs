// Resume parsing: backend endpoint first, direct provider call as the single fallback.

pub mod handlers;
pub mod models;
pub mod parser;
pub mod strategies;

pub use parser::ResumeParser;
