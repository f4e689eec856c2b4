pub mod advisor;
pub mod handlers;

pub use advisor::InterviewAdvisor;
