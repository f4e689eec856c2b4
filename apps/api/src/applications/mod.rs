// Job applications: submission and employer responses, each raising a notification.

pub mod handlers;
pub mod models;
pub mod service;

pub use service::ApplicationService;
