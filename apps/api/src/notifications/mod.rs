// Application-lifecycle notifications: in-memory event log with per-user views.

pub mod alerts;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod store;

pub use store::NotificationStore;
