use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::notifications::models::NotificationEvent;

/// Storage abstraction so the store can be exercised in isolation and later
/// backed by real persistence. Every method is one linearized operation.
pub trait NotificationRepository: Send + Sync {
    fn insert(&self, event: NotificationEvent) -> Result<(), RepositoryError>;
    /// All events in insertion order.
    fn all(&self) -> Result<Vec<NotificationEvent>, RepositoryError>;
    /// Returns whether an event with `id` exists.
    fn mark_read(&self, id: &str) -> Result<bool, RepositoryError>;
    /// Returns how many events flipped from unread to read.
    fn mark_read_where(
        &self,
        predicate: &(dyn Fn(&NotificationEvent) -> bool + Sync),
    ) -> Result<usize, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("notification {0} already exists")]
    Conflict(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Default)]
struct Log {
    events: Vec<NotificationEvent>,
    by_id: HashMap<String, usize>,
}

/// Append-only in-memory log indexed by id, guarded by a single mutex.
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    log: Mutex<Log>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Log>, RepositoryError> {
        self.log
            .lock()
            .map_err(|_| RepositoryError::Unavailable("notification log lock poisoned".to_string()))
    }
}

impl NotificationRepository for InMemoryNotificationRepository {
    fn insert(&self, event: NotificationEvent) -> Result<(), RepositoryError> {
        let mut log = self.lock()?;
        if log.by_id.contains_key(&event.id) {
            return Err(RepositoryError::Conflict(event.id));
        }
        let idx = log.events.len();
        log.by_id.insert(event.id.clone(), idx);
        log.events.push(event);
        Ok(())
    }

    fn all(&self) -> Result<Vec<NotificationEvent>, RepositoryError> {
        Ok(self.lock()?.events.clone())
    }

    fn mark_read(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut log = self.lock()?;
        match log.by_id.get(id).copied() {
            Some(idx) => {
                log.events[idx].is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn mark_read_where(
        &self,
        predicate: &(dyn Fn(&NotificationEvent) -> bool + Sync),
    ) -> Result<usize, RepositoryError> {
        let mut log = self.lock()?;
        let mut changed = 0;
        for event in log.events.iter_mut().filter(|e| !e.is_read) {
            if predicate(event) {
                event.is_read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::models::{NotificationInput, NotificationKind};
    use chrono::Utc;

    fn event(id: &str, employer_id: u64) -> NotificationEvent {
        NotificationEvent::from_input(
            id.to_string(),
            NotificationInput {
                kind: NotificationKind::NewApplication,
                job_id: 1,
                job_title: "Backend Developer".to_string(),
                company: "ServerTech".to_string(),
                applicant_id: None,
                applicant_name: Some("Jane Smith".to_string()),
                employer_id: Some(employer_id),
                status: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_duplicate_id_conflicts() {
        let repo = InMemoryNotificationRepository::new();
        repo.insert(event("a", 1)).unwrap();
        assert!(matches!(repo.insert(event("a", 2)), Err(RepositoryError::Conflict(id)) if id == "a"));
        assert_eq!(repo.all().unwrap().len(), 1);
    }

    #[test]
    fn test_mark_read_reports_presence() {
        let repo = InMemoryNotificationRepository::new();
        repo.insert(event("a", 1)).unwrap();
        assert!(repo.mark_read("a").unwrap());
        assert!(repo.mark_read("a").unwrap());
        assert!(!repo.mark_read("missing").unwrap());
        assert!(repo.all().unwrap()[0].is_read);
    }

    #[test]
    fn test_mark_read_where_counts_only_changes() {
        let repo = InMemoryNotificationRepository::new();
        repo.insert(event("a", 1)).unwrap();
        repo.insert(event("b", 1)).unwrap();
        repo.insert(event("c", 2)).unwrap();
        repo.mark_read("a").unwrap();

        let changed = repo.mark_read_where(&|e| e.employer_id == Some(1)).unwrap();
        assert_eq!(changed, 1);
        let unread: Vec<String> = repo
            .all()
            .unwrap()
            .into_iter()
            .filter(|e| !e.is_read)
            .map(|e| e.id)
            .collect();
        assert_eq!(unread, vec!["c".to_string()]);
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let repo = InMemoryNotificationRepository::new();
        for id in ["x", "y", "z"] {
            repo.insert(event(id, 1)).unwrap();
        }
        let ids: Vec<String> = repo.all().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }
}
