//! Cooperative cancellation for provider-backed requests.
//!
//! A `CancelHandle` flips a watch channel; every `CancelSignal` cloned from the
//! pair observes it. `InFlightRequests` maps caller-chosen request ids to
//! handles so a client can abandon a slow parse from a second HTTP call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::http::HeaderMap;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::errors::AppError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

#[derive(Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CancelSignal {
    /// A signal nobody can fire.
    pub fn never() -> Self {
        cancel_pair().1
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancelled. Pends forever if the handle is dropped first.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Registry of cancellable requests keyed by `x-request-id`.
#[derive(Clone, Default)]
pub struct InFlightRequests {
    inner: Arc<Mutex<HashMap<String, CancelHandle>>>,
}

/// Deregisters the request id when the request finishes or is dropped.
pub struct InFlightGuard {
    registry: InFlightRequests,
    id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.id);
        debug!(request_id = %self.id, "Request deregistered");
    }
}

impl InFlightRequests {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CancelHandle>> {
        // The map holds no invariants a panicking holder could break.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, id: &str) -> Result<(CancelSignal, InFlightGuard), AppError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::Validation(format!(
                "{REQUEST_ID_HEADER} cannot be empty"
            )));
        }

        let mut map = self.lock();
        if map.contains_key(id) {
            return Err(AppError::Validation(format!(
                "request {id} is already in flight"
            )));
        }
        let (handle, signal) = cancel_pair();
        map.insert(id.to_string(), handle);

        Ok((
            signal,
            InFlightGuard {
                registry: self.clone(),
                id: id.to_string(),
            },
        ))
    }

    /// Registers the request when the caller supplied an `x-request-id`.
    /// Without one the request can only be abandoned by dropping the connection.
    pub fn track(
        &self,
        headers: &HeaderMap,
    ) -> Result<(CancelSignal, Option<InFlightGuard>), AppError> {
        match headers.get(REQUEST_ID_HEADER) {
            Some(value) => {
                let id = value.to_str().map_err(|_| {
                    AppError::Validation(format!("{REQUEST_ID_HEADER} must be visible ASCII"))
                })?;
                let (signal, guard) = self.register(id)?;
                Ok((signal, Some(guard)))
            }
            None => Ok((CancelSignal::never(), None)),
        }
    }

    /// Returns false when no request with that id is in flight.
    pub fn cancel(&self, id: &str) -> bool {
        match self.lock().get(id) {
            Some(handle) => {
                handle.cancel();
                info!(request_id = %id, "Request cancelled by caller");
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().len()
    }
}
