//! Application state for the PaySphere API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::engine::PayrollEngine;

/// Shared application state.
///
/// All handlers share one engine. Every request takes the lock for its whole
/// operation, so identifier allocation and uniqueness checks never interleave.
#[derive(Debug, Clone)]
pub struct AppState {
    engine: Arc<Mutex<PayrollEngine>>,
}

impl AppState {
    /// Creates a new application state around `engine`.
    pub fn new(engine: PayrollEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Locks the engine for the duration of one operation.
    pub async fn engine(&self) -> MutexGuard<'_, PayrollEngine> {
        self.engine.lock().await
    }
}
