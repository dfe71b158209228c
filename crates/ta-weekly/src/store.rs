//! Week-template selection persistence.
//!
//! The engine does not own a database; hosts hand it any key-value backend
//! that can store one template id per week-start key. The contract is a
//! single request/response: no retries, no transactions, last write wins.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// A failed store operation. Surfaced to the caller as-is; the caller's
/// in-memory selection stays untouched (no partial state).
#[derive(Debug)]
pub enum StoreError {
    /// The backend reported a failure (connection, quota, corruption...).
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Backend(msg) => write!(f, "template store backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// External key-value collaborator holding one selection row per week.
///
/// Object-safe and `Send + Sync` so hosts can share a `Box<dyn
/// WeekTemplateStore>` across async task boundaries.
#[async_trait]
pub trait WeekTemplateStore: Send + Sync {
    /// The stored template id for a week-start key, or `None`.
    async fn get(&self, week_key: &str) -> Result<Option<String>, StoreError>;

    /// Upserts the selection for a week-start key. Last write wins.
    async fn put(&self, week_key: &str, template_id: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Mutex-backed in-memory store, for tests and embedding hosts that persist
/// elsewhere.
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    rows: Mutex<BTreeMap<String, String>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WeekTemplateStore for MemoryTemplateStore {
    async fn get(&self, week_key: &str) -> Result<Option<String>, StoreError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))?;
        Ok(rows.get(week_key).cloned())
    }

    async fn put(&self, week_key: &str, template_id: &str) -> Result<(), StoreError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))?;
        rows.insert(week_key.to_string(), template_id.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
