//! In-memory lead store for tests and dry runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{ImportError, Result};
use crate::lead::{CommittedLead, NewLead};

use super::LeadStore;

/// Lead store that keeps committed records in memory.
///
/// Supports deterministic failure injection for exercising the committer's
/// partial-failure semantics: with `fail_after(n)`, the first `n` create
/// calls succeed and every later one fails.
pub struct MemoryLeadStore {
    records: Mutex<Vec<CommittedLead>>,
    created: AtomicU64,
    fail_after: Option<u64>,
}

impl MemoryLeadStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            created: AtomicU64::new(0),
            fail_after: None,
        }
    }

    /// Fail every create call after the first `n` successes.
    pub fn fail_after(n: u64) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::new()
        }
    }

    /// Number of records committed so far.
    pub fn len(&self) -> usize {
        self.records.lock().expect("store lock poisoned").len()
    }

    /// Whether nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all committed records, in commit order.
    pub fn records(&self) -> Vec<CommittedLead> {
        self.records.lock().expect("store lock poisoned").clone()
    }
}

impl Default for MemoryLeadStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn create(&self, lead: NewLead) -> Result<CommittedLead> {
        let seq = self.created.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(limit) = self.fail_after {
            if seq > limit {
                return Err(ImportError::Store {
                    message: format!("simulated failure on create #{seq}"),
                });
            }
        }

        let now = Utc::now();
        let committed = CommittedLead {
            id: format!("lead_{seq:03}"),
            company_name: lead.company_name,
            person_name: lead.person_name,
            email: lead.email,
            phone: lead.phone,
            linkedin_profile_url: lead.linkedin_profile_url,
            country: lead.country,
            status: lead.status,
            owner_id: lead.owner_id,
            created_at: now,
            updated_at: now,
        };

        self.records
            .lock()
            .expect("store lock poisoned")
            .push(committed.clone());

        Ok(committed)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
