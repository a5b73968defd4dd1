//! Run-scoped import session state: dedup bookkeeping, the rejection
//! store, and progress counters.
//!
//! One [`ImportSession`] lives for exactly one import run. It is threaded
//! by reference through the pipeline stages — there is no hidden global
//! state — and is only ever touched by the single sequential import flow,
//! so no locking is involved.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};
use crate::lead::{RawCandidate, RejectedLead};

/// Progress counters surfaced to the caller/UI layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

/// State for a single import run.
///
/// The accepted/rejected email sets are maintained incrementally as rows are
/// processed, so the duplicate check is a hash lookup rather than a rescan
/// of everything seen so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSession {
    accepted_emails: HashSet<String>,
    rejected_emails: HashSet<String>,
    rejected: Vec<RejectedLead>,
    pub progress: Progress,
}

impl ImportSession {
    /// Create a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an email is already accepted or rejected in this run.
    /// The check is case-insensitive on the cleaned address.
    pub fn is_known_email(&self, email: &str) -> bool {
        let key = email.to_lowercase();
        self.accepted_emails.contains(&key) || self.rejected_emails.contains(&key)
    }

    /// Record an email as accepted for this run.
    pub fn record_accepted_email(&mut self, email: &str) {
        self.accepted_emails.insert(email.to_lowercase());
    }

    /// Move a rejected candidate into the rejection store, indexing its
    /// email (when it has one) for the duplicate check.
    pub fn reject(&mut self, raw: RawCandidate, reasons: Vec<String>) -> &RejectedLead {
        let rejected = RejectedLead::new(raw, reasons);
        if let Some(key) = rejected.dedup_key() {
            self.rejected_emails.insert(key);
        }
        self.rejected.push(rejected);
        self.rejected.last().expect("just pushed")
    }

    /// All rejected candidates, in rejection order.
    pub fn rejected(&self) -> &[RejectedLead] {
        &self.rejected
    }

    /// Number of candidates accepted so far.
    pub fn accepted_count(&self) -> usize {
        self.accepted_emails.len()
    }

    /// Look up a rejected candidate by id.
    pub fn rejected_lead(&self, id: &str) -> Option<&RejectedLead> {
        self.rejected.iter().find(|r| r.id == id)
    }

    /// Remove and return a rejected candidate, for the Approve path.
    pub fn take_rejected(&mut self, id: &str) -> Option<RejectedLead> {
        let idx = self.rejected.iter().position(|r| r.id == id)?;
        Some(self.rejected.remove(idx))
    }

    /// Discard a rejected candidate permanently. The email stays in the
    /// seen set: deleting a rejection does not make its address importable
    /// again within the run.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let idx = self
            .rejected
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ImportError::RejectionNotFound(id.to_string()))?;
        self.rejected.remove(idx);
        Ok(())
    }
}
