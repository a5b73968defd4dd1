//! Lead store collaborator: the external system accepted leads are
//! committed to.
//!
//! The pipeline only ever talks to the store through [`LeadStore`]; the
//! store owns id generation and timestamps. [`MemoryLeadStore`] backs tests
//! and dry runs, [`RestLeadStore`] talks to a real CRM backend over HTTP.

mod memory;
mod rest;

pub use memory::MemoryLeadStore;
pub use rest::{RestLeadStore, STORE_TOKEN_ENV, STORE_URL_ENV};

use async_trait::async_trait;

use crate::error::Result;
use crate::lead::{CommittedLead, NewLead};

/// Trait for lead store backends.
///
/// Implementations must be thread-safe (`Send + Sync`); create calls within
/// a commit chunk are issued concurrently against a shared reference.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Create one lead record. The store generates `id`, `created_at`, and
    /// `updated_at`.
    async fn create(&self, lead: NewLead) -> Result<CommittedLead>;

    /// Name of this backend (for logging/debugging).
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: LeadStore + ?Sized> LeadStore for std::sync::Arc<T> {
    async fn create(&self, lead: NewLead) -> Result<CommittedLead> {
        (**self).create(lead).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
