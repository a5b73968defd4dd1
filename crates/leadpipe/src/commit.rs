//! Batch committer: chunked, partially-concurrent writes to the lead store.
//!
//! Chunks commit strictly in sequence; within a chunk every create call is
//! issued concurrently and joined before the next chunk starts. A short
//! cooperative yield runs between chunks so a single-threaded host stays
//! responsive. On a failed create the current chunk's join fails and all
//! remaining chunks are abandoned; earlier chunks are not rolled back.

use futures::future::try_join_all;

use crate::error::{ImportError, Result};
use crate::lead::{CandidateLead, CommittedLead};
use crate::session::ImportSession;
use crate::store::LeadStore;

/// Default number of leads committed per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Commits accepted candidates to the lead store in bounded batches.
pub struct BatchCommitter {
    chunk_size: usize,
}

impl BatchCommitter {
    /// Create a committer with the default chunk size.
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create a committer with a custom chunk size (clamped to at least 1).
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Commit all candidates, updating the session's progress as chunks
    /// complete.
    ///
    /// Returns committed records in chunk order (intra-chunk order follows
    /// the input, regardless of call completion order). On failure the
    /// error reports how many records earlier chunks had already committed.
    pub async fn commit(
        &self,
        store: &dyn LeadStore,
        leads: &[CandidateLead],
        owner_id: Option<&str>,
        session: &mut ImportSession,
    ) -> Result<Vec<CommittedLead>> {
        let total = leads.len();
        session.progress.total = total;

        if leads.is_empty() {
            return Ok(Vec::new());
        }

        // Small imports commit in one concurrent pass.
        if total <= self.chunk_size {
            let committed = self
                .commit_chunk(store, leads, owner_id)
                .await
                .map_err(|e| ImportError::Commit {
                    committed: 0,
                    message: e.to_string(),
                })?;
            session.progress.current = committed.len();
            session.progress.message = format!("Committed {} of {} leads", committed.len(), total);
            return Ok(committed);
        }

        let mut all = Vec::with_capacity(total);

        for (i, chunk) in leads.chunks(self.chunk_size).enumerate() {
            if i > 0 {
                // Let the host's event loop breathe between chunks.
                tokio::task::yield_now().await;
            }

            match self.commit_chunk(store, chunk, owner_id).await {
                Ok(mut committed) => {
                    all.append(&mut committed);
                    session.progress.current = all.len();
                    session.progress.message = format!("Committed {} of {} leads", all.len(), total);
                    tracing::debug!(chunk = i, committed = all.len(), total, "chunk committed");
                }
                Err(e) => {
                    tracing::warn!(chunk = i, committed = all.len(), error = %e, "commit aborted");
                    return Err(ImportError::Commit {
                        committed: all.len(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(all)
    }

    /// Issue every create call in the chunk concurrently and join.
    async fn commit_chunk(
        &self,
        store: &dyn LeadStore,
        chunk: &[CandidateLead],
        owner_id: Option<&str>,
    ) -> Result<Vec<CommittedLead>> {
        try_join_all(chunk.iter().map(|lead| store.create(lead.to_new(owner_id)))).await
    }
}

impl Default for BatchCommitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::RawCandidate;
    use crate::store::MemoryLeadStore;

    fn leads(n: usize) -> Vec<CandidateLead> {
        (0..n)
            .map(|i| {
                CandidateLead::from_raw(&RawCandidate {
                    company_name: Some(format!("Company {i}")),
                    person_name: Some(format!("Person {i}")),
                    email: Some(format!("person{i}@company{i}.com")),
                    row: i + 2,
                    ..Default::default()
                })
            })
            .collect()
    }

    #[tokio::test]
    async fn test_small_import_commits_in_one_pass() {
        let store = MemoryLeadStore::new();
        let mut session = ImportSession::new();
        let committer = BatchCommitter::new();

        let committed = committer
            .commit(&store, &leads(3), None, &mut session)
            .await
            .unwrap();

        assert_eq!(committed.len(), 3);
        assert_eq!(session.progress.current, 3);
        assert_eq!(session.progress.total, 3);
    }

    #[tokio::test]
    async fn test_committed_order_matches_input_order() {
        let store = MemoryLeadStore::new();
        let mut session = ImportSession::new();
        let committer = BatchCommitter::with_chunk_size(10);

        let input = leads(25);
        let committed = committer
            .commit(&store, &input, None, &mut session)
            .await
            .unwrap();

        let emails: Vec<_> = committed.iter().map(|c| c.email.as_str()).collect();
        let expected: Vec<_> = input.iter().map(|l| l.email.as_str()).collect();
        assert_eq!(emails, expected);
    }

    #[tokio::test]
    async fn test_empty_input_is_a_no_op() {
        let store = MemoryLeadStore::new();
        let mut session = ImportSession::new();

        let committed = BatchCommitter::new()
            .commit(&store, &[], None, &mut session)
            .await
            .unwrap();

        assert!(committed.is_empty());
        assert_eq!(session.progress.total, 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_owner_id_is_stamped_on_records() {
        let store = MemoryLeadStore::new();
        let mut session = ImportSession::new();

        let committed = BatchCommitter::new()
            .commit(&store, &leads(1), Some("user_42"), &mut session)
            .await
            .unwrap();

        assert_eq!(committed[0].owner_id.as_deref(), Some("user_42"));
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_chunks_without_rollback() {
        // 12 leads, chunks of 5: two full chunks succeed, every create in
        // the third fails.
        let store = MemoryLeadStore::fail_after(10);
        let mut session = ImportSession::new();
        let committer = BatchCommitter::with_chunk_size(5);

        let err = committer
            .commit(&store, &leads(12), None, &mut session)
            .await
            .unwrap_err();

        match err {
            ImportError::Commit { committed, .. } => assert_eq!(committed, 10),
            other => panic!("expected Commit error, got {other:?}"),
        }
        // Earlier chunks stay committed.
        assert_eq!(store.len(), 10);
        assert_eq!(session.progress.current, 10);
        assert!(session.progress.message.contains("10 of 12"));
    }
}
