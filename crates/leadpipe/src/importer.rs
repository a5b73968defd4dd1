//! Import orchestration and the public pipeline API.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::commit::{BatchCommitter, DEFAULT_CHUNK_SIZE};
use crate::error::{ImportError, Result};
use crate::input::{extract_candidate, ColumnMapper, ImportTable, Parser, ParserConfig};
use crate::lead::{CandidateLead, CommittedLead};
use crate::session::ImportSession;
use crate::store::LeadStore;
use crate::validation::ValidationEngine;

/// Configuration for an import run.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Leads committed per chunk.
    pub chunk_size: usize,
    /// Owner stamped on every created lead.
    pub owner_id: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            owner_id: None,
        }
    }
}

/// Provenance of one parsed import blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSummary {
    /// SHA-256 of the raw input text.
    pub hash: String,
    /// Input size in bytes.
    pub size_bytes: u64,
    /// Number of data rows (excluding the header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the import ran.
    pub imported_at: DateTime<Utc>,
}

impl SourceSummary {
    fn of(text: &str, table: &ImportTable) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());

        Self {
            hash: format!("sha256:{:x}", hasher.finalize()),
            size_bytes: text.len() as u64,
            row_count: table.row_count(),
            column_count: table.column_count(),
            imported_at: Utc::now(),
        }
    }
}

/// Counts for the user-facing outcome line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImportSummary {
    pub committed: usize,
    pub rejected: usize,
}

/// Result of a completed import run.
///
/// The session is handed back so the caller can review rejections and drive
/// reconciliation ([`Importer::approve`], [`ImportSession::delete`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub source: SourceSummary,
    /// Committed records, in chunk-commit order.
    pub committed: Vec<CommittedLead>,
    pub session: ImportSession,
}

impl ImportOutcome {
    /// Committed/rejected counts.
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            committed: self.committed.len(),
            rejected: self.session.rejected().len(),
        }
    }
}

/// The bulk lead import pipeline.
pub struct Importer {
    config: ImportConfig,
    parser: Parser,
    validation: ValidationEngine,
    store: Arc<dyn LeadStore>,
}

impl Importer {
    /// Create an importer committing to the given store, with default
    /// configuration.
    pub fn new(store: impl LeadStore + 'static) -> Self {
        Self {
            config: ImportConfig::default(),
            parser: Parser::new(),
            validation: ValidationEngine::new(),
            store: Arc::new(store),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.parser = Parser::with_config(config.parser.clone());
        self.config = config;
        self
    }

    /// Run one import over a text blob.
    ///
    /// Fails fast (before any row is processed) on unrecognizable input or
    /// unresolved required columns. Validation rejections do not fail the
    /// run; they land in the returned session. A store failure mid-commit
    /// aborts the remaining chunks and surfaces as
    /// [`ImportError::Commit`] with the already-committed count.
    pub async fn import(&self, text: &str) -> Result<ImportOutcome> {
        let table = self.parser.parse_str(text)?;
        let columns =
            ColumnMapper::new().resolve(&table.headers, table.rows.first().map(|r| r.as_slice()))?;

        tracing::info!(
            rows = table.row_count(),
            mapped = columns.len(),
            "columns resolved"
        );

        let mut session = ImportSession::new();
        let mut accepted: Vec<CandidateLead> = Vec::new();

        for (i, row) in table.rows.iter().enumerate() {
            // Header occupies row 1 of the source file.
            let raw = extract_candidate(&columns, row, i + 2);
            let verdict = self.validation.validate(&raw, &session);

            if verdict.rejected {
                session.reject(raw, verdict.reasons);
            } else {
                let lead = CandidateLead::from_raw(&raw);
                session.record_accepted_email(&lead.email);
                accepted.push(lead);
            }
        }

        tracing::info!(
            accepted = accepted.len(),
            rejected = session.rejected().len(),
            "validation complete"
        );

        let committer = BatchCommitter::with_chunk_size(self.config.chunk_size);
        let committed = committer
            .commit(
                self.store.as_ref(),
                &accepted,
                self.config.owner_id.as_deref(),
                &mut session,
            )
            .await?;

        session.progress.message = "Import complete!".to_string();

        Ok(ImportOutcome {
            source: SourceSummary::of(text, &table),
            committed,
            session,
        })
    }

    /// Run one import over a file on disk.
    pub async fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportOutcome> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.import(&text).await
    }

    /// Approve a rejected lead: re-submit its raw fields to the commit path
    /// without re-running validation, remove it from the rejected set, and
    /// record its email as accepted.
    ///
    /// If the store call fails the lead stays in the rejected set.
    pub async fn approve(
        &self,
        session: &mut ImportSession,
        id: &str,
    ) -> Result<CommittedLead> {
        let payload = session
            .rejected_lead(id)
            .ok_or_else(|| ImportError::RejectionNotFound(id.to_string()))?
            .to_new(self.config.owner_id.as_deref());

        let committed = self.store.create(payload).await?;

        if let Some(rejected) = session.take_rejected(id) {
            if let Some(key) = rejected.dedup_key() {
                session.record_accepted_email(&key);
            }
        }

        tracing::info!(id, lead = %committed.id, "rejected lead approved");
        Ok(committed)
    }
}
