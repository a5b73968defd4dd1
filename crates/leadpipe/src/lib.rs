//! Leadpipe: bulk lead import pipeline for tabular CRM exports.
//!
//! Leadpipe ingests an arbitrary comma-delimited lead export whose column
//! names are not standardized, resolves those columns to a canonical
//! schema, validates and deduplicates every row, and commits accepted
//! records to a lead store in bounded batches. Rejected rows stay in the
//! run's session for review, where they can be approved into the store or
//! discarded.
//!
//! # Pipeline
//!
//! Header normalization → column mapping (alias dictionary, fuzzy stems,
//! content sniffing) → record extraction → validation rule chain (all
//! failure reasons accumulate) → chunked concurrent commit.
//!
//! # Example
//!
//! ```no_run
//! use leadpipe::{Importer, MemoryLeadStore};
//!
//! # async fn run() -> leadpipe::Result<()> {
//! let importer = Importer::new(MemoryLeadStore::new());
//! let outcome = importer
//!     .import("Company,Name,Email\nAcme Inc,Jane Doe,jane@acme.com\n")
//!     .await?;
//!
//! println!("committed: {}", outcome.summary().committed);
//! println!("rejected:  {}", outcome.summary().rejected);
//! # Ok(())
//! # }
//! ```

pub mod commit;
pub mod error;
pub mod input;
pub mod lead;
pub mod session;
pub mod store;
pub mod validation;

mod importer;

pub use commit::{BatchCommitter, DEFAULT_CHUNK_SIZE};
pub use error::{ImportError, Result};
pub use importer::{ImportConfig, ImportOutcome, ImportSummary, Importer, SourceSummary};
pub use input::{normalize_header, CanonicalField, ColumnMap, ColumnMapper, Parser, ParserConfig};
pub use lead::{CandidateLead, CommittedLead, LeadStatus, NewLead, RawCandidate, RejectedLead};
pub use session::{ImportSession, Progress};
pub use store::{LeadStore, MemoryLeadStore, RestLeadStore};
pub use validation::{ValidationEngine, Verdict};
