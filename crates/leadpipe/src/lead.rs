//! Lead data model: raw candidates, validated candidates, rejections,
//! and the records exchanged with the lead store.
//!
//! The pipeline keeps a strict separation between pre-validation and
//! post-validation shapes: a [`RawCandidate`] is all-optional text straight
//! out of the record parser, while a [`CandidateLead`] only exists once the
//! validation engine has accepted it.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a lead in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    /// Freshly imported, not yet worked.
    #[default]
    New,
    /// Outreach has started.
    Contacted,
    /// Qualified as a real opportunity.
    Qualified,
    /// Converted to an account/opportunity.
    Converted,
}

/// Strip a `mailto:`-style artifact from an email cell: everything from the
/// first `:` onward is transport decoration, not address.
pub fn clean_email(raw: &str) -> &str {
    raw.trim().split(':').next().unwrap_or("").trim()
}

/// One candidate record as extracted from a data row, before validation.
///
/// Every field is optional text; nothing here has been checked. `row` is the
/// 1-based line number in the source file (header is row 1).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCandidate {
    pub company_name: Option<String>,
    pub person_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub country: Option<String>,
    pub row: usize,
}

impl RawCandidate {
    /// The candidate's email after mailto-artifact cleanup, if any text
    /// survives.
    pub fn cleaned_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(clean_email)
            .filter(|e| !e.is_empty())
    }

    /// Lowercased cleaned email, used as the session dedup key.
    pub fn dedup_key(&self) -> Option<String> {
        self.cleaned_email().map(|e| e.to_lowercase())
    }
}

/// A candidate that passed the validation engine.
///
/// Required fields are guaranteed non-empty; optionals are present only when
/// the source row carried a non-blank value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateLead {
    pub company_name: String,
    pub person_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl CandidateLead {
    /// Build from an accepted raw candidate. Total: missing required text
    /// collapses to an empty string, but the validation engine only calls
    /// this for candidates whose required fields passed.
    pub fn from_raw(raw: &RawCandidate) -> Self {
        Self {
            company_name: trimmed(&raw.company_name),
            person_name: trimmed(&raw.person_name),
            email: raw.cleaned_email().unwrap_or_default().to_string(),
            phone: optional(&raw.phone),
            linkedin_profile_url: optional(&raw.linkedin_profile_url),
            country: optional(&raw.country),
        }
    }

    /// Convert to the store's create payload.
    pub fn to_new(&self, owner_id: Option<&str>) -> NewLead {
        NewLead {
            company_name: self.company_name.clone(),
            person_name: self.person_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            linkedin_profile_url: self.linkedin_profile_url.clone(),
            country: self.country.clone(),
            status: LeadStatus::New,
            owner_id: owner_id.map(str::to_string),
        }
    }
}

/// Create payload sent to the lead store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLead {
    pub company_name: String,
    pub person_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub status: LeadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// The store's canonical record; id and timestamps are store-generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommittedLead {
    pub id: String,
    pub company_name: String,
    pub person_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub status: LeadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A candidate the validation engine turned away, held in the session for
/// review. Carries at least one reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedLead {
    /// Synthetic session-scoped id (`rej_NNN`).
    pub id: String,
    pub company_name: Option<String>,
    pub person_name: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// 1-based source row the candidate came from.
    pub row: usize,
    /// Every rule that fired, in chain order.
    pub reasons: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl RejectedLead {
    /// Wrap a rejected raw candidate with its accumulated reasons.
    pub fn new(raw: RawCandidate, reasons: Vec<String>) -> Self {
        debug_assert!(!reasons.is_empty(), "rejection without reasons");
        Self {
            id: generate_rejection_id(),
            company_name: raw.company_name,
            person_name: raw.person_name,
            email: raw.email,
            phone: raw.phone,
            linkedin_profile_url: raw.linkedin_profile_url,
            country: raw.country,
            row: raw.row,
            reasons,
            created_at: Utc::now(),
        }
    }

    /// Lowercased cleaned email, if any; mirrors [`RawCandidate::dedup_key`].
    pub fn dedup_key(&self) -> Option<String> {
        self.email
            .as_deref()
            .map(clean_email)
            .filter(|e| !e.is_empty())
            .map(str::to_lowercase)
    }

    /// Build a store payload from the raw fields as they were rejected.
    /// Used by Approve, which bypasses validation on purpose.
    pub fn to_new(&self, owner_id: Option<&str>) -> NewLead {
        NewLead {
            company_name: trimmed(&self.company_name),
            person_name: trimmed(&self.person_name),
            email: self
                .email
                .as_deref()
                .map(clean_email)
                .unwrap_or_default()
                .to_string(),
            phone: optional(&self.phone),
            linkedin_profile_url: optional(&self.linkedin_profile_url),
            country: optional(&self.country),
            status: LeadStatus::New,
            owner_id: owner_id.map(str::to_string),
        }
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Generate a unique session-scoped rejection id.
fn generate_rejection_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    format!("rej_{:03}", COUNTER.fetch_add(1, Ordering::SeqCst))
}
