//! Validation engine: the ordered rule chain applied to every candidate.

mod rules;

pub use rules::{
    CompanyNameRule, ContactNameRule, DuplicateEmailRule, EmailSyntaxRule, ExampleDomainRule,
    PhoneLengthRule, Rule, ValidationEngine,
};

use serde::{Deserialize, Serialize};

/// The engine's accept/reject decision for one candidate.
///
/// `reasons` holds every rule that fired, in chain order; it is never empty
/// when `rejected` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub rejected: bool,
    pub reasons: Vec<String>,
}

impl Verdict {
    /// An accepting verdict.
    pub fn accept() -> Self {
        Self {
            rejected: false,
            reasons: Vec::new(),
        }
    }

    /// A rejecting verdict carrying at least one reason.
    pub fn reject(reasons: Vec<String>) -> Self {
        debug_assert!(!reasons.is_empty(), "rejecting verdict without reasons");
        Self {
            rejected: true,
            reasons,
        }
    }
}
