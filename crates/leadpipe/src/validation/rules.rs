//! Individual validation rules and the composite engine.
//!
//! Rules never short-circuit: every rule in the chain runs against every
//! candidate, and all fired reasons are surfaced together.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lead::RawCandidate;
use crate::session::ImportSession;

use super::Verdict;

/// Email syntax: something without whitespace or extra `@`s on both sides of
/// a single `@`, with a dotted domain.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Email domains that mark throwaway/sample data.
const FLAGGED_DOMAINS: &[&str] = &["example.com", "test.com"];

/// Names shorter than this are not real company/contact names.
const MIN_NAME_LEN: usize = 2;

/// Phone values shorter than this are not dialable.
const MIN_PHONE_LEN: usize = 7;

/// Trait for validation rules.
pub trait Rule {
    /// Check one candidate; return the rejection reason if the rule fires.
    fn check(&self, candidate: &RawCandidate, session: &ImportSession) -> Option<String>;
}

fn invalid_name(value: Option<&str>) -> bool {
    let trimmed = value.unwrap_or("").trim();
    trimmed.len() < MIN_NAME_LEN || trimmed.eq_ignore_ascii_case("not available")
}

/// Company name must be present, at least two characters, and not the
/// exporter's "Not Available" placeholder.
pub struct CompanyNameRule;

impl Rule for CompanyNameRule {
    fn check(&self, candidate: &RawCandidate, _session: &ImportSession) -> Option<String> {
        invalid_name(candidate.company_name.as_deref())
            .then(|| "Invalid or missing company name".to_string())
    }
}

/// Contact name: same rule as company name.
pub struct ContactNameRule;

impl Rule for ContactNameRule {
    fn check(&self, candidate: &RawCandidate, _session: &ImportSession) -> Option<String> {
        invalid_name(candidate.person_name.as_deref())
            .then(|| "Invalid or missing contact name".to_string())
    }
}

/// Email must survive mailto-artifact cleanup and match the syntax pattern.
pub struct EmailSyntaxRule;

impl Rule for EmailSyntaxRule {
    fn check(&self, candidate: &RawCandidate, _session: &ImportSession) -> Option<String> {
        let valid = candidate
            .cleaned_email()
            .map(|e| EMAIL_PATTERN.is_match(e))
            .unwrap_or(false);
        (!valid).then(|| "Invalid or missing email address".to_string())
    }
}

/// Emails on example/test domains are flagged even when syntactically valid.
pub struct ExampleDomainRule;

impl Rule for ExampleDomainRule {
    fn check(&self, candidate: &RawCandidate, _session: &ImportSession) -> Option<String> {
        let domain = candidate
            .cleaned_email()
            .and_then(|e| e.rsplit_once('@'))
            .map(|(_, d)| d.to_lowercase())?;

        FLAGGED_DOMAINS
            .contains(&domain.as_str())
            .then(|| "Example/test email address detected".to_string())
    }
}

/// A phone value, when present, must be at least seven characters long.
pub struct PhoneLengthRule;

impl Rule for PhoneLengthRule {
    fn check(&self, candidate: &RawCandidate, _session: &ImportSession) -> Option<String> {
        let trimmed = candidate.phone.as_deref().unwrap_or("").trim();
        (!trimmed.is_empty() && trimmed.len() < MIN_PHONE_LEN)
            .then(|| "Phone number appears too short".to_string())
    }
}

/// The candidate's cleaned email must not already be accepted or rejected
/// earlier in the same run.
pub struct DuplicateEmailRule;

impl Rule for DuplicateEmailRule {
    fn check(&self, candidate: &RawCandidate, session: &ImportSession) -> Option<String> {
        let key = candidate.dedup_key()?;
        session
            .is_known_email(&key)
            .then(|| "Duplicate email address".to_string())
    }
}

/// Composite engine running the full rule chain in order.
pub struct ValidationEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl ValidationEngine {
    /// Create an engine with the default rule chain.
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(CompanyNameRule),
                Box::new(ContactNameRule),
                Box::new(EmailSyntaxRule),
                Box::new(ExampleDomainRule),
                Box::new(PhoneLengthRule),
                Box::new(DuplicateEmailRule),
            ],
        }
    }

    /// Run every rule against the candidate and collect all fired reasons.
    pub fn validate(&self, candidate: &RawCandidate, session: &ImportSession) -> Verdict {
        let reasons: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(candidate, session))
            .collect();

        if reasons.is_empty() {
            Verdict::accept()
        } else {
            Verdict::reject(reasons)
        }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(company: &str, person: &str, email: &str) -> RawCandidate {
        RawCandidate {
            company_name: (!company.is_empty()).then(|| company.to_string()),
            person_name: (!person.is_empty()).then(|| person.to_string()),
            email: (!email.is_empty()).then(|| email.to_string()),
            row: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_candidate_is_accepted() {
        let engine = ValidationEngine::new();
        let session = ImportSession::new();

        let verdict = engine.validate(&candidate("Acme Inc", "Jane Doe", "jane@acme.com"), &session);
        assert!(!verdict.rejected);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn test_reasons_accumulate_without_short_circuit() {
        let engine = ValidationEngine::new();
        let session = ImportSession::new();

        let verdict = engine.validate(&candidate("A", "B", "not-an-email"), &session);
        assert!(verdict.rejected);
        assert_eq!(
            verdict.reasons,
            vec![
                "Invalid or missing company name",
                "Invalid or missing contact name",
                "Invalid or missing email address",
            ]
        );
    }

    #[test]
    fn test_not_available_placeholder_is_invalid() {
        let engine = ValidationEngine::new();
        let session = ImportSession::new();

        let verdict = engine.validate(
            &candidate("Not Available", "Jane Doe", "jane@acme.com"),
            &session,
        );
        assert_eq!(verdict.reasons, vec!["Invalid or missing company name"]);
    }

    #[test]
    fn test_example_domain_flagged_despite_valid_syntax() {
        let engine = ValidationEngine::new();
        let session = ImportSession::new();

        let verdict = engine.validate(
            &candidate("Acme Inc", "John Roe", "john@example.com"),
            &session,
        );
        assert!(verdict.rejected);
        assert_eq!(verdict.reasons, vec!["Example/test email address detected"]);

        let verdict = engine.validate(&candidate("Acme Inc", "John Roe", "john@TEST.com"), &session);
        assert_eq!(verdict.reasons, vec!["Example/test email address detected"]);
    }

    #[test]
    fn test_mailto_artifact_does_not_fail_syntax() {
        let engine = ValidationEngine::new();
        let session = ImportSession::new();

        let verdict = engine.validate(
            &candidate("Acme Inc", "Jane Doe", "jane@acme.com:mailto:jane@acme.com"),
            &session,
        );
        assert!(!verdict.rejected);
    }

    #[test]
    fn test_short_phone_fires_only_when_present() {
        let engine = ValidationEngine::new();
        let session = ImportSession::new();

        let mut raw = candidate("Acme Inc", "Jane Doe", "jane@acme.com");
        raw.phone = Some("12345".to_string());
        assert_eq!(
            engine.validate(&raw, &session).reasons,
            vec!["Phone number appears too short"]
        );

        raw.phone = Some("   ".to_string());
        assert!(!engine.validate(&raw, &session).rejected);

        raw.phone = Some("+1 555 1234567".to_string());
        assert!(!engine.validate(&raw, &session).rejected);
    }

    #[test]
    fn test_duplicate_against_accepted_and_rejected() {
        let engine = ValidationEngine::new();
        let mut session = ImportSession::new();
        session.record_accepted_email("jane@acme.com");

        let verdict = engine.validate(&candidate("Acme Inc", "Jane Doe", "Jane@Acme.com"), &session);
        assert_eq!(verdict.reasons, vec!["Duplicate email address"]);
    }
}
