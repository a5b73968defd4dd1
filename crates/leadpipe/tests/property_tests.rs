//! Property-based tests for the import pipeline.
//!
//! These verify the invariants that hold for arbitrary input:
//! the normalizer is idempotent and total, the column mapper never panics,
//! and verdicts never reject without a reason.

use proptest::prelude::*;

use leadpipe::{normalize_header, ColumnMapper, ImportSession, RawCandidate, ValidationEngine};

/// Arbitrary header-ish text, including unicode and symbols.
fn any_header() -> impl Strategy<Value = String> {
    "\\PC{0,60}"
}

/// Arbitrary optional cell text.
fn any_cell() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[ -~]{0,40}")
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in any_header()) {
        let once = normalize_header(&raw);
        prop_assert_eq!(normalize_header(&once), once);
    }

    #[test]
    fn normalize_output_is_canonical(raw in any_header()) {
        let normalized = normalize_header(&raw);

        prop_assert!(normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
        prop_assert!(!normalized.starts_with(' '));
        prop_assert!(!normalized.ends_with(' '));
        prop_assert!(!normalized.contains("  "));
    }

    #[test]
    fn normalize_ignores_case_and_punctuation(raw in "[a-z]{1,12}( [a-z]{1,12}){0,3}") {
        let shouty = format!("  {}!! ", raw.to_uppercase());
        prop_assert_eq!(normalize_header(&shouty), normalize_header(&raw));
    }

    #[test]
    fn mapper_never_panics(headers in proptest::collection::vec(any_header(), 0..8)) {
        // Resolution may fail with MissingColumns; it must never panic.
        let _ = ColumnMapper::new().resolve(&headers, None);
    }

    #[test]
    fn rejected_verdicts_always_carry_reasons(
        company in any_cell(),
        person in any_cell(),
        email in any_cell(),
        phone in any_cell(),
    ) {
        let engine = ValidationEngine::new();
        let session = ImportSession::new();

        let candidate = RawCandidate {
            company_name: company,
            person_name: person,
            email,
            phone,
            linkedin_profile_url: None,
            country: None,
            row: 2,
        };

        let verdict = engine.validate(&candidate, &session);
        if verdict.rejected {
            prop_assert!(!verdict.reasons.is_empty());
        } else {
            prop_assert!(verdict.reasons.is_empty());
        }
    }
}
