//! Column resolution: raw headers to canonical field slots.
//!
//! Lead exports name their columns however the exporting tool felt like
//! ("Organization", "Decision Maker", "E-mail"...). Resolution runs three
//! tiers, first match wins per field, and a column index is claimed at most
//! once:
//!
//! 1. exact alias lookup on normalized headers;
//! 2. fuzzy pass: normalized header equal to the field name, or substring
//!    containment either direction against the field-name stem;
//! 3. content sniffing on the first data row (email by `@`, phone by a run
//!    of 7+ digits).

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ImportError, Result};
use crate::input::normalize_header;

/// Canonical field slots every input header must resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    CompanyName,
    PersonName,
    Email,
    Phone,
    LinkedinProfileUrl,
    Country,
}

impl CanonicalField {
    /// All fields, in resolution order.
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::CompanyName,
        CanonicalField::PersonName,
        CanonicalField::Email,
        CanonicalField::Phone,
        CanonicalField::LinkedinProfileUrl,
        CanonicalField::Country,
    ];

    /// Fields the import cannot proceed without.
    pub const REQUIRED: [CanonicalField; 3] = [
        CanonicalField::CompanyName,
        CanonicalField::PersonName,
        CanonicalField::Email,
    ];

    /// The canonical field name.
    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::CompanyName => "companyName",
            CanonicalField::PersonName => "personName",
            CanonicalField::Email => "email",
            CanonicalField::Phone => "phone",
            CanonicalField::LinkedinProfileUrl => "linkedinProfileUrl",
            CanonicalField::Country => "country",
        }
    }

    /// Whether the import aborts when this field is unresolved.
    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    /// Normalized form of the field name, for tier-2 equality.
    fn normalized_name(&self) -> &'static str {
        match self {
            CanonicalField::CompanyName => "companyname",
            CanonicalField::PersonName => "personname",
            CanonicalField::Email => "email",
            CanonicalField::Phone => "phone",
            CanonicalField::LinkedinProfileUrl => "linkedinprofileurl",
            CanonicalField::Country => "country",
        }
    }

    /// Field-name stem (trailing "Name" stripped), for tier-2 containment.
    fn stem(&self) -> &'static str {
        match self {
            CanonicalField::CompanyName => "company",
            CanonicalField::PersonName => "person",
            CanonicalField::Email => "email",
            CanonicalField::Phone => "phone",
            CanonicalField::LinkedinProfileUrl => "linkedinprofileurl",
            CanonicalField::Country => "country",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepted header spellings per canonical field, in normalized form.
static ALIASES: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::CompanyName,
        &[
            "company",
            "company name",
            "organization",
            "organisation",
            "business",
            "business name",
            "firm",
            "account",
            "account name",
            "employer",
        ],
    ),
    (
        CanonicalField::PersonName,
        &[
            "name",
            "full name",
            "contact",
            "contact name",
            "decision maker",
            "primary contact",
            "lead name",
            "person",
        ],
    ),
    (
        CanonicalField::Email,
        &[
            "email",
            "email address",
            "e mail",
            "contact email",
            "work email",
        ],
    ),
    (
        CanonicalField::Phone,
        &[
            "phone",
            "phone number",
            "mobile",
            "tel",
            "telephone",
            "cell",
            "cell phone",
            "contact number",
        ],
    ),
    (
        CanonicalField::LinkedinProfileUrl,
        &[
            "linkedin",
            "linkedin url",
            "linkedin profile",
            "linkedin profile url",
        ],
    ),
    (
        CanonicalField::Country,
        &["country", "location", "region", "state", "geo"],
    ),
];

static ALIAS_LOOKUP: Lazy<HashMap<&'static str, CanonicalField>> = Lazy::new(|| {
    let mut lookup = HashMap::new();
    for (field, aliases) in ALIASES {
        for alias in *aliases {
            lookup.insert(*alias, *field);
        }
    }
    lookup
});

/// A run of 7 or more consecutive digits reads as a phone number.
static PHONE_SNIFF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{7,}").expect("valid regex"));

/// Resolved mapping from canonical field to column index, built once per
/// import.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    slots: IndexMap<CanonicalField, usize>,
}

impl ColumnMap {
    /// Column index resolved for a field, if any.
    pub fn get(&self, field: CanonicalField) -> Option<usize> {
        self.slots.get(&field).copied()
    }

    /// Whether a field was resolved.
    pub fn contains(&self, field: CanonicalField) -> bool {
        self.slots.contains_key(&field)
    }

    /// Number of resolved fields.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate resolved `(field, column index)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, usize)> + '_ {
        self.slots.iter().map(|(f, i)| (*f, *i))
    }
}

/// Resolves raw headers (and, as a last resort, first-row content) to
/// canonical field slots.
pub struct ColumnMapper;

impl ColumnMapper {
    /// Create a new mapper.
    pub fn new() -> Self {
        Self
    }

    /// Resolve headers to a [`ColumnMap`], or fail with
    /// [`ImportError::MissingColumns`] naming every unresolved required
    /// field.
    pub fn resolve(&self, headers: &[String], first_row: Option<&[String]>) -> Result<ColumnMap> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let mut map = ColumnMap::default();
        let mut claimed = vec![false; headers.len()];

        // Tier 1: exact alias lookup.
        for (idx, header) in normalized.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            if let Some(&field) = ALIAS_LOOKUP.get(header.as_str()) {
                if !map.contains(field) {
                    tracing::debug!(field = field.name(), column = idx, header = %headers[idx], "resolved via alias");
                    map.slots.insert(field, idx);
                    claimed[idx] = true;
                }
            }
        }

        // Tier 2: field-name equality or stem containment, either direction.
        for field in CanonicalField::ALL {
            if map.contains(field) {
                continue;
            }
            let stem = field.stem();
            for (idx, header) in normalized.iter().enumerate() {
                if claimed[idx] || header.is_empty() {
                    continue;
                }
                if header == field.normalized_name()
                    || header.contains(stem)
                    || stem.contains(header.as_str())
                {
                    tracing::debug!(field = field.name(), column = idx, header = %headers[idx], "resolved via fuzzy match");
                    map.slots.insert(field, idx);
                    claimed[idx] = true;
                    break;
                }
            }
        }

        // Tier 3: content sniffing on the first data row.
        if let Some(row) = first_row {
            if !map.contains(CanonicalField::Email) {
                if let Some(idx) = row
                    .iter()
                    .enumerate()
                    .position(|(i, cell)| !claimed.get(i).copied().unwrap_or(true) && cell.contains('@'))
                {
                    tracing::debug!(column = idx, "resolved email via content sniff");
                    map.slots.insert(CanonicalField::Email, idx);
                    claimed[idx] = true;
                }
            }
            if !map.contains(CanonicalField::Phone) {
                if let Some(idx) = row.iter().enumerate().position(|(i, cell)| {
                    !claimed.get(i).copied().unwrap_or(true) && PHONE_SNIFF.is_match(cell)
                }) {
                    tracing::debug!(column = idx, "resolved phone via content sniff");
                    map.slots.insert(CanonicalField::Phone, idx);
                    claimed[idx] = true;
                }
            }
        }

        let missing: Vec<String> = CanonicalField::REQUIRED
            .iter()
            .filter(|f| !map.contains(**f))
            .map(|f| f.name().to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns {
                missing,
                headers: headers.to_vec(),
            });
        }

        Ok(map)
    }
}

impl Default for ColumnMapper {
    fn default() -> Self {
        Self::new()
    }
}
