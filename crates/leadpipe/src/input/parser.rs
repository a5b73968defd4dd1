//! Tabular text parsing and per-row record extraction.
//!
//! Lead exports arrive as a text blob: comma-separated, one record per line,
//! first non-empty line holding the headers. The format carries no real
//! quoting or escaping discipline, so the reader runs with quoting disabled
//! and a single layer of decorative wrapping quotes is stripped per cell at
//! extraction time.

use crate::error::{ImportError, Result};
use crate::input::ColumnMap;
use crate::input::mapper::CanonicalField;
use crate::lead::{clean_email, RawCandidate};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Parsed tabular input: raw headers plus raw data rows.
#[derive(Debug, Clone)]
pub struct ImportTable {
    /// Header cells exactly as they appeared in the file.
    pub headers: Vec<String>,
    /// Data rows, padded/truncated to the header width.
    pub rows: Vec<Vec<String>>,
}

impl ImportTable {
    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Parses lead-export text blobs.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a text blob into headers and data rows.
    ///
    /// Line endings are normalized (`\r\n`/`\r` -> `\n`) before anything
    /// else; blank lines are skipped. Fails fast with
    /// [`ImportError::FileFormat`] when there is no header plus at least one
    /// data row, or when the header row carries no delimiter at all.
    pub fn parse_str(&self, text: &str) -> Result<ImportTable> {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

        let lines: Vec<&str> = normalized
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.len() < 2 {
            return Err(ImportError::FileFormat(
                "expected a header row and at least one data row".to_string(),
            ));
        }

        let delimiter = self.config.delimiter as char;
        if !lines[0].contains(delimiter) {
            return Err(ImportError::FileFormat(format!(
                "header row contains no '{delimiter}' delimiter"
            )));
        }

        // Quoting off: cells keep their decorative quotes until extraction.
        let joined = lines.join("\n");
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(joined.as_bytes());

        let mut records = reader.records();

        let headers: Vec<String> = match records.next() {
            Some(Ok(record)) => record.iter().map(|s| s.to_string()).collect(),
            Some(Err(e)) => {
                return Err(ImportError::FileFormat(format!(
                    "unreadable header row: {e}"
                )));
            }
            None => {
                return Err(ImportError::FileFormat("no header row found".to_string()));
            }
        };

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in records {
            let record =
                result.map_err(|e| ImportError::FileFormat(format!("unreadable data row: {e}")))?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            while row.len() < expected_cols {
                row.push(String::new());
            }
            row.truncate(expected_cols);

            rows.push(row);
        }

        if rows.is_empty() {
            return Err(ImportError::FileFormat(
                "expected a header row and at least one data row".to_string(),
            ));
        }

        Ok(ImportTable { headers, rows })
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract one raw candidate from a data row using the resolved column map.
///
/// Each mapped cell is trimmed and has a single pair of wrapping quote
/// characters stripped. The email slot additionally drops any
/// `mailto:`-style artifact (everything from the first `:` onward); other
/// fields keep their colons, so LinkedIn URLs survive intact.
pub fn extract_candidate(map: &ColumnMap, row: &[String], row_number: usize) -> RawCandidate {
    let cell = |field: CanonicalField| -> Option<String> {
        let idx = map.get(field)?;
        let value = strip_wrapping_quotes(row.get(idx)?.trim());
        let value = if field == CanonicalField::Email {
            clean_email(value)
        } else {
            value
        };
        (!value.is_empty()).then(|| value.to_string())
    };

    RawCandidate {
        company_name: cell(CanonicalField::CompanyName),
        person_name: cell(CanonicalField::PersonName),
        email: cell(CanonicalField::Email),
        phone: cell(CanonicalField::Phone),
        linkedin_profile_url: cell(CanonicalField::LinkedinProfileUrl),
        country: cell(CanonicalField::Country),
        row: row_number,
    }
}

/// Strip one layer of matching wrapping quotes (`"..."` or `'...'`).
fn strip_wrapping_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ColumnMapper;

    fn table(text: &str) -> ImportTable {
        Parser::new().parse_str(text).unwrap()
    }

    #[test]
    fn test_parse_splits_header_and_rows() {
        let table = table("Company,Name,Email\nAcme Inc,Jane Doe,jane@acme.com\n");
        assert_eq!(table.headers, vec!["Company", "Name", "Email"]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows[0][2], "jane@acme.com");
    }

    #[test]
    fn test_parse_normalizes_line_endings_and_skips_blanks() {
        let table = table("Company,Name,Email\r\n\r\nAcme,Jane,j@a.co\rBeta,Bob,b@b.co\n\n");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1][0], "Beta");
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let table = table("Company,Name,Email\nAcme,Jane\n");
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], "");
    }

    #[test]
    fn test_parse_rejects_header_only_input() {
        let err = Parser::new().parse_str("Company,Name,Email\n").unwrap_err();
        assert!(matches!(err, ImportError::FileFormat(_)));
    }

    #[test]
    fn test_parse_rejects_undelimited_text() {
        let err = Parser::new()
            .parse_str("just a paragraph of prose\nwith a second line\n")
            .unwrap_err();
        assert!(matches!(err, ImportError::FileFormat(_)));
    }

    #[test]
    fn test_extract_strips_wrapping_quotes_once() {
        let table = table("Company,Name,Email\n\"Acme, Inc\",'Jane',\"jane@acme.com\"\n");
        // Quoting is disabled, so the quoted comma split the cell; the
        // remaining cells keep exactly one stripped quote layer.
        let map = ColumnMapper::new()
            .resolve(&table.headers, table.rows.first().map(|r| r.as_slice()))
            .unwrap();
        let candidate = extract_candidate(&map, &table.rows[0], 2);
        assert_eq!(candidate.company_name.as_deref(), Some("\"Acme"));
        assert_eq!(candidate.person_name.as_deref(), Some("Inc\""));
    }

    #[test]
    fn test_extract_cleans_email_but_not_urls() {
        let table = table(
            "Company,Name,Email,LinkedIn\n\
             Acme,Jane,jane@acme.com:mailto:jane@acme.com,https://linkedin.com/in/janedoe\n",
        );
        let map = ColumnMapper::new()
            .resolve(&table.headers, table.rows.first().map(|r| r.as_slice()))
            .unwrap();
        let candidate = extract_candidate(&map, &table.rows[0], 2);

        assert_eq!(candidate.email.as_deref(), Some("jane@acme.com"));
        assert_eq!(
            candidate.linkedin_profile_url.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
    }

    #[test]
    fn test_extract_blank_cells_become_none() {
        let table = table("Company,Name,Email,Phone\nAcme,Jane,jane@acme.com,\n");
        let map = ColumnMapper::new()
            .resolve(&table.headers, table.rows.first().map(|r| r.as_slice()))
            .unwrap();
        let candidate = extract_candidate(&map, &table.rows[0], 2);
        assert!(candidate.phone.is_none());
    }
}
