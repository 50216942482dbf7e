//! Uploaded spreadsheets: storage interface, CSV parsing, and previews.
//!
//! A stored upload is addressed only by an opaque [`FileId`]. Reading it
//! back yields the whole file as rows of trimmed string cells.

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Number of data rows included in an upload preview.
pub const PREVIEW_ROWS: usize = 5;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Opaque identifier of a stored upload.
///
/// Always a UUID, so it is safe to use as a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(Uuid);

impl FileId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| CoreError::Validation(format!("Invalid import file id '{value}'")))
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

/// Where uploads wait between the upload and the mapping submission.
#[async_trait]
pub trait TabularStore: Send + Sync {
    async fn save(&self, bytes: &[u8]) -> Result<FileId, CoreError>;

    async fn read(&self, id: FileId) -> Result<Vec<Vec<String>>, CoreError>;

    async fn delete(&self, id: FileId) -> Result<(), CoreError>;
}

/// Parse CSV bytes into rows of trimmed cells.
///
/// No row is treated as a header here. Rows may differ in width and invalid
/// UTF-8 is replaced rather than rejected. A leading byte-order mark is
/// ignored. Rows of blank cells such as `,,` are kept so that row positions
/// match the spreadsheet; see [`is_blank_row`]. Lines with no content at all
/// are skipped by the reader.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Vec<String>>, CoreError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (index, record) in reader.byte_records().enumerate() {
        let record = record
            .map_err(|e| CoreError::Validation(format!("Malformed CSV at row {}: {e}", index + 1)))?;
        let cells: Vec<String> = record
            .iter()
            .map(|cell| String::from_utf8_lossy(cell).into_owned())
            .collect();
        rows.push(cells);
    }
    Ok(rows)
}

/// `true` if every cell of the row is empty after trimming.
pub fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.is_empty())
}

/// What the mapping form needs to know about an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// The first row, offered as column labels.
    pub headers: Vec<String>,
    /// Width of the widest row.
    pub column_count: usize,
    /// Rows with at least one non-blank cell, the first row included.
    pub row_count: usize,
    /// The first few non-blank rows after the first one.
    pub preview: Vec<Vec<String>>,
}

impl TableSummary {
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        Self {
            headers: rows.first().cloned().unwrap_or_default(),
            column_count: rows.iter().map(Vec::len).max().unwrap_or(0),
            row_count: rows.iter().filter(|cells| !is_blank_row(cells)).count(),
            preview: rows
                .iter()
                .skip(1)
                .filter(|cells| !is_blank_row(cells))
                .take(PREVIEW_ROWS)
                .cloned()
                .collect(),
        }
    }

    /// `true` if the file holds nothing but blank rows.
    pub fn is_blank(&self) -> bool {
        self.row_count == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_quoted_cells_and_trims() {
        let rows = parse_csv(b"client, project\n\"Acme, Inc\" ,Portal\n").unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["client".to_string(), "project".to_string()],
                vec!["Acme, Inc".to_string(), "Portal".to_string()],
            ]
        );
    }

    #[test]
    fn strips_bom_and_keeps_blank_cell_rows() {
        let rows = parse_csv(b"\xEF\xBB\xBFa,b\n, \n\nc,d\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "a");
        assert!(is_blank_row(&rows[1]));
        assert_eq!(rows[2], vec!["c".to_string(), "d".to_string()]);
    }

    #[test]
    fn allows_ragged_rows() {
        let rows = parse_csv(b"a,b,c\nd\n").unwrap();
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn replaces_invalid_utf8() {
        let rows = parse_csv(b"caf\xE9,x\n").unwrap();
        assert_eq!(rows[0][0], "caf\u{FFFD}");
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(parse_csv(b"").unwrap().is_empty());
    }

    #[test]
    fn file_id_round_trips_and_rejects_paths() {
        let id = FileId::generate();
        assert_eq!(FileId::parse(&id.to_string()).unwrap(), id);
        assert_matches!(FileId::parse("../etc/passwd"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn summary_uses_first_row_as_headers() {
        let rows: Vec<Vec<String>> = (0..8)
            .map(|i| vec![format!("c{i}"), format!("p{i}")])
            .collect();

        let summary = TableSummary::from_rows(&rows);

        assert_eq!(summary.headers, vec!["c0", "p0"]);
        assert_eq!(summary.column_count, 2);
        assert_eq!(summary.row_count, 8);
        assert_eq!(summary.preview.len(), PREVIEW_ROWS);
        assert_eq!(summary.preview[0][0], "c1");
    }

    #[test]
    fn summary_ignores_blank_rows() {
        let rows = parse_csv(b"client,project\n,\nAcme,Portal\n,,\n").unwrap();

        let summary = TableSummary::from_rows(&rows);

        assert_eq!(summary.row_count, 2);
        assert_eq!(summary.column_count, 3);
        assert_eq!(summary.preview, vec![vec!["Acme".to_string(), "Portal".to_string()]]);
        assert!(!summary.is_blank());
        assert!(TableSummary::from_rows(&parse_csv(b" , \n").unwrap()).is_blank());
    }
}
