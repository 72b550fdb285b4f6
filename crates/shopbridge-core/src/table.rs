//! The parsed input table handed to the converters.
//!
//! File formats are decoded elsewhere (the CLI reads CSV and XLSX); this type
//! only guarantees a header row and rectangular string cells.

use crate::TableError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Builds a table, trimming header text and padding short rows.
    ///
    /// Rows wider than the header are accepted only when the overflow cells
    /// are blank (spreadsheet exports often carry trailing empty cells).
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MissingHeader`] when there are data rows but no
    /// header, and [`TableError::RaggedRow`] when a row has non-blank cells
    /// beyond the last header column.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_owned()).collect();
        let width = headers.len();

        if width == 0 && rows.iter().any(|r| r.iter().any(|c| !c.trim().is_empty())) {
            return Err(TableError::MissingHeader);
        }

        let mut normalized = Vec::with_capacity(rows.len());
        for (idx, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                if row[width..].iter().any(|c| !c.trim().is_empty()) {
                    return Err(TableError::RaggedRow {
                        row: idx + 1,
                        width: row.len(),
                        header_width: width,
                    });
                }
                row.truncate(width);
            }
            // Fully blank lines carry no product data.
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            row.resize(width, String::new());
            normalized.push(row);
        }

        Ok(Self {
            headers,
            rows: normalized,
        })
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds a header by case-insensitive comparison of trimmed text.
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(wanted))
    }

    /// Returns the index of the first candidate header present in the table.
    #[must_use]
    pub fn find_first(&self, candidates: &[&str]) -> Option<usize> {
        candidates.iter().find_map(|c| self.find_column(c))
    }

    /// Iterates data rows in source order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, cells)| Record { index, cells })
    }
}

/// A borrowed view of one data row.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    index: usize,
    cells: &'a [String],
}

impl<'a> Record<'a> {
    /// Zero-based position among the table's data rows.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Trimmed cell text; blank for an absent column.
    #[must_use]
    pub fn get(&self, column: Option<usize>) -> &'a str {
        column
            .and_then(|idx| self.cells.get(idx))
            .map_or("", |c| c.trim())
    }

    /// Like [`Record::get`], but `None` when the cell is blank.
    #[must_use]
    pub fn non_blank(&self, column: Option<usize>) -> Option<&'a str> {
        Some(self.get(column)).filter(|s| !s.is_empty())
    }
}
