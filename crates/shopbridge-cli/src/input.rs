//! Reading source exports from disk into a [`SourceTable`].
//!
//! CSV files are decoded as UTF-8 (Windows-1252 when that fails), stripped of
//! a leading BOM and split on whichever delimiter gives the most consistent
//! field counts. Spreadsheets are read through calamine; only the first sheet
//! is used.

use std::fs;
use std::path::Path;

use anyhow::Context;
use calamine::{open_workbook_auto, Data, Reader};
use shopbridge_core::SourceTable;
use shopbridge_convert::PriceTable;

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];
const SNIFF_LINES: usize = 10;

/// Reads `path` as CSV, or as a spreadsheet when the extension says so.
pub(crate) fn read_source_table(path: &Path) -> anyhow::Result<SourceTable> {
    if is_spreadsheet(path) {
        read_workbook_table(path)
    } else {
        read_csv_table(path)
    }
}

pub(crate) fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

pub(crate) fn read_csv_table(path: &Path) -> anyhow::Result<SourceTable> {
    let content = read_text(path)?;
    let delimiter = sniff_delimiter(&content);
    tracing::debug!(
        path = %path.display(),
        delimiter = %char::from(delimiter).escape_default(),
        "reading CSV export"
    );
    parse_csv(&content, delimiter)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Loads a pasted price-label table from a text file.
pub(crate) fn read_price_table(path: &Path) -> anyhow::Result<PriceTable> {
    let text = read_text(path)?;
    let table = PriceTable::parse(&text);
    if table.is_empty() {
        tracing::warn!(path = %path.display(), "price table has no usable lines");
    } else {
        tracing::debug!(path = %path.display(), entries = table.len(), "price table loaded");
    }
    Ok(table)
}

/// File contents as text without a leading BOM.
fn read_text(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), "input is not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
            decoded.into_owned()
        }
    };
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_owned(),
        None => text,
    })
}

/// Picks the delimiter whose field count is both greater than one and most
/// consistent across the first lines; ties go to the wider split.
fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(SNIFF_LINES).collect();
    let mut best = b',';
    let mut best_score = 0usize;

    for delimiter in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| field_count(line, delimiter))
            .collect();
        let Some(&target) = counts.first() else {
            break;
        };
        if target <= 1 {
            continue;
        }
        let consistent = counts.iter().filter(|&&c| c == target).count();
        let score = consistent * target;
        if score > best_score {
            best_score = score;
            best = delimiter;
        }
    }

    best
}

fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(Result::ok)
        .map_or(1, |record| record.len())
}

fn parse_csv(content: &str, delimiter: u8) -> anyhow::Result<SourceTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(ToOwned::to_owned).collect::<Vec<String>>());
    }
    let headers = if rows.is_empty() {
        Vec::new()
    } else {
        rows.remove(0)
    };
    Ok(SourceTable::new(headers, rows)?)
}

fn read_workbook_table(path: &Path) -> anyhow::Result<SourceTable> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| anyhow::anyhow!("failed to open {}: {e}", path.display()))?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        tracing::warn!(path = %path.display(), "workbook has no sheets");
        return Ok(SourceTable::new(Vec::new(), Vec::new())?);
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| {
            anyhow::anyhow!("failed to read sheet '{sheet}' of {}: {e}", path.display())
        })?;
    tracing::debug!(path = %path.display(), %sheet, "reading first worksheet");

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let headers = rows.next().unwrap_or_default();
    Ok(SourceTable::new(headers, rows.collect())?)
}

/// Spreadsheet cell as the text a CSV export of it would contain.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(n) => n.to_string(),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => String::from(if *b { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Error(e) => format!("#{e:?}"),
    }
}
