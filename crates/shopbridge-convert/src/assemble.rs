//! Aligning heterogeneous row records into the final import table.

use std::collections::HashSet;

use shopbridge_core::{RowRecord, TargetTable, SHOPIFY_COLUMNS};

/// Builds the rectangular output table.
///
/// Columns are the canonical sequence followed by any extra columns in the
/// order they were first seen; cells a record does not define are blank.
/// With no records the result has only the canonical columns.
#[must_use]
pub fn assemble(records: &[RowRecord]) -> TargetTable {
    if records.is_empty() {
        return TargetTable::empty();
    }

    let mut columns: Vec<String> = SHOPIFY_COLUMNS.iter().map(ToString::to_string).collect();
    let mut known: HashSet<String> = columns.iter().cloned().collect();
    for record in records {
        for name in record.columns() {
            if known.insert(name.to_owned()) {
                columns.push(name.to_owned());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| record.get(c).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    TargetTable::from_parts(columns, rows)
}
