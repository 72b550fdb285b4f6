//! Header alias resolution.
//!
//! Marketplace exports rename columns between versions and locales, so each
//! logical field lists the headers that may carry it, most preferred first.
//! Adapters resolve every field once per table.

use shopbridge_core::SourceTable;

use crate::error::ConvertError;
use crate::SourcePlatform;

#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub field: &'static str,
    pub aliases: &'static [&'static str],
}

impl FieldAliases {
    #[must_use]
    pub const fn new(field: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { field, aliases }
    }

    /// Index of the first alias present in `table`.
    #[must_use]
    pub fn find(&self, table: &SourceTable) -> Option<usize> {
        table.find_first(self.aliases)
    }

    /// Every alias present in `table`, in alias priority order.
    ///
    /// For fields where a blank cell under one alias should fall through to
    /// the next alias on a per-row basis.
    #[must_use]
    pub fn find_all(&self, table: &SourceTable) -> Vec<usize> {
        self.aliases
            .iter()
            .filter_map(|alias| table.find_column(alias))
            .collect()
    }

    /// Like [`FieldAliases::find`], but absence is an input-format error.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingColumn`] when no alias is present.
    pub fn require(
        &self,
        table: &SourceTable,
        platform: SourcePlatform,
    ) -> Result<usize, ConvertError> {
        self.find(table).ok_or_else(|| ConvertError::MissingColumn {
            platform,
            field: self.field,
            expected: self.aliases.join(", "),
        })
    }
}

/// First header containing `needle`, compared case-insensitively.
#[must_use]
pub fn find_containing(table: &SourceTable, needle: &str) -> Option<usize> {
    let needle = needle.to_lowercase();
    table
        .headers()
        .iter()
        .position(|h| h.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE: FieldAliases = FieldAliases::new("price", &["Price", "Sale Price"]);

    fn table(headers: &[&str]) -> SourceTable {
        SourceTable::new(headers.iter().map(ToString::to_string).collect(), Vec::new()).unwrap()
    }

    #[test]
    fn find_respects_alias_priority_not_header_order() {
        let t = table(&["Sale Price", "Price"]);
        assert_eq!(PRICE.find(&t), Some(1));
    }

    #[test]
    fn find_all_lists_present_aliases_by_priority() {
        let t = table(&["Sale Price", "Name", "Price"]);
        assert_eq!(PRICE.find_all(&t), vec![2, 0]);
    }

    #[test]
    fn require_reports_field_and_aliases() {
        let t = table(&["Name"]);
        let err = PRICE.require(&t, SourcePlatform::TikTok).unwrap_err();
        assert_eq!(
            err.to_string(),
            "TikTok Shop export has no price column (expected one of: Price, Sale Price)"
        );
    }

    #[test]
    fn find_containing_is_case_insensitive() {
        let t = table(&["Product Name", "Retail PRICE (USD)"]);
        assert_eq!(find_containing(&t, "price"), Some(1));
        assert_eq!(find_containing(&t, "sku"), None);
    }
}
