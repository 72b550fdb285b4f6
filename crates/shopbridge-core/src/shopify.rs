//! Target-platform (Shopify product CSV) schema and row containers.
//!
//! Column names and their order are compatibility-critical: the importer
//! matches headers by exact text.

use crate::products::Price;

/// Canonical output columns, in the order the importer expects them.
pub const SHOPIFY_COLUMNS: [&str; 21] = [
    column::HANDLE,
    column::TITLE,
    column::BODY_HTML,
    column::VENDOR,
    column::PUBLISHED,
    column::OPTION1_NAME,
    column::OPTION1_VALUE,
    column::OPTION2_NAME,
    column::OPTION2_VALUE,
    column::VARIANT_SKU,
    column::INVENTORY_TRACKER,
    column::INVENTORY_QTY,
    column::INVENTORY_POLICY,
    column::FULFILLMENT_SERVICE,
    column::VARIANT_PRICE,
    column::COMPARE_AT_PRICE,
    column::REQUIRES_SHIPPING,
    column::TAXABLE,
    column::IMAGE_SRC,
    column::IMAGE_POSITION,
    column::STATUS,
];

pub mod column {
    pub const HANDLE: &str = "Handle";
    pub const TITLE: &str = "Title";
    pub const BODY_HTML: &str = "Body (HTML)";
    pub const VENDOR: &str = "Vendor";
    pub const PUBLISHED: &str = "Published";
    pub const OPTION1_NAME: &str = "Option1 Name";
    pub const OPTION1_VALUE: &str = "Option1 Value";
    pub const OPTION2_NAME: &str = "Option2 Name";
    pub const OPTION2_VALUE: &str = "Option2 Value";
    pub const VARIANT_SKU: &str = "Variant SKU";
    pub const INVENTORY_TRACKER: &str = "Variant Inventory Tracker";
    pub const INVENTORY_QTY: &str = "Variant Inventory Qty";
    pub const INVENTORY_POLICY: &str = "Variant Inventory Policy";
    pub const FULFILLMENT_SERVICE: &str = "Variant Fulfillment Service";
    pub const VARIANT_PRICE: &str = "Variant Price";
    pub const COMPARE_AT_PRICE: &str = "Variant Compare At Price";
    pub const REQUIRES_SHIPPING: &str = "Variant Requires Shipping";
    pub const TAXABLE: &str = "Variant Taxable";
    pub const IMAGE_SRC: &str = "Image Src";
    pub const IMAGE_POSITION: &str = "Image Position";
    pub const STATUS: &str = "Status";
    /// Not part of the canonical set; emitted only when a source carries tags.
    pub const TAGS: &str = "Tags";
}

// Fixed defaults stamped onto every variant row.
pub const DEFAULT_PUBLISHED: bool = false;
pub const DEFAULT_STATUS: &str = "draft";
pub const DEFAULT_INVENTORY_TRACKER: &str = "shopify-managed";
pub const DEFAULT_INVENTORY_QTY: &str = "";
pub const DEFAULT_INVENTORY_POLICY: &str = "continue-selling-when-out-of-stock";
pub const DEFAULT_FULFILLMENT_SERVICE: &str = "manual";
pub const DEFAULT_REQUIRES_SHIPPING: bool = true;
pub const DEFAULT_TAXABLE: bool = true;

/// A single typed cell of an output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Bool(bool),
    Position(u32),
    Price(Price),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Position(p) => write!(f, "{p}"),
            Cell::Price(p) => write!(f, "{p}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Price> for Cell {
    fn from(value: Price) -> Self {
        Cell::Price(value)
    }
}

/// One output row before column alignment.
///
/// Records only hold the columns they define; the assembler pads the rest.
/// Insertion order is kept so that ad hoc columns surface in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    cells: Vec<(String, Cell)>,
}

impl RowRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A variant row carrying the handle, vendor and the fixed import defaults.
    #[must_use]
    pub fn variant(handle: &str, vendor: &str) -> Self {
        let mut row = Self::new();
        row.set(column::HANDLE, handle);
        row.set(column::VENDOR, vendor);
        row.set(column::PUBLISHED, Cell::Bool(DEFAULT_PUBLISHED));
        row.set(column::INVENTORY_TRACKER, DEFAULT_INVENTORY_TRACKER);
        row.set(column::INVENTORY_QTY, DEFAULT_INVENTORY_QTY);
        row.set(column::INVENTORY_POLICY, DEFAULT_INVENTORY_POLICY);
        row.set(column::FULFILLMENT_SERVICE, DEFAULT_FULFILLMENT_SERVICE);
        row.set(column::REQUIRES_SHIPPING, Cell::Bool(DEFAULT_REQUIRES_SHIPPING));
        row.set(column::TAXABLE, Cell::Bool(DEFAULT_TAXABLE));
        row.set(column::STATUS, DEFAULT_STATUS);
        row
    }

    /// An image-only row: only `Handle`, `Image Src` and `Image Position`.
    #[must_use]
    pub fn image(handle: &str, src: &str, position: u32) -> Self {
        let mut row = Self::new();
        row.set(column::HANDLE, handle);
        row.set(column::IMAGE_SRC, src);
        row.set(column::IMAGE_POSITION, Cell::Position(position));
        row
    }

    /// Sets `column`, replacing an earlier value in place.
    pub fn set(&mut self, column: &str, value: impl Into<Cell>) {
        let value = value.into();
        if let Some(slot) = self.cells.iter_mut().find(|(name, _)| name == column) {
            slot.1 = value;
        } else {
            self.cells.push((column.to_owned(), value));
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }

    /// Column names defined by this record, in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn is_variant(&self) -> bool {
        self.get(column::VARIANT_SKU).is_some()
    }
}

/// The finished, rectangular import table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TargetTable {
    /// Builds a table from already-aligned parts.
    ///
    /// Rows are expected to have `columns.len()` cells; missing trailing cells
    /// read as absent through [`TargetTable::value`] and blank through
    /// [`TargetTable::column_values`].
    #[must_use]
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// A table with only the canonical columns and no rows.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            columns: SHOPIFY_COLUMNS.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the cell at `row` under `column`, if both exist.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// All values of one column, top to bottom.
    #[must_use]
    pub fn column_values(&self, column: &str) -> Vec<&str> {
        match self.column_index(column) {
            Some(idx) => self
                .rows
                .iter()
                .map(|r| r.get(idx).map_or("", String::as_str))
                .collect(),
            None => Vec::new(),
        }
    }
}
