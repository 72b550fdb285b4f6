//! Marketplace catalog exports → Shopify product import rows.
//!
//! Each source adapter resolves its columns, groups rows into products, runs
//! the variant reconciler and hands the resulting row records to the
//! assembler, which produces the final table.

pub mod assemble;
pub mod columns;
pub mod error;
pub mod etsy;
pub mod images;
pub mod listing;
pub mod numeric;
pub mod price_table;
pub mod reconcile;
pub mod slug;
pub mod tiktok;
pub mod token;

use std::fmt;

use rust_decimal::Decimal;

pub use assemble::assemble;
pub use error::ConvertError;
pub use etsy::convert_etsy_to_shopify;
pub use numeric::{apply_markup, parse_number};
pub use price_table::{PriceEntry, PriceTable};
pub use reconcile::{reconcile, ReconcileRequest, ReconciledOption};
pub use slug::slugify;
pub use tiktok::convert_tiktok_to_shopify;
pub use token::{canonical_token, sku_token};

/// Marketplace a source table was exported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePlatform {
    Etsy,
    TikTok,
}

impl SourcePlatform {
    /// Prefix of SKUs synthesized for this platform's products.
    #[must_use]
    pub const fn sku_prefix(self) -> &'static str {
        match self {
            Self::Etsy => "ETSY",
            Self::TikTok => "TIKTOK",
        }
    }

    /// Prefix of fallback handles for products without a usable title.
    #[must_use]
    pub const fn handle_prefix(self) -> &'static str {
        match self {
            Self::Etsy => "etsy",
            Self::TikTok => "tiktok",
        }
    }
}

impl fmt::Display for SourcePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Etsy => f.write_str("Etsy"),
            Self::TikTok => f.write_str("TikTok Shop"),
        }
    }
}

/// Per-run settings for the Etsy adapter.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Vendor for every product. Blank falls back to the export's vendor column.
    pub vendor: String,
    /// Percentage added to source prices; `0` leaves them unchanged.
    pub markup_pct: Decimal,
    /// Label→price overrides applied per axis-1 value.
    pub price_table: Option<PriceTable>,
    /// Also mark up prices taken from `price_table`.
    pub markup_on_mapped: bool,
}
