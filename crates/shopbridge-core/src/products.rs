use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A variant price as written to the import file.
///
/// `Empty` is the documented fallback for source text that could not be read
/// as a number; it renders as a blank cell rather than aborting the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Price {
    /// Amount already rounded to cents.
    Amount(Decimal),
    Empty,
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Amount(value) => write!(f, "{value:.2}"),
            Price::Empty => Ok(()),
        }
    }
}

/// One purchasable combination of a product, ready to become a variant row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVariant {
    pub option1_name: String,
    pub option1_value: String,
    /// `None` when the product has no second option axis.
    pub option2_name: Option<String>,
    pub option2_value: Option<String>,
    /// Never empty: unmatched variants receive a synthesized SKU.
    pub sku: String,
    pub price: Price,
}
