use std::path::PathBuf;

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings for the converter binary.
///
/// Per-conversion inputs (vendor, markup, price table) can always be given
/// on the command line; the values here are only the fallbacks.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Vendor written to every row when the caller supplies none.
    pub default_vendor: String,
    /// Markup percentage applied when the caller supplies none.
    pub default_markup_pct: Decimal,
    /// Directory that receives auto-named output files.
    pub output_dir: PathBuf,
}
