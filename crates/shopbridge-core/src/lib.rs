pub mod app_config;
pub mod config;
pub mod products;
pub mod shopify;
pub mod table;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{Price, ResolvedVariant};
pub use shopify::{Cell, RowRecord, TargetTable, SHOPIFY_COLUMNS};
pub use table::{Record, SourceTable};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Structural problems that make a source table unusable as a whole.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table has data rows but no header row")]
    MissingHeader,

    #[error("row {row} has {width} cells but the header has only {header_width} columns")]
    RaggedRow {
        row: usize,
        width: usize,
        header_width: usize,
    },
}
