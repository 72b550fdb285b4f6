//! Convert command handlers for the CLI.
//!
//! Each handler reads the export, runs the platform adapter with settings
//! merged from flags and configuration, and writes the result.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use rust_decimal::Decimal;
use shopbridge_convert::{
    convert_etsy_to_shopify, convert_tiktok_to_shopify, ConvertOptions, SourcePlatform,
};
use shopbridge_core::{AppConfig, TargetTable};

use crate::input::{is_spreadsheet, read_csv_table, read_price_table, read_source_table};
use crate::output::{default_output_path, write_table, OutputArgs};

/// Sub-commands available under `convert`.
#[derive(Debug, Subcommand)]
pub enum ConvertCommands {
    /// Convert an Etsy listings export (CSV)
    Etsy {
        /// Path to the Etsy export
        input: PathBuf,
        /// Vendor for every product (falls back to the export's shop name when blank)
        #[arg(long)]
        vendor: Option<String>,
        /// Percentage added to every source price (e.g., 10, 12.5 or -10)
        #[arg(long, allow_negative_numbers = true)]
        markup: Option<Decimal>,
        /// Text file of "label (price)" lines overriding per-variant prices
        #[arg(long)]
        price_table: Option<PathBuf>,
        /// Apply the markup to prices taken from the price table as well
        #[arg(long)]
        markup_on_map: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Convert a TikTok Shop product export (CSV or XLSX)
    Tiktok {
        /// Path to the TikTok Shop export
        input: PathBuf,
        /// Vendor for every product
        #[arg(long)]
        vendor: Option<String>,
        /// Percentage added to every source price (e.g., 10, 12.5 or -10)
        #[arg(long, allow_negative_numbers = true)]
        markup: Option<Decimal>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Dispatch a `convert` sub-command.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the export lacks a required
/// column, or the output cannot be written.
pub(crate) fn run_convert(config: &AppConfig, command: ConvertCommands) -> anyhow::Result<()> {
    match command {
        ConvertCommands::Etsy {
            input,
            vendor,
            markup,
            price_table,
            markup_on_map,
            output,
        } => {
            if is_spreadsheet(&input) {
                anyhow::bail!(
                    "Etsy exports are CSV files; {} looks like a spreadsheet",
                    input.display()
                );
            }
            let table = read_csv_table(&input)?;
            let price_table = price_table
                .as_deref()
                .map(read_price_table)
                .transpose()?;
            let options = ConvertOptions {
                vendor: vendor.unwrap_or_else(|| config.default_vendor.clone()),
                markup_pct: markup.unwrap_or(config.default_markup_pct),
                price_table,
                markup_on_mapped: markup_on_map,
            };
            let result = convert_etsy_to_shopify(&table, &options)
                .with_context(|| format!("failed to convert {}", input.display()))?;
            finish(config, SourcePlatform::Etsy, &input, &output, &result)
        }
        ConvertCommands::Tiktok {
            input,
            vendor,
            markup,
            output,
        } => {
            let table = read_source_table(&input)?;
            let vendor = vendor.unwrap_or_else(|| config.default_vendor.clone());
            let markup_pct = markup.unwrap_or(config.default_markup_pct);
            let result = convert_tiktok_to_shopify(&table, &vendor, markup_pct)
                .with_context(|| format!("failed to convert {}", input.display()))?;
            finish(config, SourcePlatform::TikTok, &input, &output, &result)
        }
    }
}

fn finish(
    config: &AppConfig,
    platform: SourcePlatform,
    input: &Path,
    output: &OutputArgs,
    result: &TargetTable,
) -> anyhow::Result<()> {
    let dest = output.output.clone().unwrap_or_else(|| {
        default_output_path(&config.output_dir, platform, input, output.format)
    });
    write_table(result, output.format, &dest)?;
    tracing::info!(
        %platform,
        rows = result.len(),
        output = %dest.display(),
        "import file written"
    );
    Ok(())
}
