//! Writing converted tables as CSV or JSON.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde_json::{Map, Value};
use shopbridge_convert::SourcePlatform;
use shopbridge_core::TargetTable;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const STDOUT_PATH: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Output options shared by every convert subcommand.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output file, or `-` for stdout (defaults to a file in SHOPBRIDGE_OUTPUT_DIR)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
}

/// `<dir>/shopify_import_from_<source>__<input stem>.<ext>`
pub(crate) fn default_output_path(
    dir: &Path,
    platform: SourcePlatform,
    input: &Path,
    format: OutputFormat,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "export".into(), |s| s.to_string_lossy());
    dir.join(format!(
        "shopify_import_from_{}__{stem}.{}",
        platform.handle_prefix(),
        format.extension()
    ))
}

/// Writes `table` to `dest`; `-` means stdout. CSV files get a UTF-8 BOM,
/// JSON never does.
pub(crate) fn write_table(
    table: &TargetTable,
    format: OutputFormat,
    dest: &Path,
) -> anyhow::Result<()> {
    if dest == Path::new(STDOUT_PATH) {
        let stdout = io::stdout();
        return write_to(stdout.lock(), table, format, false);
    }

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file =
        fs::File::create(dest).with_context(|| format!("failed to create {}", dest.display()))?;
    let bom = format == OutputFormat::Csv;
    write_to(BufWriter::new(file), table, format, bom)
        .with_context(|| format!("failed to write {}", dest.display()))
}

fn write_to<W: Write>(
    mut writer: W,
    table: &TargetTable,
    format: OutputFormat,
    bom: bool,
) -> anyhow::Result<()> {
    if bom {
        writer.write_all(UTF8_BOM)?;
    }
    match format {
        OutputFormat::Csv => write_csv(writer, table),
        OutputFormat::Json => write_json(writer, table),
    }
}

fn write_csv<W: Write>(writer: W, table: &TargetTable) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(table.columns())?;
    for row in table.rows() {
        csv.write_record(row)?;
    }
    csv.flush()?;
    Ok(())
}

fn write_json<W: Write>(mut writer: W, table: &TargetTable) -> anyhow::Result<()> {
    let records: Vec<Map<String, Value>> = table
        .rows()
        .iter()
        .map(|row| {
            table
                .columns()
                .iter()
                .zip(row)
                .map(|(column, value)| (column.clone(), Value::String(value.clone())))
                .collect()
        })
        .collect();
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
