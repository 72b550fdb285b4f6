mod convert;
mod input;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::convert::ConvertCommands;

#[derive(Debug, Parser)]
#[command(name = "shopbridge")]
#[command(about = "Convert marketplace catalog exports into Shopify product imports")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert a marketplace export into a Shopify import file
    Convert {
        #[command(subcommand)]
        command: ConvertCommands,
    },
    /// Print the Shopify import columns in output order
    Columns,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = shopbridge_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Convert { command }) => convert::run_convert(&config, command)?,
        Some(Commands::Columns) => {
            for name in shopbridge_core::SHOPIFY_COLUMNS {
                println!("{name}");
            }
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}
