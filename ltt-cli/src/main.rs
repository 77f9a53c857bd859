use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ltt_core::{City, PurchaseInput};
use rust_decimal::Decimal;
use tracing::{debug, info};

use ltt_cli::{app, config::AppConfig, console, logging, utils};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Ontario land transfer tax and legal fee estimator.
///
/// Calculates provincial and Toronto municipal land transfer tax,
/// first-time buyer rebates, and the firm's legal fee for a purchase.
#[derive(Debug, Parser)]
#[command(name = "ltt", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `ltt_core=trace`. Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the estimate for one purchase.
    Calculate(PurchaseArgs),

    /// Print the estimate and save the summary document.
    Export {
        #[command(flatten)]
        purchase: PurchaseArgs,

        /// Directory for the document. Defaults to the configured one.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Document format (`pdf`, `txt` or `json`). Defaults to the configured one.
        #[arg(long)]
        format: Option<String>,
    },

    /// Interactive session reading commands from stdin.
    Session,
}

#[derive(Debug, Args)]
struct PurchaseArgs {
    /// Purchase price; `$` and `,` separators are accepted.
    #[arg(long, allow_hyphen_values = true, value_parser = utils::parse_price)]
    price: Decimal,

    /// City of the property.
    #[arg(long, default_value_t = City::Toronto)]
    city: City,

    /// The buyer has never owned a home.
    #[arg(long)]
    first_time_buyer: bool,
}

impl PurchaseArgs {
    fn into_input(self) -> Result<PurchaseInput> {
        PurchaseInput::new(self.price, self.city, self.first_time_buyer)
            .context("invalid purchase details")
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(file) = cli.log_file {
        config.logging.file = Some(file);
    }
    let logging = logging::init_logging(&config.logging, cli.log_level.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Calculate(purchase) => {
            print!("{}", app::calculate(purchase.into_input()?)?);
        }
        Command::Export {
            purchase,
            out,
            format,
        } => {
            let format = format.unwrap_or_else(|| config.export.format.clone());
            let directory = out.unwrap_or_else(|| config.export.directory.clone());
            let (screen, exported) =
                app::calculate_and_export(purchase.into_input()?, &config, &format, &directory)?;
            print!("{screen}");
            let path = exported.context("export failed; the results above are still valid")?;
            println!("Saved {}.", path.display());
        }
        Command::Session => {
            run_interactive(&config, logging)?;
        }
    }

    Ok(())
}

fn run_interactive(
    config: &AppConfig,
    logging: logging::LoggingHandle,
) -> Result<()> {
    let context = console::ConsoleContext {
        registry: app::build_registry(&config.firm_name),
        format: config.export.format.clone(),
        directory: config.export.directory.clone(),
        logging: Some(logging),
    };
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let session = console::run_session(stdin.lock(), &mut stdout, &context)?;
    info!(state = session.state().name(), "session ended");
    Ok(())
}
