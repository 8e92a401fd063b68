mod compute_cmd;
mod history_cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use calc_history::config::AppConfig;
use calc_history::query::{SortDirection, SortKey, SortSpec};
use calc_history::vocabulary::{self, CanonicalOperation};

#[derive(Parser)]
#[command(
    name = "calc-history",
    version,
    about = "Fetch, filter and sort the history of a calculator service"
)]
struct Cli {
    /// Log fetch and query details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Calculator service base URL (overrides config files and CALC_HISTORY_SERVER_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the operation history
    History {
        /// Operation to keep (`all`, a canonical name, or any alias)
        #[arg(long = "op", default_value = "all")]
        operation: String,
        /// Keep entries whose date contains this text, e.g. `22/09`
        #[arg(long, default_value = "")]
        date: String,
        /// Sort key: date or result
        #[arg(long)]
        sort: Option<SortKey>,
        /// Sort direction: asc or desc
        #[arg(long)]
        direction: Option<SortDirection>,
        /// Read a saved history payload instead of fetching one
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask the service to compute an operation
    Compute {
        /// sum, subtract, multiply or divide (aliases accepted)
        operation: CanonicalOperation,
        /// Operands, at least two
        #[arg(required = true, allow_negative_numbers = true)]
        numbers: Vec<String>,
    },
    /// List recognised operations with their symbols and aliases
    Ops,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("calc_history=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_env("CALC_HISTORY_LOG")
            .unwrap_or_else(|_| "calc_history=warn".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn report(result: anyhow::Result<i32>) -> i32 {
    result.unwrap_or_else(|e| {
        eprintln!("[calc-history] error: {e:#}");
        1
    })
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = vocabulary::validate_tables() {
        eprintln!("[calc-history] error: operation vocabulary is inconsistent: {e:#}");
        std::process::exit(1);
    }

    let mut config = AppConfig::load();
    if let Some(server) = &cli.server {
        config.server_url.clone_from(server);
    }

    let exit_code = match cli.command {
        Commands::History {
            operation,
            date,
            sort,
            direction,
            file,
            json,
        } => {
            let args = history_cmd::HistoryArgs {
                operation,
                date,
                sort: SortSpec::new(
                    sort.unwrap_or(config.sort.key),
                    direction.unwrap_or(config.sort.direction),
                ),
                file,
                json,
            };
            report(history_cmd::cmd_history(&args, &config))
        }
        Commands::Compute {
            operation,
            numbers,
        } => report(compute_cmd::cmd_compute(operation, &numbers, &config)),
        Commands::Ops => compute_cmd::cmd_ops(),
    };
    std::process::exit(exit_code);
}
