mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::dashboard::DashboardArgs;
use commands::loans::{DetailArgs, LoansArgs};
use commands::portfolio::SummaryArgs;
use commands::scenario::ScenarioArgs;

/// Loan portfolio metrics for LåneKompassen
#[derive(Parser)]
#[command(
    name = "lk",
    version,
    about = "Loan portfolio metrics for LåneKompassen",
    long_about = "Summarises a personal loan portfolio with decimal precision: totals, \
                  weighted average rate, category breakdown, health score, debt-to-income, \
                  what-if rate scenarios, per-loan details and full dashboard views. \
                  Loans are read from --input, stdin, or the built-in demo portfolio."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Dashboard configuration file (JSON or YAML)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Totals, category breakdown, health score and debt-to-income
    Summary(SummaryArgs),
    /// List loans with optional filters and sorting
    Loans(LoansArgs),
    /// Approximate monthly split and risk label for one loan
    Detail(DetailArgs),
    /// Project savings from a hypothetical rate change
    Scenario(ScenarioArgs),
    /// Render the dashboard view for a state and event sequence
    Dashboard(DashboardArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match input::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    debug!(config = ?cli.config, "configuration loaded");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Summary(args) => commands::portfolio::run_summary(args, &config),
        Commands::Loans(args) => commands::loans::run_loans(args, &config),
        Commands::Detail(args) => commands::loans::run_detail(args, &config),
        Commands::Scenario(args) => commands::scenario::run_scenario(args, &config),
        Commands::Dashboard(args) => commands::dashboard::run_dashboard(args, &config),
        Commands::Version => {
            println!("lk {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
