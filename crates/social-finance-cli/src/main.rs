mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::contract::{ParamsArgs, SolveArgs, ThresholdsArgs};
use commands::series::{CollateralArgs, FundingArgs, OutreachArgs};

/// Credit-market contract analysis for monitored lending zones
#[derive(Parser)]
#[command(
    name = "sfa",
    version,
    about = "Credit-market contract analysis for monitored lending zones",
    long_about = "A CLI for solving the equilibrium financing structure of a monitored \
                  lending zone with decimal precision. Computes collateral-requirement \
                  curves, regime thresholds, optimal monitoring, borrower returns, and \
                  the reach of a fixed pool of intermediary capital."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the financing contract for a single pledgeable-asset level
    Solve(SolveArgs),
    /// Regime boundary scalars (m_cross, m_max, a_min, a_cross, a_no_monitor)
    Thresholds(ThresholdsArgs),
    /// Collateral-requirement curves over a monitoring grid
    Collateral(CollateralArgs),
    /// Borrower return and reach over an asset grid
    Outreach(OutreachArgs),
    /// Investment split and debt-to-equity over the monitored asset range
    Funding(FundingArgs),
    /// Display the zone parameter set
    Params(ParamsArgs),
    /// Print version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Solve(args) => commands::contract::run_solve(args),
        Commands::Thresholds(args) => commands::contract::run_thresholds(args),
        Commands::Collateral(args) => commands::series::run_collateral(args),
        Commands::Outreach(args) => commands::series::run_outreach(args),
        Commands::Funding(args) => commands::series::run_funding(args),
        Commands::Params(args) => commands::contract::run_params(args),
        Commands::Version => {
            println!("sfa {}", env!("CARGO_PKG_VERSION"));
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

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}
