mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compare::{CompareArgs, SettingsExportArgs, TimeSeriesArgs};
use commands::engines::{AmortizationArgs, DepositArgs, PropertyValueArgs, RentalArgs};

/// Mortgage-and-sell vs mortgage-and-rent vs deposit projections
#[derive(Parser)]
#[command(
    name = "homestead",
    version,
    about = "Compare buying with a mortgage, renting out, and saving in a deposit",
    long_about = "Projects three long-horizon strategies with decimal precision: buy with a \
                  mortgage and sell, buy with a mortgage and rent out, or keep the money in \
                  a deposit. Supports flat or year-by-year inflation, overpayments, off-plan \
                  completion, and renovation costs."
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
    /// Compare the three strategies for a snapshot or settings file
    Compare(CompareArgs),
    /// Monthly chart series (or yearly rent vs mortgage with --annual)
    TimeSeries(TimeSeriesArgs),
    /// Mortgage annuity payment and amortisation schedule
    Amortization(AmortizationArgs),
    /// Deposit growth with monthly contributions
    Deposit(DepositArgs),
    /// Pessimistic / base / optimistic property value
    PropertyValue(PropertyValueArgs),
    /// Rental income with a deferred start
    Rental(RentalArgs),
    /// Wrap a snapshot in a versioned settings document
    SettingsExport(SettingsExportArgs),
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

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::TimeSeries(args) => commands::compare::run_time_series(args),
        Commands::Amortization(args) => commands::engines::run_amortization(args),
        Commands::Deposit(args) => commands::engines::run_deposit(args),
        Commands::PropertyValue(args) => commands::engines::run_property_value(args),
        Commands::Rental(args) => commands::engines::run_rental(args),
        Commands::SettingsExport(args) => commands::compare::run_settings_export(args),
        Commands::Version => {
            println!("homestead {}", env!("CARGO_PKG_VERSION"));
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
