mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compare::CompareArgs;
use commands::rates::RatesArgs;

/// Sixty-month tax form comparison for a sole proprietorship
#[derive(Parser)]
#[command(
    name = "jdg",
    version,
    about = "Compare tax scale, linear tax and lump sum over sixty months",
    long_about = "Simulates sixty months of a Polish sole proprietorship under the tax scale, \
                  linear tax and lump sum, including social and health contributions, \
                  and reports which tax form leaves the highest net income."
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
    /// Compare the three tax forms for a request
    Compare(CompareArgs),
    /// List the allowed lump-sum rates
    Rates(RatesArgs),
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
        Commands::Rates(args) => commands::rates::run_rates(args),
        Commands::Version => {
            println!("jdg {}", env!("CARGO_PKG_VERSION"));
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
