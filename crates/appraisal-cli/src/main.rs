mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::appraise::{EvaluateArgs, ProjectArgs};

/// Business-plan investment appraisal
#[derive(Parser)]
#[command(
    name = "bpa",
    version,
    about = "Business-plan investment appraisal",
    long_about = "Projects a multi-year cash-flow schedule from extracted business-plan \
                  figures and computes NPV, IRR, payback period, and discounted payback \
                  period with decimal precision."
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
    /// Project the year-by-year cash-flow schedule
    Project(ProjectArgs),
    /// Run the full appraisal: schedule plus NPV, IRR, PP, DPP
    Evaluate(EvaluateArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::appraise::run_project(args),
        Commands::Evaluate(args) => commands::appraise::run_evaluate(args),
        Commands::Version => {
            println!("bpa {}", env!("CARGO_PKG_VERSION"));
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
