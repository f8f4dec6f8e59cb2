use clap::Args;
use colored::Colorize;
use rust_decimal::Decimal;
use serde_json::Value;

use appraisal_core::appraise::appraise;
use appraisal_core::params::{raw_figures_from_json, ParameterSet, RawFigures};
use appraisal_core::projection::project_cash_flows;

use crate::input;

/// Arguments for cash-flow projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ProjectArgs {
    /// Initial capital outlay at year 0
    #[arg(long)]
    pub investment: Option<Decimal>,

    /// Project life in operating years
    #[arg(long)]
    pub life: Option<Decimal>,

    /// Constant annual revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Constant annual operating cost, excluding depreciation
    #[arg(long)]
    pub cost: Option<Decimal>,

    /// Corporate tax rate (0.20 or 20 for 20%)
    #[arg(long, default_value = "0.20")]
    pub tax_rate: Decimal,

    /// Path to JSON input file with extracted figures (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a full appraisal
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EvaluateArgs {
    /// Initial capital outlay at year 0
    #[arg(long)]
    pub investment: Option<Decimal>,

    /// Project life in operating years
    #[arg(long)]
    pub life: Option<Decimal>,

    /// Constant annual revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Constant annual operating cost, excluding depreciation
    #[arg(long)]
    pub cost: Option<Decimal>,

    /// Discount rate (0.13 or 13 for 13%)
    #[arg(long)]
    pub wacc: Option<Decimal>,

    /// Corporate tax rate (0.20 or 20 for 20%)
    #[arg(long, default_value = "0.20")]
    pub tax_rate: Decimal,

    /// Path to JSON input file with extracted figures (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw: RawFigures = if let Some(ref path) = args.input {
        raw_figures_from_json(&input::read_json_value(path)?)?
    } else if let Some(data) = input::read_stdin()? {
        raw_figures_from_json(&data)?
    } else {
        RawFigures {
            initial_investment: args
                .investment
                .ok_or("--investment is required (or provide --input)")?,
            project_life_years: args.life.ok_or("--life is required (or provide --input)")?,
            annual_revenue: args
                .revenue
                .ok_or("--revenue is required (or provide --input)")?,
            annual_operating_cost: args.cost.ok_or("--cost is required (or provide --input)")?,
            wacc: Decimal::ZERO,
            tax_rate: args.tax_rate,
        }
    };

    let mut warnings = Vec::new();
    let params = ParameterSet::normalize(&raw, &mut warnings)?;
    let schedule = project_cash_flows(&params)?;
    report_warnings(&warnings);

    Ok(serde_json::to_value(schedule.rows)?)
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw: RawFigures = if let Some(ref path) = args.input {
        raw_figures_from_json(&input::read_json_value(path)?)?
    } else if let Some(data) = input::read_stdin()? {
        raw_figures_from_json(&data)?
    } else {
        RawFigures {
            initial_investment: args
                .investment
                .ok_or("--investment is required (or provide --input)")?,
            project_life_years: args.life.ok_or("--life is required (or provide --input)")?,
            annual_revenue: args
                .revenue
                .ok_or("--revenue is required (or provide --input)")?,
            annual_operating_cost: args.cost.ok_or("--cost is required (or provide --input)")?,
            wacc: args.wacc.ok_or("--wacc is required (or provide --input)")?,
            tax_rate: args.tax_rate,
        }
    };

    let output = appraise(&raw)?;
    Ok(serde_json::to_value(output)?)
}

fn report_warnings(warnings: &[String]) {
    for w in warnings {
        eprintln!("{}: {}", "warning".yellow().bold(), w);
    }
}
