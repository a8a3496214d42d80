//! Calculate the CSE tier of one household
//!
//! Reads household members from CSV and means-test flags from JSON and/or
//! repeated `--flag` arguments, then prints the step-by-step report.

use anyhow::{Context, Result};
use clap::Parser;
use cse_calculator::assumptions::load_assumptions;
use cse_calculator::household::loader::load_household;
use cse_calculator::means_test::load_flags_json;
use cse_calculator::{report, Assumptions, CseCalculator, Indicator, MeansTestFlags};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cse", about = "Socioeconomic tier (CSE) calculator")]
struct Args {
    /// Household members CSV (name,age,condition,studies,income_work,income_pension,income_capital)
    #[arg(long)]
    members: PathBuf,

    /// JSON object of means-test flags
    #[arg(long)]
    flags: Option<PathBuf>,

    /// Activate a means-test indicator (repeatable), e.g. --flag vehicles_very_high
    #[arg(long = "flag")]
    flag: Vec<Indicator>,

    /// JSON file overriding minimum wage, scale factor or income thresholds
    #[arg(long)]
    params: Option<PathBuf>,

    /// Print the full result as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let assumptions = match &args.params {
        Some(path) => load_assumptions(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => Assumptions::default_reference(),
    };

    let household = load_household(&args.members, &assumptions.coefficients)
        .with_context(|| format!("Failed to load household from {}", args.members.display()))?;

    let mut flags = match &args.flags {
        Some(path) => load_flags_json(path)
            .with_context(|| format!("Failed to load means-test flags from {}", path.display()))?,
        None => MeansTestFlags::default(),
    };
    for indicator in &args.flag {
        flags.set(*indicator, true);
    }

    let calculator = CseCalculator::new(assumptions);
    let result = calculator.calculate(&household, &flags);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render(&result, &calculator.assumptions().params));
    }

    Ok(())
}
