//! Calculate CSE tiers for a file of households
//!
//! Members CSV must carry a `household_id` column. Means-test flags come from an
//! optional `household_id,indicator` CSV. Writes one summary row per household.

use anyhow::{Context, Result};
use clap::Parser;
use cse_calculator::assumptions::load_assumptions;
use cse_calculator::household::loader::load_households;
use cse_calculator::means_test::load_flag_assignments;
use cse_calculator::{Assumptions, CseCalculator, MeansTestFlags, Tier};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Batch socioeconomic tier (CSE) calculation")]
struct Args {
    /// Members CSV with a household_id column
    #[arg(long)]
    members: PathBuf,

    /// Means-test assignments CSV (household_id,indicator)
    #[arg(long)]
    flags: Option<PathBuf>,

    /// JSON file overriding minimum wage, scale factor or income thresholds
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, default_value = "cse_batch_output.csv")]
    output: PathBuf,
}

/// Summary row per household
#[derive(Debug, Serialize)]
struct BatchRow {
    household_id: String,
    members: usize,
    equivalent_income: f64,
    needs_index: f64,
    corrected_income: f64,
    income_tier: Tier,
    means_test_tier: Tier,
    final_tier: Tier,
    activated_means: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();

    let assumptions = match &args.params {
        Some(path) => load_assumptions(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => Assumptions::default_reference(),
    };

    println!("Loading households from {}...", args.members.display());
    let households = load_households(&args.members, &assumptions.coefficients)
        .with_context(|| format!("Failed to load households from {}", args.members.display()))?;
    println!("Loaded {} households in {:?}", households.len(), start.elapsed());

    let assignments: HashMap<String, MeansTestFlags> = match &args.flags {
        Some(path) => load_flag_assignments(path)
            .with_context(|| format!("Failed to load means-test flags from {}", path.display()))?,
        None => HashMap::new(),
    };
    for id in assignments.keys() {
        if !households.iter().any(|(household_id, _)| household_id == id) {
            log::warn!("Means-test flags for unknown household '{}' ignored", id);
        }
    }

    let calc_start = Instant::now();
    let calculator = CseCalculator::new(assumptions);
    let no_flags = MeansTestFlags::default();

    let rows: Vec<BatchRow> = households
        .par_iter()
        .map(|(id, household)| {
            let flags = assignments.get(id).unwrap_or(&no_flags);
            let result = calculator.calculate(household, flags);
            BatchRow {
                household_id: id.clone(),
                members: result.member_count,
                equivalent_income: result.equivalent_income,
                needs_index: result.needs_index,
                corrected_income: result.corrected_income,
                income_tier: result.income_tier,
                means_test_tier: result.means_test_tier,
                final_tier: result.final_tier,
                activated_means: result.activated_means_count,
            }
        })
        .collect();
    println!("Calculations complete in {:?}", calc_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Output written to {}", args.output.display());

    let distribution: Vec<(Tier, usize)> = Tier::ALL
        .iter()
        .map(|tier| (*tier, rows.iter().filter(|r| r.final_tier == *tier).count()))
        .filter(|(_, count)| *count > 0)
        .collect();

    println!("\nFinal tier distribution:");
    for (tier, count) in &distribution {
        println!("  {:>5}: {}", tier.to_string(), count);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
