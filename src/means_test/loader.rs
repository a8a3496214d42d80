//! Load means-test flags from disk
//!
//! Two formats are supported:
//! - a JSON object of booleans for a single household (`load_flags_json`)
//! - a long-format CSV of `household_id,indicator` rows for batches
//!   (`load_flag_assignments`), one row per activated indicator

use super::flags::{Indicator, MeansTestFlags, UnknownIndicator};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FlagsError {
    #[error("line {line}: {source}")]
    UnknownIndicator {
        line: usize,
        #[source]
        source: UnknownIndicator,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to parse flags: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct AssignmentRecord {
    household_id: String,
    indicator: String,
}

/// Read a JSON object of flags for one household
pub fn load_flags_json<P: AsRef<Path>>(path: P) -> Result<MeansTestFlags, FlagsError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Read `household_id,indicator` rows into flags per household
pub fn load_flag_assignments_from_reader<R: Read>(
    reader: R,
) -> Result<HashMap<String, MeansTestFlags>, FlagsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut assignments: HashMap<String, MeansTestFlags> = HashMap::new();
    for (idx, result) in rdr.deserialize::<AssignmentRecord>().enumerate() {
        let record = result?;
        let indicator: Indicator = record
            .indicator
            .parse()
            .map_err(|source| FlagsError::UnknownIndicator { line: idx + 2, source })?;
        assignments
            .entry(record.household_id)
            .or_default()
            .set(indicator, true);
    }

    log::debug!("Loaded means-test flags for {} households", assignments.len());
    Ok(assignments)
}

pub fn load_flag_assignments<P: AsRef<Path>>(
    path: P,
) -> Result<HashMap<String, MeansTestFlags>, FlagsError> {
    let file = File::open(path)?;
    load_flag_assignments_from_reader(file)
}
