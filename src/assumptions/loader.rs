//! Load assumption overrides from a JSON file
//!
//! Every field is optional:
//!
//! ```json
//! {
//!   "minimum_wage": 529000,
//!   "scale_factor": 0.7,
//!   "income_thresholds": [[82174, 40], [136382, 50]]
//! }
//! ```

use super::{Assumptions, AssumptionsError, CalculationParams};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw overrides as read from disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadedAssumptions {
    #[serde(flatten)]
    pub params: CalculationParams,

    /// Bounded (ceiling, tier percent) rows; tier 100 is implied above the last
    #[serde(default)]
    pub income_thresholds: Option<Vec<(f64, u8)>>,
}

/// Parse and validate assumptions from any JSON reader
pub fn load_assumptions_from_reader<R: Read>(reader: R) -> Result<Assumptions, AssumptionsError> {
    let loaded: LoadedAssumptions = serde_json::from_reader(reader)?;
    log::debug!(
        "Loaded assumptions: minimum_wage={}, scale_factor={}, custom thresholds={}",
        loaded.params.minimum_wage,
        loaded.params.scale_factor,
        loaded.income_thresholds.is_some()
    );
    Assumptions::from_loaded(&loaded)
}

/// Parse and validate assumptions from a JSON file
pub fn load_assumptions<P: AsRef<Path>>(path: P) -> Result<Assumptions, AssumptionsError> {
    let file = File::open(path)?;
    load_assumptions_from_reader(BufReader::new(file))
}
