//! Calculation assumptions: reference constants and lookup tables

mod coefficients;
mod thresholds;
pub mod loader;

pub use coefficients::{AgeBand, Condition, CoefficientTable};
pub use thresholds::ThresholdTable;
pub use loader::{LoadedAssumptions, load_assumptions, load_assumptions_from_reader};

use crate::calculation::{InvalidTier, Tier};
use serde::{Deserialize, Serialize};

/// Error raised while loading assumption overrides
#[derive(Debug, thiserror::Error)]
pub enum AssumptionsError {
    #[error("income threshold must be finite, got {0}")]
    InvalidThreshold(f64),
    #[error("income thresholds must be strictly ascending ({previous} followed by {next})")]
    ThresholdsNotAscending { previous: f64, next: f64 },
    #[error("income threshold {ceiling} maps to tier 0, which only the means test assigns")]
    UnassignedIncomeTier { ceiling: f64 },
    #[error("income tiers must not decrease ({previous} followed by {next})")]
    TiersNotAscending { previous: Tier, next: Tier },
    #[error("invalid tier in threshold table: {0}")]
    InvalidTier(#[from] InvalidTier),
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("failed to read assumptions: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse assumptions: {0}")]
    Json(#[from] serde_json::Error),
}

/// Scalar calculation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationParams {
    /// Reference monthly minimum wage (CLP)
    #[serde(default = "default_minimum_wage")]
    pub minimum_wage: f64,

    /// Exponent applied to household size in the needs index
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
}

fn default_minimum_wage() -> f64 { 500_000.0 }
fn default_scale_factor() -> f64 { 0.7 }

impl Default for CalculationParams {
    fn default() -> Self {
        Self {
            minimum_wage: default_minimum_wage(),
            scale_factor: default_scale_factor(),
        }
    }
}

impl CalculationParams {
    /// Income a studying 18-24 year old may earn before it counts (2 minimum wages)
    pub fn student_income_threshold(&self) -> f64 {
        2.0 * self.minimum_wage
    }
}

/// Complete set of assumptions used by the calculator
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    pub params: CalculationParams,
    pub coefficients: CoefficientTable,
    pub thresholds: ThresholdTable,
}

impl Assumptions {
    /// Reference values from Resolución Exenta N°082 and CASEN-based thresholds
    pub fn default_reference() -> Self {
        Self::default()
    }

    /// Create from loaded overrides; anything not overridden keeps its reference value
    pub fn from_loaded(loaded: &LoadedAssumptions) -> Result<Self, AssumptionsError> {
        if !(loaded.params.minimum_wage.is_finite() && loaded.params.minimum_wage >= 0.0) {
            return Err(AssumptionsError::InvalidParameter {
                name: "minimum_wage",
                value: loaded.params.minimum_wage,
            });
        }
        if !(loaded.params.scale_factor.is_finite() && loaded.params.scale_factor > 0.0) {
            return Err(AssumptionsError::InvalidParameter {
                name: "scale_factor",
                value: loaded.params.scale_factor,
            });
        }

        let thresholds = match &loaded.income_thresholds {
            Some(rows) => {
                let rows = rows
                    .iter()
                    .map(|&(ceiling, percent)| -> Result<(f64, Tier), AssumptionsError> {
                        Ok((ceiling, Tier::from_percent(percent)?))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                ThresholdTable::from_loaded(&rows)?
            }
            None => ThresholdTable::default(),
        };

        Ok(Self {
            params: loaded.params.clone(),
            coefficients: CoefficientTable::default(),
            thresholds,
        })
    }
}
