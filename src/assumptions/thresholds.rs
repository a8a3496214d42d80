//! Income thresholds for the income-based tier
//!
//! Reference ceilings (CLP, corrected equivalent income) based on CASEN.
//! These are approximate values, not the official cut-offs.

use crate::calculation::Tier;
use super::AssumptionsError;

/// Ordered (ceiling, tier) pairs, matched first-ascending
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    /// Strictly increasing ceilings; the last entry is unbounded
    entries: Vec<(f64, Tier)>,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            entries: vec![
                (82_174.0, Tier::Forty),
                (136_382.0, Tier::Fifty),
                (214_052.0, Tier::Sixty),
                (340_205.0, Tier::Seventy),
                (559_341.0, Tier::Eighty),
                (1_043_790.0, Tier::Ninety),
                (f64::INFINITY, Tier::Hundred),
            ],
        }
    }
}

impl ThresholdTable {
    /// Create from loaded (ceiling, tier) rows.
    ///
    /// Ceilings must be finite and strictly increasing, tiers must not
    /// decrease, and tier 0 is not an income tier. An unbounded tier 100
    /// entry is appended to terminate the table.
    pub fn from_loaded(rows: &[(f64, Tier)]) -> Result<Self, AssumptionsError> {
        let mut previous: Option<(f64, Tier)> = None;
        for &(ceiling, tier) in rows {
            if !ceiling.is_finite() {
                return Err(AssumptionsError::InvalidThreshold(ceiling));
            }
            if tier == Tier::Unassigned {
                return Err(AssumptionsError::UnassignedIncomeTier { ceiling });
            }
            if let Some((prev_ceiling, prev_tier)) = previous {
                if ceiling <= prev_ceiling {
                    return Err(AssumptionsError::ThresholdsNotAscending {
                        previous: prev_ceiling,
                        next: ceiling,
                    });
                }
                if tier < prev_tier {
                    return Err(AssumptionsError::TiersNotAscending { previous: prev_tier, next: tier });
                }
            }
            previous = Some((ceiling, tier));
        }

        let mut entries = rows.to_vec();
        entries.push((f64::INFINITY, Tier::Hundred));
        Ok(Self { entries })
    }

    /// Income tier for a corrected equivalent income: first entry whose
    /// ceiling is >= the income
    pub fn tier_for(&self, corrected_income: f64) -> Tier {
        for (ceiling, tier) in &self.entries {
            if corrected_income <= *ceiling {
                return *tier;
            }
        }
        // Unreachable with the unbounded final entry; kept for NaN inputs
        Tier::Hundred
    }

    /// Bounded ceilings in order
    pub fn ceilings(&self) -> impl Iterator<Item = (f64, Tier)> + '_ {
        self.entries
            .iter()
            .copied()
            .filter(|(ceiling, _)| ceiling.is_finite())
    }
}
