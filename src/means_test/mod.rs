//! Means-test evaluation (factores de reordenamiento)
//!
//! The means test checks household assets and spending against the declared
//! income and can only raise the income-based tier.

mod flags;
mod rules;
pub mod loader;

pub use flags::{Category, Indicator, Level, MeansTestFlags, UnknownIndicator};
pub use rules::{ActiveIndicators, ResolutionRule, RuleFn, RESOLUTION_RULES, high_value_candidate, resolve_tier};
pub use loader::{FlagsError, load_flag_assignments, load_flag_assignments_from_reader, load_flags_json};

use crate::calculation::Tier;
use serde::{Deserialize, Serialize};

/// Result of evaluating the means test for one household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeansTestOutcome {
    /// Inferred tier; `Unassigned` when no indicator applies
    pub tier: Tier,

    /// Number of activated indicators (high + very high)
    pub activated_count: usize,

    /// Activated indicators in category order
    pub indicators: Vec<Indicator>,

    /// Human-readable activation descriptions in category order
    pub detail: Vec<String>,
}

/// Evaluate the eleven means-test flags into an inferred tier
pub fn evaluate_means_test(flags: &MeansTestFlags) -> MeansTestOutcome {
    let active = ActiveIndicators::from_flags(flags);
    let tier = resolve_tier(&active);

    let indicators: Vec<Indicator> = flags.active().collect();
    let detail = indicators.iter().map(|i| i.description().to_string()).collect();

    log::debug!(
        "Means test: {} high, {} very high -> tier {}",
        active.high_count(),
        active.very_high_count(),
        tier
    );

    MeansTestOutcome {
        tier,
        activated_count: active.total(),
        indicators,
        detail,
    }
}
