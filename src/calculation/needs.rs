//! Needs index (step 2) and corrected equivalent income (step 3)
//!
//! IN = N^0.7 + Y1 + Y2 + ... + Yn

use crate::assumptions::{AgeBand, Assumptions, CoefficientTable, Condition};
use crate::household::Member;
use serde::{Deserialize, Serialize};

/// One member's coefficient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRow {
    pub name: String,
    pub age: u32,
    pub band: AgeBand,
    pub condition: Option<Condition>,
    pub coefficient: f64,
}

/// Household size term N^scale_factor
pub fn size_component(member_count: usize, scale_factor: f64) -> f64 {
    (member_count as f64).powf(scale_factor)
}

/// Per-member coefficients in household order
pub fn coefficient_breakdown(members: &[Member], table: &CoefficientTable) -> Vec<CoefficientRow> {
    members
        .iter()
        .map(|m| CoefficientRow {
            name: m.name.clone(),
            age: m.age,
            band: m.age_band(),
            condition: m.condition,
            coefficient: table.coefficient_of(m.age, m.condition),
        })
        .collect()
}

/// Sum of member coefficients (Y1 + ... + Yn)
pub fn coefficient_sum(members: &[Member], table: &CoefficientTable) -> f64 {
    members
        .iter()
        .map(|m| table.coefficient_of(m.age, m.condition))
        .sum()
}

/// Needs index of the household
pub fn needs_index(members: &[Member], assumptions: &Assumptions) -> f64 {
    size_component(members.len(), assumptions.params.scale_factor)
        + coefficient_sum(members, &assumptions.coefficients)
}

/// Equivalent income divided by the needs index; 0 when the index is 0
pub fn corrected_income(equivalent_income: f64, needs_index: f64) -> f64 {
    if needs_index == 0.0 {
        return 0.0;
    }
    equivalent_income / needs_index
}
