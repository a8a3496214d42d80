//! CSE calculation steps and engine

mod income;
mod needs;
mod tier;
mod engine;

pub use income::{equivalent_income, income_breakdown, member_contribution, IncomeContribution, IncomeTreatment};
pub use needs::{coefficient_breakdown, coefficient_sum, corrected_income, needs_index, size_component, CoefficientRow};
pub use tier::{resolve_final_tier, Classification, InvalidTier, Tier};
pub use engine::{CseCalculator, ComputationResult};
