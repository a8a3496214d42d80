//! CSE Calculator - Socioeconomic tier (Calificación Socioeconómica) engine
//!
//! This library provides:
//! - Coefficient and income-threshold reference tables
//! - Household equivalent income and needs index calculations
//! - Income-based tier classification
//! - Means-test (reordering factor) evaluation
//! - Final tier resolution and step-by-step reporting

pub mod assumptions;
pub mod household;
pub mod calculation;
pub mod means_test;
pub mod report;

// Re-export commonly used types
pub use assumptions::{Assumptions, CalculationParams, CoefficientTable, ThresholdTable, AgeBand, Condition};
pub use household::{Member, Household, HouseholdError};
pub use calculation::{CseCalculator, ComputationResult, Tier, Classification};
pub use means_test::{MeansTestFlags, Indicator, MeansTestOutcome, evaluate_means_test};
