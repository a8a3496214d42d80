//! Household data structures and CSV loading

mod data;
pub mod loader;

pub use data::{Member, Household, ADULT_AGE, STUDENT_AGE_RANGE};
pub use loader::{
    load_household, load_households, load_households_from_reader, load_members_from_reader,
    parse_amount, parse_flag,
};

/// Validation failures at the input boundary
#[derive(Debug, thiserror::Error)]
pub enum HouseholdError {
    #[error("the household must have at least one member")]
    EmptyHousehold,
    #[error("line {line} ({member}): invalid {field} amount '{value}'")]
    InvalidAmount {
        line: usize,
        member: String,
        field: &'static str,
        value: String,
    },
    #[error("line {line} ({member}): invalid age '{value}'")]
    InvalidAge {
        line: usize,
        member: String,
        value: String,
    },
    #[error("line {line} ({member}): invalid studies value '{value}'")]
    InvalidFlag {
        line: usize,
        member: String,
        value: String,
    },
    #[error("line {line}: missing household_id")]
    MissingHouseholdId { line: usize },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
