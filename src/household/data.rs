//! Household member records

use crate::assumptions::{AgeBand, Condition};
use serde::{Deserialize, Serialize};
use super::HouseholdError;

/// Youngest age whose income counts toward the household
pub const ADULT_AGE: u32 = 18;

/// Ages for which a studying member's income is partially excluded
pub const STUDENT_AGE_RANGE: std::ops::RangeInclusive<u32> = 18..=24;

/// A single household member (integrante)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Display name
    pub name: String,

    /// Age in years
    pub age: u32,

    /// Disability/dependency condition; `None` when absent or unrecognized
    #[serde(default)]
    pub condition: Option<Condition>,

    /// Whether the member is studying (only relevant for ages 18-24)
    #[serde(default)]
    pub studies: bool,

    /// Average monthly labor income
    #[serde(default)]
    pub income_work: f64,

    /// Average monthly pension income
    #[serde(default)]
    pub income_pension: f64,

    /// Average monthly capital income
    #[serde(default)]
    pub income_capital: f64,
}

impl Member {
    /// Create a member with no income and not studying
    pub fn new(name: impl Into<String>, age: u32, condition: Option<Condition>) -> Self {
        Self {
            name: name.into(),
            age,
            condition,
            studies: false,
            income_work: 0.0,
            income_pension: 0.0,
            income_capital: 0.0,
        }
    }

    /// Set the three income components
    pub fn with_income(mut self, work: f64, pension: f64, capital: f64) -> Self {
        self.income_work = work;
        self.income_pension = pension;
        self.income_capital = capital;
        self
    }

    /// Mark the member as studying
    pub fn studying(mut self) -> Self {
        self.studies = true;
        self
    }

    /// Work + pension + capital
    pub fn total_income(&self) -> f64 {
        self.income_work + self.income_pension + self.income_capital
    }

    pub fn is_minor(&self) -> bool {
        self.age < ADULT_AGE
    }

    /// Studying and aged 18-24
    pub fn is_qualifying_student(&self) -> bool {
        self.studies && STUDENT_AGE_RANGE.contains(&self.age)
    }

    pub fn age_band(&self) -> AgeBand {
        AgeBand::from_age(self.age)
    }
}

/// A household with at least one member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Household {
    members: Vec<Member>,
}

impl Household {
    /// Build a household, rejecting an empty member list
    pub fn new(members: Vec<Member>) -> Result<Self, HouseholdError> {
        if members.is_empty() {
            return Err(HouseholdError::EmptyHousehold);
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_income_and_age_checks() {
        let member = Member::new("Ana", 22, Some(Condition::Unimpaired))
            .with_income(600_000.0, 100_000.0, 50_000.0)
            .studying();

        assert_eq!(member.total_income(), 750_000.0);
        assert!(!member.is_minor());
        assert!(member.is_qualifying_student());
        assert_eq!(member.age_band(), AgeBand::Adult);
    }

    #[test]
    fn test_student_age_range() {
        let at = |age| Member::new("x", age, None).studying().is_qualifying_student();

        assert!(!at(17));
        assert!(at(18));
        assert!(at(24));
        assert!(!at(25));
        assert!(!Member::new("x", 20, None).is_qualifying_student());
    }

    #[test]
    fn test_empty_household_rejected() {
        assert!(matches!(Household::new(Vec::new()), Err(HouseholdError::EmptyHousehold)));

        let household = Household::new(vec![Member::new("Ana", 30, None)]).unwrap();
        assert_eq!(household.members().len(), 1);
        assert_eq!(household.members()[0].name, "Ana");
    }
}
