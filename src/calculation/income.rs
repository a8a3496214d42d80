//! Household equivalent income (step 1)
//!
//! Sum of work, pension and capital income of adult members. Minors are
//! excluded. A studying member aged 18-24 only contributes income above
//! two minimum wages, and only the excess.

use crate::assumptions::CalculationParams;
use crate::household::Member;
use serde::{Deserialize, Serialize};

/// How a member's income entered the household total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeTreatment {
    /// Under 18: income excluded
    ExcludedMinor,
    /// Studying 18-24 with income at or below the threshold
    StudentBelowThreshold,
    /// Studying 18-24: only the excess over the threshold counts
    StudentExcess,
    /// Full income counts
    Full,
}

/// One member's contribution to equivalent income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeContribution {
    pub name: String,
    pub age: u32,
    pub income_work: f64,
    pub income_pension: f64,
    pub income_capital: f64,
    /// Amount counted toward the household
    pub counted: f64,
    pub treatment: IncomeTreatment,
}

/// Contribution of a single member
pub fn member_contribution(member: &Member, params: &CalculationParams) -> IncomeContribution {
    let total = member.total_income();

    let (counted, treatment) = if member.is_minor() {
        (0.0, IncomeTreatment::ExcludedMinor)
    } else if member.is_qualifying_student() {
        let threshold = params.student_income_threshold();
        if total > threshold {
            (total - threshold, IncomeTreatment::StudentExcess)
        } else {
            (0.0, IncomeTreatment::StudentBelowThreshold)
        }
    } else {
        (total, IncomeTreatment::Full)
    };

    IncomeContribution {
        name: member.name.clone(),
        age: member.age,
        income_work: member.income_work,
        income_pension: member.income_pension,
        income_capital: member.income_capital,
        counted,
        treatment,
    }
}

/// Per-member contributions in household order
pub fn income_breakdown(members: &[Member], params: &CalculationParams) -> Vec<IncomeContribution> {
    members.iter().map(|m| member_contribution(m, params)).collect()
}

/// Household equivalent income
pub fn equivalent_income(members: &[Member], params: &CalculationParams) -> f64 {
    members
        .iter()
        .map(|m| member_contribution(m, params).counted)
        .sum()
}
