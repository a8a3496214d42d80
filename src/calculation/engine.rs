//! Calculation engine: runs the five CSE steps for a household

use super::income::{income_breakdown, IncomeContribution};
use super::needs::{coefficient_breakdown, corrected_income, size_component, CoefficientRow};
use super::tier::{resolve_final_tier, Classification, Tier};
use crate::assumptions::Assumptions;
use crate::household::{Household, Member};
use crate::means_test::{evaluate_means_test, MeansTestFlags};
use serde::{Deserialize, Serialize};

/// All step values of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    pub member_count: usize,

    /// Step 1
    pub equivalent_income: f64,
    pub income_breakdown: Vec<IncomeContribution>,

    /// Step 2: N^scale_factor + sum of coefficients
    pub needs_index: f64,
    pub size_component: f64,
    pub coefficient_sum: f64,
    pub coefficient_breakdown: Vec<CoefficientRow>,

    /// Step 3
    pub corrected_income: f64,

    /// Step 4
    pub income_tier: Tier,

    /// Step 5
    pub means_test_tier: Tier,
    pub activated_means_count: usize,
    pub activation_detail: Vec<String>,

    /// max(income tier, means-test tier)
    pub final_tier: Tier,
}

impl ComputationResult {
    pub fn classification(&self) -> Classification {
        Classification::of(self.final_tier)
    }
}

/// CSE calculator bound to a set of assumptions
#[derive(Debug, Clone, Default)]
pub struct CseCalculator {
    assumptions: Assumptions,
}

impl CseCalculator {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Calculate the tier of a validated household
    pub fn calculate(&self, household: &Household, flags: &MeansTestFlags) -> ComputationResult {
        self.calculate_members(household.members(), flags)
    }

    /// Calculate from a raw member slice. An empty slice yields a zero needs
    /// index and zero corrected income rather than an error.
    pub fn calculate_members(&self, members: &[Member], flags: &MeansTestFlags) -> ComputationResult {
        let params = &self.assumptions.params;

        // Step 1: equivalent income
        let income_breakdown = income_breakdown(members, params);
        let equivalent_income: f64 = income_breakdown.iter().map(|c| c.counted).sum();

        // Step 2: needs index
        let coefficient_breakdown = coefficient_breakdown(members, &self.assumptions.coefficients);
        let size_component = size_component(members.len(), params.scale_factor);
        let coefficient_sum: f64 = coefficient_breakdown.iter().map(|r| r.coefficient).sum();
        let needs_index = size_component + coefficient_sum;

        // Step 3: corrected income
        let corrected_income = corrected_income(equivalent_income, needs_index);

        // Step 4: income tier
        let income_tier = self.assumptions.thresholds.tier_for(corrected_income);

        // Step 5: means test
        let means = evaluate_means_test(flags);

        let final_tier = resolve_final_tier(income_tier, means.tier);

        log::debug!(
            "CSE: members={}, equivalent_income={:.0}, needs_index={:.8}, corrected_income={:.0}, \
             income_tier={}, means_test_tier={}, final_tier={}",
            members.len(),
            equivalent_income,
            needs_index,
            corrected_income,
            income_tier,
            means.tier,
            final_tier
        );

        ComputationResult {
            member_count: members.len(),
            equivalent_income,
            income_breakdown,
            needs_index,
            size_component,
            coefficient_sum,
            coefficient_breakdown,
            corrected_income,
            income_tier,
            means_test_tier: means.tier,
            activated_means_count: means.activated_count,
            activation_detail: means.detail,
            final_tier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{CalculationParams, Condition, ThresholdTable};
    use crate::calculation::{equivalent_income, needs_index};
    use crate::means_test::Indicator;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn household(members: Vec<Member>) -> Household {
        Household::new(members).expect("non-empty household")
    }

    #[test]
    fn test_single_adult_no_income() {
        let calc = CseCalculator::default();
        let h = household(vec![Member::new("Ana", 30, Some(Condition::Unimpaired))]);

        let result = calc.calculate(&h, &MeansTestFlags::default());

        assert_eq!(result.equivalent_income, 0.0);
        assert_relative_eq!(result.needs_index, 1.0);
        assert_eq!(result.corrected_income, 0.0);
        assert_eq!(result.income_tier, Tier::Forty);
        assert_eq!(result.means_test_tier, Tier::Unassigned);
        assert_eq!(result.final_tier, Tier::Forty);
        assert_eq!(result.activated_means_count, 0);
        assert_eq!(result.classification(), Classification::LowerIncomeHigherVulnerability);
    }

    #[test]
    fn test_adult_with_capital_and_child() {
        let calc = CseCalculator::default();
        let h = household(vec![
            Member::new("Padre", 40, Some(Condition::Unimpaired)).with_income(0.0, 0.0, 2_000_000.0),
            Member::new("Hijo", 10, Some(Condition::Unimpaired)),
        ]);

        let result = calc.calculate(&h, &MeansTestFlags::default());

        assert_relative_eq!(result.equivalent_income, 2_000_000.0);
        assert_abs_diff_eq!(result.needs_index, 1.924504793, epsilon = 1e-6);
        assert_abs_diff_eq!(result.corrected_income, 1_039_228.38, epsilon = 1.0);
        assert_eq!(result.income_tier, Tier::Ninety);
        assert_eq!(result.final_tier, Tier::Ninety);
        assert_eq!(result.classification(), Classification::HigherIncomeLowerVulnerability);
    }

    #[test]
    fn test_means_test_overrides_income() {
        let calc = CseCalculator::default();
        let h = household(vec![Member::new("Ana", 30, Some(Condition::Unimpaired))]);
        let flags = MeansTestFlags::with(&[Indicator::HealthVeryHigh, Indicator::VehiclesVeryHigh]);

        let result = calc.calculate(&h, &flags);

        assert_eq!(result.income_tier, Tier::Forty);
        assert_eq!(result.means_test_tier, Tier::Hundred);
        assert_eq!(result.final_tier, Tier::Hundred);
        assert_eq!(result.activated_means_count, 2);
        assert_eq!(result.activation_detail.len(), 2);
    }

    #[test]
    fn test_means_test_never_lowers_income_tier() {
        let calc = CseCalculator::default();
        let h = household(vec![Member::new("Ana", 45, None).with_income(3_000_000.0, 0.0, 0.0)]);
        let flags = MeansTestFlags::with(&[Indicator::HealthHigh]);

        let result = calc.calculate(&h, &flags);

        assert_eq!(result.income_tier, Tier::Hundred);
        assert_eq!(result.means_test_tier, Tier::Fifty);
        assert_eq!(result.final_tier, Tier::Hundred);
    }

    #[test]
    fn test_step_values_match_component_functions() {
        let calc = CseCalculator::default();
        let members = vec![
            Member::new("Madre", 38, Some(Condition::Mild)).with_income(650_000.0, 0.0, 0.0),
            Member::new("Hija", 21, None).with_income(1_100_000.0, 0.0, 0.0).studying(),
            Member::new("Abuela", 76, Some(Condition::Severe)).with_income(0.0, 210_000.0, 0.0),
            Member::new("Bebé", 1, Some(Condition::Present)),
        ];

        let result = calc.calculate_members(&members, &MeansTestFlags::default());
        let assumptions = calc.assumptions();

        assert_relative_eq!(result.equivalent_income, equivalent_income(&members, &assumptions.params));
        assert_relative_eq!(result.needs_index, needs_index(&members, assumptions));
        assert_relative_eq!(result.coefficient_sum, 0.34 + 0.0 + 1.01 + 0.80, epsilon = 1e-12);
        assert_eq!(result.member_count, 4);
        assert_eq!(result.income_breakdown.len(), 4);
        assert_eq!(result.coefficient_breakdown.len(), 4);
    }

    #[test]
    fn test_empty_members_are_guarded() {
        let calc = CseCalculator::default();
        let result = calc.calculate_members(&[], &MeansTestFlags::default());

        assert_eq!(result.needs_index, 0.0);
        assert_eq!(result.corrected_income, 0.0);
        assert_eq!(result.income_tier, Tier::Forty);
    }

    #[test]
    fn test_custom_assumptions() {
        let assumptions = Assumptions {
            params: CalculationParams { minimum_wage: 500_000.0, scale_factor: 1.0 },
            thresholds: ThresholdTable::from_loaded(&[(100_000.0, Tier::Forty)]).unwrap(),
            ..Assumptions::default()
        };
        let calc = CseCalculator::new(assumptions);
        let h = household(vec![
            Member::new("A", 30, None).with_income(150_000.0, 0.0, 0.0),
            Member::new("B", 30, None).with_income(150_000.0, 0.0, 0.0),
        ]);

        let result = calc.calculate(&h, &MeansTestFlags::default());

        assert_relative_eq!(result.needs_index, 2.0);
        assert_relative_eq!(result.corrected_income, 150_000.0);
        assert_eq!(result.income_tier, Tier::Hundred);
    }
}
