//! Ordered tier resolution rules for the means test
//!
//! Rules run in the order of [`RESOLUTION_RULES`]. Each rule sees the active
//! indicators and the tier produced by the rules before it, and may replace
//! that tier. Later rules override earlier ones.

use super::flags::{Category, Indicator, Level, MeansTestFlags};
use crate::calculation::Tier;

/// Active indicators split by level, in category order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveIndicators {
    high: Vec<Indicator>,
    very_high: Vec<Indicator>,
}

impl ActiveIndicators {
    pub fn from_flags(flags: &MeansTestFlags) -> Self {
        let (high, very_high): (Vec<Indicator>, Vec<Indicator>) =
            flags.active().partition(|i| i.level() == Level::High);
        Self { high, very_high }
    }

    pub fn high(&self) -> &[Indicator] {
        &self.high
    }

    /// Each very-high flag counts separately, even when several share a category
    pub fn very_high(&self) -> &[Indicator] {
        &self.very_high
    }

    pub fn high_count(&self) -> usize {
        self.high.len()
    }

    pub fn very_high_count(&self) -> usize {
        self.very_high.len()
    }

    pub fn total(&self) -> usize {
        self.high.len() + self.very_high.len()
    }
}

/// Tier a single high-value category supports on its own.
///
/// Education and real estate only count alongside another high-value
/// indicator; `high_count` includes the category itself.
pub fn high_value_candidate(category: Category, high_count: usize) -> Option<Tier> {
    match category {
        Category::Health | Category::Vehicles => Some(Tier::Fifty),
        Category::AbsentParent => Some(Tier::Eighty),
        Category::Education | Category::RealEstate if high_count >= 2 => Some(Tier::Fifty),
        Category::Education | Category::RealEstate => None,
    }
}

pub type RuleFn = fn(&ActiveIndicators, Tier) -> Option<Tier>;

/// A named resolution step
#[derive(Clone, Copy)]
pub struct ResolutionRule {
    pub name: &'static str,
    pub apply: RuleFn,
}

impl std::fmt::Debug for ResolutionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionRule").field("name", &self.name).finish()
    }
}

/// Any very-high indicator places the household in tier 90
fn any_very_high(active: &ActiveIndicators, _current: Tier) -> Option<Tier> {
    (active.very_high_count() >= 1).then_some(Tier::Ninety)
}

/// Two or more very-high indicators place the household in tier 100
fn two_very_high(active: &ActiveIndicators, _current: Tier) -> Option<Tier> {
    (active.very_high_count() >= 2).then_some(Tier::Hundred)
}

/// Highest tier supported by an individual high-value indicator.
/// Only runs while no tier has been assigned.
fn best_high_value(active: &ActiveIndicators, current: Tier) -> Option<Tier> {
    if current != Tier::Unassigned {
        return None;
    }
    active
        .high()
        .iter()
        .filter_map(|i| high_value_candidate(i.category(), active.high_count()))
        .max()
}

/// Two high-value indicators reach at least tier 70
fn two_high_floor(active: &ActiveIndicators, current: Tier) -> Option<Tier> {
    let applies = active.very_high_count() == 0
        && active.high_count() >= 2
        && current < Tier::Seventy;
    applies.then_some(Tier::Seventy)
}

/// Three or more high-value indicators place the household in tier 90
fn three_high(active: &ActiveIndicators, _current: Tier) -> Option<Tier> {
    (active.very_high_count() == 0 && active.high_count() >= 3).then_some(Tier::Ninety)
}

/// Resolution steps in evaluation order
pub const RESOLUTION_RULES: [ResolutionRule; 5] = [
    ResolutionRule { name: "any_very_high", apply: any_very_high },
    ResolutionRule { name: "two_very_high", apply: two_very_high },
    ResolutionRule { name: "best_high_value", apply: best_high_value },
    ResolutionRule { name: "two_high_floor", apply: two_high_floor },
    ResolutionRule { name: "three_high", apply: three_high },
];

/// Run every rule in order, starting from `Tier::Unassigned`
pub fn resolve_tier(active: &ActiveIndicators) -> Tier {
    RESOLUTION_RULES
        .iter()
        .fold(Tier::Unassigned, |tier, rule| match (rule.apply)(active, tier) {
            Some(next) => {
                log::trace!("means test rule {}: {} -> {}", rule.name, tier, next);
                next
            }
            None => tier,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(indicators: &[Indicator]) -> ActiveIndicators {
        ActiveIndicators::from_flags(&MeansTestFlags::with(indicators))
    }

    fn has_high(a: &ActiveIndicators, category: Category) -> bool {
        a.high().iter().any(|i| i.category() == category)
    }

    #[test]
    fn test_active_split() {
        let a = active(&[
            Indicator::VehiclesHigh,
            Indicator::VehiclesVeryHigh,
            Indicator::MajorVessel,
            Indicator::ThreeMinorVessels,
        ]);
        assert_eq!(a.high(), &[Indicator::VehiclesHigh]);
        assert_eq!(a.very_high_count(), 3);
        assert_eq!(a.total(), 4);
        assert!(has_high(&a, Category::Vehicles));
        assert!(!has_high(&a, Category::Health));
    }

    #[test]
    fn test_high_value_candidates() {
        assert_eq!(high_value_candidate(Category::Health, 1), Some(Tier::Fifty));
        assert_eq!(high_value_candidate(Category::Vehicles, 1), Some(Tier::Fifty));
        assert_eq!(high_value_candidate(Category::AbsentParent, 1), Some(Tier::Eighty));
        assert_eq!(high_value_candidate(Category::Education, 1), None);
        assert_eq!(high_value_candidate(Category::RealEstate, 1), None);
        assert_eq!(high_value_candidate(Category::Education, 2), Some(Tier::Fifty));
        assert_eq!(high_value_candidate(Category::RealEstate, 2), Some(Tier::Fifty));
    }

    #[test]
    fn test_rules_in_isolation() {
        let one_vh = active(&[Indicator::RealEstateVeryHigh]);
        assert_eq!(any_very_high(&one_vh, Tier::Unassigned), Some(Tier::Ninety));
        assert_eq!(two_very_high(&one_vh, Tier::Ninety), None);

        let two_vh = active(&[Indicator::MajorVessel, Indicator::ThreeMinorVessels]);
        assert_eq!(two_very_high(&two_vh, Tier::Ninety), Some(Tier::Hundred));

        let health = active(&[Indicator::HealthHigh]);
        assert_eq!(best_high_value(&health, Tier::Unassigned), Some(Tier::Fifty));
        assert_eq!(best_high_value(&health, Tier::Ninety), None);
        assert_eq!(two_high_floor(&health, Tier::Fifty), None);

        let pair = active(&[Indicator::HealthHigh, Indicator::VehiclesHigh]);
        assert_eq!(two_high_floor(&pair, Tier::Fifty), Some(Tier::Seventy));
        assert_eq!(two_high_floor(&pair, Tier::Eighty), None);
        assert_eq!(three_high(&pair, Tier::Seventy), None);

        let triple = active(&[Indicator::HealthHigh, Indicator::VehiclesHigh, Indicator::AbsentParentHigh]);
        assert_eq!(three_high(&triple, Tier::Eighty), Some(Tier::Ninety));
    }

    #[test]
    fn test_high_rules_skip_when_very_high_fired() {
        let mixed = active(&[
            Indicator::HealthHigh,
            Indicator::VehiclesHigh,
            Indicator::AbsentParentHigh,
            Indicator::HealthVeryHigh,
            Indicator::RealEstateVeryHigh,
        ]);
        assert_eq!(three_high(&mixed, Tier::Hundred), None);
        assert_eq!(two_high_floor(&mixed, Tier::Hundred), None);
        assert_eq!(resolve_tier(&mixed), Tier::Hundred);
    }

    #[test]
    fn test_resolve_tier_examples() {
        assert_eq!(resolve_tier(&active(&[])), Tier::Unassigned);
        assert_eq!(resolve_tier(&active(&[Indicator::EducationHigh])), Tier::Unassigned);
        assert_eq!(resolve_tier(&active(&[Indicator::RealEstateHigh])), Tier::Unassigned);
        assert_eq!(resolve_tier(&active(&[Indicator::HealthHigh])), Tier::Fifty);
        assert_eq!(resolve_tier(&active(&[Indicator::AbsentParentHigh])), Tier::Eighty);
        assert_eq!(
            resolve_tier(&active(&[Indicator::EducationHigh, Indicator::RealEstateHigh])),
            Tier::Seventy
        );
        assert_eq!(
            resolve_tier(&active(&[Indicator::EducationHigh, Indicator::AbsentParentHigh])),
            Tier::Eighty
        );
        assert_eq!(resolve_tier(&active(&[Indicator::MajorVessel])), Tier::Ninety);
        assert_eq!(
            resolve_tier(&active(&[Indicator::VehiclesVeryHigh, Indicator::MajorVessel])),
            Tier::Hundred
        );
    }

    /// Straight-line statement of the procedure, checked against the rule list
    /// for every combination of the eleven flags
    fn reference_tier(a: &ActiveIndicators) -> Tier {
        let mut tier = Tier::Unassigned;
        if a.very_high_count() >= 1 {
            tier = Tier::Ninety;
        }
        if a.very_high_count() >= 2 {
            tier = Tier::Hundred;
        }
        if tier == Tier::Unassigned {
            let mut best = Tier::Unassigned;
            for category in [Category::Health, Category::Vehicles, Category::AbsentParent] {
                if has_high(a, category) {
                    best = best.max(high_value_candidate(category, 1).unwrap());
                }
            }
            for category in [Category::Education, Category::RealEstate] {
                if has_high(a, category) && a.high_count() >= 2 {
                    best = best.max(Tier::Fifty);
                }
            }
            tier = best;
            if a.high_count() >= 2 && tier < Tier::Seventy {
                tier = Tier::Seventy;
            }
            if a.high_count() >= 3 {
                tier = Tier::Ninety;
            }
        }
        tier
    }

    #[test]
    fn test_rule_list_matches_reference_for_all_flag_combinations() {
        for mask in 0u32..(1 << Indicator::ALL.len()) {
            let indicators: Vec<_> = Indicator::ALL
                .into_iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, i)| i)
                .collect();
            let a = active(&indicators);
            assert_eq!(resolve_tier(&a), reference_tier(&a), "indicators: {indicators:?}");
        }
    }
}
