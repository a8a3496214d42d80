//! CSE tiers, final tier resolution and classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Socioeconomic tier (tramo). `Unassigned` is only produced by the means test
/// when no indicator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tier {
    #[default]
    Unassigned,
    Forty,
    Fifty,
    Sixty,
    Seventy,
    Eighty,
    Ninety,
    Hundred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid tier percentage: {0}")]
pub struct InvalidTier(pub u8);

impl Tier {
    pub const ALL: [Tier; 8] = [
        Tier::Unassigned,
        Tier::Forty,
        Tier::Fifty,
        Tier::Sixty,
        Tier::Seventy,
        Tier::Eighty,
        Tier::Ninety,
        Tier::Hundred,
    ];

    /// Tier as a percentage (0, 40, 50, ..., 100)
    pub fn percent(&self) -> u8 {
        match self {
            Tier::Unassigned => 0,
            Tier::Forty => 40,
            Tier::Fifty => 50,
            Tier::Sixty => 60,
            Tier::Seventy => 70,
            Tier::Eighty => 80,
            Tier::Ninety => 90,
            Tier::Hundred => 100,
        }
    }

    pub fn from_percent(percent: u8) -> Result<Self, InvalidTier> {
        Self::ALL
            .into_iter()
            .find(|t| t.percent() == percent)
            .ok_or(InvalidTier(percent))
    }

    /// Published description of the tier
    pub fn description(&self) -> Option<&'static str> {
        match self {
            Tier::Unassigned => None,
            Tier::Forty => Some("Tramo 40% - Hogares de menores ingresos"),
            Tier::Fifty => Some("Tramo 50%"),
            Tier::Sixty => Some("Tramo 60%"),
            Tier::Seventy => Some("Tramo 70%"),
            Tier::Eighty => Some("Tramo 80%"),
            Tier::Ninety => Some("Tramo 90%"),
            Tier::Hundred => Some("Tramo 100% - Hogares de mayores ingresos"),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier.percent()
    }
}

impl TryFrom<u8> for Tier {
    type Error = InvalidTier;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Tier::from_percent(percent)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Broad classification of the final tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Tiers up to and including 70
    LowerIncomeHigherVulnerability,
    /// Tiers above 70
    HigherIncomeLowerVulnerability,
}

impl Classification {
    pub fn of(tier: Tier) -> Self {
        if tier <= Tier::Seventy {
            Classification::LowerIncomeHigherVulnerability
        } else {
            Classification::HigherIncomeLowerVulnerability
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Classification::LowerIncomeHigherVulnerability => "Menores ingresos y mayor vulnerabilidad",
            Classification::HigherIncomeLowerVulnerability => "Mayores ingresos y menor vulnerabilidad",
        }
    }
}

/// Final tier: the means test can only raise the income-based tier
pub fn resolve_final_tier(income_tier: Tier, means_test_tier: Tier) -> Tier {
    income_tier.max(means_test_tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering_follows_percent() {
        for pair in Tier::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].percent() < pair[1].percent());
        }
    }

    #[test]
    fn test_tier_percent_conversion() {
        assert_eq!(Tier::from_percent(0), Ok(Tier::Unassigned));
        assert_eq!(Tier::from_percent(70), Ok(Tier::Seventy));
        assert_eq!(Tier::from_percent(100), Ok(Tier::Hundred));
        assert_eq!(Tier::from_percent(45), Err(InvalidTier(45)));
        assert_eq!(Tier::from_percent(30), Err(InvalidTier(30)));
        assert_eq!(Tier::Eighty.to_string(), "80%");
    }

    #[test]
    fn test_tier_serializes_as_percent() {
        assert_eq!(serde_json::to_string(&Tier::Ninety).unwrap(), "90");
        let tier: Tier = serde_json::from_str("60").unwrap();
        assert_eq!(tier, Tier::Sixty);
        assert!(serde_json::from_str::<Tier>("65").is_err());
    }

    #[test]
    fn test_resolve_final_tier_takes_maximum() {
        for income in Tier::ALL {
            for means in Tier::ALL {
                let result = resolve_final_tier(income, means);
                assert_eq!(result.percent(), income.percent().max(means.percent()));
            }
        }
    }

    #[test]
    fn test_classification_boundary() {
        assert_eq!(Classification::of(Tier::Forty), Classification::LowerIncomeHigherVulnerability);
        assert_eq!(Classification::of(Tier::Seventy), Classification::LowerIncomeHigherVulnerability);
        assert_eq!(Classification::of(Tier::Eighty), Classification::HigherIncomeLowerVulnerability);
        assert_eq!(Classification::of(Tier::Hundred), Classification::HigherIncomeLowerVulnerability);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Tier::Unassigned.description(), None);
        assert_eq!(Tier::Forty.description(), Some("Tramo 40% - Hogares de menores ingresos"));
        assert_eq!(Tier::Hundred.description(), Some("Tramo 100% - Hogares de mayores ingresos"));
    }
}
