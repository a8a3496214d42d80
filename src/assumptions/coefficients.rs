//! Needs coefficients (Y) by age band and disability/dependency condition
//!
//! Reference values from Table 1 of Resolución Exenta N°082.

use serde::{Deserialize, Serialize};

/// Age band selecting the applicable coefficient sub-table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    /// 0 to 5 years
    EarlyChildhood,
    /// 6 to 14 years
    Child,
    /// 15 to 17 years
    Adolescent,
    /// 18 to 59 years
    Adult,
    /// 60 to 74 years
    Senior,
    /// 75 years and over
    Elderly,
}

impl AgeBand {
    pub const ALL: [AgeBand; 6] = [
        AgeBand::EarlyChildhood,
        AgeBand::Child,
        AgeBand::Adolescent,
        AgeBand::Adult,
        AgeBand::Senior,
        AgeBand::Elderly,
    ];

    /// Determine band from age in years (inclusive upper bounds)
    pub fn from_age(age: u32) -> Self {
        if age <= 5 {
            AgeBand::EarlyChildhood
        } else if age <= 14 {
            AgeBand::Child
        } else if age <= 17 {
            AgeBand::Adolescent
        } else if age <= 59 {
            AgeBand::Adult
        } else if age <= 74 {
            AgeBand::Senior
        } else {
            AgeBand::Elderly
        }
    }

    /// Get the range label used in the published table
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBand::EarlyChildhood => "0-5",
            AgeBand::Child => "6-14",
            AgeBand::Adolescent => "15-17",
            AgeBand::Adult => "18-59",
            AgeBand::Senior => "60-74",
            AgeBand::Elderly => "75+",
        }
    }
}

/// Disability, dependency or special educational needs (NEE) condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "Sin discapacidad, dependencia o NEE")]
    Unimpaired,
    /// Only defined for the 0-5 band
    #[serde(rename = "Con discapacidad, dependencia o NEE")]
    Present,
    #[serde(rename = "Discapacidad Leve")]
    Mild,
    #[serde(rename = "Discapacidad o dependencia moderada")]
    Moderate,
    #[serde(rename = "Discapacidad o dependencia severa/profunda o NEE")]
    Severe,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::Unimpaired,
        Condition::Present,
        Condition::Mild,
        Condition::Moderate,
        Condition::Severe,
    ];

    /// Label as it appears in the published table
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Unimpaired => "Sin discapacidad, dependencia o NEE",
            Condition::Present => "Con discapacidad, dependencia o NEE",
            Condition::Mild => "Discapacidad Leve",
            Condition::Moderate => "Discapacidad o dependencia moderada",
            Condition::Severe => "Discapacidad o dependencia severa/profunda o NEE",
        }
    }

    /// Parse a table label. Unknown labels yield `None` rather than an error.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// Coefficient table: ordered condition options per age band
#[derive(Debug, Clone)]
pub struct CoefficientTable {
    bands: Vec<(AgeBand, Vec<(Condition, f64)>)>,
}

impl Default for CoefficientTable {
    fn default() -> Self {
        // Option order per band matters: the first entry is the default selection
        Self {
            bands: vec![
                (AgeBand::EarlyChildhood, vec![
                    (Condition::Unimpaired, 0.40),
                    (Condition::Present, 0.80),
                ]),
                (AgeBand::Child, vec![
                    (Condition::Unimpaired, 0.30),
                    (Condition::Mild, 0.34),
                    (Condition::Moderate, 0.52),
                    (Condition::Severe, 0.64),
                ]),
                (AgeBand::Adolescent, vec![
                    (Condition::Unimpaired, 0.09),
                    (Condition::Mild, 0.34),
                    (Condition::Moderate, 0.52),
                    (Condition::Severe, 0.64),
                ]),
                (AgeBand::Adult, vec![
                    (Condition::Unimpaired, 0.00),
                    (Condition::Mild, 0.34),
                    (Condition::Moderate, 0.52),
                    (Condition::Severe, 0.64),
                ]),
                (AgeBand::Senior, vec![
                    (Condition::Unimpaired, 0.61),
                    (Condition::Mild, 0.68),
                    (Condition::Moderate, 0.82),
                    (Condition::Severe, 1.01),
                ]),
                (AgeBand::Elderly, vec![
                    (Condition::Unimpaired, 0.75),
                    (Condition::Mild, 0.77),
                    (Condition::Moderate, 0.82),
                    (Condition::Severe, 1.01),
                ]),
            ],
        }
    }
}

impl CoefficientTable {
    fn band_entries(&self, band: AgeBand) -> &[(Condition, f64)] {
        self.bands
            .iter()
            .find(|(b, _)| *b == band)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or(&[])
    }

    /// Condition options available for a band, in table order
    pub fn options_for(&self, band: AgeBand) -> Vec<Condition> {
        self.band_entries(band).iter().map(|(c, _)| *c).collect()
    }

    /// First option of the band, used as the default selection by input collectors
    pub fn default_condition(&self, band: AgeBand) -> Option<Condition> {
        self.band_entries(band).first().map(|(c, _)| *c)
    }

    /// Coefficient for a condition within a band, if the band defines it
    pub fn get_coefficient(&self, band: AgeBand, condition: Condition) -> Option<f64> {
        self.band_entries(band)
            .iter()
            .find(|(c, _)| *c == condition)
            .map(|(_, coef)| *coef)
    }

    /// Coefficient Y for a member of the given age and condition.
    /// Returns 0.0 when the condition is absent or not defined for the age band.
    pub fn coefficient_of(&self, age: u32, condition: Option<Condition>) -> f64 {
        let band = AgeBand::from_age(age);
        condition
            .and_then(|c| self.get_coefficient(band, c))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_band_boundaries() {
        assert_eq!(AgeBand::from_age(0), AgeBand::EarlyChildhood);
        assert_eq!(AgeBand::from_age(5), AgeBand::EarlyChildhood);
        assert_eq!(AgeBand::from_age(6), AgeBand::Child);
        assert_eq!(AgeBand::from_age(14), AgeBand::Child);
        assert_eq!(AgeBand::from_age(15), AgeBand::Adolescent);
        assert_eq!(AgeBand::from_age(17), AgeBand::Adolescent);
        assert_eq!(AgeBand::from_age(18), AgeBand::Adult);
        assert_eq!(AgeBand::from_age(59), AgeBand::Adult);
        assert_eq!(AgeBand::from_age(60), AgeBand::Senior);
        assert_eq!(AgeBand::from_age(74), AgeBand::Senior);
        assert_eq!(AgeBand::from_age(75), AgeBand::Elderly);
        assert_eq!(AgeBand::from_age(120), AgeBand::Elderly);
    }

    #[test]
    fn test_options_preserve_order() {
        let table = CoefficientTable::default();

        assert_eq!(
            table.options_for(AgeBand::EarlyChildhood),
            vec![Condition::Unimpaired, Condition::Present]
        );
        assert_eq!(
            table.options_for(AgeBand::Senior),
            vec![Condition::Unimpaired, Condition::Mild, Condition::Moderate, Condition::Severe]
        );

        for band in AgeBand::ALL {
            assert_eq!(table.default_condition(band), Some(Condition::Unimpaired));
        }
    }

    #[test]
    fn test_coefficient_lookup() {
        let table = CoefficientTable::default();

        assert_eq!(table.coefficient_of(3, Some(Condition::Present)), 0.80);
        assert_eq!(table.coefficient_of(10, Some(Condition::Unimpaired)), 0.30);
        assert_eq!(table.coefficient_of(16, Some(Condition::Unimpaired)), 0.09);
        assert_eq!(table.coefficient_of(30, Some(Condition::Unimpaired)), 0.0);
        assert_eq!(table.coefficient_of(65, Some(Condition::Severe)), 1.01);
        assert_eq!(table.coefficient_of(80, Some(Condition::Mild)), 0.77);
    }

    #[test]
    fn test_unknown_condition_for_band_is_zero() {
        let table = CoefficientTable::default();

        // "Con discapacidad" only exists for 0-5
        assert_eq!(table.coefficient_of(30, Some(Condition::Present)), 0.0);
        // Mild is not defined for 0-5
        assert_eq!(table.coefficient_of(2, Some(Condition::Mild)), 0.0);
        assert_eq!(table.coefficient_of(70, None), 0.0);
    }

    #[test]
    fn test_coefficients_within_range() {
        let table = CoefficientTable::default();
        for band in AgeBand::ALL {
            let options = table.options_for(band);
            assert!((2..=4).contains(&options.len()));
            for condition in options {
                let coef = table.get_coefficient(band, condition).unwrap();
                assert!((0.0..=1.01).contains(&coef));
            }
        }
    }

    #[test]
    fn test_condition_labels() {
        for condition in Condition::ALL {
            assert_eq!(Condition::from_label(condition.label()), Some(condition));
        }
        assert_eq!(Condition::from_label("  Discapacidad Leve "), Some(Condition::Mild));
        assert_eq!(Condition::from_label("desconocida"), None);
        assert_eq!(Condition::from_label(""), None);
    }
}
