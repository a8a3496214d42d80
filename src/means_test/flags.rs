//! Means-test indicators (factores de reordenamiento)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Means-test category, numbered 1-5 in the published procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// 1. Health insurance contribution
    Health,
    /// 2. High-value school enrollment
    Education,
    /// 3. Land vehicles and vessels
    Vehicles,
    /// 4. Real estate
    RealEstate,
    /// 5. Income of a parent living outside the household
    AbsentParent,
}

/// Activation level of an indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    VeryHigh,
}

/// One of the eleven means-test indicators, in category order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    HealthHigh,
    HealthVeryHigh,
    EducationHigh,
    VehiclesHigh,
    VehiclesVeryHigh,
    MajorVessel,
    ThreeMinorVessels,
    RealEstateHigh,
    RealEstateVeryHigh,
    AbsentParentHigh,
    AbsentParentVeryHigh,
}

impl Indicator {
    pub const ALL: [Indicator; 11] = [
        Indicator::HealthHigh,
        Indicator::HealthVeryHigh,
        Indicator::EducationHigh,
        Indicator::VehiclesHigh,
        Indicator::VehiclesVeryHigh,
        Indicator::MajorVessel,
        Indicator::ThreeMinorVessels,
        Indicator::RealEstateHigh,
        Indicator::RealEstateVeryHigh,
        Indicator::AbsentParentHigh,
        Indicator::AbsentParentVeryHigh,
    ];

    pub fn category(&self) -> Category {
        match self {
            Indicator::HealthHigh | Indicator::HealthVeryHigh => Category::Health,
            Indicator::EducationHigh => Category::Education,
            Indicator::VehiclesHigh
            | Indicator::VehiclesVeryHigh
            | Indicator::MajorVessel
            | Indicator::ThreeMinorVessels => Category::Vehicles,
            Indicator::RealEstateHigh | Indicator::RealEstateVeryHigh => Category::RealEstate,
            Indicator::AbsentParentHigh | Indicator::AbsentParentVeryHigh => Category::AbsentParent,
        }
    }

    /// Vessel indicators have no high counterpart and count as very high
    pub fn level(&self) -> Level {
        match self {
            Indicator::HealthHigh
            | Indicator::EducationHigh
            | Indicator::VehiclesHigh
            | Indicator::RealEstateHigh
            | Indicator::AbsentParentHigh => Level::High,
            _ => Level::VeryHigh,
        }
    }

    /// Snake-case key used in flag files and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Indicator::HealthHigh => "health_high",
            Indicator::HealthVeryHigh => "health_very_high",
            Indicator::EducationHigh => "education_high",
            Indicator::VehiclesHigh => "vehicles_high",
            Indicator::VehiclesVeryHigh => "vehicles_very_high",
            Indicator::MajorVessel => "major_vessel",
            Indicator::ThreeMinorVessels => "three_minor_vessels",
            Indicator::RealEstateHigh => "real_estate_high",
            Indicator::RealEstateVeryHigh => "real_estate_very_high",
            Indicator::AbsentParentHigh => "absent_parent_high",
            Indicator::AbsentParentVeryHigh => "absent_parent_very_high",
        }
    }

    /// Key used by the registry forms (`salud_alto_valor`, ...)
    pub fn registry_key(&self) -> &'static str {
        match self {
            Indicator::HealthHigh => "salud_alto_valor",
            Indicator::HealthVeryHigh => "salud_muy_alto_valor",
            Indicator::EducationHigh => "educacion_alto_valor",
            Indicator::VehiclesHigh => "vehiculos_alto_valor",
            Indicator::VehiclesVeryHigh => "vehiculos_muy_alto_valor",
            Indicator::MajorVessel => "nave_mayor",
            Indicator::ThreeMinorVessels => "tres_naves_menores",
            Indicator::RealEstateHigh => "bienes_raices_alto_valor",
            Indicator::RealEstateVeryHigh => "bienes_raices_muy_alto_valor",
            Indicator::AbsentParentHigh => "padre_madre_alto_valor",
            Indicator::AbsentParentVeryHigh => "padre_madre_muy_alto_valor",
        }
    }

    /// Activation description shown in the report
    pub fn description(&self) -> &'static str {
        match self {
            Indicator::HealthHigh => "Cotización de salud: Plan de alto valor -> Tramo 50",
            Indicator::HealthVeryHigh => "Cotización de salud: Plan de muy alto valor -> Tramo 90",
            Indicator::EducationHigh => "Matrícula educacional de alto valor (>= $100.000)",
            Indicator::VehiclesHigh => "Vehículos: Alto valor (>= 20% más costosos) -> Tramo 50",
            Indicator::VehiclesVeryHigh => "Vehículos: Muy alto valor (>= 5% más costosos) -> Tramo 90",
            Indicator::MajorVessel => "Nave mayor -> Tramo 90",
            Indicator::ThreeMinorVessels => "3 o más naves menores/deportivas -> Tramo 90",
            Indicator::RealEstateHigh => {
                "Bienes raíces: Alto valor (>= 20% más costosos) -> Se activa con otro medio"
            }
            Indicator::RealEstateVeryHigh => {
                "Bienes raíces: Muy alto valor (>= 5% más costosos) -> Tramo 90"
            }
            Indicator::AbsentParentHigh => "Ingresos padre/madre no presente: Alto valor -> Tramo 80",
            Indicator::AbsentParentVeryHigh => {
                "Ingresos padre/madre no presente: Muy alto valor -> Tramo 90"
            }
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown means-test indicator '{0}'")]
pub struct UnknownIndicator(pub String);

impl FromStr for Indicator {
    type Err = UnknownIndicator;

    /// Accepts both the snake-case key and the registry key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Indicator::ALL
            .into_iter()
            .find(|i| i.key().eq_ignore_ascii_case(s) || i.registry_key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownIndicator(s.to_string()))
    }
}

/// The eleven means-test flags. Missing fields default to false; unknown
/// keys are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeansTestFlags {
    #[serde(alias = "salud_alto_valor")]
    pub health_high: bool,
    #[serde(alias = "salud_muy_alto_valor")]
    pub health_very_high: bool,
    #[serde(alias = "educacion_alto_valor")]
    pub education_high: bool,
    #[serde(alias = "vehiculos_alto_valor")]
    pub vehicles_high: bool,
    #[serde(alias = "vehiculos_muy_alto_valor")]
    pub vehicles_very_high: bool,
    #[serde(alias = "nave_mayor")]
    pub major_vessel: bool,
    #[serde(alias = "tres_naves_menores")]
    pub three_minor_vessels: bool,
    #[serde(alias = "bienes_raices_alto_valor")]
    pub real_estate_high: bool,
    #[serde(alias = "bienes_raices_muy_alto_valor")]
    pub real_estate_very_high: bool,
    #[serde(alias = "padre_madre_alto_valor")]
    pub absent_parent_high: bool,
    #[serde(alias = "padre_madre_muy_alto_valor")]
    pub absent_parent_very_high: bool,
}

impl MeansTestFlags {
    /// Flags with the given indicators set
    pub fn with(indicators: &[Indicator]) -> Self {
        let mut flags = Self::default();
        for indicator in indicators {
            flags.set(*indicator, true);
        }
        flags
    }

    fn slot(&mut self, indicator: Indicator) -> &mut bool {
        match indicator {
            Indicator::HealthHigh => &mut self.health_high,
            Indicator::HealthVeryHigh => &mut self.health_very_high,
            Indicator::EducationHigh => &mut self.education_high,
            Indicator::VehiclesHigh => &mut self.vehicles_high,
            Indicator::VehiclesVeryHigh => &mut self.vehicles_very_high,
            Indicator::MajorVessel => &mut self.major_vessel,
            Indicator::ThreeMinorVessels => &mut self.three_minor_vessels,
            Indicator::RealEstateHigh => &mut self.real_estate_high,
            Indicator::RealEstateVeryHigh => &mut self.real_estate_very_high,
            Indicator::AbsentParentHigh => &mut self.absent_parent_high,
            Indicator::AbsentParentVeryHigh => &mut self.absent_parent_very_high,
        }
    }

    pub fn set(&mut self, indicator: Indicator, value: bool) {
        *self.slot(indicator) = value;
    }

    pub fn is_set(&self, indicator: Indicator) -> bool {
        match indicator {
            Indicator::HealthHigh => self.health_high,
            Indicator::HealthVeryHigh => self.health_very_high,
            Indicator::EducationHigh => self.education_high,
            Indicator::VehiclesHigh => self.vehicles_high,
            Indicator::VehiclesVeryHigh => self.vehicles_very_high,
            Indicator::MajorVessel => self.major_vessel,
            Indicator::ThreeMinorVessels => self.three_minor_vessels,
            Indicator::RealEstateHigh => self.real_estate_high,
            Indicator::RealEstateVeryHigh => self.real_estate_very_high,
            Indicator::AbsentParentHigh => self.absent_parent_high,
            Indicator::AbsentParentVeryHigh => self.absent_parent_very_high,
        }
    }

    /// Set indicators in category order
    pub fn active(&self) -> impl Iterator<Item = Indicator> + '_ {
        Indicator::ALL.into_iter().filter(|i| self.is_set(*i))
    }
}
