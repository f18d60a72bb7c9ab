//! Fixed grievance taxonomy for RTI classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The eight complaint categories the classifier maps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrievanceCategory {
    RationCardDelay,
    PensionDelay,
    RoadRepair,
    WaterSupply,
    SchemeBenefitNotReceived,
    ElectricityIssue,
    MgnregaWageDelay,
    General,
}

impl GrievanceCategory {
    pub fn all() -> [GrievanceCategory; 8] {
        [
            GrievanceCategory::RationCardDelay,
            GrievanceCategory::PensionDelay,
            GrievanceCategory::RoadRepair,
            GrievanceCategory::WaterSupply,
            GrievanceCategory::SchemeBenefitNotReceived,
            GrievanceCategory::ElectricityIssue,
            GrievanceCategory::MgnregaWageDelay,
            GrievanceCategory::General,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrievanceCategory::RationCardDelay => "ration_card_delay",
            GrievanceCategory::PensionDelay => "pension_delay",
            GrievanceCategory::RoadRepair => "road_repair",
            GrievanceCategory::WaterSupply => "water_supply",
            GrievanceCategory::SchemeBenefitNotReceived => "scheme_benefit_not_received",
            GrievanceCategory::ElectricityIssue => "electricity_issue",
            GrievanceCategory::MgnregaWageDelay => "mgnrega_wage_delay",
            GrievanceCategory::General => "general",
        }
    }
}

impl fmt::Display for GrievanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GrievanceCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        GrievanceCategory::all()
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| {
                ValidationError::invalid_format("grievance_category", "not in taxonomy")
            })
    }
}
