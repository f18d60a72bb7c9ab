//! Typed citizen attributes and their lenient parsers.
//!
//! Values arrive from model extraction as free-ish strings, so every
//! enum parses common synonyms and abbreviations in addition to its
//! canonical form. Parsers never guess: an unrecognized value is an
//! error and the field is simply not filled that turn.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Validated age in years, 0 to 120.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Age(u8);

impl Age {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 120;

    /// Creates an age, rejecting values outside 0..=120.
    pub fn new(years: i64) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&years) {
            return Err(ValidationError::out_of_range(
                "age",
                Self::MIN as i32,
                Self::MAX as i32,
                years.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            ));
        }
        Ok(Self(years as u8))
    }

    pub fn as_years(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated household size, 1 to 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilySize(u8);

impl FamilySize {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 30;

    /// Creates a family size, rejecting values outside 1..=30.
    pub fn new(members: i64) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&members) {
            return Err(ValidationError::out_of_range(
                "family_size",
                Self::MIN as i32,
                Self::MAX as i32,
                members.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            ));
        }
        Ok(Self(members as u8))
    }

    pub fn as_count(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for FamilySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Citizen gender as scheme rules express it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "man" => Ok(Gender::Male),
            "female" | "f" | "woman" => Ok(Gender::Female),
            "other" | "transgender" | "third gender" => Ok(Gender::Other),
            _ => Err(ValidationError::invalid_format("gender", "unrecognized value")),
        }
    }
}

/// Marital status; `Widowed` drives several pension and welfare rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Widowed,
    Divorced,
}

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
            MaritalStatus::Widowed => "widowed",
            MaritalStatus::Divorced => "divorced",
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaritalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "unmarried" => Ok(MaritalStatus::Single),
            "married" => Ok(MaritalStatus::Married),
            "widowed" | "widow" | "widower" => Ok(MaritalStatus::Widowed),
            "divorced" | "separated" => Ok(MaritalStatus::Divorced),
            _ => Err(ValidationError::invalid_format(
                "marital_status",
                "unrecognized value",
            )),
        }
    }
}

/// Occupation category used by eligibility predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Farmer,
    AgriculturalLabourer,
    DailyWageLabourer,
    StreetVendor,
    SelfEmployed,
    Salaried,
    Student,
    Homemaker,
    Unemployed,
    Retired,
    Other,
}

impl Occupation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occupation::Farmer => "farmer",
            Occupation::AgriculturalLabourer => "agricultural_labourer",
            Occupation::DailyWageLabourer => "daily_wage_labourer",
            Occupation::StreetVendor => "street_vendor",
            Occupation::SelfEmployed => "self_employed",
            Occupation::Salaried => "salaried",
            Occupation::Student => "student",
            Occupation::Homemaker => "homemaker",
            Occupation::Unemployed => "unemployed",
            Occupation::Retired => "retired",
            Occupation::Other => "other",
        }
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Occupation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "farmer" | "farming" | "kisan" | "cultivator" => Ok(Occupation::Farmer),
            "agricultural_labourer" | "agricultural_laborer" | "farm_labourer"
            | "farm_worker" => Ok(Occupation::AgriculturalLabourer),
            "daily_wage_labourer" | "daily_wage_laborer" | "labourer" | "laborer"
            | "daily_wage" | "construction_worker" | "mazdoor" => {
                Ok(Occupation::DailyWageLabourer)
            }
            "street_vendor" | "vendor" | "hawker" | "rehri" => Ok(Occupation::StreetVendor),
            "self_employed" | "business" | "shopkeeper" | "small_business" => {
                Ok(Occupation::SelfEmployed)
            }
            "salaried" | "employee" | "service" | "job" => Ok(Occupation::Salaried),
            "student" => Ok(Occupation::Student),
            "homemaker" | "housewife" | "house_wife" => Ok(Occupation::Homemaker),
            "unemployed" | "jobless" => Ok(Occupation::Unemployed),
            "retired" | "pensioner" => Ok(Occupation::Retired),
            "other" => Ok(Occupation::Other),
            _ => Err(ValidationError::invalid_format(
                "occupation",
                "unrecognized value",
            )),
        }
    }
}

/// Annual household income, bracketed the way scheme ceilings are written.
///
/// The variants are ordered, so a rule's income ceiling is a simple
/// `<=` comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeBracket {
    UpToOneLakh,
    OneToThreeLakh,
    ThreeToEightLakh,
    AboveEightLakh,
}

impl IncomeBracket {
    /// Brackets an exact annual figure in rupees.
    pub fn from_annual_rupees(amount: u64) -> Self {
        match amount {
            0..=100_000 => IncomeBracket::UpToOneLakh,
            100_001..=300_000 => IncomeBracket::OneToThreeLakh,
            300_001..=800_000 => IncomeBracket::ThreeToEightLakh,
            _ => IncomeBracket::AboveEightLakh,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeBracket::UpToOneLakh => "up_to_one_lakh",
            IncomeBracket::OneToThreeLakh => "one_to_three_lakh",
            IncomeBracket::ThreeToEightLakh => "three_to_eight_lakh",
            IncomeBracket::AboveEightLakh => "above_eight_lakh",
        }
    }

    /// Human wording for prompts and replies.
    pub fn describe(&self) -> &'static str {
        match self {
            IncomeBracket::UpToOneLakh => "up to ₹1 lakh a year",
            IncomeBracket::OneToThreeLakh => "₹1 to ₹3 lakh a year",
            IncomeBracket::ThreeToEightLakh => "₹3 to ₹8 lakh a year",
            IncomeBracket::AboveEightLakh => "above ₹8 lakh a year",
        }
    }
}

impl fmt::Display for IncomeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IncomeBracket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "up_to_one_lakh" | "below_one_lakh" | "under_one_lakh" => {
                Ok(IncomeBracket::UpToOneLakh)
            }
            "one_to_three_lakh" => Ok(IncomeBracket::OneToThreeLakh),
            "three_to_eight_lakh" => Ok(IncomeBracket::ThreeToEightLakh),
            "above_eight_lakh" | "over_eight_lakh" => Ok(IncomeBracket::AboveEightLakh),
            _ => {
                // Accept a plain rupee figure such as "250000".
                normalized
                    .replace([',', '_'], "")
                    .parse::<u64>()
                    .map(IncomeBracket::from_annual_rupees)
                    .map_err(|_| {
                        ValidationError::invalid_format("income_bracket", "unrecognized value")
                    })
            }
        }
    }
}

/// Reservation category recognized by central schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialCategory {
    General,
    Obc,
    Sc,
    St,
    Minority,
}

impl SocialCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialCategory::General => "general",
            SocialCategory::Obc => "obc",
            SocialCategory::Sc => "sc",
            SocialCategory::St => "st",
            SocialCategory::Minority => "minority",
        }
    }
}

impl fmt::Display for SocialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SocialCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "general" | "gen" | "unreserved" => Ok(SocialCategory::General),
            "obc" | "other_backward_class" | "other_backward_classes" | "backward" => {
                Ok(SocialCategory::Obc)
            }
            "sc" | "scheduled_caste" | "dalit" => Ok(SocialCategory::Sc),
            "st" | "scheduled_tribe" | "tribal" | "adivasi" => Ok(SocialCategory::St),
            "minority" => Ok(SocialCategory::Minority),
            _ => Err(ValidationError::invalid_format(
                "social_category",
                "unrecognized value",
            )),
        }
    }
}

/// Indian states and union territories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateRegion {
    AndhraPradesh,
    ArunachalPradesh,
    Assam,
    Bihar,
    Chhattisgarh,
    Goa,
    Gujarat,
    Haryana,
    HimachalPradesh,
    Jharkhand,
    Karnataka,
    Kerala,
    MadhyaPradesh,
    Maharashtra,
    Manipur,
    Meghalaya,
    Mizoram,
    Nagaland,
    Odisha,
    Punjab,
    Rajasthan,
    Sikkim,
    TamilNadu,
    Telangana,
    Tripura,
    UttarPradesh,
    Uttarakhand,
    WestBengal,
    AndamanAndNicobar,
    Chandigarh,
    DadraNagarHaveliDamanDiu,
    Delhi,
    JammuAndKashmir,
    Ladakh,
    Lakshadweep,
    Puducherry,
}

impl StateRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateRegion::AndhraPradesh => "andhra_pradesh",
            StateRegion::ArunachalPradesh => "arunachal_pradesh",
            StateRegion::Assam => "assam",
            StateRegion::Bihar => "bihar",
            StateRegion::Chhattisgarh => "chhattisgarh",
            StateRegion::Goa => "goa",
            StateRegion::Gujarat => "gujarat",
            StateRegion::Haryana => "haryana",
            StateRegion::HimachalPradesh => "himachal_pradesh",
            StateRegion::Jharkhand => "jharkhand",
            StateRegion::Karnataka => "karnataka",
            StateRegion::Kerala => "kerala",
            StateRegion::MadhyaPradesh => "madhya_pradesh",
            StateRegion::Maharashtra => "maharashtra",
            StateRegion::Manipur => "manipur",
            StateRegion::Meghalaya => "meghalaya",
            StateRegion::Mizoram => "mizoram",
            StateRegion::Nagaland => "nagaland",
            StateRegion::Odisha => "odisha",
            StateRegion::Punjab => "punjab",
            StateRegion::Rajasthan => "rajasthan",
            StateRegion::Sikkim => "sikkim",
            StateRegion::TamilNadu => "tamil_nadu",
            StateRegion::Telangana => "telangana",
            StateRegion::Tripura => "tripura",
            StateRegion::UttarPradesh => "uttar_pradesh",
            StateRegion::Uttarakhand => "uttarakhand",
            StateRegion::WestBengal => "west_bengal",
            StateRegion::AndamanAndNicobar => "andaman_and_nicobar",
            StateRegion::Chandigarh => "chandigarh",
            StateRegion::DadraNagarHaveliDamanDiu => "dadra_nagar_haveli_daman_diu",
            StateRegion::Delhi => "delhi",
            StateRegion::JammuAndKashmir => "jammu_and_kashmir",
            StateRegion::Ladakh => "ladakh",
            StateRegion::Lakshadweep => "lakshadweep",
            StateRegion::Puducherry => "puducherry",
        }
    }

    /// Proper English name for replies and drafts.
    pub fn display_name(&self) -> &'static str {
        match self {
            StateRegion::AndhraPradesh => "Andhra Pradesh",
            StateRegion::ArunachalPradesh => "Arunachal Pradesh",
            StateRegion::Assam => "Assam",
            StateRegion::Bihar => "Bihar",
            StateRegion::Chhattisgarh => "Chhattisgarh",
            StateRegion::Goa => "Goa",
            StateRegion::Gujarat => "Gujarat",
            StateRegion::Haryana => "Haryana",
            StateRegion::HimachalPradesh => "Himachal Pradesh",
            StateRegion::Jharkhand => "Jharkhand",
            StateRegion::Karnataka => "Karnataka",
            StateRegion::Kerala => "Kerala",
            StateRegion::MadhyaPradesh => "Madhya Pradesh",
            StateRegion::Maharashtra => "Maharashtra",
            StateRegion::Manipur => "Manipur",
            StateRegion::Meghalaya => "Meghalaya",
            StateRegion::Mizoram => "Mizoram",
            StateRegion::Nagaland => "Nagaland",
            StateRegion::Odisha => "Odisha",
            StateRegion::Punjab => "Punjab",
            StateRegion::Rajasthan => "Rajasthan",
            StateRegion::Sikkim => "Sikkim",
            StateRegion::TamilNadu => "Tamil Nadu",
            StateRegion::Telangana => "Telangana",
            StateRegion::Tripura => "Tripura",
            StateRegion::UttarPradesh => "Uttar Pradesh",
            StateRegion::Uttarakhand => "Uttarakhand",
            StateRegion::WestBengal => "West Bengal",
            StateRegion::AndamanAndNicobar => "Andaman and Nicobar Islands",
            StateRegion::Chandigarh => "Chandigarh",
            StateRegion::DadraNagarHaveliDamanDiu => {
                "Dadra and Nagar Haveli and Daman and Diu"
            }
            StateRegion::Delhi => "Delhi",
            StateRegion::JammuAndKashmir => "Jammu and Kashmir",
            StateRegion::Ladakh => "Ladakh",
            StateRegion::Lakshadweep => "Lakshadweep",
            StateRegion::Puducherry => "Puducherry",
        }
    }

    fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "up" => Some(StateRegion::UttarPradesh),
            "mp" => Some(StateRegion::MadhyaPradesh),
            "ap" => Some(StateRegion::AndhraPradesh),
            "tn" => Some(StateRegion::TamilNadu),
            "wb" => Some(StateRegion::WestBengal),
            "hp" => Some(StateRegion::HimachalPradesh),
            "jk" | "j&k" => Some(StateRegion::JammuAndKashmir),
            "uk" | "ua" => Some(StateRegion::Uttarakhand),
            "orissa" => Some(StateRegion::Odisha),
            "pondicherry" => Some(StateRegion::Puducherry),
            "new_delhi" | "nct" => Some(StateRegion::Delhi),
            "andaman" | "andaman_nicobar" => Some(StateRegion::AndamanAndNicobar),
            _ => None,
        }
    }

    fn all() -> &'static [StateRegion] {
        &[
            StateRegion::AndhraPradesh,
            StateRegion::ArunachalPradesh,
            StateRegion::Assam,
            StateRegion::Bihar,
            StateRegion::Chhattisgarh,
            StateRegion::Goa,
            StateRegion::Gujarat,
            StateRegion::Haryana,
            StateRegion::HimachalPradesh,
            StateRegion::Jharkhand,
            StateRegion::Karnataka,
            StateRegion::Kerala,
            StateRegion::MadhyaPradesh,
            StateRegion::Maharashtra,
            StateRegion::Manipur,
            StateRegion::Meghalaya,
            StateRegion::Mizoram,
            StateRegion::Nagaland,
            StateRegion::Odisha,
            StateRegion::Punjab,
            StateRegion::Rajasthan,
            StateRegion::Sikkim,
            StateRegion::TamilNadu,
            StateRegion::Telangana,
            StateRegion::Tripura,
            StateRegion::UttarPradesh,
            StateRegion::Uttarakhand,
            StateRegion::WestBengal,
            StateRegion::AndamanAndNicobar,
            StateRegion::Chandigarh,
            StateRegion::DadraNagarHaveliDamanDiu,
            StateRegion::Delhi,
            StateRegion::JammuAndKashmir,
            StateRegion::Ladakh,
            StateRegion::Lakshadweep,
            StateRegion::Puducherry,
        ]
    }
}

impl fmt::Display for StateRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for StateRegion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        StateRegion::all()
            .iter()
            .copied()
            .find(|state| state.as_str() == normalized)
            .or_else(|| StateRegion::from_alias(&normalized))
            .ok_or_else(|| ValidationError::invalid_format("state", "not a known region"))
    }
}
