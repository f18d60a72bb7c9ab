//! Scheme eligibility rules and their per-condition verdicts.

use serde::{Deserialize, Serialize};

use crate::domain::profile::{
    CitizenProfile, Gender, IncomeBracket, MaritalStatus, Occupation, SocialCategory, StateRegion,
};

/// Outcome of checking one condition against a profile.
///
/// A field the profile does not carry is `Unknown`: it neither helps
/// nor hurts the score. `Contradicted` excludes the rule outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Satisfied,
    Unknown,
    Contradicted,
}

/// One eligibility predicate over a profile field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    AgeRange {
        #[serde(default)]
        min: Option<u8>,
        #[serde(default)]
        max: Option<u8>,
    },
    Gender { any_of: Vec<Gender> },
    States { any_of: Vec<StateRegion> },
    Occupations { any_of: Vec<Occupation> },
    Categories { any_of: Vec<SocialCategory> },
    IncomeAtMost { bracket: IncomeBracket },
    RequiresBpl,
    RequiresDisability,
    RequiresLand,
    MaritalStatuses { any_of: Vec<MaritalStatus> },
}

impl Condition {
    pub fn evaluate(&self, profile: &CitizenProfile) -> Verdict {
        match self {
            Condition::AgeRange { min, max } => match profile.age() {
                None => Verdict::Unknown,
                Some(age) => {
                    let years = age.as_years();
                    let lo = min.unwrap_or(0);
                    let hi = max.unwrap_or(u8::MAX);
                    verdict_from(years >= lo && years <= hi)
                }
            },
            Condition::Gender { any_of } => {
                membership(profile.gender(), any_of)
            }
            Condition::States { any_of } => {
                membership(profile.state(), any_of)
            }
            Condition::Occupations { any_of } => {
                membership(profile.occupation(), any_of)
            }
            Condition::Categories { any_of } => {
                membership(profile.social_category(), any_of)
            }
            Condition::IncomeAtMost { bracket } => match profile.income_bracket() {
                None => Verdict::Unknown,
                Some(actual) => verdict_from(actual <= *bracket),
            },
            Condition::RequiresBpl => flag(profile.bpl_card()),
            Condition::RequiresDisability => flag(profile.disability()),
            Condition::RequiresLand => flag(profile.land_ownership()),
            Condition::MaritalStatuses { any_of } => {
                membership(profile.marital_status(), any_of)
            }
        }
    }

    /// Whether the predicate's membership lists are non-empty and any
    /// age range is coherent. Checked once at catalog load.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Condition::AgeRange { min, max } => match (min, max) {
                (Some(lo), Some(hi)) => lo <= hi,
                (None, None) => false,
                _ => true,
            },
            Condition::Gender { any_of } => !any_of.is_empty(),
            Condition::States { any_of } => !any_of.is_empty(),
            Condition::Occupations { any_of } => !any_of.is_empty(),
            Condition::Categories { any_of } => !any_of.is_empty(),
            Condition::MaritalStatuses { any_of } => !any_of.is_empty(),
            Condition::IncomeAtMost { .. }
            | Condition::RequiresBpl
            | Condition::RequiresDisability
            | Condition::RequiresLand => true,
        }
    }
}

fn verdict_from(satisfied: bool) -> Verdict {
    if satisfied {
        Verdict::Satisfied
    } else {
        Verdict::Contradicted
    }
}

fn membership<T: PartialEq>(actual: Option<T>, any_of: &[T]) -> Verdict {
    match actual {
        None => Verdict::Unknown,
        Some(value) => verdict_from(any_of.contains(&value)),
    }
}

fn flag(actual: Option<bool>) -> Verdict {
    match actual {
        None => Verdict::Unknown,
        Some(true) => Verdict::Satisfied,
        Some(false) => Verdict::Contradicted,
    }
}

/// Immutable reference record for one government scheme.
///
/// An empty condition list means a universal scheme open to everyone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_hi: Option<String>,
    #[serde(default)]
    pub ministry: Option<String>,
    pub benefit: String,
    #[serde(default)]
    pub documents: Vec<String>,
    pub how_to_apply: String,
    /// Tie-break ordinal; lower sorts first among equal scores.
    pub priority: u32,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::ProfilePatch;

    fn profile_with(patch: ProfilePatch) -> CitizenProfile {
        let mut profile = CitizenProfile::new();
        profile.merge(&patch);
        profile
    }

    #[test]
    fn age_range_verdicts() {
        let cond = Condition::AgeRange {
            min: Some(60),
            max: None,
        };
        assert_eq!(cond.evaluate(&CitizenProfile::new()), Verdict::Unknown);
        assert_eq!(
            cond.evaluate(&profile_with(ProfilePatch::new().with_age(65))),
            Verdict::Satisfied
        );
        assert_eq!(
            cond.evaluate(&profile_with(ProfilePatch::new().with_age(40))),
            Verdict::Contradicted
        );
    }

    #[test]
    fn gender_membership_contradicts_on_mismatch() {
        let cond = Condition::Gender {
            any_of: vec![Gender::Female],
        };
        let mut patch = ProfilePatch::new();
        patch.gender = Some(Gender::Male);
        assert_eq!(cond.evaluate(&profile_with(patch)), Verdict::Contradicted);
    }

    #[test]
    fn income_at_most_uses_bracket_order() {
        let cond = Condition::IncomeAtMost {
            bracket: IncomeBracket::OneToThreeLakh,
        };
        let mut patch = ProfilePatch::new();
        patch.income_bracket = Some(IncomeBracket::UpToOneLakh);
        assert_eq!(cond.evaluate(&profile_with(patch)), Verdict::Satisfied);

        let mut patch = ProfilePatch::new();
        patch.income_bracket = Some(IncomeBracket::AboveEightLakh);
        assert_eq!(cond.evaluate(&profile_with(patch)), Verdict::Contradicted);
    }

    #[test]
    fn bpl_flag_contradicts_only_on_explicit_false() {
        let mut patch = ProfilePatch::new();
        patch.bpl_card = Some(false);
        assert_eq!(
            Condition::RequiresBpl.evaluate(&profile_with(patch)),
            Verdict::Contradicted
        );
        assert_eq!(
            Condition::RequiresBpl.evaluate(&CitizenProfile::new()),
            Verdict::Unknown
        );
    }

    #[test]
    fn empty_membership_list_is_malformed() {
        let cond = Condition::Occupations { any_of: vec![] };
        assert!(!cond.is_well_formed());
        let cond = Condition::AgeRange {
            min: None,
            max: None,
        };
        assert!(!cond.is_well_formed());
        let cond = Condition::AgeRange {
            min: Some(70),
            max: Some(60),
        };
        assert!(!cond.is_well_formed());
    }

    #[test]
    fn condition_json_uses_kind_tag() {
        let cond = Condition::AgeRange {
            min: Some(60),
            max: None,
        };
        let json = serde_json::to_string(&cond).unwrap();
        assert!(json.contains(r#""kind":"age_range""#));
        let back: Condition = serde_json::from_str(&json).unwrap();
        assert_eq!(cond, back);
    }
}
