//! Citizen profile aggregate and the merge rules that protect it.
//!
//! # Invariants
//!
//! - A set field is never silently overwritten: an incoming value only
//!   replaces an existing one when the citizen stated it outright this
//!   turn (an explicit correction). Inferred values fill gaps only.
//! - Merging the same patch twice leaves the profile unchanged the
//!   second time.
//! - A value that fails validation (age 300) is discarded on its own;
//!   the rest of the patch still applies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::foundation::ValidationError;

use super::attributes::{
    Age, FamilySize, Gender, IncomeBracket, MaritalStatus, Occupation, SocialCategory,
    StateRegion,
};

/// Names of the profile attributes, used in patches, traces, and questions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Age,
    Gender,
    State,
    District,
    Occupation,
    IncomeBracket,
    SocialCategory,
    BplCard,
    Disability,
    MaritalStatus,
    LandOwnership,
    FamilySize,
}

impl ProfileField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Age => "age",
            ProfileField::Gender => "gender",
            ProfileField::State => "state",
            ProfileField::District => "district",
            ProfileField::Occupation => "occupation",
            ProfileField::IncomeBracket => "income_bracket",
            ProfileField::SocialCategory => "social_category",
            ProfileField::BplCard => "bpl_card",
            ProfileField::Disability => "disability",
            ProfileField::MaritalStatus => "marital_status",
            ProfileField::LandOwnership => "land_ownership",
            ProfileField::FamilySize => "family_size",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One turn's worth of extracted attributes, not yet validated.
///
/// Numeric fields stay raw so range checks happen inside the merge and
/// a bad value can be rejected field-by-field. `stated` lists the
/// fields the citizen said outright (as opposed to values the model
/// inferred from wording); only stated values may correct a field that
/// is already set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub state: Option<StateRegion>,
    pub district: Option<String>,
    pub occupation: Option<Occupation>,
    pub income_bracket: Option<IncomeBracket>,
    pub social_category: Option<SocialCategory>,
    pub bpl_card: Option<bool>,
    pub disability: Option<bool>,
    pub marital_status: Option<MaritalStatus>,
    pub land_ownership: Option<bool>,
    pub family_size: Option<i64>,
    pub stated: BTreeSet<ProfileField>,
}

impl ProfilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.gender.is_none()
            && self.state.is_none()
            && self.district.is_none()
            && self.occupation.is_none()
            && self.income_bracket.is_none()
            && self.social_category.is_none()
            && self.bpl_card.is_none()
            && self.disability.is_none()
            && self.marital_status.is_none()
            && self.land_ownership.is_none()
            && self.family_size.is_none()
    }

    /// Marks a field as stated outright by the citizen.
    pub fn mark_stated(&mut self, field: ProfileField) {
        self.stated.insert(field);
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_state(mut self, state: StateRegion) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_occupation(mut self, occupation: Occupation) -> Self {
        self.occupation = Some(occupation);
        self
    }

    pub fn with_stated(mut self, field: ProfileField) -> Self {
        self.stated.insert(field);
        self
    }
}

/// What a merge did, field by field. Feeds the turn's intent trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// Fields newly filled or explicitly corrected.
    pub applied: Vec<ProfileField>,
    /// Fields whose incoming value failed validation and was dropped.
    pub rejected: Vec<(ProfileField, ValidationError)>,
    /// Fields kept at their existing value because the incoming one
    /// was only inferred.
    pub retained: Vec<ProfileField>,
}

impl MergeReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Everything the assistant knows about one citizen.
///
/// All attributes are optional until a turn fills them. Mutation goes
/// through [`CitizenProfile::merge`] so the overwrite rules hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitizenProfile {
    age: Option<Age>,
    gender: Option<Gender>,
    state: Option<StateRegion>,
    district: Option<String>,
    occupation: Option<Occupation>,
    income_bracket: Option<IncomeBracket>,
    social_category: Option<SocialCategory>,
    bpl_card: Option<bool>,
    disability: Option<bool>,
    marital_status: Option<MaritalStatus>,
    land_ownership: Option<bool>,
    family_size: Option<FamilySize>,
}

/// Fields the intent prompts summarize, in the order questions go out.
const COMPLETENESS_FIELDS: [ProfileField; 6] = [
    ProfileField::Age,
    ProfileField::Gender,
    ProfileField::State,
    ProfileField::Occupation,
    ProfileField::IncomeBracket,
    ProfileField::SocialCategory,
];

impl CitizenProfile {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Accessors ───────────────────────────────────────────────────

    pub fn age(&self) -> Option<Age> {
        self.age
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn state(&self) -> Option<StateRegion> {
        self.state
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    pub fn occupation(&self) -> Option<Occupation> {
        self.occupation
    }

    pub fn income_bracket(&self) -> Option<IncomeBracket> {
        self.income_bracket
    }

    pub fn social_category(&self) -> Option<SocialCategory> {
        self.social_category
    }

    pub fn bpl_card(&self) -> Option<bool> {
        self.bpl_card
    }

    pub fn disability(&self) -> Option<bool> {
        self.disability
    }

    pub fn marital_status(&self) -> Option<MaritalStatus> {
        self.marital_status
    }

    pub fn land_ownership(&self) -> Option<bool> {
        self.land_ownership
    }

    pub fn family_size(&self) -> Option<FamilySize> {
        self.family_size
    }

    /// Whether a given field carries a value.
    pub fn has(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::Age => self.age.is_some(),
            ProfileField::Gender => self.gender.is_some(),
            ProfileField::State => self.state.is_some(),
            ProfileField::District => self.district.is_some(),
            ProfileField::Occupation => self.occupation.is_some(),
            ProfileField::IncomeBracket => self.income_bracket.is_some(),
            ProfileField::SocialCategory => self.social_category.is_some(),
            ProfileField::BplCard => self.bpl_card.is_some(),
            ProfileField::Disability => self.disability.is_some(),
            ProfileField::MaritalStatus => self.marital_status.is_some(),
            ProfileField::LandOwnership => self.land_ownership.is_some(),
            ProfileField::FamilySize => self.family_size.is_some(),
        }
    }

    /// True when nothing is known yet.
    pub fn is_empty(&self) -> bool {
        !COMPLETENESS_FIELDS.iter().any(|f| self.has(*f))
            && self.district.is_none()
            && self.bpl_card.is_none()
            && self.disability.is_none()
            && self.marital_status.is_none()
            && self.land_ownership.is_none()
            && self.family_size.is_none()
    }

    /// Share of the six core fields that are filled, 0.0 to 1.0.
    pub fn completeness(&self) -> f32 {
        let filled = COMPLETENESS_FIELDS.iter().filter(|f| self.has(**f)).count();
        filled as f32 / COMPLETENESS_FIELDS.len() as f32
    }

    /// Known attributes as display pairs, for prompt context.
    pub fn known_pairs(&self) -> Vec<(ProfileField, String)> {
        let mut pairs = Vec::new();
        if let Some(age) = self.age {
            pairs.push((ProfileField::Age, age.to_string()));
        }
        if let Some(gender) = self.gender {
            pairs.push((ProfileField::Gender, gender.to_string()));
        }
        if let Some(state) = self.state {
            pairs.push((ProfileField::State, state.display_name().to_string()));
        }
        if let Some(district) = &self.district {
            pairs.push((ProfileField::District, district.clone()));
        }
        if let Some(occupation) = self.occupation {
            pairs.push((ProfileField::Occupation, occupation.to_string()));
        }
        if let Some(income) = self.income_bracket {
            pairs.push((ProfileField::IncomeBracket, income.describe().to_string()));
        }
        if let Some(category) = self.social_category {
            pairs.push((ProfileField::SocialCategory, category.to_string()));
        }
        if let Some(bpl) = self.bpl_card {
            pairs.push((ProfileField::BplCard, bpl.to_string()));
        }
        if let Some(disability) = self.disability {
            pairs.push((ProfileField::Disability, disability.to_string()));
        }
        if let Some(status) = self.marital_status {
            pairs.push((ProfileField::MaritalStatus, status.to_string()));
        }
        if let Some(land) = self.land_ownership {
            pairs.push((ProfileField::LandOwnership, land.to_string()));
        }
        if let Some(size) = self.family_size {
            pairs.push((ProfileField::FamilySize, size.to_string()));
        }
        pairs
    }

    // ─── Mutation ────────────────────────────────────────────────────

    /// Merges one turn's extracted attributes into the profile.
    ///
    /// Fill rules per field: an unset field takes any incoming value; a
    /// set field changes only when the patch marks it stated (explicit
    /// correction). Equal values are a no-op, which makes the merge
    /// idempotent. Invalid numeric values are rejected individually.
    pub fn merge(&mut self, patch: &ProfilePatch) -> MergeReport {
        let mut report = MergeReport::default();

        if let Some(raw) = patch.age {
            match Age::new(raw) {
                Ok(age) => merge_field(
                    &mut self.age,
                    age,
                    ProfileField::Age,
                    patch.stated.contains(&ProfileField::Age),
                    &mut report,
                ),
                Err(err) => report.rejected.push((ProfileField::Age, err)),
            }
        }
        if let Some(gender) = patch.gender {
            merge_field(
                &mut self.gender,
                gender,
                ProfileField::Gender,
                patch.stated.contains(&ProfileField::Gender),
                &mut report,
            );
        }
        if let Some(state) = patch.state {
            merge_field(
                &mut self.state,
                state,
                ProfileField::State,
                patch.stated.contains(&ProfileField::State),
                &mut report,
            );
        }
        if let Some(district) = &patch.district {
            let trimmed = district.trim();
            if trimmed.is_empty() {
                report.rejected.push((
                    ProfileField::District,
                    ValidationError::empty_field("district"),
                ));
            } else {
                merge_field(
                    &mut self.district,
                    trimmed.to_string(),
                    ProfileField::District,
                    patch.stated.contains(&ProfileField::District),
                    &mut report,
                );
            }
        }
        if let Some(occupation) = patch.occupation {
            merge_field(
                &mut self.occupation,
                occupation,
                ProfileField::Occupation,
                patch.stated.contains(&ProfileField::Occupation),
                &mut report,
            );
        }
        if let Some(income) = patch.income_bracket {
            merge_field(
                &mut self.income_bracket,
                income,
                ProfileField::IncomeBracket,
                patch.stated.contains(&ProfileField::IncomeBracket),
                &mut report,
            );
        }
        if let Some(category) = patch.social_category {
            merge_field(
                &mut self.social_category,
                category,
                ProfileField::SocialCategory,
                patch.stated.contains(&ProfileField::SocialCategory),
                &mut report,
            );
        }
        if let Some(bpl) = patch.bpl_card {
            merge_field(
                &mut self.bpl_card,
                bpl,
                ProfileField::BplCard,
                patch.stated.contains(&ProfileField::BplCard),
                &mut report,
            );
        }
        if let Some(disability) = patch.disability {
            merge_field(
                &mut self.disability,
                disability,
                ProfileField::Disability,
                patch.stated.contains(&ProfileField::Disability),
                &mut report,
            );
        }
        if let Some(status) = patch.marital_status {
            merge_field(
                &mut self.marital_status,
                status,
                ProfileField::MaritalStatus,
                patch.stated.contains(&ProfileField::MaritalStatus),
                &mut report,
            );
        }
        if let Some(land) = patch.land_ownership {
            merge_field(
                &mut self.land_ownership,
                land,
                ProfileField::LandOwnership,
                patch.stated.contains(&ProfileField::LandOwnership),
                &mut report,
            );
        }
        if let Some(raw) = patch.family_size {
            match FamilySize::new(raw) {
                Ok(size) => merge_field(
                    &mut self.family_size,
                    size,
                    ProfileField::FamilySize,
                    patch.stated.contains(&ProfileField::FamilySize),
                    &mut report,
                ),
                Err(err) => report.rejected.push((ProfileField::FamilySize, err)),
            }
        }

        report
    }
}

fn merge_field<T: PartialEq>(
    current: &mut Option<T>,
    incoming: T,
    field: ProfileField,
    stated: bool,
    report: &mut MergeReport,
) {
    match current {
        None => {
            *current = Some(incoming);
            report.applied.push(field);
        }
        Some(existing) if *existing == incoming => {}
        Some(_) if stated => {
            *current = Some(incoming);
            report.applied.push(field);
        }
        Some(_) => report.retained.push(field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn farmer_patch() -> ProfilePatch {
        let mut patch = ProfilePatch::new()
            .with_age(65)
            .with_state(StateRegion::UttarPradesh)
            .with_occupation(Occupation::Farmer);
        patch.mark_stated(ProfileField::Age);
        patch.mark_stated(ProfileField::State);
        patch.mark_stated(ProfileField::Occupation);
        patch
    }

    #[test]
    fn merge_fills_unset_fields() {
        let mut profile = CitizenProfile::new();
        let report = profile.merge(&farmer_patch());

        assert_eq!(profile.age().unwrap().as_years(), 65);
        assert_eq!(profile.state(), Some(StateRegion::UttarPradesh));
        assert_eq!(profile.occupation(), Some(Occupation::Farmer));
        assert_eq!(report.applied.len(), 3);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn merge_does_not_overwrite_with_inferred_value() {
        let mut profile = CitizenProfile::new();
        profile.merge(&farmer_patch());

        // Occupation only inferred this turn, existing value stays.
        let inferred = ProfilePatch::new().with_occupation(Occupation::StreetVendor);
        let report = profile.merge(&inferred);

        assert_eq!(profile.occupation(), Some(Occupation::Farmer));
        assert_eq!(report.retained, vec![ProfileField::Occupation]);
        assert!(report.applied.is_empty());
    }

    #[test]
    fn merge_applies_stated_correction() {
        let mut profile = CitizenProfile::new();
        profile.merge(&farmer_patch());

        let correction = ProfilePatch::new()
            .with_age(66)
            .with_stated(ProfileField::Age);
        let report = profile.merge(&correction);

        assert_eq!(profile.age().unwrap().as_years(), 66);
        assert_eq!(report.applied, vec![ProfileField::Age]);
    }

    #[test]
    fn merge_rejects_invalid_age_keeps_rest() {
        let mut profile = CitizenProfile::new();
        let mut patch = ProfilePatch::new()
            .with_age(300)
            .with_state(StateRegion::Bihar);
        patch.mark_stated(ProfileField::State);

        let report = profile.merge(&patch);

        assert!(profile.age().is_none());
        assert_eq!(profile.state(), Some(StateRegion::Bihar));
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].0, ProfileField::Age);
        assert_eq!(report.applied, vec![ProfileField::State]);
    }

    #[test]
    fn merge_rejects_blank_district() {
        let mut profile = CitizenProfile::new();
        let patch = ProfilePatch {
            district: Some("   ".to_string()),
            ..ProfilePatch::default()
        };

        let report = profile.merge(&patch);

        assert!(profile.district().is_none());
        assert_eq!(report.rejected.len(), 1);
    }

    #[test]
    fn completeness_counts_core_fields() {
        let mut profile = CitizenProfile::new();
        assert_eq!(profile.completeness(), 0.0);
        assert!(profile.is_empty());

        profile.merge(&farmer_patch());
        // 3 of the 6 core fields are filled.
        assert!((profile.completeness() - 0.5).abs() < f32::EPSILON);
        assert!(!profile.is_empty());
    }

    #[test]
    fn known_pairs_lists_filled_fields_only() {
        let mut profile = CitizenProfile::new();
        profile.merge(&farmer_patch());

        let pairs = profile.known_pairs();
        assert_eq!(pairs.len(), 3);
        assert!(pairs
            .iter()
            .any(|(f, v)| *f == ProfileField::State && v == "Uttar Pradesh"));
    }

    #[test]
    fn profile_serializes_round_trip() {
        let mut profile = CitizenProfile::new();
        profile.merge(&farmer_patch());

        let json = serde_json::to_string(&profile).unwrap();
        let back: CitizenProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, back);
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ProfilePatch::new().is_empty());
        assert!(!farmer_patch().is_empty());
    }

    proptest! {
        /// Merging a patch a second time never changes the profile,
        /// including when some of its fields were rejected the first
        /// time.
        #[test]
        fn merging_the_same_patch_twice_changes_nothing(
            age in proptest::option::of(-10i64..=200),
            bpl in proptest::option::of(proptest::bool::ANY),
            occupation_pick in proptest::option::of(0usize..3),
            age_stated in proptest::bool::ANY,
        ) {
            const OCCUPATIONS: [Occupation; 3] =
                [Occupation::Farmer, Occupation::StreetVendor, Occupation::Student];

            let mut patch = ProfilePatch::new();
            patch.age = age;
            patch.bpl_card = bpl;
            patch.occupation = occupation_pick.map(|i| OCCUPATIONS[i]);
            if age_stated {
                patch.mark_stated(ProfileField::Age);
            }

            let mut once = CitizenProfile::new();
            once.merge(&patch);

            let mut twice = once.clone();
            let second = twice.merge(&patch);

            prop_assert_eq!(once, twice);
            prop_assert!(!second.changed());
        }
    }
}
