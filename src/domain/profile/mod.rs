//! Citizen profile: typed attributes accumulated across turns.

mod attributes;
mod citizen;

pub use attributes::{
    Age, FamilySize, Gender, IncomeBracket, MaritalStatus, Occupation, SocialCategory,
    StateRegion,
};
pub use citizen::{CitizenProfile, MergeReport, ProfileField, ProfilePatch};
