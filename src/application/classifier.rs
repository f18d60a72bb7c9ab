//! Builds the extraction request and parses the model's JSON envelope.
//!
//! Malformed model output is a normal condition here, never an error:
//! an unparsable answer degrades to an empty extraction whose intent is
//! `continuation` when a workflow is active and `unclear` otherwise, so
//! the turn keeps moving.

use serde::Deserialize;
use tracing::debug;

use crate::domain::foundation::TraceId;
use crate::domain::intent::{Classification, Intent};
use crate::domain::profile::{IncomeBracket, ProfileField, ProfilePatch};
use crate::domain::session::{Session, TurnRole, PROMPT_WINDOW_TURNS};
use crate::ports::{CompletionRequest, MessageRole};

use super::prompts;

/// Generation cap for extraction calls.
const CLASSIFY_MAX_TOKENS: u32 = 400;

/// Builds the classification request: envelope contract as the system
/// prompt, a short history window, then the current turn.
pub fn build_request(
    session: &Session,
    working_text: &str,
    trace_id: TraceId,
) -> CompletionRequest {
    let mut request = CompletionRequest::new(trace_id)
        .with_system_prompt(prompts::CLASSIFIER_SYSTEM_PROMPT)
        .with_max_tokens(CLASSIFY_MAX_TOKENS)
        .with_temperature(0.0);
    for turn in session.recent_turns(PROMPT_WINDOW_TURNS) {
        let role = match turn.role {
            TurnRole::Citizen => MessageRole::User,
            TurnRole::Assistant => MessageRole::Assistant,
        };
        request = request.with_message(role, turn.text.clone());
    }
    request.with_message(MessageRole::User, working_text)
}

/// Parses the model's envelope into a [`Classification`].
///
/// Surrounding code fences are stripped first. Individual values that
/// fail to parse are dropped field by field; only a completely
/// unreadable envelope degrades the whole turn to the fallback intent.
pub fn parse_classification(raw: &str, workflow_active: bool) -> Classification {
    let body = strip_code_fences(raw);
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(err) => {
            debug!(error = %err, "classifier envelope unparsable, extracting nothing");
            return fallback(workflow_active);
        }
    };

    let mut classification = Classification::empty();
    classification.intent = Some(
        envelope
            .intent
            .as_deref()
            .and_then(|value| value.parse::<Intent>().ok())
            .unwrap_or_else(|| fallback_intent(workflow_active)),
    );
    classification.patch = to_patch(&envelope);
    classification.locality = non_blank(envelope.grievance.locality);
    classification.authority = non_blank(envelope.grievance.authority);
    classification.date_range = non_blank(envelope.grievance.date_range);
    classification.desired_remedy = non_blank(envelope.grievance.remedy);
    classification
}

/// Strips one surrounding ``` fence, with or without a `json` tag.
pub(crate) fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

// ─────────────────────────────────────────────────────────────────────────
// Envelope shape
// ─────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    intent: Option<String>,
    #[serde(default)]
    profile: ProfileSection,
    #[serde(default)]
    grievance: GrievanceSection,
    #[serde(default)]
    stated: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileSection {
    #[serde(default)]
    age: Option<i64>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    occupation: Option<String>,
    /// Annual rupees as a number, or a bracket name as a string.
    #[serde(default)]
    income: Option<serde_json::Value>,
    #[serde(default)]
    social_category: Option<String>,
    #[serde(default)]
    bpl_card: Option<bool>,
    #[serde(default)]
    disability: Option<bool>,
    #[serde(default)]
    marital_status: Option<String>,
    #[serde(default)]
    land_ownership: Option<bool>,
    #[serde(default)]
    family_size: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct GrievanceSection {
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    authority: Option<String>,
    #[serde(default)]
    date_range: Option<String>,
    #[serde(default)]
    remedy: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────
// Mapping
// ─────────────────────────────────────────────────────────────────────────

fn to_patch(envelope: &Envelope) -> ProfilePatch {
    let profile = &envelope.profile;
    let mut patch = ProfilePatch::new();
    patch.age = profile.age;
    patch.gender = parse_value(profile.gender.as_deref());
    patch.state = parse_value(profile.state.as_deref());
    patch.district = non_blank(profile.district.clone());
    patch.occupation = parse_value(profile.occupation.as_deref());
    patch.income_bracket = profile.income.as_ref().and_then(income_bracket);
    patch.social_category = parse_value(profile.social_category.as_deref());
    patch.bpl_card = profile.bpl_card;
    patch.disability = profile.disability;
    patch.marital_status = parse_value(profile.marital_status.as_deref());
    patch.land_ownership = profile.land_ownership;
    patch.family_size = profile.family_size;

    for name in &envelope.stated {
        if let Some(field) = field_named(name) {
            patch.mark_stated(field);
        }
    }
    patch
}

/// Lenient parse of one extracted string; an unrecognized value leaves
/// the field unfilled for this turn.
fn parse_value<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|s| s.parse().ok())
}

fn income_bracket(value: &serde_json::Value) -> Option<IncomeBracket> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().map(IncomeBracket::from_annual_rupees),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn field_named(name: &str) -> Option<ProfileField> {
    const FIELDS: [ProfileField; 12] = [
        ProfileField::Age,
        ProfileField::Gender,
        ProfileField::State,
        ProfileField::District,
        ProfileField::Occupation,
        ProfileField::IncomeBracket,
        ProfileField::SocialCategory,
        ProfileField::BplCard,
        ProfileField::Disability,
        ProfileField::MaritalStatus,
        ProfileField::LandOwnership,
        ProfileField::FamilySize,
    ];
    let normalized = name.trim().to_ascii_lowercase();
    // The envelope key for the income bracket is the shorter "income".
    if normalized == "income" {
        return Some(ProfileField::IncomeBracket);
    }
    FIELDS.into_iter().find(|field| field.as_str() == normalized)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn fallback(workflow_active: bool) -> Classification {
    let mut classification = Classification::empty();
    classification.intent = Some(fallback_intent(workflow_active));
    classification
}

fn fallback_intent(workflow_active: bool) -> Intent {
    if workflow_active {
        Intent::Continuation
    } else {
        Intent::Unclear
    }
}
