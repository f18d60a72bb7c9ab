//! RTI grievance drafting: collect the complaint, fix a category,
//! deliver a formal application.
//!
//! The complaint and its structured facts accumulate in scratch across
//! turns. Locality and authority are each asked at most once; a citizen
//! who cannot name the office still gets a draft addressed through the
//! category's template. The formal letter stays in English whatever
//! language the citizen speaks.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::domain::foundation::Language;
use crate::domain::grievance::{GrievanceCategory, GrievanceDraft, GrievanceStage};
use crate::domain::session::Session;
use crate::ports::{CompletionError, CompletionRequest, CompletionService, MessageRole};

use super::{TurnInput, WorkflowReply, WorkflowResult};
use crate::application::classifier::strip_code_fences;
use crate::application::prompts;

const CATEGORY_MAX_TOKENS: u32 = 120;
const DRAFT_MAX_TOKENS: u32 = 900;

/// Below this the category guess is treated as unsettled.
const CATEGORY_CONFIDENCE_FLOOR: f64 = 0.6;

/// Walks a complaint from first mention to a delivered RTI application.
pub struct GrievanceDesk {
    completion: Arc<dyn CompletionService>,
}

impl GrievanceDesk {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Advances the draft by one turn.
    pub async fn advance(
        &self,
        session: &mut Session,
        input: &TurnInput<'_>,
    ) -> Result<WorkflowResult, CompletionError> {
        let language = prompts::canned_language(input.language);
        absorb(session, input);

        {
            let draft = session.scratch_mut().grievance_mut();
            if draft.stage() == GrievanceStage::Collecting {
                if !draft.is_substantive() {
                    return Ok(ask(prompts::grievance_detail_question(language), language));
                }
                if draft.locality().is_none() && !draft.locality_asked() {
                    draft.note_locality_asked();
                    return Ok(ask(prompts::grievance_locality_question(language), language));
                }
                if draft.authority().is_none() && !draft.authority_asked() {
                    draft.note_authority_asked();
                    return Ok(ask(prompts::grievance_authority_question(language), language));
                }
                draft.begin_classifying();
            }
        }

        if session
            .scratch()
            .grievance()
            .map_or(false, |draft| draft.stage() == GrievanceStage::Classifying)
        {
            let complaint = session
                .scratch()
                .grievance()
                .map(|draft| draft.complaint().to_string())
                .unwrap_or_default();
            let (category, confidence) = self.classify(&complaint, input).await?;
            let unsettled = category.is_none() || confidence < CATEGORY_CONFIDENCE_FLOOR;
            let draft = session.scratch_mut().grievance_mut();
            if unsettled && draft.use_clarify_round() {
                return Ok(ask(prompts::grievance_clarify_question(language), language));
            }
            // Clarify rounds are over; the best guess stands.
            let category = category.unwrap_or(GrievanceCategory::General);
            debug!(
                trace_id = %input.trace_id,
                category = category.as_str(),
                confidence,
                "complaint category fixed"
            );
            draft.begin_drafting(category);
        }

        let bpl = session.profile().bpl_card().unwrap_or(false);
        let brief = build_brief(session.scratch_mut().grievance_mut(), bpl);
        let formal = self.draft_letter(brief, input).await?;
        session
            .scratch_mut()
            .grievance_mut()
            .mark_delivered(formal.clone());
        Ok(WorkflowResult::Complete(
            WorkflowReply::text(prompts::filing_instructions(language, bpl), language)
                .with_document(formal),
        ))
    }

    async fn classify(
        &self,
        complaint: &str,
        input: &TurnInput<'_>,
    ) -> Result<(Option<GrievanceCategory>, f64), CompletionError> {
        let request = CompletionRequest::new(input.trace_id)
            .with_system_prompt(prompts::GRIEVANCE_CATEGORY_SYSTEM_PROMPT)
            .with_max_tokens(CATEGORY_MAX_TOKENS)
            .with_temperature(0.0)
            .with_message(MessageRole::User, complaint);
        let raw = self.completion.complete(request).await?;
        Ok(parse_category(&raw))
    }

    async fn draft_letter(
        &self,
        brief: String,
        input: &TurnInput<'_>,
    ) -> Result<String, CompletionError> {
        let request = CompletionRequest::new(input.trace_id)
            .with_system_prompt(prompts::GRIEVANCE_DRAFT_SYSTEM_PROMPT)
            .with_max_tokens(DRAFT_MAX_TOKENS)
            .with_temperature(0.0)
            .with_message(MessageRole::User, brief);
        self.completion.complete(request).await
    }
}

/// Folds the turn's text and extracted facts into the draft.
fn absorb(session: &mut Session, input: &TurnInput<'_>) {
    let classification = input.classification;
    let draft = session.scratch_mut().grievance_mut();
    if matches!(
        draft.stage(),
        GrievanceStage::Collecting | GrievanceStage::Classifying
    ) {
        draft.append_complaint(input.working_text);
    }
    if draft.locality().is_none() {
        if let Some(locality) = &classification.locality {
            draft.set_locality(locality.clone());
        }
    }
    if draft.authority().is_none() {
        if let Some(authority) = &classification.authority {
            draft.set_authority(authority.clone());
        }
    }
    if draft.date_range().is_none() {
        if let Some(range) = &classification.date_range {
            draft.set_date_range(range.clone());
        }
    }
    if draft.desired_remedy().is_none() {
        if let Some(remedy) = &classification.desired_remedy {
            draft.set_desired_remedy(remedy.clone());
        }
    }
}

fn ask(text: &str, language: Language) -> WorkflowResult {
    WorkflowResult::NeedsMoreInfo(WorkflowReply::text(text, language))
}

#[derive(Debug, Deserialize)]
struct CategoryAnswer {
    category: String,
    #[serde(default)]
    confidence: Option<f64>,
}

/// Reads the labelling answer. Anything unreadable, or a label outside
/// the taxonomy, counts as a zero-confidence guess.
fn parse_category(raw: &str) -> (Option<GrievanceCategory>, f64) {
    let body = strip_code_fences(raw);
    match serde_json::from_str::<CategoryAnswer>(body) {
        Ok(answer) => {
            let category = answer.category.parse::<GrievanceCategory>().ok();
            match category {
                Some(_) => (category, answer.confidence.unwrap_or(0.0)),
                None => (None, 0.0),
            }
        }
        Err(_) => (None, 0.0),
    }
}

/// Assembles the facts the drafting model works from.
fn build_brief(draft: &GrievanceDraft, bpl: bool) -> String {
    let category = draft.category().unwrap_or(GrievanceCategory::General);
    let template = category.template();

    let mut brief = String::new();
    let _ = writeln!(brief, "Category: {}", category.as_str());
    let _ = writeln!(brief, "Addressee: {}, {}", template.pio, template.department);
    if let Some(authority) = draft.authority() {
        let _ = writeln!(brief, "Public authority named by the applicant: {authority}");
    }
    if let Some(locality) = draft.locality() {
        let _ = writeln!(brief, "Locality: {locality}");
    }
    if let Some(range) = draft.date_range() {
        let _ = writeln!(brief, "Period concerned: {range}");
    }
    if let Some(remedy) = draft.desired_remedy() {
        let _ = writeln!(brief, "Outcome the applicant wants: {remedy}");
    }
    let _ = writeln!(brief, "Complaint: {}", draft.complaint());
    brief.push_str("Information requests to make:\n");
    for (i, request) in template.information_requests.iter().enumerate() {
        let _ = writeln!(brief, "{}. {request}", i + 1);
    }
    let _ = writeln!(
        brief,
        "Fee: {}",
        if bpl {
            "applicant holds a BPL card; claim the Section 7(5) exemption"
        } else {
            "₹10 application fee enclosed"
        }
    );
    brief
}
