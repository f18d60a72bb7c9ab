//! Scheme discovery: fill the profile one question at a time, then
//! match and explain.
//!
//! Age, state, and occupation must be on file before the matcher runs.
//! Questions follow a fixed order, never repeat a field the citizen
//! already gave, and each field is asked at most once per discovery so
//! a citizen who declines an answer is not interrogated in a loop.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::debug;

use crate::domain::eligibility::{match_schemes, MatchOutcome, SchemeCatalog, SchemeMatch};
use crate::domain::foundation::WORKING_LANGUAGE;
use crate::domain::profile::ProfileField;
use crate::domain::session::Session;
use crate::ports::{CompletionError, CompletionRequest, CompletionService, MessageRole};

use super::{TurnInput, WorkflowReply, WorkflowResult};
use crate::application::prompts;

/// Fields the matcher cannot work without.
const CORE_FIELDS: [ProfileField; 3] = [
    ProfileField::Age,
    ProfileField::State,
    ProfileField::Occupation,
];

/// Question sequence for profile gaps, most discriminating first.
const ASK_ORDER: [ProfileField; 8] = [
    ProfileField::Age,
    ProfileField::Gender,
    ProfileField::State,
    ProfileField::Occupation,
    ProfileField::SocialCategory,
    ProfileField::IncomeBracket,
    ProfileField::MaritalStatus,
    ProfileField::BplCard,
];

const EXPLAIN_MAX_TOKENS: u32 = 700;

/// Walks a citizen from a bare request to an explained list of schemes
/// they plausibly qualify for.
pub struct SchemeDiscovery {
    completion: Arc<dyn CompletionService>,
    catalog: Arc<SchemeCatalog>,
}

impl SchemeDiscovery {
    pub fn new(completion: Arc<dyn CompletionService>, catalog: Arc<SchemeCatalog>) -> Self {
        Self { completion, catalog }
    }

    /// Advances discovery by one turn. The turn's extracted profile
    /// attributes are already merged when this runs.
    pub async fn advance(
        &self,
        session: &mut Session,
        input: &TurnInput<'_>,
    ) -> Result<WorkflowResult, CompletionError> {
        if self.core_missing(session) {
            return match self.next_question(session) {
                Some(field) => Ok(self.ask(session, field, input)),
                // Every question already went out and answers never
                // came; matching cannot start.
                None => Ok(no_match_reply(input)),
            };
        }

        match match_schemes(session.profile(), self.catalog.rules()) {
            MatchOutcome::Matches(matches) => {
                debug!(
                    trace_id = %input.trace_id,
                    matches = matches.len(),
                    "profile matched schemes"
                );
                let text = self.explain(session, &matches, input).await?;
                Ok(WorkflowResult::Complete(WorkflowReply::text(
                    text,
                    WORKING_LANGUAGE,
                )))
            }
            MatchOutcome::InsufficientProfile => match self.next_question(session) {
                Some(field) => Ok(self.ask(session, field, input)),
                None => Ok(no_match_reply(input)),
            },
        }
    }

    fn core_missing(&self, session: &Session) -> bool {
        CORE_FIELDS
            .iter()
            .any(|field| !session.profile().has(*field))
    }

    /// First field in the ask order that is neither on file nor
    /// already asked this discovery.
    fn next_question(&self, session: &Session) -> Option<ProfileField> {
        let scratch = session.scratch().scheme();
        ASK_ORDER.into_iter().find(|field| {
            !session.profile().has(*field)
                && !scratch.map_or(false, |s| s.was_asked(*field))
        })
    }

    fn ask(
        &self,
        session: &mut Session,
        field: ProfileField,
        input: &TurnInput<'_>,
    ) -> WorkflowResult {
        session.scratch_mut().scheme_mut().note_asked(field);
        let language = prompts::canned_language(input.language);
        WorkflowResult::NeedsMoreInfo(WorkflowReply::text(
            prompts::profile_question(field, language),
            language,
        ))
    }

    /// Turns ranked matches into a plain-words explanation.
    async fn explain(
        &self,
        session: &Session,
        matches: &[SchemeMatch<'_>],
        input: &TurnInput<'_>,
    ) -> Result<String, CompletionError> {
        let mut brief = String::from("Citizen profile:\n");
        for (field, value) in session.profile().known_pairs() {
            let _ = writeln!(brief, "- {}: {value}", field.as_str());
        }
        brief.push_str("\nMatched schemes, best first:\n");
        for m in matches {
            let _ = writeln!(brief, "\n## {}", m.rule.name);
            if let Some(name_hi) = &m.rule.name_hi {
                let _ = writeln!(brief, "Hindi name: {name_hi}");
            }
            if let Some(ministry) = &m.rule.ministry {
                let _ = writeln!(brief, "Run by: {ministry}");
            }
            let _ = writeln!(brief, "Benefit: {}", m.rule.benefit);
            let _ = writeln!(brief, "How to apply: {}", m.rule.how_to_apply);
            if !m.rule.documents.is_empty() {
                let _ = writeln!(brief, "Documents: {}", m.rule.documents.join(", "));
            }
            let _ = writeln!(
                brief,
                "Conditions met: {} of {}",
                m.score.satisfied(),
                m.score.total()
            );
        }

        let request = CompletionRequest::new(input.trace_id)
            .with_system_prompt(prompts::SCHEME_EXPLANATION_SYSTEM_PROMPT)
            .with_max_tokens(EXPLAIN_MAX_TOKENS)
            .with_temperature(0.3)
            .with_message(MessageRole::User, brief);
        self.completion.complete(request).await
    }
}

fn no_match_reply(input: &TurnInput<'_>) -> WorkflowResult {
    let language = prompts::canned_language(input.language);
    WorkflowResult::Complete(WorkflowReply::text(
        prompts::no_scheme_match(language),
        language,
    ))
}
