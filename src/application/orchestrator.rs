//! The per-turn conversation loop.
//!
//! One `handle_turn` call takes a citizen's message from raw text to a
//! delivered reply: load the session, fix the language, classify, merge
//! extracted profile facts, route to a workflow, translate back, and
//! persist. The method is deliberately infallible; every collaborator
//! failure degrades to a defined reply rather than an error, because
//! the person on the other end is not a caller who can retry a status
//! code.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::eligibility::SchemeCatalog;
use crate::domain::finance::{ScamSeverity, ScamSignalSet};
use crate::domain::foundation::{Language, SessionKey, TraceId, WORKING_LANGUAGE};
use crate::domain::intent::{Classification, Intent};
use crate::domain::session::{Session, WorkflowKind};
use crate::ports::{CompletionError, CompletionService, LanguageService, SessionStore};

use super::classifier;
use super::prompts;
use super::reply::{IntentTrace, Reply};
use super::session_lock::SessionLocks;
use super::workflows::{
    FinancialAdvisor, GrievanceDesk, SchemeDiscovery, TurnInput, WorkflowReply, WorkflowResult,
};

/// Coordinates one citizen turn across session state, language,
/// classification, and the domain workflows.
pub struct Orchestrator {
    store: Arc<dyn SessionStore>,
    completion: Arc<dyn CompletionService>,
    language: Arc<dyn LanguageService>,
    signals: Arc<ScamSignalSet>,
    scheme: SchemeDiscovery,
    grievance: GrievanceDesk,
    finance: FinancialAdvisor,
    locks: SessionLocks,
    default_language: Language,
}

impl Orchestrator {
    /// Builds an orchestrator over its ports and reference data.
    ///
    /// The completion port is used as handed in; give it a
    /// [`RetryingCompletion`](crate::adapters::ai::RetryingCompletion)
    /// wrapper so transient model failures get their one retry before a
    /// turn degrades to the apology.
    pub fn new(
        store: Arc<dyn SessionStore>,
        completion: Arc<dyn CompletionService>,
        language: Arc<dyn LanguageService>,
        catalog: Arc<SchemeCatalog>,
        signals: Arc<ScamSignalSet>,
        default_language: Language,
    ) -> Self {
        Self {
            scheme: SchemeDiscovery::new(Arc::clone(&completion), catalog),
            grievance: GrievanceDesk::new(Arc::clone(&completion)),
            finance: FinancialAdvisor::new(Arc::clone(&completion), Arc::clone(&signals)),
            store,
            completion,
            language,
            signals,
            locks: SessionLocks::new(),
            default_language,
        }
    }

    /// Handles one turn end to end. Turns for the same session key are
    /// serialized; turns for different keys run concurrently.
    pub async fn handle_turn(
        &self,
        key: SessionKey,
        raw_text: &str,
        language_hint: Option<Language>,
    ) -> Reply {
        let trace_id = TraceId::new();
        let _turn_slot = self.locks.acquire(&key).await;

        let mut session = self.load_or_fresh(&key).await;
        let citizen_language = self.resolve_language(raw_text, language_hint).await;
        session.set_preferred_language(citizen_language);
        let mut trace = IntentTrace::new(trace_id, citizen_language);

        // The fraud screen reads the raw text, before translation can
        // soften a scammer's wording.
        let scam = self.signals.first_match(raw_text);
        if let Some(signal) = scam {
            trace.scam_alert = Some(signal.severity);
        }

        let working_text = self.to_working(raw_text, citizen_language, trace_id).await;

        let classification = match self.classify(&session, &working_text, trace_id).await {
            Ok(classification) => classification,
            Err(error) => {
                warn!(trace_id = %trace_id, error = %error, "intent classification failed");
                return self.apologize(citizen_language, trace).await;
            }
        };
        trace.intent = classification.intent;

        let report = session.merge_profile(&classification.patch);
        trace.fields_filled = report.applied.clone();
        if !report.rejected.is_empty() {
            debug!(
                trace_id = %trace_id,
                dropped = report.rejected.len(),
                "rejected invalid profile values"
            );
        }

        let turn = TurnInput {
            raw_text,
            working_text: &working_text,
            language: citizen_language,
            classification: &classification,
            trace_id,
        };

        // A certain-fraud signal overrides routing. The warning turn
        // runs through the financial advisor and leaves whatever
        // workflow was active exactly where it was.
        if scam.is_some_and(|signal| signal.severity == ScamSeverity::High) {
            trace.workflow = Some(WorkflowKind::FinancialAdvice);
            let result = match self.finance.advance(&mut session, &turn).await {
                Ok(result) => result,
                Err(error) => {
                    warn!(trace_id = %trace_id, error = %error, "fraud warning turn failed");
                    return self.apologize(citizen_language, trace).await;
                }
            };
            let (text, delivered) = self
                .compose_reply(result.reply(), citizen_language, trace_id)
                .await;
            return self.finish_turn(session, raw_text, text, delivered, trace).await;
        }

        let routed = match classification.intent {
            Some(Intent::SchemeDiscovery) => Some(WorkflowKind::SchemeDiscovery),
            Some(Intent::RtiGrievance) => Some(WorkflowKind::RtiGrievance),
            Some(Intent::FinancialAdvice) => Some(WorkflowKind::FinancialAdvice),
            Some(Intent::Continuation) | Some(Intent::Unclear) | None => session.active_workflow(),
        };

        let Some(kind) = routed else {
            // Nothing active and nothing asked for: offer the services.
            let canned = prompts::canned_language(citizen_language);
            let menu = WorkflowReply::text(
                prompts::service_menu(session.citizen_turn_count(), canned),
                canned,
            );
            let (text, delivered) = self.compose_reply(&menu, citizen_language, trace_id).await;
            return self.finish_turn(session, raw_text, text, delivered, trace).await;
        };

        trace.workflow = Some(kind);
        session.activate_workflow(kind);
        let result = match self.dispatch(kind, &mut session, &turn).await {
            Ok(result) => result,
            Err(error) => {
                warn!(
                    trace_id = %trace_id,
                    error = %error,
                    workflow = kind.as_str(),
                    "workflow turn failed"
                );
                return self.apologize(citizen_language, trace).await;
            }
        };
        if result.is_complete() {
            session.complete_workflow();
        }
        let (text, delivered) = self
            .compose_reply(result.reply(), citizen_language, trace_id)
            .await;
        self.finish_turn(session, raw_text, text, delivered, trace).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Turn stages
    // ─────────────────────────────────────────────────────────────────────────

    async fn load_or_fresh(&self, key: &SessionKey) -> Session {
        match self.store.load(key).await {
            Ok(Some(session)) => session,
            Ok(None) => Session::new(key.clone()),
            Err(error) => {
                warn!(session = %key, error = %error, "session load failed, starting fresh");
                Session::new(key.clone())
            }
        }
    }

    async fn resolve_language(&self, raw_text: &str, hint: Option<Language>) -> Language {
        if let Some(language) = hint {
            return language;
        }
        match self.language.detect(raw_text).await {
            Ok(language) => language,
            Err(error) => {
                debug!(
                    error = %error,
                    fallback = self.default_language.code(),
                    "language detection failed"
                );
                self.default_language
            }
        }
    }

    /// Brings the turn into the English working language. A failed
    /// translation degrades to classifying the raw text.
    async fn to_working(&self, raw_text: &str, citizen: Language, trace_id: TraceId) -> String {
        if citizen == WORKING_LANGUAGE {
            return raw_text.to_string();
        }
        match self
            .language
            .translate(raw_text, citizen, WORKING_LANGUAGE)
            .await
        {
            Ok(text) => text,
            Err(error) => {
                warn!(trace_id = %trace_id, error = %error, "inbound translation degraded");
                raw_text.to_string()
            }
        }
    }

    async fn classify(
        &self,
        session: &Session,
        working_text: &str,
        trace_id: TraceId,
    ) -> Result<Classification, CompletionError> {
        let request = classifier::build_request(session, working_text, trace_id);
        let raw = self.completion.complete(request).await?;
        Ok(classifier::parse_classification(
            &raw,
            session.active_workflow().is_some(),
        ))
    }

    async fn dispatch(
        &self,
        kind: WorkflowKind,
        session: &mut Session,
        turn: &TurnInput<'_>,
    ) -> Result<WorkflowResult, CompletionError> {
        match kind {
            WorkflowKind::SchemeDiscovery => self.scheme.advance(session, turn).await,
            WorkflowKind::RtiGrievance => self.grievance.advance(session, turn).await,
            WorkflowKind::FinancialAdvice => self.finance.advance(session, turn).await,
        }
    }

    /// Translates the reply into the citizen's language when it is not
    /// already there, then attaches any formal document verbatim. A
    /// failed translation degrades to the untranslated text.
    async fn compose_reply(
        &self,
        reply: &WorkflowReply,
        citizen: Language,
        trace_id: TraceId,
    ) -> (String, Language) {
        let mut text = reply.text.clone();
        let mut delivered = reply.language;
        if delivered != citizen {
            match self.language.translate(&text, delivered, citizen).await {
                Ok(translated) => {
                    text = translated;
                    delivered = citizen;
                }
                Err(error) => {
                    warn!(trace_id = %trace_id, error = %error, "outbound translation degraded");
                }
            }
        }
        if let Some(document) = &reply.formal_document {
            text = format!("{document}\n\n{text}");
        }
        (text, delivered)
    }

    /// The degraded ending for a turn whose model calls failed. The
    /// session is deliberately not saved; a half-processed turn must
    /// not leak into the next one.
    async fn apologize(&self, citizen: Language, mut trace: IntentTrace) -> Reply {
        trace.persisted = false;
        let canned = prompts::canned_language(citizen);
        let apology = WorkflowReply::text(prompts::apology(canned), canned);
        let (text, delivered) = self.compose_reply(&apology, citizen, trace.trace_id).await;
        Reply {
            text,
            language: delivered,
            trace,
        }
    }

    /// Records both sides of the turn, saves best-effort, and builds
    /// the final reply.
    async fn finish_turn(
        &self,
        mut session: Session,
        raw_text: &str,
        text: String,
        delivered: Language,
        mut trace: IntentTrace,
    ) -> Reply {
        session.record_citizen_turn(raw_text, trace.detected_language);
        session.record_assistant_turn(text.clone(), delivered);
        if let Err(error) = self.store.save(&session).await {
            warn!(
                trace_id = %trace.trace_id,
                error = %error,
                "session save failed, delivering the reply anyway"
            );
            trace.persisted = false;
        }
        info!(
            trace_id = %trace.trace_id,
            session = %session.key(),
            language = trace.detected_language.code(),
            intent = trace.intent.map_or("none", |i| i.as_str()),
            workflow = trace.workflow.map_or("none", |w| w.as_str()),
            fields_filled = trace.fields_filled.len(),
            persisted = trace.persisted,
            "turn handled"
        );
        Reply {
            text,
            language: delivered,
            trace,
        }
    }
}
