//! Integration tests for the full turn loop.
//!
//! These tests drive the orchestrator end to end the way a channel
//! adapter would:
//! 1. Citizen text goes in with a session key and optional language hint
//! 2. Classification, profile merge, and routing run against mocks
//! 3. The workflow's reply comes back translated and the session persists
//!
//! Uses the in-memory store and the mock model/language services, so the
//! flows run without any external provider.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use jansahayak::adapters::ai::MockCompletion;
use jansahayak::adapters::language::MockLanguage;
use jansahayak::adapters::store::InMemorySessionStore;
use jansahayak::application::{prompts, Orchestrator};
use jansahayak::domain::eligibility::SchemeCatalog;
use jansahayak::domain::finance::ScamSignalSet;
use jansahayak::domain::foundation::{Language, SessionKey};
use jansahayak::domain::profile::ProfileField;
use jansahayak::domain::session::{Session, WorkflowKind, MAX_TURN_HISTORY};
use jansahayak::ports::{SessionStore, SessionStoreError};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Store whose saves always fail while loads pass through.
struct SaveFailsStore {
    inner: InMemorySessionStore,
}

impl SaveFailsStore {
    fn new() -> Self {
        Self {
            inner: InMemorySessionStore::with_default_ttl(),
        }
    }
}

#[async_trait]
impl SessionStore for SaveFailsStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<Session>, SessionStoreError> {
        self.inner.load(key).await
    }

    async fn save(&self, _session: &Session) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::unavailable("disk full"))
    }

    async fn touch_ttl(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        self.inner.touch_ttl(key).await
    }

    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        self.inner.delete(key).await
    }
}

fn key(s: &str) -> SessionKey {
    SessionKey::new(s).unwrap()
}

fn orchestrator_over(store: Arc<dyn SessionStore>, completion: MockCompletion) -> Orchestrator {
    Orchestrator::new(
        store,
        Arc::new(completion),
        Arc::new(MockLanguage::new()),
        Arc::new(SchemeCatalog::builtin().unwrap()),
        Arc::new(ScamSignalSet::builtin().unwrap()),
        Language::Hindi,
    )
}

// =============================================================================
// Integration Tests
// =============================================================================

/// Tests that profile facts given across turns accumulate into one
/// profile and carry scheme discovery through to matched schemes.
#[tokio::test]
async fn profile_accumulates_across_turns_to_a_match() {
    let store = Arc::new(InMemorySessionStore::with_default_ttl());
    let completion = MockCompletion::new()
        .with_reply(r#"{"intent": "scheme_discovery", "profile": {"age": 62}, "stated": ["age"]}"#)
        .with_reply(
            r#"{"intent": "continuation",
                "profile": {"gender": "female", "state": "Bihar", "occupation": "farmer"},
                "stated": ["gender", "state", "occupation"]}"#,
        )
        .with_reply("आपकी उम्र के हिसाब से वृद्धावस्था पेंशन मिल सकती है। ब्लॉक दफ़्तर में आवेदन दीजिए।");
    let orchestrator = orchestrator_over(store.clone() as Arc<dyn SessionStore>, completion);

    // Turn 1: intent plus age; the next unknown core field is asked
    let first = orchestrator
        .handle_turn(key("citizen-7"), "मेरी उम्र 62 साल है, कौन सी योजना मिलेगी?", None)
        .await;
    assert_eq!(
        first.text,
        prompts::profile_question(ProfileField::Gender, Language::Hindi)
    );
    assert_eq!(first.trace.fields_filled, vec![ProfileField::Age]);

    // Turn 2: the remaining core facts arrive together and matching runs
    let second = orchestrator
        .handle_turn(key("citizen-7"), "मैं महिला हूँ, बिहार में खेती करती हूँ", None)
        .await;
    assert_eq!(second.trace.fields_filled.len(), 3);
    assert!(second.text.contains("पेंशन"));
    assert!(second.trace.persisted);

    // The stored profile holds all four facts and the workflow is done
    let stored = store.load(&key("citizen-7")).await.unwrap().unwrap();
    assert!(stored.profile().has(ProfileField::Age));
    assert!(stored.profile().has(ProfileField::Gender));
    assert!(stored.profile().has(ProfileField::State));
    assert!(stored.profile().has(ProfileField::Occupation));
    assert_eq!(stored.active_workflow(), None);
    assert!(stored.scratch().scheme().is_none());
}

/// Tests that a scheme question in the middle of a grievance displaces
/// the grievance without losing it, and that coming back resumes from
/// where the questions stopped.
#[tokio::test]
async fn grievance_interrupted_by_scheme_question_resumes_cleanly() {
    let store = Arc::new(InMemorySessionStore::with_default_ttl());
    let completion = MockCompletion::new()
        .with_reply(r#"{"intent": "rti_grievance"}"#)
        .with_reply(r#"{"intent": "scheme_discovery"}"#)
        .with_reply(r#"{"intent": "rti_grievance"}"#);
    let orchestrator = orchestrator_over(store.clone() as Arc<dyn SessionStore>, completion);

    // Turn 1: a substantive complaint; the desk asks for the locality
    let first = orchestrator
        .handle_turn(
            key("citizen-8"),
            "हमारे गांव की सड़क छह महीने से टूटी पड़ी है और कोई अधिकारी नहीं सुनता है",
            None,
        )
        .await;
    assert_eq!(
        first.text,
        prompts::grievance_locality_question(Language::Hindi)
    );

    // Turn 2: the citizen switches topic; scheme discovery takes over
    let second = orchestrator
        .handle_turn(key("citizen-8"), "पहले यह बताइए कौन सी योजना मिलेगी", None)
        .await;
    assert_eq!(second.trace.workflow, Some(WorkflowKind::SchemeDiscovery));
    assert_eq!(
        second.text,
        prompts::profile_question(ProfileField::Age, Language::Hindi)
    );

    // Turn 3: back to the complaint; the desk continues with the next
    // unanswered question instead of starting over
    let third = orchestrator
        .handle_turn(key("citizen-8"), "अच्छा, वापस सड़क वाली शिकायत पर चलिए", None)
        .await;
    assert_eq!(third.trace.workflow, Some(WorkflowKind::RtiGrievance));
    assert_eq!(
        third.text,
        prompts::grievance_authority_question(Language::Hindi)
    );

    let stored = store.load(&key("citizen-8")).await.unwrap().unwrap();
    let draft = stored.scratch().grievance().unwrap();
    assert!(draft.complaint().contains("सड़क"));
    assert!(draft.locality_asked());
}

/// Tests the predatory-loan scenario end to end: Hindi text with an
/// amount and a 48% annual rate produces a locally computed EMI, a
/// warning, and government alternatives, with no advice model call.
#[tokio::test]
async fn predatory_hindi_loan_is_warned_with_alternatives() {
    let store = Arc::new(InMemorySessionStore::with_default_ttl());
    let completion = MockCompletion::new().with_reply(r#"{"intent": "financial_advice"}"#);
    let orchestrator = orchestrator_over(store.clone() as Arc<dyn SessionStore>, completion.clone());

    let reply = orchestrator
        .handle_turn(
            key("citizen-9"),
            "मुझे 5 लाख का लोन चाहिए, ब्याज दर 48% है",
            None,
        )
        .await;

    assert_eq!(reply.language, Language::Hindi);
    assert!(reply.text.contains("₹5,00,000"));
    assert!(reply.text.contains("चेतावनी"));
    assert!(reply.text.contains("12 महीने मानकर"));
    assert!(reply.text.contains("PM MUDRA Yojana"));
    // One classifier call; the arithmetic never goes to the model
    assert_eq!(completion.call_count(), 1);

    let stored = store.load(&key("citizen-9")).await.unwrap().unwrap();
    assert_eq!(stored.active_workflow(), None);
}

/// Tests that a model outage mid-conversation returns the apology and
/// leaves the previously stored session exactly as it was.
#[tokio::test]
async fn model_outage_leaves_the_stored_session_untouched() {
    let store = Arc::new(InMemorySessionStore::with_default_ttl());
    let completion = MockCompletion::new()
        .with_reply(r#"{"intent": "scheme_discovery", "profile": {"age": 62}, "stated": ["age"]}"#)
        .with_error(jansahayak::adapters::ai::MockError::Unavailable {
            message: "upstream 503".into(),
        });
    let orchestrator = orchestrator_over(store.clone() as Arc<dyn SessionStore>, completion);

    orchestrator
        .handle_turn(key("citizen-10"), "मेरी उम्र 62 साल है, योजना बताइए", None)
        .await;
    let before = store.load(&key("citizen-10")).await.unwrap().unwrap();

    // The outage turn degrades to the apology
    let reply = orchestrator
        .handle_turn(key("citizen-10"), "बासठ साल", None)
        .await;
    assert_eq!(reply.text, prompts::apology(Language::Hindi));
    assert!(!reply.trace.persisted);

    // Nothing about the stored session moved
    let after = store.load(&key("citizen-10")).await.unwrap().unwrap();
    assert_eq!(after, before);
    assert_eq!(after.citizen_turn_count(), 1);
    assert_eq!(after.active_workflow(), Some(WorkflowKind::SchemeDiscovery));
}

/// Tests that a failing store never swallows the reply: the citizen
/// still gets the text, flagged as not persisted.
#[tokio::test]
async fn save_failure_still_delivers_the_reply() {
    let store = Arc::new(SaveFailsStore::new());
    let completion = MockCompletion::new().with_reply(r#"{"intent": "unclear"}"#);
    let orchestrator = orchestrator_over(store.clone() as Arc<dyn SessionStore>, completion);

    let reply = orchestrator
        .handle_turn(key("citizen-11"), "नमस्ते", None)
        .await;

    assert_eq!(reply.text, prompts::service_menu(0, Language::Hindi));
    assert!(!reply.trace.persisted);
    assert_eq!(store.inner.live_count().await, 0);
}

/// Tests that long conversations keep only the bounded history while
/// the citizen turn counter keeps counting.
#[tokio::test]
async fn turn_history_stays_capped() {
    let store = Arc::new(InMemorySessionStore::with_default_ttl());
    // An exhausted mock answers every classification with non-JSON,
    // which degrades each turn to the service menu.
    let orchestrator = orchestrator_over(store.clone() as Arc<dyn SessionStore>, MockCompletion::new());

    for i in 0..15 {
        orchestrator
            .handle_turn(key("citizen-12"), &format!("संदेश {i}"), None)
            .await;
    }

    let stored = store.load(&key("citizen-12")).await.unwrap().unwrap();
    assert_eq!(stored.turn_record_count(), MAX_TURN_HISTORY);
    assert_eq!(stored.citizen_turn_count(), 15);
}

/// Tests that an expired session is not resurrected: the next turn
/// starts from a fresh session rather than the stale one.
#[tokio::test]
async fn expired_session_is_not_resurrected() {
    let store = Arc::new(InMemorySessionStore::new(Duration::from_secs(1)));
    let completion = MockCompletion::new()
        .with_reply(r#"{"intent": "scheme_discovery", "profile": {"age": 62}, "stated": ["age"]}"#)
        .with_reply(r#"{"intent": "continuation"}"#);
    let orchestrator = orchestrator_over(store.clone() as Arc<dyn SessionStore>, completion);

    orchestrator
        .handle_turn(key("citizen-13"), "मेरी उम्र 62 साल है, योजना बताइए", None)
        .await;
    tokio::time::sleep(Duration::from_millis(1100)).await;

    // The continuation lands on a fresh session with no active workflow
    let reply = orchestrator
        .handle_turn(key("citizen-13"), "बासठ साल", None)
        .await;
    assert_eq!(reply.text, prompts::service_menu(0, Language::Hindi));
    assert_eq!(reply.trace.workflow, None);

    let stored = store.load(&key("citizen-13")).await.unwrap().unwrap();
    assert_eq!(stored.citizen_turn_count(), 1);
    assert!(stored.profile().is_empty());
}
