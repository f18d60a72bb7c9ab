//! Conversation session aggregate.
//!
//! A session is the unit of persistence and of concurrency: turns for
//! one session are serialized, and everything the assistant remembers
//! about a citizen between turns lives here.
//!
//! # Invariants
//!
//! - Turn history holds at most [`MAX_TURN_HISTORY`] records; the
//!   oldest is dropped first.
//! - Profile mutation goes through the merge rules only.
//! - A workflow switch leaves the displaced workflow's scratch in
//!   place; completing a workflow clears its scratch.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Language, SessionKey, Timestamp};
use crate::domain::profile::{CitizenProfile, MergeReport, ProfilePatch};

use super::scratch::{ScratchPad, WorkflowKind};

/// Turn records retained per session.
pub const MAX_TURN_HISTORY: usize = 20;

/// Most recent records included when building model prompts.
pub const PROMPT_WINDOW_TURNS: usize = 6;

/// Who produced a turn record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    Citizen,
    Assistant,
}

/// One remembered message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub role: TurnRole,
    pub text: String,
    pub language: Language,
    pub at: Timestamp,
}

/// Session aggregate - all conversation state for one citizen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Caller-supplied stable identifier.
    key: SessionKey,

    /// Accumulated citizen attributes.
    profile: CitizenProfile,

    /// Language replies are delivered in.
    preferred_language: Language,

    /// Workflow that owns follow-up answers, if any.
    active_workflow: Option<WorkflowKind>,

    /// Per-workflow scratch slots.
    scratch: ScratchPad,

    /// Recent turn records, oldest first.
    turns: VecDeque<TurnRecord>,

    /// Citizen turns ever handled, across trimming.
    citizen_turn_count: u64,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session last saw activity.
    last_active_at: Timestamp,
}

impl Session {
    /// Creates a fresh session with an empty profile and the default
    /// language.
    pub fn new(key: SessionKey) -> Self {
        let now = Timestamp::now();
        Self {
            key,
            profile: CitizenProfile::new(),
            preferred_language: Language::default(),
            active_workflow: None,
            scratch: ScratchPad::new(),
            turns: VecDeque::new(),
            citizen_turn_count: 0,
            created_at: now,
            last_active_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn profile(&self) -> &CitizenProfile {
        &self.profile
    }

    pub fn preferred_language(&self) -> Language {
        self.preferred_language
    }

    pub fn active_workflow(&self) -> Option<WorkflowKind> {
        self.active_workflow
    }

    pub fn scratch(&self) -> &ScratchPad {
        &self.scratch
    }

    pub fn scratch_mut(&mut self) -> &mut ScratchPad {
        &mut self.scratch
    }

    /// Returns all retained turn records, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &TurnRecord> {
        self.turns.iter()
    }

    /// Returns the last `max` records, oldest first.
    pub fn recent_turns(&self, max: usize) -> impl Iterator<Item = &TurnRecord> {
        let skip = self.turns.len().saturating_sub(max);
        self.turns.iter().skip(skip)
    }

    pub fn turn_record_count(&self) -> usize {
        self.turns.len()
    }

    /// Citizen turns handled over the session's whole life.
    pub fn citizen_turn_count(&self) -> u64 {
        self.citizen_turn_count
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn last_active_at(&self) -> &Timestamp {
        &self.last_active_at
    }

    pub fn is_idle(&self) -> bool {
        self.active_workflow.is_none()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records the language replies should be delivered in.
    pub fn set_preferred_language(&mut self, language: Language) {
        self.preferred_language = language;
    }

    /// Applies one turn's extracted attributes through the merge rules.
    pub fn merge_profile(&mut self, patch: &ProfilePatch) -> MergeReport {
        self.profile.merge(patch)
    }

    /// Appends a citizen message to the history.
    pub fn record_citizen_turn(&mut self, text: impl Into<String>, language: Language) {
        self.citizen_turn_count += 1;
        self.push_turn(TurnRole::Citizen, text.into(), language);
    }

    /// Appends an assistant reply to the history.
    pub fn record_assistant_turn(&mut self, text: impl Into<String>, language: Language) {
        self.push_turn(TurnRole::Assistant, text.into(), language);
    }

    /// Makes a workflow the owner of follow-up answers. Scratch of any
    /// displaced workflow stays in place for later resumption.
    pub fn activate_workflow(&mut self, kind: WorkflowKind) {
        self.active_workflow = Some(kind);
    }

    /// Finishes the active workflow: clears the pointer and that
    /// workflow's scratch, returning the session to idle.
    pub fn complete_workflow(&mut self) {
        if let Some(kind) = self.active_workflow.take() {
            self.scratch.clear(kind);
        }
    }

    /// Refreshes the activity timestamp.
    pub fn touch(&mut self) {
        self.last_active_at = Timestamp::now();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn push_turn(&mut self, role: TurnRole, text: String, language: Language) {
        self.turns.push_back(TurnRecord {
            role,
            text,
            language,
            at: Timestamp::now(),
        });
        while self.turns.len() > MAX_TURN_HISTORY {
            self.turns.pop_front();
        }
        self.touch();
    }
}
