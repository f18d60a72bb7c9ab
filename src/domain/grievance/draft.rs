//! Grievance draft scratch state and its stage machine.
//!
//! # Invariants
//!
//! - Stages only move forward: Collecting → Classifying → Drafting →
//!   Delivered.
//! - At most [`MAX_CLARIFY_ROUNDS`] disambiguation questions are asked
//!   before classification is forced to a best guess.
//! - The draft survives topic switches untouched; it is discarded only
//!   on delivery, explicit abandonment, or session expiry.

use serde::{Deserialize, Serialize};

use super::category::GrievanceCategory;

/// Words of complaint text required before classification starts.
pub const MIN_COMPLAINT_WORDS: usize = 10;

/// Disambiguation rounds allowed during classification.
pub const MAX_CLARIFY_ROUNDS: u8 = 2;

/// Where the draft is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrievanceStage {
    Collecting,
    Classifying,
    Drafting,
    Delivered,
}

/// Accumulating scratch state for one RTI application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrievanceDraft {
    stage: GrievanceStage,
    complaint: String,
    locality: Option<String>,
    locality_asked: bool,
    authority: Option<String>,
    authority_asked: bool,
    date_range: Option<String>,
    desired_remedy: Option<String>,
    category: Option<GrievanceCategory>,
    clarify_rounds: u8,
    formal_text: Option<String>,
}

impl GrievanceDraft {
    pub fn new() -> Self {
        Self {
            stage: GrievanceStage::Collecting,
            complaint: String::new(),
            locality: None,
            locality_asked: false,
            authority: None,
            authority_asked: false,
            date_range: None,
            desired_remedy: None,
            category: None,
            clarify_rounds: 0,
            formal_text: None,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────

    pub fn stage(&self) -> GrievanceStage {
        self.stage
    }

    pub fn complaint(&self) -> &str {
        &self.complaint
    }

    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    pub fn locality_asked(&self) -> bool {
        self.locality_asked
    }

    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    pub fn authority_asked(&self) -> bool {
        self.authority_asked
    }

    pub fn date_range(&self) -> Option<&str> {
        self.date_range.as_deref()
    }

    pub fn desired_remedy(&self) -> Option<&str> {
        self.desired_remedy.as_deref()
    }

    pub fn category(&self) -> Option<GrievanceCategory> {
        self.category
    }

    pub fn clarify_rounds(&self) -> u8 {
        self.clarify_rounds
    }

    pub fn formal_text(&self) -> Option<&str> {
        self.formal_text.as_deref()
    }

    /// Complaint length in whitespace-separated words.
    pub fn complaint_words(&self) -> usize {
        self.complaint.split_whitespace().count()
    }

    /// Whether enough complaint text has accumulated to classify.
    pub fn is_substantive(&self) -> bool {
        self.complaint_words() >= MIN_COMPLAINT_WORDS
    }

    // ─── Mutation ────────────────────────────────────────────────────

    /// Appends one turn's text to the complaint.
    pub fn append_complaint(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        if !self.complaint.is_empty() {
            self.complaint.push(' ');
        }
        self.complaint.push_str(trimmed);
    }

    pub fn set_locality(&mut self, locality: impl Into<String>) {
        self.locality = Some(locality.into());
    }

    /// Records that the locality question went out; it is asked once.
    pub fn note_locality_asked(&mut self) {
        self.locality_asked = true;
    }

    pub fn set_authority(&mut self, authority: impl Into<String>) {
        self.authority = Some(authority.into());
    }

    /// Records that the authority question went out; it is asked once.
    pub fn note_authority_asked(&mut self) {
        self.authority_asked = true;
    }

    pub fn set_date_range(&mut self, range: impl Into<String>) {
        self.date_range = Some(range.into());
    }

    pub fn set_desired_remedy(&mut self, remedy: impl Into<String>) {
        self.desired_remedy = Some(remedy.into());
    }

    /// Moves Collecting → Classifying once the complaint is substantive.
    pub fn begin_classifying(&mut self) {
        if self.stage == GrievanceStage::Collecting {
            self.stage = GrievanceStage::Classifying;
        }
    }

    /// Burns one disambiguation round; returns false when exhausted.
    pub fn use_clarify_round(&mut self) -> bool {
        if self.clarify_rounds >= MAX_CLARIFY_ROUNDS {
            return false;
        }
        self.clarify_rounds += 1;
        true
    }

    /// Fixes the category and moves Classifying → Drafting.
    pub fn begin_drafting(&mut self, category: GrievanceCategory) {
        if self.stage == GrievanceStage::Classifying {
            self.category = Some(category);
            self.stage = GrievanceStage::Drafting;
        }
    }

    /// Stores the formal text and moves Drafting → Delivered.
    pub fn mark_delivered(&mut self, formal_text: impl Into<String>) {
        if self.stage == GrievanceStage::Drafting {
            self.formal_text = Some(formal_text.into());
            self.stage = GrievanceStage::Delivered;
        }
    }
}

impl Default for GrievanceDraft {
    fn default() -> Self {
        Self::new()
    }
}
