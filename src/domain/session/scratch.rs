//! Per-workflow scratch state parked on the session.
//!
//! A topic switch never destroys scratch: each workflow keeps its own
//! slot, so an interrupted RTI draft is still there when the citizen
//! comes back to it. A slot is cleared only when its workflow
//! completes or is explicitly abandoned.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::finance::LoanMention;
use crate::domain::grievance::GrievanceDraft;
use crate::domain::profile::ProfileField;

/// Which domain workflow a session is currently in, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    SchemeDiscovery,
    RtiGrievance,
    FinancialAdvice,
}

impl WorkflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::SchemeDiscovery => "scheme_discovery",
            WorkflowKind::RtiGrievance => "rti_grievance",
            WorkflowKind::FinancialAdvice => "financial_advice",
        }
    }
}

/// Slot-filling bookkeeping for scheme discovery.
///
/// Each profile question is asked at most once; a question the citizen
/// ignored is skipped in favor of the next unasked one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeScratch {
    asked: BTreeSet<ProfileField>,
}

impl SchemeScratch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note_asked(&mut self, field: ProfileField) {
        self.asked.insert(field);
    }

    pub fn was_asked(&self, field: ProfileField) -> bool {
        self.asked.contains(&field)
    }

    pub fn asked_count(&self) -> usize {
        self.asked.len()
    }
}

/// A loan mention waiting for its missing interest rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceScratch {
    pending: Option<LoanMention>,
}

impl FinanceScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a partial mention until the rate arrives.
    pub fn park(&mut self, mention: LoanMention) {
        self.pending = Some(mention);
    }

    pub fn pending(&self) -> Option<&LoanMention> {
        self.pending.as_ref()
    }

    pub fn take_pending(&mut self) -> Option<LoanMention> {
        self.pending.take()
    }
}

/// All workflow scratch slots for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScratchPad {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scheme: Option<SchemeScratch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grievance: Option<GrievanceDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    finance: Option<FinanceScratch>,
}

impl ScratchPad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheme(&self) -> Option<&SchemeScratch> {
        self.scheme.as_ref()
    }

    pub fn grievance(&self) -> Option<&GrievanceDraft> {
        self.grievance.as_ref()
    }

    pub fn finance(&self) -> Option<&FinanceScratch> {
        self.finance.as_ref()
    }

    /// The scheme slot, created empty on first access.
    pub fn scheme_mut(&mut self) -> &mut SchemeScratch {
        self.scheme.get_or_insert_with(SchemeScratch::new)
    }

    /// The grievance slot, created at Collecting on first access.
    pub fn grievance_mut(&mut self) -> &mut GrievanceDraft {
        self.grievance.get_or_insert_with(GrievanceDraft::new)
    }

    /// The finance slot, created empty on first access.
    pub fn finance_mut(&mut self) -> &mut FinanceScratch {
        self.finance.get_or_insert_with(FinanceScratch::new)
    }

    /// Drops one workflow's scratch, leaving the others untouched.
    pub fn clear(&mut self, kind: WorkflowKind) {
        match kind {
            WorkflowKind::SchemeDiscovery => self.scheme = None,
            WorkflowKind::RtiGrievance => self.grievance = None,
            WorkflowKind::FinancialAdvice => self.finance = None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scheme.is_none() && self.grievance.is_none() && self.finance.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_start_empty_and_materialize_on_demand() {
        let mut pad = ScratchPad::new();
        assert!(pad.is_empty());
        assert!(pad.grievance().is_none());

        pad.grievance_mut().append_complaint("ration card pending");
        assert!(pad.grievance().is_some());
        assert!(pad.scheme().is_none());
    }

    #[test]
    fn clearing_one_slot_preserves_the_others() {
        let mut pad = ScratchPad::new();
        pad.grievance_mut().append_complaint("complaint text");
        pad.scheme_mut().note_asked(ProfileField::Age);

        pad.clear(WorkflowKind::SchemeDiscovery);
        assert!(pad.scheme().is_none());
        assert!(pad.grievance().is_some());
    }

    #[test]
    fn scheme_scratch_tracks_asked_fields() {
        let mut scratch = SchemeScratch::new();
        assert!(!scratch.was_asked(ProfileField::Age));
        scratch.note_asked(ProfileField::Age);
        scratch.note_asked(ProfileField::Age);
        assert!(scratch.was_asked(ProfileField::Age));
        assert_eq!(scratch.asked_count(), 1);
    }

    #[test]
    fn finance_scratch_parks_and_releases_a_mention() {
        let mut scratch = FinanceScratch::new();
        scratch.park(LoanMention::parse("50000 ka loan"));
        assert!(scratch.pending().is_some());

        let taken = scratch.take_pending().unwrap();
        assert_eq!(taken.principal_rupees(), Some(50_000.0));
        assert!(scratch.pending().is_none());
    }

    #[test]
    fn scratch_pad_serializes_round_trip() {
        let mut pad = ScratchPad::new();
        pad.grievance_mut()
            .append_complaint("pension not received for six months");
        pad.finance_mut().park(LoanMention::parse("2 lakh ka loan"));

        let json = serde_json::to_string(&pad).unwrap();
        let back: ScratchPad = serde_json::from_str(&json).unwrap();
        assert_eq!(pad, back);
    }
}
