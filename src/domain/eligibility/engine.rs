//! Profile-against-rules matching and ranking.

use std::cmp::Ordering;

use crate::domain::profile::CitizenProfile;

use super::rule::{SchemeRule, Verdict};

/// Most schemes returned for one match request.
pub const MAX_MATCHES: usize = 5;

/// Fraction of satisfied conditions as an exact ratio.
///
/// Comparison cross-multiplies, so 2/4 and 3/6 are equal and no
/// floating-point tie ambiguity can reorder results between runs. A
/// rule with no conditions scores 1/1.
#[derive(Debug, Clone, Copy)]
pub struct MatchScore {
    satisfied: u32,
    total: u32,
}

impl MatchScore {
    pub fn new(satisfied: u32, total: u32) -> Self {
        if total == 0 {
            Self {
                satisfied: 1,
                total: 1,
            }
        } else {
            Self { satisfied, total }
        }
    }

    pub fn satisfied(&self) -> u32 {
        self.satisfied
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Score as a float, for display only. Ranking never uses this.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.satisfied) / f64::from(self.total)
    }

    /// At least half the conditions are satisfied.
    pub fn is_confident(&self) -> bool {
        u64::from(self.satisfied) * 2 >= u64::from(self.total)
    }

    pub fn is_full(&self) -> bool {
        self.satisfied == self.total
    }
}

impl PartialEq for MatchScore {
    fn eq(&self, other: &Self) -> bool {
        u64::from(self.satisfied) * u64::from(other.total)
            == u64::from(other.satisfied) * u64::from(self.total)
    }
}

impl Eq for MatchScore {}

impl PartialOrd for MatchScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MatchScore {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u64::from(self.satisfied) * u64::from(other.total);
        let rhs = u64::from(other.satisfied) * u64::from(self.total);
        lhs.cmp(&rhs)
    }
}

/// One rule that survived matching, with its score.
#[derive(Debug, Clone)]
pub struct SchemeMatch<'a> {
    pub rule: &'a SchemeRule,
    pub score: MatchScore,
}

/// Result of a match request.
#[derive(Debug, Clone)]
pub enum MatchOutcome<'a> {
    /// Ranked confident matches, best first, at most [`MAX_MATCHES`].
    Matches(Vec<SchemeMatch<'a>>),
    /// Nothing cleared the confidence threshold; the caller should ask
    /// for more profile attributes instead of answering.
    InsufficientProfile,
}

/// Evaluates every rule against the profile and ranks the survivors.
///
/// A rule with any contradicted condition is excluded outright, however
/// well the rest of it scores. Unknown fields count toward the total
/// but never toward the satisfied count. Ties break by rule priority,
/// then by name.
pub fn match_schemes<'a>(
    profile: &CitizenProfile,
    rules: &'a [SchemeRule],
) -> MatchOutcome<'a> {
    let mut matches: Vec<SchemeMatch<'a>> = Vec::new();

    'rules: for rule in rules {
        let mut satisfied = 0u32;
        for condition in &rule.conditions {
            match condition.evaluate(profile) {
                Verdict::Satisfied => satisfied += 1,
                Verdict::Unknown => {}
                Verdict::Contradicted => continue 'rules,
            }
        }
        let score = MatchScore::new(satisfied, rule.conditions.len() as u32);
        if score.is_confident() {
            matches.push(SchemeMatch { rule, score });
        }
    }

    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.rule.priority.cmp(&b.rule.priority))
            .then_with(|| a.rule.name.cmp(&b.rule.name))
    });
    matches.truncate(MAX_MATCHES);

    if matches.is_empty() {
        MatchOutcome::InsufficientProfile
    } else {
        MatchOutcome::Matches(matches)
    }
}
