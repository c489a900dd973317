//! Eligibility policy - pure functions deciding whether to merge
//!
//! No I/O happens here. The inputs are the aggregated status map and the
//! branch's required contexts; the output lists whatever blocks the merge.
//!
//! The policy is deliberately asymmetric:
//! - no required contexts: every *known* context must pass (nothing known
//!   means nothing can fail)
//! - required contexts: each one must be present *and* pass; contexts that
//!   aren't required are ignored

use crate::merge::status::StatusMap;
use crate::types::RequiredContexts;
use std::fmt;

/// Why a context blocks the merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Blocker {
    /// Context reported, but not successfully
    Failing(String),
    /// Required context has not reported at all
    Missing(String),
}

impl Blocker {
    /// Context name
    pub fn context(&self) -> &str {
        match self {
            Self::Failing(c) | Self::Missing(c) => c,
        }
    }
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failing(c) => write!(f, "{c} failing"),
            Self::Missing(c) => write!(f, "{c} missing"),
        }
    }
}

/// Outcome of the eligibility check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eligibility {
    /// Contexts preventing the merge, empty when eligible
    pub blockers: Vec<Blocker>,
}

impl Eligibility {
    /// Whether the pull request may be merged
    pub fn is_eligible(&self) -> bool {
        self.blockers.is_empty()
    }
}

/// Merge decision for one commit
///
/// Produced fresh for every evaluation and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeDecision {
    /// Commit the decision was made for (the PR head)
    pub sha: String,
    /// Eligibility verdict
    pub eligibility: Eligibility,
}

impl MergeDecision {
    /// Decide for `sha` from its statuses and the branch requirements
    pub fn decide(sha: &str, statuses: &StatusMap, required: &RequiredContexts) -> Self {
        Self {
            sha: sha.to_string(),
            eligibility: evaluate_eligibility(statuses, required),
        }
    }

    /// Whether the merge should be issued
    pub fn should_merge(&self) -> bool {
        self.eligibility.is_eligible()
    }
}

/// Evaluate merge eligibility (PURE)
pub fn evaluate_eligibility(statuses: &StatusMap, required: &RequiredContexts) -> Eligibility {
    let blockers = if required.is_empty() {
        statuses
            .iter()
            .filter(|&(_, &passed)| !passed)
            .map(|(context, _)| Blocker::Failing(context.clone()))
            .collect()
    } else {
        required
            .contexts()
            .iter()
            .filter_map(|context| match statuses.get(context) {
                Some(true) => None,
                Some(false) => Some(Blocker::Failing(context.clone())),
                None => Some(Blocker::Missing(context.clone())),
            })
            .collect()
    };

    Eligibility { blockers }
}

/// Boolean form of [`evaluate_eligibility`]
pub fn is_eligible(statuses: &StatusMap, required: &RequiredContexts) -> bool {
    evaluate_eligibility(statuses, required).is_eligible()
}
