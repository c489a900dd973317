//! Merge engine
//!
//! Three-phase pattern:
//! 1. Gather - fetch statuses, check runs and required contexts (effectful)
//! 2. Decide - create a `MergeDecision` (pure, testable)
//! 3. Execute - perform the merge (effectful)

mod eligibility;
mod execute;
mod pipeline;
mod requirements;
mod status;

pub use eligibility::{Blocker, Eligibility, MergeDecision, evaluate_eligibility, is_eligible};
pub use execute::{MergeOutcome, execute_merge};
pub use pipeline::evaluate_pull_request;
pub use requirements::resolve_required_contexts;
pub use status::{StatusMap, aggregate_statuses, collect_statuses};
