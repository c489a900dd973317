//! CLI command implementations

mod context;
mod handle;

pub use handle::{HandleOptions, run_events, run_handle};
