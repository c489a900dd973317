//! automerger - merge approved pull requests once their checks pass
//!
//! Consumes GitHub webhook events (`pull_request`, `pull_request_review`,
//! `status`) and merges a pull request when it carries the configured
//! approved label and its status checks allow it.
//!
//! The entry point is [`router::handle_event`]; forge access goes through
//! [`platform::ForgeClient`].

pub mod auth;
pub mod config;
pub mod error;
pub mod event;
pub mod merge;
pub mod platform;
pub mod router;
pub mod types;

pub use error::{Error, Result};
pub use event::{Event, HANDLED_EVENT_TYPES};
pub use router::handle_event;
