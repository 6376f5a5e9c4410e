//! Pipeline step handlers.
//!
//! - [`check`]: report the versions of open pull requests
//! - [`get`]: fetch one pull request with its metadata
//! - [`comment`]: replace the bot comment on one pull request
//!
//! JSON output helpers are in [`output`]. Path filtering for `check` is in
//! [`filter`].

use serde::Serialize;

use crate::codecommit::{Metadata, Version};

pub mod check;
pub mod comment;
pub mod filter;
pub mod get;
pub mod output;

/// Result of a step that targets a single pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutput {
    /// Version of the pull request after the step.
    pub version: Version,
    /// Metadata describing the pull request.
    pub metadata: Metadata,
}
