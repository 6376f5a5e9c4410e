//! Error types exposed by the pull request adapter.

use thiserror::Error;

/// Errors surfaced while parsing locators or talking to the source control
/// service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterError {
    /// The repository locator did not split into a region and a repository.
    #[error(
        "malformed repository '{locator}': a locator must be in the form \
         codecommit::<region>://<repository>"
    )]
    MalformedLocator {
        /// The locator string as supplied by the caller.
        locator: String,
    },

    /// A call to the remote service failed.
    #[error("{operation} failed for {target}: {message}")]
    UpstreamApi {
        /// Name of the remote operation that was attempted.
        operation: String,
        /// Repository, pull request or comment the call was aimed at.
        target: String,
        /// Error chain reported by the SDK.
        message: String,
    },

    /// A pull request identifier could not be read as a number.
    #[error("pull request id '{identifier}' is not a number")]
    InvalidIdentifier {
        /// The identifier returned by the service or supplied by the caller.
        identifier: String,
    },

    /// A branch tip or the caller identity could not be resolved.
    #[error("could not resolve {subject}: {message}")]
    Resolution {
        /// What was being resolved, e.g. `branch main`.
        subject: String,
        /// Why resolution failed.
        message: String,
    },

    /// The service answered but left out a field the model requires.
    #[error("{operation} for {target} returned no {field}")]
    IncompleteResponse {
        /// Name of the remote operation.
        operation: String,
        /// Object the call was aimed at.
        target: String,
        /// Missing response field.
        field: String,
    },

    /// One or more previous comments could not be deleted during a sweep.
    #[error(
        "failed to delete {} previous comment(s) on pull request {pull_request}: {}",
        .failures.len(),
        .failures.join("; ")
    )]
    CommentCleanup {
        /// Pull request being cleaned up.
        pull_request: String,
        /// One message per comment that failed to delete.
        failures: Vec<String>,
    },

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
