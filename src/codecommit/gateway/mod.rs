//! Gateways for talking to the source control service.
//!
//! The traits describe the handful of remote calls the adapter needs. The SDK
//! implementations perform real requests while tests substitute mocks or the
//! in-memory fake.

mod conversion;
mod error_mapping;
mod identity;
mod repository;
mod session;

pub use identity::StsIdentityGateway;
pub use repository::SdkCodeCommitGateway;
pub use session::Session;

use async_trait::async_trait;

use super::error::AdapterError;
use super::locator::RepositoryName;
use super::models::{
    CallerIdentity, CommentRequest, CommentThread, DifferencePage, PullRequestRecord,
    RepositoryMetadata,
};

/// Page size used when listing open pull request identifiers.
pub const PULL_REQUEST_PAGE_SIZE: i32 = 100;

/// Upper bound on difference entries requested in a single call.
pub const MAX_DIFFERENCES: i32 = 400;

/// Gateway for repository, pull request and comment operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeCommitGateway: Send + Sync {
    /// Fetch repository metadata.
    async fn repository(
        &self,
        repository: &RepositoryName,
    ) -> Result<RepositoryMetadata, AdapterError>;

    /// List the identifiers of every open pull request, in service order.
    async fn open_pull_request_ids(
        &self,
        repository: &RepositoryName,
    ) -> Result<Vec<String>, AdapterError>;

    /// Fetch the detail record of one pull request.
    async fn pull_request(
        &self,
        pull_request_id: &str,
    ) -> Result<PullRequestRecord, AdapterError>;

    /// Resolve the commit a branch currently points at.
    async fn branch_tip(
        &self,
        repository: &RepositoryName,
        branch: &str,
    ) -> Result<String, AdapterError>;

    /// Fetch at most `max_results` differences between two commits.
    async fn differences(
        &self,
        repository: &RepositoryName,
        before_commit: &str,
        after_commit: &str,
        max_results: i32,
    ) -> Result<DifferencePage, AdapterError>;

    /// Post a comment on a commit range of a pull request.
    async fn post_comment(&self, request: &CommentRequest) -> Result<(), AdapterError>;

    /// Fetch every comment thread of a pull request.
    async fn comment_threads(
        &self,
        pull_request_id: &str,
    ) -> Result<Vec<CommentThread>, AdapterError>;

    /// Delete the content of a comment.
    async fn delete_comment(&self, comment_id: &str) -> Result<(), AdapterError>;
}

/// Gateway resolving who the session is authenticated as.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Resolve the caller identity.
    async fn caller_identity(&self) -> Result<CallerIdentity, AdapterError>;
}
