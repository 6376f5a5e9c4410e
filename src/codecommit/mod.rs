//! `CodeCommit` pull request adapter and comment lifecycle.
//!
//! This module parses repository locators, normalises pull requests into the
//! model the CI pipeline consumes, lists changed files, and keeps at most one
//! bot-authored comment per pull request. Remote calls go through the gateway
//! traits so the adapter can run against the AWS SDK, mocks, or the in-memory
//! fake.

pub mod adapter;
pub mod comments;
pub mod differ;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod fake;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod normalizer;
pub mod status;
pub mod version;

pub use adapter::{CodeCommitAdapter, PullRequestAdapter};
pub use comments::CommentLifecycle;
pub use differ::ChangedFileDiffer;
pub use error::AdapterError;
#[cfg(any(test, feature = "test-support"))]
pub use fake::InMemoryCodeCommit;
pub use gateway::{
    CodeCommitGateway, IdentityGateway, SdkCodeCommitGateway, Session, StsIdentityGateway,
};
pub use locator::{Region, RepositoryLocator, RepositoryName, simple_ref_name};
pub use models::{
    ChangedFileObject, CommitObject, LabelObject, PullRequest, PullRequestObject,
};
pub use normalizer::PullRequestNormalizer;
pub use status::{BuildEnvironment, CommitStatus};
pub use version::{Metadata, MetadataField, Version};

#[cfg(test)]
pub use adapter::MockPullRequestAdapter;
#[cfg(test)]
pub use gateway::{MockCodeCommitGateway, MockIdentityGateway};
