//! Pull request resource for CI pipelines backed by AWS `CodeCommit`.
//!
//! The library discovers open pull requests, normalises them into versions
//! and metadata the pipeline can compare, lists changed files between commits,
//! and manages a single status comment per pull request. The binary wraps it
//! in `check`, `get` and `comment` steps.

pub mod cli;
pub mod codecommit;
pub mod config;

pub use codecommit::{
    AdapterError, BuildEnvironment, CodeCommitAdapter, CommitStatus, Metadata, PullRequest,
    PullRequestAdapter, RepositoryLocator, Session, Version,
};
pub use config::{OperationMode, ResourceConfig};

#[cfg(any(test, feature = "test-support"))]
pub use codecommit::InMemoryCodeCommit;
