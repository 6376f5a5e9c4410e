//! The pull request adapter used by the pipeline steps.
//!
//! [`CodeCommitAdapter`] owns one repository gateway and one identity
//! gateway and hands borrowed views of them to the normaliser, differ and
//! comment lifecycle for each call.

use async_trait::async_trait;

use super::comments::CommentLifecycle;
use super::differ::ChangedFileDiffer;
use super::error::AdapterError;
use super::gateway::{
    CodeCommitGateway, IdentityGateway, SdkCodeCommitGateway, Session, StsIdentityGateway,
};
use super::locator::RepositoryLocator;
use super::models::{ChangedFileObject, PullRequest};
use super::normalizer::PullRequestNormalizer;
use super::status::{BuildEnvironment, CommitStatus};

/// Operations a CI resource performs against a pull request service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestAdapter: Send + Sync {
    /// Lists every open pull request in listing order.
    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequest>, AdapterError>;

    /// Lists paths changed between the tip of `base_branch` and `head_commit`.
    async fn list_modified_files(
        &self,
        pr_number: u64,
        head_commit: &str,
        base_branch: &str,
    ) -> Result<Vec<String>, AdapterError>;

    /// Posts `body` on the `before_commit..after_commit` range.
    async fn post_comment(
        &self,
        pr_number: &str,
        before_commit: &str,
        after_commit: &str,
        body: &str,
    ) -> Result<(), AdapterError>;

    /// Fetches one pull request.
    async fn get_pull_request(
        &self,
        pr_number: &str,
        commit_ref: &str,
    ) -> Result<PullRequest, AdapterError>;

    /// Per-file change detail. Always empty for this service.
    async fn get_changed_files(
        &self,
        pr_number: &str,
        commit_ref: &str,
    ) -> Result<Vec<ChangedFileObject>, AdapterError>;

    /// Completes a commit status with its defaults without reporting it.
    fn update_commit_status(&self, status: CommitStatus) -> CommitStatus;

    /// Deletes the first live comment the caller authored.
    async fn delete_previous_comments(
        &self,
        pr_number: &str,
    ) -> Result<Option<String>, AdapterError>;

    /// Deletes every live comment the caller authored.
    async fn sweep_previous_comments(
        &self,
        pr_number: &str,
    ) -> Result<Vec<String>, AdapterError>;
}

/// Adapter over a repository gateway and an identity gateway.
pub struct CodeCommitAdapter<Gateway = SdkCodeCommitGateway, Identity = StsIdentityGateway> {
    gateway: Gateway,
    identity: Identity,
    locator: RepositoryLocator,
    build: BuildEnvironment,
}

impl CodeCommitAdapter {
    /// Builds an adapter backed by the SDK clients of `session`.
    #[must_use]
    pub fn from_session(session: &Session, build: BuildEnvironment) -> Self {
        Self::new(
            session.codecommit(),
            session.identity(),
            session.locator().clone(),
            build,
        )
    }
}

impl<Gateway, Identity> CodeCommitAdapter<Gateway, Identity>
where
    Gateway: CodeCommitGateway,
    Identity: IdentityGateway,
{
    /// Creates an adapter from explicit gateways.
    #[must_use]
    pub const fn new(
        gateway: Gateway,
        identity: Identity,
        locator: RepositoryLocator,
        build: BuildEnvironment,
    ) -> Self {
        Self {
            gateway,
            identity,
            locator,
            build,
        }
    }

    /// Repository this adapter talks to.
    #[must_use]
    pub const fn locator(&self) -> &RepositoryLocator {
        &self.locator
    }

    /// Repository gateway, mainly for inspecting test doubles.
    #[must_use]
    pub const fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    fn normalizer(&self) -> PullRequestNormalizer<'_, Gateway> {
        PullRequestNormalizer::new(&self.gateway, &self.locator)
    }

    fn differ(&self) -> ChangedFileDiffer<'_, Gateway> {
        ChangedFileDiffer::new(&self.gateway, &self.locator)
    }

    fn comments(&self) -> CommentLifecycle<'_, Gateway, Identity> {
        CommentLifecycle::new(&self.gateway, &self.identity, &self.locator)
    }
}

#[async_trait]
impl<Gateway, Identity> PullRequestAdapter for CodeCommitAdapter<Gateway, Identity>
where
    Gateway: CodeCommitGateway,
    Identity: IdentityGateway,
{
    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequest>, AdapterError> {
        self.normalizer().list_open_pull_requests().await
    }

    async fn list_modified_files(
        &self,
        pr_number: u64,
        head_commit: &str,
        base_branch: &str,
    ) -> Result<Vec<String>, AdapterError> {
        self.differ()
            .list_modified_files(pr_number, head_commit, base_branch)
            .await
    }

    async fn post_comment(
        &self,
        pr_number: &str,
        before_commit: &str,
        after_commit: &str,
        body: &str,
    ) -> Result<(), AdapterError> {
        self.comments()
            .post_comment(pr_number, before_commit, after_commit, body)
            .await
    }

    async fn get_pull_request(
        &self,
        pr_number: &str,
        commit_ref: &str,
    ) -> Result<PullRequest, AdapterError> {
        let pull_request = self.normalizer().get_pull_request(pr_number).await?;
        if !commit_ref.is_empty() && pull_request.tip.id != commit_ref {
            tracing::debug!(
                "pull request {pr_number} moved from {commit_ref} to {}",
                pull_request.tip.id
            );
        }
        Ok(pull_request)
    }

    async fn get_changed_files(
        &self,
        pr_number: &str,
        commit_ref: &str,
    ) -> Result<Vec<ChangedFileObject>, AdapterError> {
        Ok(self.differ().changed_files(pr_number, commit_ref))
    }

    fn update_commit_status(&self, status: CommitStatus) -> CommitStatus {
        let filled = status.with_defaults(&self.build);
        tracing::debug!(
            "commit status {}/{} for {} is not reported: {}",
            filled.base_context,
            filled.status_context,
            filled.commit_ref,
            filled.target_url
        );
        filled
    }

    async fn delete_previous_comments(
        &self,
        pr_number: &str,
    ) -> Result<Option<String>, AdapterError> {
        self.comments().delete_previous_comments(pr_number).await
    }

    async fn sweep_previous_comments(
        &self,
        pr_number: &str,
    ) -> Result<Vec<String>, AdapterError> {
        self.comments().sweep_previous_comments(pr_number).await
    }
}
