//! Keeps at most one bot-authored comment visible per pull request.
//!
//! Nothing is cached between calls: every operation re-reads the comment
//! threads from the service. Deleting stale comments before posting a fresh
//! one is the caller's job; [`CommentLifecycle::post_comment`] never cleans up
//! on its own.

use super::error::AdapterError;
use super::gateway::{CodeCommitGateway, IdentityGateway};
use super::locator::RepositoryLocator;
use super::models::{CommentRequest, CommentThread};

/// Posts and cleans up comments authored by the session's identity.
pub struct CommentLifecycle<'client, Gateway, Identity>
where
    Gateway: CodeCommitGateway,
    Identity: IdentityGateway,
{
    client: &'client Gateway,
    identity: &'client Identity,
    locator: &'client RepositoryLocator,
}

impl<'client, Gateway, Identity> CommentLifecycle<'client, Gateway, Identity>
where
    Gateway: CodeCommitGateway,
    Identity: IdentityGateway,
{
    /// Create a lifecycle manager for the given repository.
    #[must_use]
    pub const fn new(
        client: &'client Gateway,
        identity: &'client Identity,
        locator: &'client RepositoryLocator,
    ) -> Self {
        Self {
            client,
            identity,
            locator,
        }
    }

    /// Deletes the first live comment authored by the caller.
    ///
    /// Only one comment is removed per call, even when several match; call
    /// again, or use [`Self::sweep_previous_comments`], to clear them all.
    /// The caller identity is resolved only when the pull request has at
    /// least one comment thread.
    ///
    /// Returns the id of the deleted comment, if any.
    ///
    /// # Errors
    ///
    /// Fails when comments cannot be listed, the identity cannot be
    /// resolved, or the deletion fails.
    pub async fn delete_previous_comments(
        &self,
        pr_number: &str,
    ) -> Result<Option<String>, AdapterError> {
        let Some((threads, caller_arn)) = self.threads_with_identity(pr_number).await? else {
            return Ok(None);
        };

        let Some(candidate) = own_comment_ids(&threads, &caller_arn).into_iter().next() else {
            tracing::debug!("pull request {pr_number} has no previous comment to delete");
            return Ok(None);
        };

        let comment_id = candidate?;
        self.client.delete_comment(&comment_id).await?;
        tracing::info!("deleted previous comment {comment_id} on pull request {pr_number}");
        Ok(Some(comment_id))
    }

    /// Deletes every live comment authored by the caller.
    ///
    /// A failed deletion does not stop the sweep. Returns the ids that were
    /// deleted.
    ///
    /// # Errors
    ///
    /// Fails when comments cannot be listed or the identity cannot be
    /// resolved, and with [`AdapterError::CommentCleanup`] listing every
    /// comment that could not be deleted.
    pub async fn sweep_previous_comments(
        &self,
        pr_number: &str,
    ) -> Result<Vec<String>, AdapterError> {
        let Some((threads, caller_arn)) = self.threads_with_identity(pr_number).await? else {
            return Ok(Vec::new());
        };

        let mut deleted = Vec::new();
        let mut failures = Vec::new();
        for candidate in own_comment_ids(&threads, &caller_arn) {
            let outcome = match candidate {
                Ok(comment_id) => self
                    .client
                    .delete_comment(&comment_id)
                    .await
                    .map(|()| comment_id),
                Err(error) => Err(error),
            };
            match outcome {
                Ok(comment_id) => deleted.push(comment_id),
                Err(error) => {
                    tracing::warn!(
                        "could not delete comment on pull request {pr_number}: {error}"
                    );
                    failures.push(error.to_string());
                }
            }
        }

        if failures.is_empty() {
            tracing::info!(
                "deleted {} previous comment(s) on pull request {pr_number}",
                deleted.len()
            );
            Ok(deleted)
        } else {
            Err(AdapterError::CommentCleanup {
                pull_request: pr_number.to_owned(),
                failures,
            })
        }
    }

    /// Posts a comment anchored to a commit range.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the gateway.
    pub async fn post_comment(
        &self,
        pr_number: &str,
        before_commit: &str,
        after_commit: &str,
        body: &str,
    ) -> Result<(), AdapterError> {
        let request = CommentRequest {
            pull_request_id: pr_number.to_owned(),
            repository: self.locator.repository().as_str().to_owned(),
            before_commit_id: before_commit.to_owned(),
            after_commit_id: after_commit.to_owned(),
            content: body.to_owned(),
        };
        self.client.post_comment(&request).await?;
        tracing::info!("posted comment on pull request {pr_number}");
        Ok(())
    }

    async fn threads_with_identity(
        &self,
        pr_number: &str,
    ) -> Result<Option<(Vec<CommentThread>, String)>, AdapterError> {
        let threads = self.client.comment_threads(pr_number).await?;
        if threads.is_empty() {
            return Ok(None);
        }

        let identity = self.identity.caller_identity().await?;
        Ok(Some((threads, identity.arn)))
    }
}

/// Ids of live comments written by `caller_arn`, in thread order.
///
/// A matching comment the service returned without an id yields an error in
/// its place.
fn own_comment_ids(
    threads: &[CommentThread],
    caller_arn: &str,
) -> Vec<Result<String, AdapterError>> {
    threads
        .iter()
        .flat_map(|thread| thread.comments.iter())
        .filter(|comment| !comment.deleted && comment.author_arn.as_deref() == Some(caller_arn))
        .map(|comment| {
            comment
                .id
                .clone()
                .ok_or_else(|| AdapterError::IncompleteResponse {
                    operation: "get comments".to_owned(),
                    target: format!("comment by {caller_arn}"),
                    field: "comment id".to_owned(),
                })
        })
        .collect()
}
