//! Changed-file listing between a base branch and a head commit.

use super::error::AdapterError;
use super::gateway::{CodeCommitGateway, MAX_DIFFERENCES};
use super::locator::RepositoryLocator;
use super::models::ChangedFileObject;

/// Computes the paths touched by a pull request.
pub struct ChangedFileDiffer<'client, Gateway>
where
    Gateway: CodeCommitGateway,
{
    client: &'client Gateway,
    locator: &'client RepositoryLocator,
}

impl<'client, Gateway> ChangedFileDiffer<'client, Gateway>
where
    Gateway: CodeCommitGateway,
{
    /// Create a differ for the given repository.
    #[must_use]
    pub const fn new(client: &'client Gateway, locator: &'client RepositoryLocator) -> Self {
        Self { client, locator }
    }

    /// Lists files present after `head_commit` that differ from the current
    /// tip of `base_branch`.
    ///
    /// Deleted files are left out because they have no "after" state. The
    /// service call is bounded to [`MAX_DIFFERENCES`] entries and is not
    /// paged, so very large pull requests yield a truncated list.
    ///
    /// # Errors
    ///
    /// Fails when the base branch cannot be resolved or the difference call
    /// fails.
    pub async fn list_modified_files(
        &self,
        pr_number: u64,
        head_commit: &str,
        base_branch: &str,
    ) -> Result<Vec<String>, AdapterError> {
        let repository = self.locator.repository();
        let base_tip = self.client.branch_tip(repository, base_branch).await?;

        let page = self
            .client
            .differences(repository, &base_tip, head_commit, MAX_DIFFERENCES)
            .await?;

        if page.truncated {
            tracing::warn!(
                "pull request {pr_number}: difference {base_tip}..{head_commit} exceeds \
                 {MAX_DIFFERENCES} entries, changed files are truncated"
            );
        }

        let files: Vec<String> = page
            .differences
            .into_iter()
            .filter_map(|difference| difference.after_path)
            .collect();
        tracing::debug!("pull request {pr_number} touches {} files", files.len());

        Ok(files)
    }

    /// Changed files with per-file detail.
    ///
    /// The service integration does not offer this listing, so the result is
    /// always empty.
    #[must_use]
    pub fn changed_files(&self, pr_number: &str, commit_ref: &str) -> Vec<ChangedFileObject> {
        tracing::warn!(
            "changed file listing is not supported for {} (pull request {pr_number} at \
             {commit_ref})",
            self.locator
        );
        Vec::new()
    }
}
