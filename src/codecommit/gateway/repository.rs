//! SDK-backed implementation of the repository gateway.

use async_trait::async_trait;
use aws_sdk_codecommit::Client;
use aws_sdk_codecommit::types::PullRequestStatusEnum;

use crate::codecommit::error::AdapterError;
use crate::codecommit::locator::RepositoryName;
use crate::codecommit::models::{
    CommentRequest, CommentThread, DifferencePage, PullRequestRecord, RepositoryMetadata,
};

use super::conversion::{comment_thread, difference, pull_request_record, repository_metadata};
use super::error_mapping::{map_sdk_error, missing_field};
use super::{CodeCommitGateway, PULL_REQUEST_PAGE_SIZE};

/// Gateway backed by the `CodeCommit` SDK client.
#[derive(Debug, Clone)]
pub struct SdkCodeCommitGateway {
    client: Client,
}

impl SdkCodeCommitGateway {
    /// Creates a new gateway from an SDK client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

fn pull_request_target(pull_request_id: &str) -> String {
    format!("pull request {pull_request_id}")
}

fn next_page(token: Option<&str>) -> Option<String> {
    token.filter(|value| !value.is_empty()).map(str::to_owned)
}

#[async_trait]
impl CodeCommitGateway for SdkCodeCommitGateway {
    async fn repository(
        &self,
        repository: &RepositoryName,
    ) -> Result<RepositoryMetadata, AdapterError> {
        const OPERATION: &str = "get repository";
        let name = repository.as_str();

        let output = self
            .client
            .get_repository()
            .repository_name(name)
            .send()
            .await
            .map_err(|error| map_sdk_error(OPERATION, name, &error))?;

        output
            .repository_metadata()
            .map(repository_metadata)
            .ok_or_else(|| missing_field(OPERATION, name, "repository metadata"))
    }

    async fn open_pull_request_ids(
        &self,
        repository: &RepositoryName,
    ) -> Result<Vec<String>, AdapterError> {
        let name = repository.as_str();
        let mut ids = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_pull_requests()
                .repository_name(name)
                .pull_request_status(PullRequestStatusEnum::Open)
                .max_results(PULL_REQUEST_PAGE_SIZE)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|error| map_sdk_error("list pull requests", name, &error))?;

            ids.extend(output.pull_request_ids().iter().cloned());

            next_token = next_page(output.next_token());
            if next_token.is_none() {
                break;
            }
            tracing::debug!("listed {} open pull request ids, fetching next page", ids.len());
        }

        Ok(ids)
    }

    async fn pull_request(
        &self,
        pull_request_id: &str,
    ) -> Result<PullRequestRecord, AdapterError> {
        const OPERATION: &str = "get pull request";
        let target = pull_request_target(pull_request_id);

        let output = self
            .client
            .get_pull_request()
            .pull_request_id(pull_request_id)
            .send()
            .await
            .map_err(|error| map_sdk_error(OPERATION, &target, &error))?;

        output
            .pull_request()
            .map(|pull_request| pull_request_record(pull_request_id, pull_request))
            .ok_or_else(|| missing_field(OPERATION, &target, "pull request"))
    }

    async fn branch_tip(
        &self,
        repository: &RepositoryName,
        branch: &str,
    ) -> Result<String, AdapterError> {
        let target = format!("branch {branch} of {}", repository.as_str());

        let output = self
            .client
            .get_branch()
            .repository_name(repository.as_str())
            .branch_name(branch)
            .send()
            .await
            .map_err(|error| map_sdk_error("get branch", &target, &error))?;

        output
            .branch()
            .and_then(|info| info.commit_id())
            .map(str::to_owned)
            .ok_or_else(|| AdapterError::Resolution {
                subject: target,
                message: "the service reported no commit for the branch".to_owned(),
            })
    }

    async fn differences(
        &self,
        repository: &RepositoryName,
        before_commit: &str,
        after_commit: &str,
        max_results: i32,
    ) -> Result<DifferencePage, AdapterError> {
        let target = format!("{before_commit}..{after_commit}");

        let output = self
            .client
            .get_differences()
            .repository_name(repository.as_str())
            .before_commit_specifier(before_commit)
            .after_commit_specifier(after_commit)
            .max_results(max_results)
            .send()
            .await
            .map_err(|error| map_sdk_error("get differences", &target, &error))?;

        Ok(DifferencePage {
            differences: output.differences().iter().map(difference).collect(),
            truncated: next_page(output.next_token()).is_some(),
        })
    }

    async fn post_comment(&self, request: &CommentRequest) -> Result<(), AdapterError> {
        self.client
            .post_comment_for_pull_request()
            .pull_request_id(&request.pull_request_id)
            .repository_name(&request.repository)
            .before_commit_id(&request.before_commit_id)
            .after_commit_id(&request.after_commit_id)
            .content(&request.content)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| {
                map_sdk_error(
                    "post comment",
                    &pull_request_target(&request.pull_request_id),
                    &error,
                )
            })
    }

    async fn comment_threads(
        &self,
        pull_request_id: &str,
    ) -> Result<Vec<CommentThread>, AdapterError> {
        let target = pull_request_target(pull_request_id);
        let mut threads = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .get_comments_for_pull_request()
                .pull_request_id(pull_request_id)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|error| map_sdk_error("get comments", &target, &error))?;

            threads.extend(
                output
                    .comments_for_pull_request_data()
                    .iter()
                    .map(comment_thread),
            );

            next_token = next_page(output.next_token());
            if next_token.is_none() {
                break;
            }
        }

        Ok(threads)
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<(), AdapterError> {
        self.client
            .delete_comment_content()
            .comment_id(comment_id)
            .send()
            .await
            .map(|_| ())
            .map_err(|error| {
                map_sdk_error("delete comment", &format!("comment {comment_id}"), &error)
            })
    }
}
