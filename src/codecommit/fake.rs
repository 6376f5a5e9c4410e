//! In-memory stand-in for the source control service.
//!
//! [`InMemoryCodeCommit`] implements both gateway traits over local state so
//! adapter flows can be exercised without a network. Every call is recorded
//! and any operation can be told to fail.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::error::AdapterError;
use super::gateway::{CodeCommitGateway, IdentityGateway};
use super::locator::RepositoryName;
use super::models::{
    CallerIdentity, CommentRequest, CommentThread, Difference, DifferencePage, PullRequestComment,
    PullRequestRecord, RepositoryMetadata,
};

#[derive(Debug, Default)]
struct State {
    repository: String,
    clone_url: Option<String>,
    caller_arn: String,
    pull_requests: Vec<PullRequestRecord>,
    branches: BTreeMap<String, String>,
    differences: Vec<Difference>,
    threads: BTreeMap<String, Vec<CommentThread>>,
    posted: Vec<CommentRequest>,
    failures: Vec<(String, Option<String>)>,
    calls: Vec<String>,
    next_comment: u64,
}

/// Recording fake implementing [`CodeCommitGateway`] and [`IdentityGateway`].
#[derive(Debug, Default)]
pub struct InMemoryCodeCommit {
    state: Mutex<State>,
}

impl InMemoryCodeCommit {
    /// Creates an empty repository whose session is `caller_arn`.
    #[must_use]
    pub fn new(repository: &str, caller_arn: &str) -> Self {
        Self {
            state: Mutex::new(State {
                repository: repository.to_owned(),
                clone_url: Some(format!(
                    "https://git-codecommit.example.test/v1/repos/{repository}"
                )),
                caller_arn: caller_arn.to_owned(),
                ..State::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Overrides the clone URL reported for the repository.
    pub fn set_clone_url(&self, clone_url: Option<&str>) {
        self.state().clone_url = clone_url.map(str::to_owned);
    }

    /// Adds an open pull request. Listing follows insertion order.
    pub fn add_pull_request(&self, record: PullRequestRecord) {
        self.state().pull_requests.push(record);
    }

    /// Points `branch` at `commit`.
    pub fn set_branch(&self, branch: &str, commit: &str) {
        self.state()
            .branches
            .insert(branch.to_owned(), commit.to_owned());
    }

    /// Sets the differences returned for any commit range.
    pub fn set_differences(&self, differences: Vec<Difference>) {
        self.state().differences = differences;
    }

    /// Appends an existing comment to a pull request in its own thread.
    pub fn add_comment(&self, pull_request_id: &str, comment: PullRequestComment) {
        self.state()
            .threads
            .entry(pull_request_id.to_owned())
            .or_default()
            .push(CommentThread {
                comments: vec![comment],
                ..CommentThread::default()
            });
    }

    /// Makes every call of `operation` fail.
    pub fn fail_on(&self, operation: &str) {
        self.state().failures.push((operation.to_owned(), None));
    }

    /// Makes `operation` fail only when aimed at `target`.
    pub fn fail_on_target(&self, operation: &str, target: &str) {
        self.state()
            .failures
            .push((operation.to_owned(), Some(target.to_owned())));
    }

    /// Calls made so far, as `"<operation> <target>"`.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Comments currently attached to a pull request, in thread order.
    #[must_use]
    pub fn comments(&self, pull_request_id: &str) -> Vec<PullRequestComment> {
        self.state()
            .threads
            .get(pull_request_id)
            .into_iter()
            .flatten()
            .flat_map(|thread| thread.comments.iter().cloned())
            .collect()
    }

    /// Every comment request received.
    #[must_use]
    pub fn posted_comments(&self) -> Vec<CommentRequest> {
        self.state().posted.clone()
    }

    fn begin<'state>(
        &'state self,
        operation: &str,
        target: &str,
    ) -> Result<MutexGuard<'state, State>, AdapterError> {
        let mut state = self.state();
        state.calls.push(format!("{operation} {target}"));

        let injected = state.failures.iter().any(|(failing, failing_target)| {
            failing == operation && failing_target.as_deref().is_none_or(|t| t == target)
        });
        if injected {
            return Err(upstream(operation, target, "injected failure"));
        }
        Ok(state)
    }
}

fn upstream(operation: &str, target: &str, message: &str) -> AdapterError {
    AdapterError::UpstreamApi {
        operation: operation.to_owned(),
        target: target.to_owned(),
        message: message.to_owned(),
    }
}

fn check_repository(state: &State, operation: &str, name: &str) -> Result<(), AdapterError> {
    if state.repository == name {
        Ok(())
    } else {
        Err(upstream(operation, name, "RepositoryDoesNotExistException"))
    }
}

#[async_trait]
impl CodeCommitGateway for InMemoryCodeCommit {
    async fn repository(
        &self,
        repository: &RepositoryName,
    ) -> Result<RepositoryMetadata, AdapterError> {
        let name = repository.as_str();
        let state = self.begin("get repository", name)?;
        check_repository(&state, "get repository", name)?;
        Ok(RepositoryMetadata {
            name: name.to_owned(),
            clone_url_http: state.clone_url.clone(),
        })
    }

    async fn open_pull_request_ids(
        &self,
        repository: &RepositoryName,
    ) -> Result<Vec<String>, AdapterError> {
        let name = repository.as_str();
        let state = self.begin("list pull requests", name)?;
        check_repository(&state, "list pull requests", name)?;
        Ok(state
            .pull_requests
            .iter()
            .map(|record| record.id.clone())
            .collect())
    }

    async fn pull_request(
        &self,
        pull_request_id: &str,
    ) -> Result<PullRequestRecord, AdapterError> {
        let target = format!("pull request {pull_request_id}");
        let state = self.begin("get pull request", &target)?;
        state
            .pull_requests
            .iter()
            .find(|record| record.id == pull_request_id)
            .cloned()
            .ok_or_else(|| {
                upstream(
                    "get pull request",
                    &target,
                    "PullRequestDoesNotExistException",
                )
            })
    }

    async fn branch_tip(
        &self,
        repository: &RepositoryName,
        branch: &str,
    ) -> Result<String, AdapterError> {
        let target = format!("branch {branch} of {}", repository.as_str());
        let state = self.begin("get branch", &target)?;
        check_repository(&state, "get branch", repository.as_str())?;
        state
            .branches
            .get(branch)
            .cloned()
            .ok_or_else(|| upstream("get branch", &target, "BranchDoesNotExistException"))
    }

    async fn differences(
        &self,
        _repository: &RepositoryName,
        before_commit: &str,
        after_commit: &str,
        max_results: i32,
    ) -> Result<DifferencePage, AdapterError> {
        let state = self.begin("get differences", &format!("{before_commit}..{after_commit}"))?;
        let limit = usize::try_from(max_results).unwrap_or_default();
        Ok(DifferencePage {
            differences: state.differences.iter().take(limit).cloned().collect(),
            truncated: state.differences.len() > limit,
        })
    }

    async fn post_comment(&self, request: &CommentRequest) -> Result<(), AdapterError> {
        let mut state =
            self.begin("post comment", &format!("pull request {}", request.pull_request_id))?;
        state.next_comment += 1;
        let comment = PullRequestComment {
            id: Some(format!("comment-{}", state.next_comment)),
            author_arn: Some(state.caller_arn.clone()),
            content: Some(request.content.clone()),
            deleted: false,
        };
        state
            .threads
            .entry(request.pull_request_id.clone())
            .or_default()
            .push(CommentThread {
                before_commit_id: Some(request.before_commit_id.clone()),
                after_commit_id: Some(request.after_commit_id.clone()),
                comments: vec![comment],
            });
        state.posted.push(request.clone());
        Ok(())
    }

    async fn comment_threads(
        &self,
        pull_request_id: &str,
    ) -> Result<Vec<CommentThread>, AdapterError> {
        let state = self.begin("get comments", &format!("pull request {pull_request_id}"))?;
        Ok(state
            .threads
            .get(pull_request_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<(), AdapterError> {
        let target = format!("comment {comment_id}");
        let mut state = self.begin("delete comment", &target)?;
        let comment = state
            .threads
            .values_mut()
            .flatten()
            .flat_map(|thread| thread.comments.iter_mut())
            .find(|comment| comment.id.as_deref() == Some(comment_id))
            .ok_or_else(|| upstream("delete comment", &target, "CommentDoesNotExistException"))?;
        comment.deleted = true;
        comment.content = None;
        Ok(())
    }
}

#[async_trait]
impl IdentityGateway for InMemoryCodeCommit {
    async fn caller_identity(&self) -> Result<CallerIdentity, AdapterError> {
        let state = self.begin("get caller identity", "current session")?;
        Ok(CallerIdentity {
            arn: state.caller_arn.clone(),
            account: None,
        })
    }
}
