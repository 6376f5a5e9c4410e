//! Behavioural tests for the bot comment lifecycle.

use codecommit_pr::codecommit::CommentLifecycle;
use codecommit_pr::codecommit::models::{
    PullRequestComment, PullRequestRecord, PullRequestTarget,
};
use codecommit_pr::{AdapterError, InMemoryCodeCommit, RepositoryLocator};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tokio::runtime::Runtime;

const BOT_ARN: &str = "arn:aws:sts::123456789012:assumed-role/ci/bot";
const REVIEWER_ARN: &str = "arn:aws:iam::123456789012:user/reviewer";

#[derive(ScenarioState, Default)]
struct CommentState {
    service: Slot<InMemoryCodeCommit>,
    deleted: Slot<Vec<String>>,
}

#[fixture]
fn comment_state() -> CommentState {
    CommentState::default()
}

fn missing_service() -> AdapterError {
    AdapterError::Io {
        message: "service not initialised".to_owned(),
    }
}

fn locator() -> Result<RepositoryLocator, AdapterError> {
    RepositoryLocator::parse("codecommit::eu-central-1://devzone")
}

fn seed_comment(
    comment_state: &CommentState,
    pr: u64,
    id: &str,
    author: &str,
) -> Result<(), AdapterError> {
    let comment = PullRequestComment {
        id: Some(id.trim_matches('"').to_owned()),
        author_arn: Some(author.to_owned()),
        content: Some("previous build result".to_owned()),
        deleted: false,
    };
    comment_state
        .service
        .with_ref(|service| service.add_comment(&pr.to_string(), comment))
        .ok_or_else(missing_service)
}

fn comment_is_deleted(
    comment_state: &CommentState,
    pr: u64,
    id: &str,
) -> Result<bool, AdapterError> {
    let wanted = id.trim_matches('"');
    comment_state
        .service
        .with_ref(|service| {
            service
                .comments(&pr.to_string())
                .into_iter()
                .find(|comment| comment.id.as_deref() == Some(wanted))
                .map(|comment| comment.deleted)
        })
        .ok_or_else(missing_service)?
        .ok_or_else(|| AdapterError::Io {
            message: format!("comment {wanted} not found"),
        })
}

#[given("a repository with open pull request {pr:u64}")]
fn seed_repository(comment_state: &CommentState, pr: u64) {
    let service = InMemoryCodeCommit::new("devzone", BOT_ARN);
    service.add_pull_request(PullRequestRecord {
        id: pr.to_string(),
        title: Some("Fix bug".to_owned()),
        targets: vec![PullRequestTarget {
            source_commit: Some("abc123".to_owned()),
            ..PullRequestTarget::default()
        }],
        ..PullRequestRecord::default()
    });
    comment_state.service.set(service);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("pull request {pr:u64} has a comment {id} by the bot")]
fn seed_bot_comment(comment_state: &CommentState, pr: u64, id: String) -> Result<(), AdapterError> {
    seed_comment(comment_state, pr, &id, BOT_ARN)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("pull request {pr:u64} has a comment {id} by the reviewer")]
fn seed_reviewer_comment(
    comment_state: &CommentState,
    pr: u64,
    id: String,
) -> Result<(), AdapterError> {
    seed_comment(comment_state, pr, &id, REVIEWER_ARN)
}

#[when("previous comments are deleted on pull request {pr:u64}")]
fn delete_previous(comment_state: &CommentState, pr: u64) -> Result<(), AdapterError> {
    let runtime = Runtime::new().map_err(|error| AdapterError::Io {
        message: format!("failed to create Tokio runtime: {error}"),
    })?;
    let locator = locator()?;

    let deleted = comment_state
        .service
        .with_ref(|service| {
            let lifecycle = CommentLifecycle::new(service, service, &locator);
            runtime.block_on(lifecycle.delete_previous_comments(&pr.to_string()))
        })
        .ok_or_else(missing_service)??;

    comment_state.deleted.set(deleted.into_iter().collect());
    Ok(())
}

#[when("all previous comments are swept on pull request {pr:u64}")]
fn sweep_previous(comment_state: &CommentState, pr: u64) -> Result<(), AdapterError> {
    let runtime = Runtime::new().map_err(|error| AdapterError::Io {
        message: format!("failed to create Tokio runtime: {error}"),
    })?;
    let locator = locator()?;

    let deleted = comment_state
        .service
        .with_ref(|service| {
            let lifecycle = CommentLifecycle::new(service, service, &locator);
            runtime.block_on(lifecycle.sweep_previous_comments(&pr.to_string()))
        })
        .ok_or_else(missing_service)??;

    comment_state.deleted.set(deleted);
    Ok(())
}

#[then("no comment was deleted")]
fn assert_nothing_deleted(comment_state: &CommentState) -> Result<(), AdapterError> {
    let deleted = comment_state.deleted.get().unwrap_or_default();
    if deleted.is_empty() {
        Ok(())
    } else {
        Err(AdapterError::Io {
            message: format!("expected no deletions, got {deleted:?}"),
        })
    }
}

#[then("the caller identity was not resolved")]
fn assert_identity_untouched(comment_state: &CommentState) -> Result<(), AdapterError> {
    let resolved = comment_state
        .service
        .with_ref(|service| {
            service
                .calls()
                .iter()
                .any(|call| call.starts_with("get caller identity"))
        })
        .ok_or_else(missing_service)?;

    if resolved {
        Err(AdapterError::Io {
            message: "identity should not be resolved without comments".to_owned(),
        })
    } else {
        Ok(())
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("comment {id} on pull request {pr:u64} is marked deleted")]
fn assert_deleted(comment_state: &CommentState, id: String, pr: u64) -> Result<(), AdapterError> {
    if comment_is_deleted(comment_state, pr, &id)? {
        Ok(())
    } else {
        Err(AdapterError::Io {
            message: format!("comment {id} should be deleted"),
        })
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("comment {id} on pull request {pr:u64} is still visible")]
fn assert_visible(comment_state: &CommentState, id: String, pr: u64) -> Result<(), AdapterError> {
    if comment_is_deleted(comment_state, pr, &id)? {
        Err(AdapterError::Io {
            message: format!("comment {id} should still be visible"),
        })
    } else {
        Ok(())
    }
}

#[scenario(path = "tests/features/comment_lifecycle.feature", index = 0)]
fn cleanup_without_comments(comment_state: CommentState) {
    let _ = comment_state;
}

#[scenario(path = "tests/features/comment_lifecycle.feature", index = 1)]
fn replace_bot_comment(comment_state: CommentState) {
    let _ = comment_state;
}

#[scenario(path = "tests/features/comment_lifecycle.feature", index = 2)]
fn first_match_only(comment_state: CommentState) {
    let _ = comment_state;
}

#[scenario(path = "tests/features/comment_lifecycle.feature", index = 3)]
fn sweep_all_bot_comments(comment_state: CommentState) {
    let _ = comment_state;
}
