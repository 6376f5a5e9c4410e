//! The `comment` step: replace the bot comment on a pull request.

use crate::codecommit::{AdapterError, Metadata, PullRequestAdapter, Version};
use crate::config::ResourceConfig;

use super::StepOutput;
use super::output::write_json;

/// Posts the configured comment and writes the pull request's version and
/// metadata.
///
/// # Errors
///
/// Returns [`AdapterError::Configuration`] when the pull request or comment
/// is missing, and propagates adapter and output failures.
pub async fn run<A: PullRequestAdapter>(
    adapter: &A,
    config: &ResourceConfig,
) -> Result<(), AdapterError> {
    let output = post(adapter, config).await?;
    write_json(&output)
}

/// Cleans up previous bot comments when asked to, then posts a comment on
/// the range from the base commit to the current tip.
///
/// # Errors
///
/// Returns [`AdapterError::Configuration`] when the pull request or comment
/// is missing, and propagates adapter failures. A failed cleanup aborts the
/// step before anything is posted.
pub async fn post<A: PullRequestAdapter>(
    adapter: &A,
    config: &ResourceConfig,
) -> Result<StepOutput, AdapterError> {
    let pr = config.require_pr()?;
    let body = config.require_comment()?;

    if config.sweep_comments {
        adapter.sweep_previous_comments(pr).await?;
    } else if config.delete_previous_comments {
        adapter.delete_previous_comments(pr).await?;
    }

    let commit = config.commit.as_deref().unwrap_or_default();
    let pull_request = adapter.get_pull_request(pr, commit).await?;
    adapter
        .post_comment(
            pr,
            &pull_request.object.base_ref_oid,
            &pull_request.tip.id,
            body,
        )
        .await?;

    Ok(StepOutput {
        version: Version::from_pull_request(&pull_request),
        metadata: Metadata::for_pull_request(&pull_request),
    })
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use rstest::rstest;

    use super::post;
    use crate::codecommit::models::{CommitObject, PullRequest, PullRequestObject};
    use crate::codecommit::{AdapterError, MockPullRequestAdapter};
    use crate::config::ResourceConfig;

    fn config(delete: bool, sweep: bool) -> ResourceConfig {
        ResourceConfig {
            pr: Some("12".to_owned()),
            comment: Some("Build passed".to_owned()),
            delete_previous_comments: delete,
            sweep_comments: sweep,
            ..Default::default()
        }
    }

    fn pull_request() -> PullRequest {
        PullRequest {
            object: PullRequestObject {
                id: "12".to_owned(),
                number: 12,
                base_ref_oid: "base000".to_owned(),
                ..PullRequestObject::default()
            },
            tip: CommitObject {
                id: "head111".to_owned(),
                ..CommitObject::default()
            },
            approved_review_count: 0,
            labels: Vec::new(),
        }
    }

    fn expect_fetch_and_post(adapter: &mut MockPullRequestAdapter, sequence: &mut Sequence) {
        adapter
            .expect_get_pull_request()
            .times(1)
            .in_sequence(sequence)
            .returning(|_, _| Ok(pull_request()));
        adapter
            .expect_post_comment()
            .withf(|pr, before, after, body| {
                pr == "12" && before == "base000" && after == "head111" && body == "Build passed"
            })
            .times(1)
            .in_sequence(sequence)
            .returning(|_, _, _, _| Ok(()));
    }

    #[rstest]
    #[tokio::test]
    async fn deletes_then_posts() {
        let mut sequence = Sequence::new();
        let mut adapter = MockPullRequestAdapter::new();
        adapter
            .expect_delete_previous_comments()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(Some("c-1".to_owned())));
        adapter.expect_sweep_previous_comments().never();
        expect_fetch_and_post(&mut adapter, &mut sequence);

        let output = post(&adapter, &config(true, false))
            .await
            .expect("comment should succeed");

        assert_eq!(output.version.commit, "head111", "version mismatch");
    }

    #[rstest]
    #[tokio::test]
    async fn sweep_takes_precedence_over_single_delete() {
        let mut sequence = Sequence::new();
        let mut adapter = MockPullRequestAdapter::new();
        adapter
            .expect_sweep_previous_comments()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(vec!["c-1".to_owned(), "c-2".to_owned()]));
        adapter.expect_delete_previous_comments().never();
        expect_fetch_and_post(&mut adapter, &mut sequence);

        post(&adapter, &config(true, true))
            .await
            .expect("comment should succeed");
    }

    #[rstest]
    #[tokio::test]
    async fn posts_without_cleanup_by_default() {
        let mut sequence = Sequence::new();
        let mut adapter = MockPullRequestAdapter::new();
        adapter.expect_delete_previous_comments().never();
        adapter.expect_sweep_previous_comments().never();
        expect_fetch_and_post(&mut adapter, &mut sequence);

        post(&adapter, &config(false, false))
            .await
            .expect("comment should succeed");
    }

    #[rstest]
    #[tokio::test]
    async fn failed_cleanup_posts_nothing() {
        let mut adapter = MockPullRequestAdapter::new();
        adapter.expect_delete_previous_comments().returning(|_| {
            Err(AdapterError::Resolution {
                subject: "caller identity".to_owned(),
                message: "no ARN".to_owned(),
            })
        });
        adapter.expect_get_pull_request().never();
        adapter.expect_post_comment().never();

        let result = post(&adapter, &config(true, false)).await;

        assert!(
            matches!(result, Err(AdapterError::Resolution { .. })),
            "expected Resolution, got {result:?}"
        );
    }
}
