//! The `get` step: fetch one pull request.

use crate::codecommit::{AdapterError, Metadata, PullRequestAdapter, Version};
use crate::config::ResourceConfig;

use super::StepOutput;
use super::output::write_json;

/// Fetches the configured pull request and writes its version and metadata.
///
/// # Errors
///
/// Returns [`AdapterError::Configuration`] when no pull request is
/// configured, and propagates adapter and output failures.
pub async fn run<A: PullRequestAdapter>(
    adapter: &A,
    config: &ResourceConfig,
) -> Result<(), AdapterError> {
    let output = fetch(adapter, config).await?;
    write_json(&output)
}

/// Version and metadata of the configured pull request.
///
/// # Errors
///
/// Returns [`AdapterError::Configuration`] when no pull request is
/// configured, and propagates adapter failures.
pub async fn fetch<A: PullRequestAdapter>(
    adapter: &A,
    config: &ResourceConfig,
) -> Result<StepOutput, AdapterError> {
    let pr = config.require_pr()?;
    let commit = config.commit.as_deref().unwrap_or_default();

    let pull_request = adapter.get_pull_request(pr, commit).await?;
    tracing::info!("fetched pull request {pr} at {}", pull_request.tip.id);

    Ok(StepOutput {
        version: Version::from_pull_request(&pull_request),
        metadata: Metadata::for_pull_request(&pull_request),
    })
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use rstest::rstest;

    use super::fetch;
    use crate::codecommit::models::{CommitObject, PullRequest, PullRequestObject};
    use crate::codecommit::{AdapterError, MockPullRequestAdapter};
    use crate::config::ResourceConfig;

    #[rstest]
    #[tokio::test]
    async fn reports_version_and_metadata() {
        let mut adapter = MockPullRequestAdapter::new();
        adapter
            .expect_get_pull_request()
            .withf(|pr, commit| pr == "42" && commit == "old000")
            .times(1)
            .returning(|pr, _| {
                Ok(PullRequest {
                    object: PullRequestObject {
                        id: pr.to_owned(),
                        number: 42,
                        title: "Fix bug".to_owned(),
                        ..PullRequestObject::default()
                    },
                    tip: CommitObject {
                        id: "abc123".to_owned(),
                        committed_date: DateTime::from_timestamp(1_700_000_000, 0),
                        ..CommitObject::default()
                    },
                    approved_review_count: 0,
                    labels: Vec::new(),
                })
            });
        let config = ResourceConfig {
            pr: Some("42".to_owned()),
            commit: Some("old000".to_owned()),
            ..Default::default()
        };

        let output = fetch(&adapter, &config).await.expect("get should succeed");

        assert_eq!(output.version.pr, "42", "pr mismatch");
        assert_eq!(output.version.commit, "abc123", "commit mismatch");
        assert_eq!(
            output.version.committed_date,
            DateTime::from_timestamp(1_700_000_000, 0),
            "date mismatch"
        );
        assert_eq!(output.metadata.get("title"), Some("Fix bug"), "title mismatch");
    }

    #[rstest]
    #[tokio::test]
    async fn requires_a_pull_request() {
        let mut adapter = MockPullRequestAdapter::new();
        adapter.expect_get_pull_request().never();

        let result = fetch(&adapter, &ResourceConfig::default()).await;

        assert!(
            matches!(result, Err(AdapterError::Configuration { .. })),
            "expected Configuration, got {result:?}"
        );
    }
}
