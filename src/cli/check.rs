//! The `check` step: report versions of open pull requests.

use crate::codecommit::{AdapterError, PullRequest, PullRequestAdapter, Version};
use crate::config::ResourceConfig;

use super::filter::PathFilter;
use super::output::write_json;

/// Lists open pull requests and writes their versions as a JSON array.
///
/// # Errors
///
/// Propagates adapter failures and output errors.
pub async fn run<A: PullRequestAdapter>(
    adapter: &A,
    config: &ResourceConfig,
) -> Result<(), AdapterError> {
    let versions = versions(adapter, config).await?;
    write_json(&versions)
}

/// Versions of the open pull requests that pass the configured filters, in
/// listing order.
///
/// Path filters need the modified files of each candidate, so they cost one
/// diff per pull request that survives the cheaper filters.
///
/// # Errors
///
/// Returns [`AdapterError::Configuration`] for an invalid path pattern and
/// propagates adapter failures.
pub async fn versions<A: PullRequestAdapter>(
    adapter: &A,
    config: &ResourceConfig,
) -> Result<Vec<Version>, AdapterError> {
    let filter = PathFilter::new(&config.paths, &config.ignore_paths)?;
    let pull_requests = adapter.list_open_pull_requests().await?;
    let total = pull_requests.len();

    let mut versions = Vec::new();
    for pull_request in pull_requests
        .iter()
        .filter(|candidate| is_reported(candidate, config))
    {
        if filter.is_active() && !touches_relevant_paths(adapter, pull_request, &filter).await? {
            continue;
        }
        versions.push(Version::from_pull_request(pull_request));
    }

    tracing::info!("{} of {total} open pull requests reported", versions.len());
    Ok(versions)
}

fn is_reported(pull_request: &PullRequest, config: &ResourceConfig) -> bool {
    let base_matches = config
        .base_branch
        .as_deref()
        .is_none_or(|branch| pull_request.object.base_ref_name == branch);
    let approved =
        u64::from(pull_request.approved_review_count) >= config.required_review_approvals;
    base_matches && approved
}

async fn touches_relevant_paths<A: PullRequestAdapter>(
    adapter: &A,
    pull_request: &PullRequest,
    filter: &PathFilter,
) -> Result<bool, AdapterError> {
    let files = adapter
        .list_modified_files(
            pull_request.object.number,
            &pull_request.tip.id,
            &pull_request.object.base_ref_name,
        )
        .await?;
    let accepted = filter.accepts(&files);
    if !accepted {
        tracing::debug!(
            "pull request {} skipped by path filters ({} files changed)",
            pull_request.object.number,
            files.len()
        );
    }
    Ok(accepted)
}
