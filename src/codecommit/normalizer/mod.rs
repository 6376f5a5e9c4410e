//! Maps raw service records into the canonical pull request model.
//!
//! Only the first source/destination target of a pull request is used.
//! Pull requests spanning several targets are normalised against that first
//! pair and a warning is logged.

use super::error::AdapterError;
use super::gateway::CodeCommitGateway;
use super::locator::{RepositoryLocator, simple_ref_name};
use super::models::{
    CommitObject, PullRequest, PullRequestObject, PullRequestRecord, PullRequestTarget,
};

/// Where the URLs of a normalised pull request come from.
struct Links {
    url: String,
    repository_url: String,
}

/// Builds [`PullRequest`] snapshots using a gateway.
pub struct PullRequestNormalizer<'client, Gateway>
where
    Gateway: CodeCommitGateway,
{
    client: &'client Gateway,
    locator: &'client RepositoryLocator,
}

impl<'client, Gateway> PullRequestNormalizer<'client, Gateway>
where
    Gateway: CodeCommitGateway,
{
    /// Create a normaliser for the given repository.
    #[must_use]
    pub const fn new(client: &'client Gateway, locator: &'client RepositoryLocator) -> Self {
        Self { client, locator }
    }

    /// Lists every open pull request, hydrated one at a time in listing order.
    ///
    /// # Errors
    ///
    /// Fails on the first gateway error, on a non-numeric identifier, or on a
    /// pull request without targets. No partial list is returned.
    pub async fn list_open_pull_requests(&self) -> Result<Vec<PullRequest>, AdapterError> {
        let repository = self.locator.repository();
        let metadata = self.client.repository(repository).await?;
        let clone_url = metadata
            .clone_url_http
            .ok_or_else(|| AdapterError::IncompleteResponse {
                operation: "get repository".to_owned(),
                target: repository.as_str().to_owned(),
                field: "clone URL".to_owned(),
            })?;

        let ids = self.client.open_pull_request_ids(repository).await?;
        tracing::debug!(
            "found {} open pull requests in {}",
            ids.len(),
            repository.as_str()
        );

        let mut pull_requests = Vec::with_capacity(ids.len());
        for id in ids {
            let record = self.client.pull_request(&id).await?;
            let number = parse_number(&id)?;
            let links = Links {
                url: clone_url.clone(),
                repository_url: clone_url.clone(),
            };
            pull_requests.push(normalise(&id, number, record, links, None)?);
        }

        Ok(pull_requests)
    }

    /// Fetches a single pull request.
    ///
    /// The description becomes the tip message; a missing description is an
    /// empty message.
    ///
    /// # Errors
    ///
    /// Fails when the gateway call fails, the identifier is not numeric, or
    /// the pull request has no targets.
    pub async fn get_pull_request(
        &self,
        pull_request_id: &str,
    ) -> Result<PullRequest, AdapterError> {
        let record = self.client.pull_request(pull_request_id).await?;
        let number = parse_number(pull_request_id)?;
        let links = Links {
            url: self.locator.console_pull_request_url(pull_request_id),
            repository_url: self.locator.to_locator_string(),
        };
        let description = record.description.clone().unwrap_or_default();

        normalise(pull_request_id, number, record, links, Some(description))
    }
}

/// Converts a pull request identifier into its numeric form.
///
/// # Errors
///
/// Returns [`AdapterError::InvalidIdentifier`] when the identifier is not a
/// non-negative integer.
pub fn parse_number(pull_request_id: &str) -> Result<u64, AdapterError> {
    pull_request_id
        .parse::<u64>()
        .map_err(|_| AdapterError::InvalidIdentifier {
            identifier: pull_request_id.to_owned(),
        })
}

fn normalise(
    pull_request_id: &str,
    number: u64,
    record: PullRequestRecord,
    links: Links,
    message: Option<String>,
) -> Result<PullRequest, AdapterError> {
    if record.targets.len() > 1 {
        tracing::warn!(
            "pull request {pull_request_id} has {} targets, only the first is used",
            record.targets.len()
        );
    }

    let incomplete = |field: &str| AdapterError::IncompleteResponse {
        operation: "get pull request".to_owned(),
        target: format!("pull request {pull_request_id}"),
        field: field.to_owned(),
    };

    let PullRequestTarget {
        source_reference,
        destination_reference,
        source_commit,
        destination_commit,
    } = record
        .targets
        .into_iter()
        .next()
        .ok_or_else(|| incomplete("pull request target"))?;
    let tip = source_commit.ok_or_else(|| incomplete("source commit"))?;
    let title = record
        .title
        .filter(|candidate| !candidate.trim().is_empty())
        .ok_or_else(|| incomplete("title"))?;

    Ok(PullRequest {
        object: PullRequestObject {
            id: pull_request_id.to_owned(),
            number,
            title,
            url: links.url,
            base_ref_name: branch_name(destination_reference.as_deref()),
            base_ref_oid: destination_commit.unwrap_or_default(),
            head_ref_name: branch_name(source_reference.as_deref()),
            repository_url: links.repository_url,
        },
        tip: CommitObject {
            id: tip,
            committed_date: record.creation_date,
            message: message.unwrap_or_default(),
            author: record.author_arn.unwrap_or_default(),
        },
        approved_review_count: 0,
        labels: Vec::new(),
    })
}

fn branch_name(reference: Option<&str>) -> String {
    reference.map(simple_ref_name).unwrap_or_default().to_owned()
}
