//! Records handed back to the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::PullRequest;

/// Comparable representation of a pull request's current state.
///
/// Two snapshots with the same `pr` and `commit` are the same version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Pull request number.
    pub pr: String,
    /// Tip commit id.
    pub commit: String,
    /// Date recorded for the tip commit.
    #[serde(
        rename = "committed",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub committed_date: Option<DateTime<Utc>>,
}

impl Version {
    /// Derives the version of a pull request snapshot.
    #[must_use]
    pub fn from_pull_request(pull_request: &PullRequest) -> Self {
        Self {
            pr: pull_request.object.number.to_string(),
            commit: pull_request.tip.id.clone(),
            committed_date: pull_request.tip.committed_date,
        }
    }

    /// Whether both versions point at the same pull request and commit.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.pr == other.pr && self.commit == other.commit
    }
}

/// A single name/value pair reported alongside a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: String,
}

/// Ordered, append-only metadata. Names may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Vec<MetadataField>);

impl Metadata {
    /// Creates empty metadata.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a field.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push(MetadataField {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Describes a pull request snapshot.
    #[must_use]
    pub fn for_pull_request(pull_request: &PullRequest) -> Self {
        let object = &pull_request.object;
        let mut metadata = Self::new();
        metadata.add("pr", object.number.to_string());
        metadata.add("title", object.title.as_str());
        metadata.add("url", object.url.as_str());
        metadata.add("head_name", object.head_ref_name.as_str());
        metadata.add("head_sha", pull_request.tip.id.as_str());
        metadata.add("base_name", object.base_ref_name.as_str());
        metadata.add("base_sha", object.base_ref_oid.as_str());
        metadata.add("message", pull_request.tip.message.as_str());
        metadata.add("author", pull_request.tip.author.as_str());
        metadata
    }

    /// Fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[MetadataField] {
        &self.0
    }

    /// Value of the first field with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}
