//! Data models for normalised pull requests and raw service records.

use chrono::{DateTime, Utc};

/// Pull request snapshot including its tip commit.
///
/// Instances are built fresh for every query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Identity and branch metadata.
    pub object: PullRequestObject,
    /// Latest commit on the source branch at query time.
    pub tip: CommitObject,
    /// Number of approving reviews.
    pub approved_review_count: u32,
    /// Labels attached to the pull request.
    pub labels: Vec<LabelObject>,
}

/// Identity and metadata of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestObject {
    /// Raw identifier as issued by the service.
    pub id: String,
    /// Numeric form of the identifier.
    pub number: u64,
    /// Title of the pull request.
    pub title: String,
    /// Link for humans to follow.
    pub url: String,
    /// Destination branch, without any `refs/heads/` prefix.
    pub base_ref_name: String,
    /// Destination commit of the first target.
    pub base_ref_oid: String,
    /// Source branch, without any `refs/heads/` prefix.
    pub head_ref_name: String,
    /// URL of the repository the pull request belongs to.
    pub repository_url: String,
}

/// Tip commit of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitObject {
    /// Commit id.
    pub id: String,
    /// Date recorded for the commit, if the service reported one.
    pub committed_date: Option<DateTime<Utc>>,
    /// Commit or pull request message.
    pub message: String,
    /// Author identity.
    pub author: String,
}

/// A file touched between two commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFileObject {
    /// Repository relative path.
    pub path: String,
}

/// A label attached to a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelObject {
    /// Label name.
    pub name: String,
}

/// Repository metadata returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryMetadata {
    /// Repository name.
    pub name: String,
    /// HTTPS clone URL.
    pub clone_url_http: Option<String>,
}

/// Pull request as returned by the detail call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestRecord {
    /// Service identifier.
    pub id: String,
    /// Title.
    pub title: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Creation time.
    pub creation_date: Option<DateTime<Utc>>,
    /// ARN of the author.
    pub author_arn: Option<String>,
    /// Source/destination pairs, in service order.
    pub targets: Vec<PullRequestTarget>,
}

/// One source/destination pair of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestTarget {
    /// Full source reference, e.g. `refs/heads/feature`.
    pub source_reference: Option<String>,
    /// Full destination reference.
    pub destination_reference: Option<String>,
    /// Tip of the source reference.
    pub source_commit: Option<String>,
    /// Tip of the destination reference.
    pub destination_commit: Option<String>,
}

/// Kind of change recorded for a difference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File added.
    Added,
    /// File modified.
    Modified,
    /// File deleted.
    Deleted,
    /// Change type the service did not report or that is not known here.
    Unknown,
}

/// One entry of a commit difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    /// Path before the change, absent for additions.
    pub before_path: Option<String>,
    /// Path after the change, absent for deletions.
    pub after_path: Option<String>,
    /// Change type.
    pub change: ChangeKind,
}

/// Bounded result of a difference call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DifferencePage {
    /// Differences in service order.
    pub differences: Vec<Difference>,
    /// True when the service had more entries than were returned.
    pub truncated: bool,
}

/// Comments attached to one commit range of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentThread {
    /// Commit the range starts from.
    pub before_commit_id: Option<String>,
    /// Commit the range ends at.
    pub after_commit_id: Option<String>,
    /// Comments in service order.
    pub comments: Vec<PullRequestComment>,
}

/// A single pull request comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestComment {
    /// Comment identifier.
    pub id: Option<String>,
    /// ARN of the author.
    pub author_arn: Option<String>,
    /// Comment body.
    pub content: Option<String>,
    /// Whether the content has already been deleted.
    pub deleted: bool,
}

/// Request to post a comment on a commit range of a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRequest {
    /// Pull request identifier.
    pub pull_request_id: String,
    /// Repository the pull request belongs to.
    pub repository: String,
    /// Commit the range starts from.
    pub before_commit_id: String,
    /// Commit the range ends at.
    pub after_commit_id: String,
    /// Comment body.
    pub content: String,
}

/// Identity of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// ARN the session is authenticated as.
    pub arn: String,
    /// Account the caller belongs to, if reported.
    pub account: Option<String>,
}
