//! Conversions from SDK shapes into the adapter's records.

use aws_sdk_codecommit::primitives::DateTime as SdkDateTime;
use aws_sdk_codecommit::types as sdk;
use chrono::{DateTime, Utc};

use crate::codecommit::models::{
    ChangeKind, CommentThread, Difference, PullRequestComment, PullRequestRecord,
    PullRequestTarget, RepositoryMetadata,
};

pub(super) fn to_utc(value: &SdkDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}

// Some SDK releases model boolean members as `bool`, others as `Option<bool>`.
fn flag(value: impl Into<Option<bool>>) -> bool {
    value.into().unwrap_or(false)
}

pub(super) fn repository_metadata(metadata: &sdk::RepositoryMetadata) -> RepositoryMetadata {
    RepositoryMetadata {
        name: metadata.repository_name().unwrap_or_default().to_owned(),
        clone_url_http: metadata.clone_url_http().map(str::to_owned),
    }
}

pub(super) fn pull_request_record(
    requested_id: &str,
    pull_request: &sdk::PullRequest,
) -> PullRequestRecord {
    PullRequestRecord {
        id: pull_request
            .pull_request_id()
            .unwrap_or(requested_id)
            .to_owned(),
        title: pull_request.title().map(str::to_owned),
        description: pull_request.description().map(str::to_owned),
        creation_date: pull_request.creation_date().and_then(to_utc),
        author_arn: pull_request.author_arn().map(str::to_owned),
        targets: pull_request
            .pull_request_targets()
            .iter()
            .map(pull_request_target)
            .collect(),
    }
}

fn pull_request_target(target: &sdk::PullRequestTarget) -> PullRequestTarget {
    PullRequestTarget {
        source_reference: target.source_reference().map(str::to_owned),
        destination_reference: target.destination_reference().map(str::to_owned),
        source_commit: target.source_commit().map(str::to_owned),
        destination_commit: target.destination_commit().map(str::to_owned),
    }
}

pub(super) fn difference(entry: &sdk::Difference) -> Difference {
    let path = |blob: Option<&sdk::BlobMetadata>| {
        blob.and_then(sdk::BlobMetadata::path).map(str::to_owned)
    };

    Difference {
        before_path: path(entry.before_blob()),
        after_path: path(entry.after_blob()),
        change: change_kind(entry.change_type().map(sdk::ChangeTypeEnum::as_str)),
    }
}

pub(super) fn change_kind(code: Option<&str>) -> ChangeKind {
    match code {
        Some("A") => ChangeKind::Added,
        Some("M") => ChangeKind::Modified,
        Some("D") => ChangeKind::Deleted,
        _ => ChangeKind::Unknown,
    }
}

pub(super) fn comment_thread(thread: &sdk::CommentsForPullRequest) -> CommentThread {
    CommentThread {
        before_commit_id: thread.before_commit_id().map(str::to_owned),
        after_commit_id: thread.after_commit_id().map(str::to_owned),
        comments: thread.comments().iter().map(comment).collect(),
    }
}

fn comment(comment: &sdk::Comment) -> PullRequestComment {
    PullRequestComment {
        id: comment.comment_id().map(str::to_owned),
        author_arn: comment.author_arn().map(str::to_owned),
        content: comment.content().map(str::to_owned),
        deleted: flag(comment.deleted()),
    }
}
