//! Commit status defaults.
//!
//! The service has no commit status API. Requests are completed with their
//! fallback values and then dropped; nothing is sent anywhere.

use std::env;

const DEFAULT_BASE_CONTEXT: &str = "concourse-ci";
const DEFAULT_STATUS_CONTEXT: &str = "status";

/// Values the build system exposes through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnvironment {
    /// External URL of the CI server (`ATC_EXTERNAL_URL`).
    pub external_url: Option<String>,
    /// Identifier of the running build (`BUILD_ID`).
    pub build_id: Option<String>,
}

impl BuildEnvironment {
    /// Reads `ATC_EXTERNAL_URL` and `BUILD_ID`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            external_url: env::var("ATC_EXTERNAL_URL").ok(),
            build_id: env::var("BUILD_ID").ok(),
        }
    }

    /// Link to the running build: `<external url>/builds/<build id>`.
    #[must_use]
    pub fn build_url(&self) -> String {
        [
            self.external_url.as_deref().unwrap_or_default(),
            "builds",
            self.build_id.as_deref().unwrap_or_default(),
        ]
        .join("/")
    }
}

/// A commit status as a pipeline step would report it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitStatus {
    /// Commit the status applies to.
    pub commit_ref: String,
    /// Prefix of the status context.
    pub base_context: String,
    /// Name of the status context.
    pub status_context: String,
    /// Reported state, e.g. `success`.
    pub state: String,
    /// Link shown next to the status.
    pub target_url: String,
    /// Human readable description.
    pub description: String,
}

impl CommitStatus {
    /// Replaces every empty field with its fallback.
    ///
    /// Fields that already carry a value are kept as they are.
    #[must_use]
    pub fn with_defaults(self, build: &BuildEnvironment) -> Self {
        let description =
            non_empty_or(self.description, || format!("Concourse CI build {}", self.state));

        Self {
            base_context: non_empty_or(self.base_context, || DEFAULT_BASE_CONTEXT.to_owned()),
            status_context: non_empty_or(self.status_context, || {
                DEFAULT_STATUS_CONTEXT.to_owned()
            }),
            target_url: non_empty_or(self.target_url, || build.build_url()),
            description,
            ..self
        }
    }
}

fn non_empty_or(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.is_empty() { fallback() } else { value }
}
