//! Resource configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in defaults
//! 2. **Configuration file** – `.codecommit-pr.toml` in the current
//!    directory, home directory, or XDG config directory
//! 3. **Environment variables** – `CODECOMMIT_PR_REPOSITORY`,
//!    `CODECOMMIT_PR_PR`, and so on
//! 4. **Command-line arguments** – `--repository`/`-r`, `--pr`/`-p`, ...
//!
//! # Configuration File
//!
//! ```toml
//! repository = "codecommit::eu-central-1://devzone"
//! base_branch = "main"
//! paths = ["src", "Cargo.toml"]
//! ignore_paths = ["docs"]
//! delete_previous_comments = true
//! ```

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::codecommit::error::AdapterError;

/// Pipeline step selected by the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Report the versions of all open pull requests.
    Check,
    /// Fetch one pull request.
    Get,
    /// Post a comment on one pull request.
    Comment,
}

/// Resource configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use codecommit_pr::ResourceConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = ResourceConfig::load().expect("failed to load configuration");
/// config.validate().expect("repository required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "CODECOMMIT_PR",
    discovery(
        dotfile_name = ".codecommit-pr.toml",
        config_file_name = "codecommit-pr.toml",
        app_name = "codecommit-pr"
    )
)]
pub struct ResourceConfig {
    /// Repository locator, e.g. `codecommit::eu-central-1://devzone`.
    ///
    /// Can be provided via:
    /// - CLI: `--repository <LOCATOR>` or `-r <LOCATOR>`
    /// - Environment: `CODECOMMIT_PR_REPOSITORY`
    /// - Config file: `repository = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repository: Option<String>,

    /// Only pull requests into this branch are reported by `check`.
    #[ortho_config(cli_short = 'b')]
    pub base_branch: Option<String>,

    /// Pull request identifier used by `get` and `comment`.
    #[ortho_config(cli_short = 'p')]
    pub pr: Option<String>,

    /// Commit the pipeline last saw for the pull request.
    #[ortho_config(cli_short = 'c')]
    pub commit: Option<String>,

    /// Comment body. Selects the `comment` step.
    #[ortho_config(cli_short = 'm')]
    pub comment: Option<String>,

    /// Removes the previous bot comment before posting.
    ///
    /// `ortho_config` does not read booleans from the environment, so use
    /// the CLI flag or the config file.
    #[ortho_config()]
    pub delete_previous_comments: bool,

    /// Removes every previous bot comment instead of only the first one.
    #[ortho_config()]
    pub sweep_comments: bool,

    /// Service endpoint override, e.g. a local emulator.
    #[ortho_config()]
    pub endpoint_url: Option<String>,

    /// Globs of paths a pull request must touch for `check` to report it.
    ///
    /// A directory name matches everything beneath it. The environment
    /// accepts a comma-separated list.
    #[ortho_config(merge_strategy = "replace")]
    pub paths: Vec<String>,

    /// Globs of paths `check` disregards. A pull request touching only
    /// these paths is not reported.
    #[ortho_config(merge_strategy = "replace")]
    pub ignore_paths: Vec<String>,

    /// Minimum approvals a pull request needs before `check` reports it.
    ///
    /// The service reports no approvals, so any value above zero hides every
    /// pull request.
    #[ortho_config()]
    pub required_review_approvals: u64,
}

impl ResourceConfig {
    /// Checks that a repository is configured.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] when `repository` is unset or
    /// blank.
    pub fn validate(&self) -> Result<(), AdapterError> {
        self.require_repository().map(|_| ())
    }

    /// Returns the repository locator string.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] when `repository` is unset or
    /// blank.
    pub fn require_repository(&self) -> Result<&str, AdapterError> {
        require(self.repository.as_deref(), "repository must be set (use --repository or -r)")
    }

    /// Returns the pull request identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] when `pr` is unset or blank.
    pub fn require_pr(&self) -> Result<&str, AdapterError> {
        require(self.pr.as_deref(), "pull request must be set (use --pr or -p)")
    }

    /// Returns the comment body.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] when `comment` is unset or
    /// blank.
    pub fn require_comment(&self) -> Result<&str, AdapterError> {
        require(self.comment.as_deref(), "comment must be set (use --comment or -m)")
    }

    /// Determines the step based on provided configuration.
    ///
    /// Returns `Comment` when a comment body is set, `Get` when only a pull
    /// request is set, or `Check` otherwise.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.comment.is_some() {
            OperationMode::Comment
        } else if self.pr.is_some() {
            OperationMode::Get
        } else {
            OperationMode::Check
        }
    }
}

fn require<'value>(value: Option<&'value str>, message: &str) -> Result<&'value str, AdapterError> {
    value
        .filter(|candidate| !candidate.trim().is_empty())
        .ok_or_else(|| AdapterError::Configuration {
            message: message.to_owned(),
        })
}
