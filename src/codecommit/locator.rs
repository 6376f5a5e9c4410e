//! Repository locator parsing and identity wrappers.

use std::fmt;

use super::error::AdapterError;

const SCHEME_MARKER: &str = "codecommit::";
const SEGMENT_DELIMITER: char = ':';
const PATH_SEPARATOR: &str = "//";
const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// AWS region hosting the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region(String);

impl Region {
    pub(crate) fn new(value: &str) -> Result<Self, AdapterError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AdapterError::MalformedLocator {
                locator: value.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the region value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, AdapterError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AdapterError::MalformedLocator {
                locator: value.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Parsed repository locator of the form `codecommit::<region>://<repository>`.
///
/// # Example
///
/// ```
/// use codecommit_pr::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("codecommit::eu-central-1://devzone")
///     .expect("should parse locator");
/// assert_eq!(locator.region().as_str(), "eu-central-1");
/// assert_eq!(locator.repository().as_str(), "devzone");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    region: Region,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Parses a locator string.
    ///
    /// The `codecommit::` marker is removed when present and the remainder must
    /// split on `:` into exactly a region and a repository. Any `//` left on
    /// the repository segment is dropped. A locator carrying an extra segment,
    /// such as an account id between the scheme and the region, is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::MalformedLocator`] when the split does not yield
    /// exactly two non-empty segments.
    pub fn parse(input: &str) -> Result<Self, AdapterError> {
        let malformed = || AdapterError::MalformedLocator {
            locator: input.to_owned(),
        };

        let remainder = input.trim().replace(SCHEME_MARKER, "");
        let mut segments = remainder.split(SEGMENT_DELIMITER);

        let (Some(region_segment), Some(repository_segment), None) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(malformed());
        };

        let region = Region::new(region_segment).map_err(|_| malformed())?;
        let repository = RepositoryName::new(&repository_segment.replace(PATH_SEPARATOR, ""))
            .map_err(|_| malformed())?;

        Ok(Self { region, repository })
    }

    /// Creates a locator from already separated parts.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::MalformedLocator`] when either part is blank.
    pub fn from_parts(region: &str, repository: &str) -> Result<Self, AdapterError> {
        Ok(Self {
            region: Region::new(region)?,
            repository: RepositoryName::new(repository)?,
        })
    }

    /// Region hosting the repository.
    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Renders the locator back into `codecommit::<region>://<repository>`.
    #[must_use]
    pub fn to_locator_string(&self) -> String {
        format!(
            "{SCHEME_MARKER}{region}:{PATH_SEPARATOR}{repository}",
            region = self.region.as_str(),
            repository = self.repository.as_str()
        )
    }

    /// Browser URL of a pull request in the service console.
    pub(crate) fn console_pull_request_url(&self, pull_request_id: &str) -> String {
        format!(
            "https://{region}.console.aws.amazon.com/codesuite/codecommit/repositories/\
             {repository}/pull-requests/{pull_request_id}",
            region = self.region.as_str(),
            repository = self.repository.as_str()
        )
    }
}

impl fmt::Display for RepositoryLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_locator_string())
    }
}

/// Strips every leading `refs/heads/` from a reference name.
///
/// The result never starts with the prefix, so applying it twice is the same
/// as applying it once.
#[must_use]
pub fn simple_ref_name(reference: &str) -> &str {
    let mut name = reference;
    while let Some(rest) = name.strip_prefix(BRANCH_REF_PREFIX) {
        name = rest;
    }
    name
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{RepositoryLocator, simple_ref_name};
    use crate::codecommit::error::AdapterError;

    #[rstest]
    #[case::devzone("codecommit::eu-central-1://devzone", "eu-central-1", "devzone")]
    #[case::test_repo("codecommit::us-west-1://test-repo", "us-west-1", "test-repo")]
    #[case::surrounding_whitespace("  codecommit::us-west-1://test-repo ", "us-west-1", "test-repo")]
    #[case::without_marker("us-east-2://service", "us-east-2", "service")]
    fn parses_region_and_repository(
        #[case] input: &str,
        #[case] region: &str,
        #[case] repository: &str,
    ) {
        let locator = RepositoryLocator::parse(input).expect("locator should parse");

        assert_eq!(locator.region().as_str(), region, "region mismatch");
        assert_eq!(locator.repository().as_str(), repository, "repository mismatch");
    }

    #[rstest]
    #[case::embedded_account("codecommit:111111111111:us-west-1://test-repo")]
    #[case::no_delimiter("codecommit::devzone")]
    #[case::empty("")]
    #[case::missing_region("codecommit:://devzone")]
    #[case::missing_repository("codecommit::eu-central-1://")]
    fn rejects_malformed_locators(#[case] input: &str) {
        assert_eq!(
            RepositoryLocator::parse(input),
            Err(AdapterError::MalformedLocator {
                locator: input.to_owned()
            }),
            "expected MalformedLocator for {input:?}"
        );
    }

    #[rstest]
    #[case("codecommit::eu-central-1://devzone")]
    #[case("codecommit::us-west-1://test-repo")]
    fn renders_back_to_the_same_locator(#[case] input: &str) {
        let locator = RepositoryLocator::parse(input).expect("locator should parse");

        assert_eq!(locator.to_locator_string(), input, "round trip mismatch");
        assert_eq!(
            RepositoryLocator::parse(&locator.to_string()),
            Ok(locator),
            "display output should parse to the same locator"
        );
    }

    #[rstest]
    fn from_parts_rejects_blank_values() {
        assert!(
            RepositoryLocator::from_parts(" ", "devzone").is_err(),
            "blank region should be rejected"
        );
        assert!(
            RepositoryLocator::from_parts("eu-central-1", "").is_err(),
            "blank repository should be rejected"
        );
    }

    #[rstest]
    fn console_url_points_at_the_pull_request() {
        let locator =
            RepositoryLocator::from_parts("eu-central-1", "devzone").expect("parts are valid");

        assert_eq!(
            locator.console_pull_request_url("42"),
            "https://eu-central-1.console.aws.amazon.com/codesuite/codecommit/repositories/devzone/pull-requests/42",
            "console URL mismatch"
        );
    }

    #[rstest]
    #[case::branch("refs/heads/main", "main")]
    #[case::nested("refs/heads/feature/login", "feature/login")]
    #[case::plain("main", "main")]
    #[case::doubled("refs/heads/refs/heads/main", "main")]
    #[case::tag("refs/tags/v1", "refs/tags/v1")]
    fn strips_branch_prefix_idempotently(#[case] reference: &str, #[case] expected: &str) {
        let once = simple_ref_name(reference);

        assert_eq!(once, expected, "unexpected simple name");
        assert_eq!(simple_ref_name(once), once, "stripping should be idempotent");
    }
}
