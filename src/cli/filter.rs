//! Path filters deciding whether a pull request's changes are relevant.
//!
//! A pattern is a glob. A pattern naming a directory also matches every path
//! beneath it, so `docs` and `docs/**` select the same files.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::codecommit::AdapterError;

/// Include and ignore patterns applied to the paths a pull request touches.
#[derive(Debug, Default)]
pub struct PathFilter {
    include: Option<GlobSet>,
    ignore: Option<GlobSet>,
}

impl PathFilter {
    /// Compiles `paths` and `ignore_paths`. An empty list disables that side.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] when a pattern is not a valid
    /// glob.
    pub fn new(paths: &[String], ignore_paths: &[String]) -> Result<Self, AdapterError> {
        Ok(Self {
            include: build_set(paths)?,
            ignore: build_set(ignore_paths)?,
        })
    }

    /// Whether any pattern is configured. Inactive filters need no diff.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.include.is_some() || self.ignore.is_some()
    }

    /// Whether a pull request changing `files` passes the filter.
    ///
    /// At least one file must match an include pattern, and at least one
    /// file must escape every ignore pattern.
    #[must_use]
    pub fn accepts(&self, files: &[String]) -> bool {
        let included = self
            .include
            .as_ref()
            .is_none_or(|set| files.iter().any(|file| set.is_match(file)));
        let all_ignored = self
            .ignore
            .as_ref()
            .is_some_and(|set| files.iter().all(|file| set.is_match(file)));
        included && !all_ignored
    }
}

fn build_set(patterns: &[String]) -> Result<Option<GlobSet>, AdapterError> {
    let mut builder = GlobSetBuilder::new();
    let mut compiled = 0_usize;
    for pattern in patterns
        .iter()
        .map(|raw| raw.trim().trim_end_matches('/'))
        .filter(|trimmed| !trimmed.is_empty())
    {
        builder.add(compile(pattern)?);
        builder.add(compile(&format!("{pattern}/**"))?);
        compiled += 1;
    }
    if compiled == 0 {
        return Ok(None);
    }
    builder
        .build()
        .map(Some)
        .map_err(|error| AdapterError::Configuration {
            message: format!("invalid path filter: {error}"),
        })
}

fn compile(pattern: &str) -> Result<Glob, AdapterError> {
    Glob::new(pattern).map_err(|error| AdapterError::Configuration {
        message: format!("invalid path filter `{pattern}`: {error}"),
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::PathFilter;
    use crate::codecommit::AdapterError;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[rstest]
    fn empty_lists_leave_the_filter_inactive() {
        let filter = PathFilter::new(&[], &strings(&["  "])).expect("filter should build");

        assert!(!filter.is_active(), "blank patterns disable filtering");
        assert!(filter.accepts(&[]), "inactive filter accepts everything");
    }

    #[rstest]
    #[case::glob(&["src/**/*.rs"], &["src/codecommit/locator.rs"], true)]
    #[case::directory(&["docs"], &["docs/guide/intro.md"], true)]
    #[case::trailing_slash(&["docs/"], &["docs/guide.md"], true)]
    #[case::exact_file(&["Cargo.toml"], &["Cargo.toml"], true)]
    #[case::no_match(&["docs"], &["src/lib.rs"], false)]
    #[case::prefix_is_not_a_directory(&["doc"], &["docs/guide.md"], false)]
    #[case::no_files(&["docs"], &[], false)]
    fn include_patterns(#[case] paths: &[&str], #[case] files: &[&str], #[case] expected: bool) {
        let filter = PathFilter::new(&strings(paths), &[]).expect("filter should build");

        assert_eq!(filter.accepts(&strings(files)), expected, "files: {files:?}");
    }

    #[rstest]
    #[case::all_ignored(&["docs/a.md", "docs/b.md"], false)]
    #[case::one_relevant(&["docs/a.md", "src/lib.rs"], true)]
    #[case::none_ignored(&["src/lib.rs"], true)]
    fn ignore_patterns(#[case] files: &[&str], #[case] expected: bool) {
        let filter =
            PathFilter::new(&[], &strings(&["docs", "*.txt"])).expect("filter should build");

        assert_eq!(filter.accepts(&strings(files)), expected, "files: {files:?}");
    }

    #[rstest]
    fn invalid_glob_is_a_configuration_error() {
        let result = PathFilter::new(&strings(&["src/[unclosed"]), &[]);

        assert!(
            matches!(result, Err(AdapterError::Configuration { ref message }) if message.contains("src/[unclosed")),
            "expected Configuration, got {result:?}"
        );
    }
}
