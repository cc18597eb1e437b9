// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw results, as produced by whatever collected the test run.
//!
//! Nothing here is validated: a missing title is an empty title, and a suite
//! without `tests` or `suites` simply has none.

use crate::{errors::ResultsParseError, status::TestStatus};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A suite of tests, possibly containing nested suites.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawSuite {
    /// The title of the suite.
    pub title: String,
    /// Tests directly inside this suite, in collection order.
    pub tests: Vec<RawTest>,
    /// Suites directly inside this suite, in collection order.
    pub suites: Vec<RawSuite>,
}

impl RawSuite {
    /// Creates an empty suite with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tests: Vec::new(),
            suites: Vec::new(),
        }
    }

    /// Adds a test to this suite.
    pub fn with_test(mut self, test: RawTest) -> Self {
        self.tests.push(test);
        self
    }

    /// Adds a nested suite to this suite.
    pub fn with_suite(mut self, suite: RawSuite) -> Self {
        self.suites.push(suite);
        self
    }

    /// Returns an iterator over every test in this suite and its descendants,
    /// depth-first, tests before suites.
    pub fn all_tests(&self) -> impl Iterator<Item = &RawTest> + '_ {
        let nested: Box<dyn Iterator<Item = &RawTest> + '_> =
            Box::new(self.suites.iter().flat_map(|suite| suite.all_tests()));
        self.tests.iter().chain(nested)
    }
}

/// The result of a single test.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RawTest {
    /// The title of the test.
    #[serde(default)]
    pub title: String,
    /// The status of the test.
    pub status: TestStatus,
    /// How long the test took, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl RawTest {
    /// Creates a new test result without a duration.
    pub fn new(title: impl Into<String>, status: TestStatus) -> Self {
        Self {
            title: title.into(),
            status,
            duration: None,
        }
    }

    /// Sets the duration of this test, in milliseconds.
    pub fn with_duration(mut self, millis: f64) -> Self {
        self.duration = Some(millis);
        self
    }
}

/// The results for a single test file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestFileResult {
    /// The path to the test file, if known.
    pub test_file_path: Option<Utf8PathBuf>,
    /// True if the whole file was skipped. Skipped files aren't displayed.
    pub skipped: bool,
    /// Set if the test file failed to run at all.
    pub test_exec_error: Option<String>,
    /// A preformatted message describing failures in this file.
    pub failure_message: Option<String>,
    /// The suite tree for this file. The root suite's title isn't displayed.
    pub suite: RawSuite,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResultsInput {
    Many(Vec<TestFileResult>),
    One(Box<TestFileResult>),
}

/// Parses test file results from JSON.
///
/// The input is either a single result object or an array of them.
pub fn parse_results(json: &str) -> Result<Vec<TestFileResult>, ResultsParseError> {
    let input: ResultsInput = serde_json::from_str(json).map_err(ResultsParseError::new)?;
    let results = match input {
        ResultsInput::Many(results) => results,
        ResultsInput::One(result) => vec![*result],
    };
    tracing::debug!("parsed {} test file results", results.len());
    Ok(results)
}
