// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test and suite statuses.
//!
//! Every component that needs to branch on a status goes through
//! [`TestStatus::info`], so the icon, failure predicate and title treatment for
//! a status live in exactly one place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The status of a single test, as reported by the test run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// The test passed.
    Passed,
    /// The test failed.
    Failed,
    /// The test was skipped.
    Pending,
    /// The test is a placeholder that hasn't been written yet.
    Todo,
}

/// Static information about how a [`TestStatus`] is displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusInfo {
    /// The icon shown before the test title.
    pub icon: &'static str,
    /// Whether this status makes the enclosing suite fail.
    pub counts_as_failure: bool,
    /// Whether the test title is dimmed.
    pub dim_title: bool,
}

static PASSED_INFO: StatusInfo = StatusInfo {
    icon: "✓",
    counts_as_failure: false,
    dim_title: true,
};

static FAILED_INFO: StatusInfo = StatusInfo {
    icon: "✕",
    counts_as_failure: true,
    dim_title: false,
};

static PENDING_INFO: StatusInfo = StatusInfo {
    icon: "○",
    counts_as_failure: false,
    dim_title: false,
};

static TODO_INFO: StatusInfo = StatusInfo {
    icon: "✎",
    counts_as_failure: false,
    dim_title: true,
};

impl TestStatus {
    /// All statuses, in the order they're summarized.
    pub const ALL: [TestStatus; 4] = [
        TestStatus::Failed,
        TestStatus::Pending,
        TestStatus::Todo,
        TestStatus::Passed,
    ];

    /// Returns the display information for this status.
    pub fn info(self) -> &'static StatusInfo {
        match self {
            TestStatus::Passed => &PASSED_INFO,
            TestStatus::Failed => &FAILED_INFO,
            TestStatus::Pending => &PENDING_INFO,
            TestStatus::Todo => &TODO_INFO,
        }
    }

    /// Returns true if this status counts as a failure.
    #[inline]
    pub fn is_failure(self) -> bool {
        self.info().counts_as_failure
    }

    /// Returns the string literal used for this status in raw results.
    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Pending => "pending",
            TestStatus::Todo => "todo",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The aggregate status of a suite: failed if any test below it failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AggregateStatus {
    /// No test in the suite failed.
    #[default]
    Passed,
    /// At least one test in the suite failed.
    Failed,
}

impl AggregateStatus {
    /// Returns `Failed` if `failed` is true, `Passed` otherwise.
    pub fn from_failed(failed: bool) -> Self {
        if failed {
            AggregateStatus::Failed
        } else {
            AggregateStatus::Passed
        }
    }

    /// Returns true if the suite failed.
    #[inline]
    pub fn is_failure(self) -> bool {
        self == AggregateStatus::Failed
    }
}
