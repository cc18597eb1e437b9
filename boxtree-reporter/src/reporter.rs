// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-file reporting.

use crate::{
    duration::{FormatTime, MillisFormatter},
    indent::IndentPropagator,
    raw::{RawSuite, TestFileResult},
    render::TreeRenderer,
    status::{AggregateStatus, TestStatus},
    theme::TreeStyles,
    tree::DecoratedSuite,
    write_str::LineSink,
};
use camino::Utf8Path;
use owo_colors::OwoColorize;
use std::io;
use swrite::{SWrite, swrite};

/// Reports test file results as box-drawing trees.
pub struct TreeReporter<'a> {
    styles: &'a TreeStyles,
    format_time: &'a dyn FormatTime,
}

impl<'a> TreeReporter<'a> {
    /// Creates a new reporter that formats durations with [`MillisFormatter`].
    pub fn new(styles: &'a TreeStyles) -> Self {
        Self {
            styles,
            format_time: &MillisFormatter,
        }
    }

    /// Sets the formatter used for test durations.
    pub fn with_format_time(mut self, format_time: &'a dyn FormatTime) -> Self {
        self.format_time = format_time;
        self
    }

    /// Reports the results for a single test file.
    ///
    /// `fallback_path` is displayed in the header if the result doesn't carry
    /// its own test file path. Skipped files produce no output and empty stats.
    pub fn report_file(
        &self,
        result: &TestFileResult,
        fallback_path: Option<&Utf8Path>,
        sink: &mut dyn LineSink,
    ) -> io::Result<RunStats> {
        let path = result.test_file_path.as_deref().or(fallback_path);
        if result.skipped {
            tracing::debug!(path = ?path, "skipping test file");
            return Ok(RunStats::default());
        }

        // The tree has to be built before the header is written, since the
        // badge depends on its aggregate status.
        let root = match &result.test_exec_error {
            Some(_) => None,
            None => Some(self.decorate(&result.suite)),
        };
        let file_failed = result.test_exec_error.is_some()
            || root.as_ref().is_some_and(|root| root.status().is_failure());

        sink.write_line(&self.header(path, file_failed))?;
        if let Some(root) = &root {
            self.renderer().render(root, sink)?;
        }

        if let Some(message) = &result.failure_message {
            for line in message.lines() {
                sink.write_line(line)?;
            }
        } else if let Some(error) = &result.test_exec_error {
            self.write_exec_error(error, sink)?;
        }

        let mut stats = RunStats::default();
        if root.is_some() {
            for test in result.suite.all_tests() {
                stats.add_test(test.status);
            }
        }
        stats.files += 1;
        if file_failed {
            stats.failed_files += 1;
        }

        tracing::debug!(
            path = ?path,
            failed = file_failed,
            tests = stats.total(),
            "reported test file"
        );
        Ok(stats)
    }

    /// Renders the tree for `suite`, treating it as the synthetic root.
    ///
    /// Returns the aggregate status of the tree.
    pub fn report_suite(
        &self,
        suite: &RawSuite,
        sink: &mut dyn LineSink,
    ) -> io::Result<AggregateStatus> {
        let root = self.decorate(suite);
        self.renderer().render(&root, sink)?;
        Ok(root.status())
    }

    fn decorate(&self, suite: &RawSuite) -> DecoratedSuite {
        let root = DecoratedSuite::build_root(suite);
        tracing::trace!(status = ?root.status(), "built result tree");
        IndentPropagator::new(self.styles).propagate(root)
    }

    fn renderer(&self) -> TreeRenderer<'_> {
        TreeRenderer::new(self.styles, self.format_time)
    }

    fn header(&self, path: Option<&Utf8Path>, failed: bool) -> String {
        let mut out = if failed {
            " FAIL ".style(self.styles.fail_badge).to_string()
        } else {
            " PASS ".style(self.styles.pass_badge).to_string()
        };

        if let Some(path) = path {
            out.push(' ');
            // file_name() skips trailing `/` and `.` components, so the name
            // isn't always a suffix of the path.
            let split = path.file_name().and_then(|file_name| {
                let dir = path.as_str().strip_suffix(file_name)?;
                Some((dir, file_name))
            });
            match split {
                Some((dir, file_name)) => {
                    swrite!(
                        out,
                        "{}{}",
                        dir.style(self.styles.dim),
                        file_name.style(self.styles.bold),
                    );
                }
                None => {
                    swrite!(out, "{}", path.style(self.styles.bold));
                }
            }
        }

        out
    }

    fn write_exec_error(&self, error: &str, sink: &mut dyn LineSink) -> io::Result<()> {
        sink.write_line(&format!(
            "  {}",
            "● Test suite failed to run".style(self.styles.fail)
        ))?;
        sink.write_line("")?;
        for line in error.lines() {
            if line.is_empty() {
                sink.write_line("")?;
            } else {
                sink.write_line(&format!("    {line}"))?;
            }
        }
        Ok(())
    }
}

/// Statistics about reported test files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// The number of passed tests.
    pub passed: usize,
    /// The number of failed tests.
    pub failed: usize,
    /// The number of pending tests.
    pub pending: usize,
    /// The number of todo tests.
    pub todo: usize,
    /// The number of reported (non-skipped) files.
    pub files: usize,
    /// The number of files whose tree failed or that failed to run.
    pub failed_files: usize,
}

impl RunStats {
    /// Counts a single test with the given status.
    pub fn add_test(&mut self, status: TestStatus) {
        *self.count_mut(status) += 1;
    }

    /// Adds the counts from `other` to `self`.
    pub fn merge(&mut self, other: &RunStats) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.pending += other.pending;
        self.todo += other.todo;
        self.files += other.files;
        self.failed_files += other.failed_files;
    }

    /// Returns the number of tests with the given status.
    pub fn count(&self, status: TestStatus) -> usize {
        match status {
            TestStatus::Passed => self.passed,
            TestStatus::Failed => self.failed,
            TestStatus::Pending => self.pending,
            TestStatus::Todo => self.todo,
        }
    }

    fn count_mut(&mut self, status: TestStatus) -> &mut usize {
        match status {
            TestStatus::Passed => &mut self.passed,
            TestStatus::Failed => &mut self.failed,
            TestStatus::Pending => &mut self.pending,
            TestStatus::Todo => &mut self.todo,
        }
    }

    /// Returns the total number of tests.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.pending + self.todo
    }

    /// Returns true if no test failed and every file ran.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.failed_files == 0
    }

    /// Returns a one-line summary, e.g. `Tests: 1 failed, 2 passed, 3 total`.
    ///
    /// Statuses with no tests are omitted.
    pub fn summary_line(&self, styles: &TreeStyles) -> String {
        let mut out = format!("{} ", "Tests:".style(styles.bold));
        for status in TestStatus::ALL {
            let count = self.count(status);
            if count == 0 {
                continue;
            }
            let label_style = match status {
                TestStatus::Failed => styles.fail,
                TestStatus::Passed => styles.pass,
                _ => owo_colors::Style::new(),
            };
            swrite!(
                out,
                "{} {}, ",
                count.style(styles.count),
                status.style(label_style)
            );
        }
        swrite!(out, "{} total", self.total().style(styles.count));
        out
    }
}
