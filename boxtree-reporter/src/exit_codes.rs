// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `boxtree` failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum BoxtreeExitCode {}

impl BoxtreeExitCode {
    /// No errors occurred, and every rendered test passed or was skipped.
    pub const OK: i32 = 0;

    /// One or more rendered tests failed, or a test file failed to run.
    pub const TEST_RUN_FAILED: i32 = 100;

    /// Reading or parsing the input results produced an error.
    pub const SETUP_ERROR: i32 = 96;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
