// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by boxtree.

use thiserror::Error;

/// An error that occurred while parsing raw test results from JSON.
#[derive(Debug, Error)]
#[error("failed to parse test results as JSON")]
#[non_exhaustive]
pub struct ResultsParseError {
    #[source]
    err: serde_json::Error,
}

impl ResultsParseError {
    pub(crate) fn new(err: serde_json::Error) -> Self {
        Self { err }
    }

    /// Returns the line at which parsing failed (1-based).
    pub fn line(&self) -> usize {
        self.err.line()
    }

    /// Returns the column at which parsing failed (1-based).
    pub fn column(&self) -> usize {
        self.err.column()
    }
}
