// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for boxtree: turning the result tree of a test run into
//! an annotated box-drawing tree.
//!
//! Rendering happens in three sequential passes, each consuming the output of
//! the previous one:
//!
//! 1. [`DecoratedSuite::build_root`] converts a [`RawSuite`] into decorated
//!    nodes, aggregating failure status bottom-up.
//! 2. [`IndentPropagator`] walks the tree top-down, assigning every node its
//!    left-margin prefix.
//! 3. [`TreeRenderer`] emits lines to a [`LineSink`](write_str::LineSink).
//!
//! [`TreeReporter`] drives all three for one test file at a time.

mod duration;
pub mod errors;
mod exit_codes;
mod indent;
mod raw;
mod render;
mod reporter;
mod status;
#[cfg(test)]
mod test_helpers;
mod theme;
mod tree;
pub mod write_str;

pub use duration::{DisplayMillis, FormatTime, MillisFormatter};
pub use exit_codes::BoxtreeExitCode;
pub use indent::IndentPropagator;
pub use raw::{RawSuite, RawTest, TestFileResult, parse_results};
pub use render::TreeRenderer;
pub use reporter::{RunStats, TreeReporter};
pub use status::{AggregateStatus, StatusInfo, TestStatus};
pub use theme::{BoxChars, TreeStyles};
pub use tree::{DecoratedSuite, DecoratedTest};
