// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render test results as a box-drawing tree, with the path to every failure
//! highlighted.
//!
//! The rendering itself lives in [`boxtree_reporter`]; this crate is the
//! command-line frontend.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::OutputWriter;
