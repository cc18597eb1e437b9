// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-down assignment of indent prefixes.
//!
//! Each non-root suite contributes one column to the prefix of everything
//! drawn below it: three spaces if the suite is the last among its siblings,
//! otherwise a vertical connector followed by two spaces.
//!
//! The connector is drawn in the failure style only while a failure is still
//! to come. For the children of a suite, that's every child positioned before
//! the last failing child. Past that point the connector is drawn plain, so a
//! failure path never continues below the last failure it leads to.

use crate::{
    theme::{BoxChars, TreeStyles},
    tree::DecoratedSuite,
};
use owo_colors::OwoColorize;
use swrite::{SWrite, swrite};

/// Assigns indent prefixes to a built [`DecoratedSuite`].
#[derive(Clone, Debug)]
pub struct IndentPropagator<'a> {
    chars: &'a BoxChars,
    styles: &'a TreeStyles,
}

impl<'a> IndentPropagator<'a> {
    /// Creates a new propagator using the given styles.
    pub fn new(styles: &'a TreeStyles) -> Self {
        Self {
            chars: &BoxChars::HEAVY,
            styles,
        }
    }

    /// Propagates indents through a whole tree, starting at its root.
    pub fn propagate(&self, root: DecoratedSuite) -> DecoratedSuite {
        self.propagate_from(root, "", false)
    }

    /// Propagates indents through `suite` and everything below it.
    ///
    /// `previous_indent` is the prefix inherited from the suite's ancestors,
    /// and `decorate_connector` determines whether the suite's own connector
    /// column is drawn in the failure style.
    ///
    /// The result depends only on the shape and statuses of the tree and on
    /// the arguments: indents assigned by an earlier call are overwritten.
    pub fn propagate_from(
        &self,
        mut suite: DecoratedSuite,
        previous_indent: &str,
        decorate_connector: bool,
    ) -> DecoratedSuite {
        let mut indent = previous_indent.to_owned();
        if !suite.skip {
            if suite.is_last {
                indent.push_str("   ");
            } else {
                swrite!(
                    indent,
                    "{}  ",
                    self.chars
                        .vertical
                        .style(self.styles.fail_if(decorate_connector))
                );
            }
        }

        for test in &mut suite.tests {
            test.indent.clone_from(&indent);
        }

        let max_failed = suite.max_failed_index();
        let test_count = suite.tests.len();
        suite.suites = std::mem::take(&mut suite.suites)
            .into_iter()
            .enumerate()
            .map(|(idx, child)| {
                let decorate = max_failed.is_some_and(|max| test_count + idx < max);
                self.propagate_from(child, &indent, decorate)
            })
            .collect();

        tracing::trace!(
            title = %suite.title,
            decorate_connector,
            max_failed = ?max_failed,
            "propagated suite indent"
        );

        suite.indent = previous_indent.to_owned();
        suite
    }
}
