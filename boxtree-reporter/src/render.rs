// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of decorated result trees.
//!
//! A suite is drawn as its title in a box, hanging off a branch:
//!
//! ```text
//! ┃    ┏━━━━━━━┓
//! ┣━━┳━┫ suite ┃
//! ┃  ┃ ┗━━━━━━━┛
//! ┃  ┗━━━━ ✓ test
//! ```
//!
//! The synthetic root is drawn as a single start line instead.

use crate::{
    duration::{FormatTime, display_millis},
    theme::{BoxChars, TreeStyles},
    tree::{DecoratedSuite, DecoratedTest},
    write_str::LineSink,
};
use owo_colors::{OwoColorize, Style};
use std::io;
use swrite::{SWrite, swrite};
use unicode_width::UnicodeWidthStr;

/// Renders a [`DecoratedSuite`] whose indents have been propagated.
pub struct TreeRenderer<'a> {
    chars: &'a BoxChars,
    styles: &'a TreeStyles,
    format_time: &'a dyn FormatTime,
}

impl<'a> TreeRenderer<'a> {
    /// Creates a new renderer.
    pub fn new(styles: &'a TreeStyles, format_time: &'a dyn FormatTime) -> Self {
        Self {
            chars: &BoxChars::HEAVY,
            styles,
            format_time,
        }
    }

    /// Renders `suite` and everything below it to `sink`, depth-first: a
    /// suite's tests first, then its child suites.
    pub fn render(&self, suite: &DecoratedSuite, sink: &mut dyn LineSink) -> io::Result<()> {
        if suite.skip {
            let line = self.chars.start.style(self.suite_style(suite)).to_string();
            sink.write_line(&line)?;
        } else {
            self.render_suite_box(suite, sink)?;
        }

        for test in &suite.tests {
            self.render_test(test, sink)?;
        }
        for child in &suite.suites {
            self.render(child, sink)?;
        }

        Ok(())
    }

    fn render_suite_box(&self, suite: &DecoratedSuite, sink: &mut dyn LineSink) -> io::Result<()> {
        let chars = self.chars;
        let style = self.suite_style(suite);
        let hbar = chars.hbar(suite.title.width() + 2);

        // The top and bottom of the box are aligned with the `┫` in the title
        // line, and the `┳` leads down to the suite's children.
        let top = format!(
            "{}    {}{hbar}{}",
            chars.vertical, chars.top_left, chars.top_right
        );
        let title = format!(
            "{branch}{h}{h}{tee_down}{h}{tee_left} {title} {vertical}",
            branch = chars.branch_for(suite.is_last),
            h = chars.horizontal,
            tee_down = chars.tee_down,
            tee_left = chars.tee_left,
            title = suite.title,
            vertical = chars.vertical,
        );
        let bottom_branch = if suite.is_last { " " } else { chars.vertical };
        let bottom = format!(
            "  {} {}{hbar}{}",
            chars.vertical, chars.last, chars.bottom_right
        );

        sink.write_line(&format!("{}{}", suite.indent, top.style(style)))?;
        sink.write_line(&format!("{}{}", suite.indent, title.style(style)))?;
        sink.write_line(&format!(
            "{}{}{}",
            suite.indent,
            bottom_branch.style(self.styles.fail_if(suite.later_sibling_fails)),
            bottom.style(style),
        ))
    }

    fn render_test(&self, test: &DecoratedTest, sink: &mut dyn LineSink) -> io::Result<()> {
        let info = test.status.info();
        let failed = info.counts_as_failure;

        let branch_style = self.styles.fail_if(failed || test.later_sibling_fails);
        let title_style = if info.dim_title {
            self.styles.dim
        } else {
            Style::new()
        };

        let mut title = test.title.clone();
        if let Some(millis) = display_millis(test.duration) {
            swrite!(title, " ({})", self.format_time.format_time(millis));
        }

        let line = format!(
            "{}{}{} {} {}",
            test.indent,
            self.chars.branch_for(test.is_last).style(branch_style),
            self.chars.hbar(4).style(self.styles.fail_if(failed)),
            info.icon.style(self.styles.status(test.status)),
            title.style(title_style),
        );
        sink.write_line(&line)
    }

    fn suite_style(&self, suite: &DecoratedSuite) -> Style {
        self.styles.fail_if(suite.status.is_failure())
    }
}
