// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Glyphs and styles used to draw result trees.

use crate::status::TestStatus;
use owo_colors::Style;

/// The box-drawing characters used to draw a result tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxChars {
    /// The line printed above the whole tree: `┃`.
    pub start: &'static str,
    /// Branch to a node that has later siblings: `┣`.
    pub branch: &'static str,
    /// Branch to the last node among its siblings: `┗`.
    pub last: &'static str,
    /// Vertical connector: `┃`.
    pub vertical: &'static str,
    /// Vertical with a connection to the left: `┫`.
    pub tee_left: &'static str,
    /// Bottom-right corner of a box: `┛`.
    pub bottom_right: &'static str,
    /// Top-left corner of a box: `┏`.
    pub top_left: &'static str,
    /// Horizontal with a connection downwards: `┳`.
    pub tee_down: &'static str,
    /// Horizontal bar: `━`.
    pub horizontal: &'static str,
    /// Top-right corner of a box: `┓`.
    pub top_right: &'static str,
}

impl BoxChars {
    /// Heavy box-drawing characters.
    pub const HEAVY: BoxChars = BoxChars {
        start: "┃",
        branch: "┣",
        last: "┗",
        vertical: "┃",
        tee_left: "┫",
        bottom_right: "┛",
        top_left: "┏",
        tee_down: "┳",
        horizontal: "━",
        top_right: "┓",
    };

    /// Returns a horizontal bar of the specified width.
    pub fn hbar(&self, width: usize) -> String {
        self.horizontal.repeat(width)
    }

    /// Returns the branch glyph for a node, depending on whether it's the last
    /// among its siblings.
    pub fn branch_for(&self, is_last: bool) -> &'static str {
        if is_last { self.last } else { self.branch }
    }
}

/// Styles for result trees.
///
/// The default value is uncolorized: every style is plain and produces no
/// escape sequences. Call [`Self::colorize`] to switch to the terminal palette.
#[derive(Clone, Debug, Default)]
pub struct TreeStyles {
    /// Whether [`Self::colorize`] has been called.
    pub is_colorized: bool,
    /// Failure paths: connectors, failed suites and failed test icons.
    pub fail: Style,
    /// Passed test icons.
    pub pass: Style,
    /// Pending test icons.
    pub pending: Style,
    /// Todo test icons.
    pub todo: Style,
    /// Dimmed test titles.
    pub dim: Style,
    /// File names in headers.
    pub bold: Style,
    /// The `PASS` badge in file headers.
    pub pass_badge: Style,
    /// The `FAIL` badge in file headers.
    pub fail_badge: Style,
    /// Counts in the summary line.
    pub count: Style,
}

impl TreeStyles {
    /// Switches to the terminal palette.
    pub fn colorize(&mut self) {
        self.is_colorized = true;
        self.fail = Style::new().red();
        self.pass = Style::new().green();
        self.pending = Style::new().yellow();
        self.todo = Style::new().magenta();
        self.dim = Style::new().dimmed();
        self.bold = Style::new().bold();
        self.pass_badge = Style::new().green().reversed().bold();
        self.fail_badge = Style::new().red().reversed().bold();
        self.count = Style::new().bold();
    }

    /// Returns the style for the icon of a test with the given status.
    pub fn status(&self, status: TestStatus) -> Style {
        match status {
            TestStatus::Passed => self.pass,
            TestStatus::Failed => self.fail,
            TestStatus::Pending => self.pending,
            TestStatus::Todo => self.todo,
        }
    }

    /// Returns the failure style if `decorate` is true, and a plain style otherwise.
    pub fn fail_if(&self, decorate: bool) -> Style {
        if decorate { self.fail } else { Style::new() }
    }
}
