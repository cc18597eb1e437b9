// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Display helpers for durations.

use std::fmt;

/// Formats a duration in whole milliseconds for display next to a test title.
pub trait FormatTime {
    /// Formats `millis` milliseconds.
    fn format_time(&self, millis: u64) -> String;
}

impl<F> FormatTime for F
where
    F: Fn(u64) -> String,
{
    fn format_time(&self, millis: u64) -> String {
        self(millis)
    }
}

/// The default [`FormatTime`] implementation, producing output like `1500 ms`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MillisFormatter;

impl FormatTime for MillisFormatter {
    fn format_time(&self, millis: u64) -> String {
        DisplayMillis(millis).to_string()
    }
}

/// Displays a number of milliseconds as `<n> ms`.
#[derive(Clone, Copy, Debug)]
pub struct DisplayMillis(pub u64);

impl fmt::Display for DisplayMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.0)
    }
}

/// Rounds a raw duration to whole milliseconds.
///
/// Returns `None` for durations that shouldn't be displayed at all: absent,
/// exactly zero, or not finite. Anything else is displayed, even if it rounds
/// to zero. Negative durations are clamped to zero.
pub(crate) fn display_millis(duration: Option<f64>) -> Option<u64> {
    let duration = duration?;
    if duration == 0.0 || !duration.is_finite() {
        return None;
    }
    // f64::round rounds half away from zero, and float-to-int casts saturate,
    // so negative values become 0.
    Some(duration.round() as u64)
}
