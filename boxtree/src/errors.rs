// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use boxtree_reporter::{BoxtreeExitCode, errors::ResultsParseError};
use owo_colors::OwoColorize;
use std::{error::Error, fmt};
use thiserror::Error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

/// Where a set of results was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[doc(hidden)]
pub enum InputSource {
    /// Standard input.
    Stdin,
    /// A results file.
    File(camino::Utf8PathBuf),
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{path}"),
        }
    }
}

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that boxtree knows how to report.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("standard input was specified more than once")]
    StdinRepeated { count: usize },
    #[error("failed to read results from {input}")]
    ResultsReadError {
        input: InputSource,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to parse results from {input}")]
    ResultsParseError {
        input: InputSource,
        #[source]
        err: ResultsParseError,
    },
    #[error("error writing output")]
    WriteOutputError {
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    pub(crate) fn stdin_repeated(count: usize) -> Self {
        Self::StdinRepeated { count }
    }

    pub(crate) fn results_read_error(input: InputSource, err: std::io::Error) -> Self {
        Self::ResultsReadError { input, err }
    }

    pub(crate) fn results_parse_error(input: InputSource, err: ResultsParseError) -> Self {
        Self::ResultsParseError { input, err }
    }

    pub(crate) fn write_output_error(err: std::io::Error) -> Self {
        Self::WriteOutputError { err }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::StdinRepeated { .. }
            | Self::ResultsReadError { .. }
            | Self::ResultsParseError { .. } => BoxtreeExitCode::SETUP_ERROR,
            Self::WriteOutputError { .. } => BoxtreeExitCode::WRITE_OUTPUT_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::StdinRepeated { count } => {
                tracing::error!(
                    "{} was passed {count} times, but standard input can only be read once",
                    "-".style(styles.bold),
                );
                None
            }
            Self::ResultsReadError { input, err } => {
                tracing::error!("failed to read results from {}", input.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::ResultsParseError { input, err } => {
                tracing::error!(
                    "failed to parse results from {} (line {}, column {})",
                    input.style(styles.bold),
                    err.line(),
                    err.column(),
                );
                err.source()
            }
            Self::WriteOutputError { err } => {
                tracing::error!("failed to write output");
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            tracing::error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
