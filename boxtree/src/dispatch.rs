// Copyright (c) The boxtree Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, Result,
    errors::InputSource,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use boxtree_reporter::{
    BoxtreeExitCode, RunStats, TestFileResult, TreeReporter, parse_results,
    write_str::{LineSink, LineWriter},
};
use camino::Utf8PathBuf;
use std::io::Read;

/// Render test results as a box-drawing tree.
///
/// Reads test file results as JSON (a single result object, or an array of
/// them) and prints each file's tests as a tree, with the path to every
/// failure highlighted.
#[derive(Debug, clap::Parser)]
#[command(
    version,
    styles = crate::output::help_styles(),
    max_term_width = 100,
)]
pub struct BoxtreeApp {
    #[command(flatten)]
    output: OutputOpts,

    /// Do not print the summary line after all results
    #[arg(long)]
    no_summary: bool,

    /// Result files to read, or `-` for standard input
    #[arg(value_name = "FILES", default_value = "-")]
    files: Vec<Utf8PathBuf>,
}

impl BoxtreeApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let stdin_count = self.files.iter().filter(|path| path.as_str() == "-").count();
        if stdin_count > 1 {
            return Err(ExpectedError::stdin_repeated(stdin_count));
        }

        let mut inputs = Vec::with_capacity(self.files.len());
        for path in self.files {
            let source = if path == "-" {
                InputSource::Stdin
            } else {
                InputSource::File(path)
            };
            let results = read_results(&source)?;
            inputs.push((source, results));
        }

        let styles = output.tree_styles();
        let reporter = TreeReporter::new(&styles);
        let mut writer = LineWriter::new(output_writer.stdout_writer());

        let mut stats = RunStats::default();
        for (source, results) in &inputs {
            let fallback_path = match source {
                InputSource::Stdin => None,
                InputSource::File(path) => Some(path.as_path()),
            };
            for result in results {
                let file_stats = reporter
                    .report_file(result, fallback_path, &mut writer)
                    .map_err(ExpectedError::write_output_error)?;
                stats.merge(&file_stats);
            }
        }

        if !self.no_summary {
            write_summary(&stats, &styles, &mut writer)
                .map_err(ExpectedError::write_output_error)?;
        }
        writer.flush().map_err(ExpectedError::write_output_error)?;

        tracing::debug!(
            files = stats.files,
            failed_files = stats.failed_files,
            tests = stats.total(),
            "finished reporting"
        );

        if stats.is_success() {
            Ok(BoxtreeExitCode::OK)
        } else {
            Ok(BoxtreeExitCode::TEST_RUN_FAILED)
        }
    }
}

fn read_results(source: &InputSource) -> Result<Vec<TestFileResult>> {
    let json = match source {
        InputSource::Stdin => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .map_err(|err| ExpectedError::results_read_error(source.clone(), err))?;
            json
        }
        InputSource::File(path) => fs_err::read_to_string(path)
            .map_err(|err| ExpectedError::results_read_error(source.clone(), err))?,
    };

    let results = parse_results(&json)
        .map_err(|err| ExpectedError::results_parse_error(source.clone(), err))?;
    tracing::debug!("read {} results from {source}", results.len());
    Ok(results)
}

fn write_summary(
    stats: &RunStats,
    styles: &boxtree_reporter::TreeStyles,
    sink: &mut dyn LineSink,
) -> std::io::Result<()> {
    // Separates the summary from the last file's output.
    if stats.files > 0 {
        sink.write_line("")?;
    }
    sink.write_line(&stats.summary_line(styles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Color;
    use camino_tempfile::Utf8TempDir;
    use clap::Parser;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const MATH_RESULTS: &str = indoc! {r#"
        [
            {
                "testFilePath": "src/math.test.js",
                "suite": {
                    "suites": [
                        {
                            "title": "math",
                            "tests": [
                                { "title": "adds", "status": "passed", "duration": 2 },
                                { "title": "divides", "status": "failed" }
                            ]
                        }
                    ]
                },
                "failureMessage": "  ● math › divides"
            },
            { "testFilePath": "src/skipped.test.js", "skipped": true }
        ]
    "#};

    const PASSING_RESULTS: &str = indoc! {r#"
        {
            "suite": {
                "tests": [
                    { "title": "works", "status": "passed" },
                    { "title": "later", "status": "todo" }
                ]
            }
        }
    "#};

    fn run(args: &[&str]) -> (Result<i32>, String) {
        let app = BoxtreeApp::try_parse_from(std::iter::once("boxtree").chain(args.iter().copied()))
            .expect("arguments are valid");
        let mut writer = OutputWriter::Test { stdout: Vec::new() };
        let result = app.exec(OutputContext::for_tests(Color::Never), &mut writer);
        let OutputWriter::Test { stdout } = writer else {
            unreachable!("test writer was set above");
        };
        (result, String::from_utf8(stdout).expect("output is UTF-8"))
    }

    fn write_file(dir: &Utf8TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).expect("wrote results file");
        path.into_string()
    }

    #[test]
    fn test_failing_results() {
        let dir = Utf8TempDir::new().unwrap();
        let path = write_file(&dir, "results.json", MATH_RESULTS);

        let (result, stdout) = run(&[path.as_str()]);
        assert_eq!(result.unwrap(), BoxtreeExitCode::TEST_RUN_FAILED);
        assert_eq!(
            stdout,
            indoc! {"
                 FAIL  src/math.test.js
                ┃
                ┃    ┏━━━━━━┓
                ┗━━┳━┫ math ┃
                   ┃ ┗━━━━━━┛
                   ┣━━━━ ✓ adds (2 ms)
                   ┗━━━━ ✕ divides
                  ● math › divides

                Tests: 1 failed, 1 passed, 2 total
            "}
        );
    }

    #[test]
    fn test_passing_results_use_file_path() {
        let dir = Utf8TempDir::new().unwrap();
        let path = write_file(&dir, "passing.json", PASSING_RESULTS);

        let (result, stdout) = run(&["--no-summary", path.as_str()]);
        assert_eq!(result.unwrap(), BoxtreeExitCode::OK);

        let lines: Vec<_> = stdout.lines().collect();
        assert_eq!(lines[0], format!(" PASS  {path}"));
        assert_eq!(&lines[1..], &["┃", "┣━━━━ ✓ works", "┗━━━━ ✎ later"]);
    }

    #[test]
    fn test_multiple_files_merge_stats() {
        let dir = Utf8TempDir::new().unwrap();
        let math = write_file(&dir, "math.json", MATH_RESULTS);
        let passing = write_file(&dir, "passing.json", PASSING_RESULTS);

        let (result, stdout) = run(&[passing.as_str(), math.as_str()]);
        assert_eq!(result.unwrap(), BoxtreeExitCode::TEST_RUN_FAILED);
        assert_eq!(
            stdout.lines().last(),
            Some("Tests: 1 failed, 1 todo, 2 passed, 4 total")
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = Utf8TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        let (result, stdout) = run(&[path.as_str()]);
        let err = result.unwrap_err();
        assert!(
            matches!(
                &err,
                ExpectedError::ResultsReadError { input: InputSource::File(p), .. } if *p == path
            ),
            "unexpected error: {err:?}"
        );
        assert_eq!(err.process_exit_code(), BoxtreeExitCode::SETUP_ERROR);
        assert!(stdout.is_empty(), "nothing is printed before all inputs are read");
    }

    #[test]
    fn test_invalid_json() {
        let dir = Utf8TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "bad.json",
            r#"{ "suite": { "tests": [ { "status": "flaky" } ] } }"#,
        );

        let (result, _) = run(&[path.as_str()]);
        let err = result.unwrap_err();
        assert!(
            matches!(err, ExpectedError::ResultsParseError { .. }),
            "unexpected error: {err:?}"
        );
        assert_eq!(err.process_exit_code(), BoxtreeExitCode::SETUP_ERROR);
    }

    #[test]
    fn test_stdin_repeated() {
        let dir = Utf8TempDir::new().unwrap();
        let path = write_file(&dir, "passing.json", PASSING_RESULTS);

        // Rejected before standard input or any file is read.
        let (result, stdout) = run(&["-", path.as_str(), "-"]);
        let err = result.unwrap_err();
        assert!(
            matches!(err, ExpectedError::StdinRepeated { count: 2 }),
            "unexpected error: {err:?}"
        );
        assert_eq!(err.process_exit_code(), BoxtreeExitCode::SETUP_ERROR);
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_no_results_summary() {
        let dir = Utf8TempDir::new().unwrap();
        let path = write_file(&dir, "empty.json", "[]");

        let (result, stdout) = run(&[path.as_str()]);
        assert_eq!(result.unwrap(), BoxtreeExitCode::OK);
        assert_eq!(stdout, "Tests: 0 total\n");
    }
}
