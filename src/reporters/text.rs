use std::time::Duration;
use colored::*;
use chrono::Local;
use log::warn;

use crate::core::sink::Sink;
use crate::core::test::{RunParameters, StatusCounts, StatusKind, TestRecord};
use crate::reporters::Reporter;

/// Text reporter for console output
pub struct TextReporter<S: Sink> {
    sink: S,
    verbose: bool,
    quiet: bool,
    color: bool,
    counts: StatusCounts,
}

impl<S: Sink> TextReporter<S> {
    /// Create a new text reporter
    pub fn new(sink: S, verbose: bool, quiet: bool) -> Self {
        Self { sink, verbose, quiet, color: true, counts: StatusCounts::default() }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn counts(&self) -> StatusCounts {
        self.counts
    }

    fn line(&mut self, line: &str) {
        if let Err(e) = self.sink.write_line(line) {
            warn!("Failed to write report line: {}", e);
        }
    }

    fn paint(&self, text: &str, paint: fn(&str) -> ColoredString) -> String {
        if self.color {
            paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Format a test status, colored when enabled
    fn format_status(&self, kind: StatusKind) -> String {
        match kind {
            StatusKind::Passed => self.paint("✓ PASS", |s| s.green().bold()),
            StatusKind::Failed => self.paint("✗ FAIL", |s| s.red().bold()),
            StatusKind::Error => self.paint("⚠ ERROR", |s| s.yellow().bold()),
            StatusKind::NotRun => self.paint("⏸ SKIP", |s| s.blue().bold()),
        }
    }

    /// Human-readable form of an elapsed millisecond count
    fn format_elapsed(millis: &str) -> Option<String> {
        match millis.parse::<u64>() {
            Ok(0) | Err(_) => None,
            Ok(ms) => Some(humantime::format_duration(Duration::from_millis(ms)).to_string()),
        }
    }
}

impl<S: Sink> Reporter for TextReporter<S> {
    fn starting_test_run(&mut self, parameters: &RunParameters) {
        self.counts = StatusCounts::default();
        if self.quiet {
            return;
        }

        let title = self.paint("TEST RUN STARTING", |s| s.bold());
        self.line(&title);
        self.line("=================");
        self.line(&format!("Started: {}", Local::now().format("%Y-%m-%d %H:%M:%S %Z")));

        if self.verbose {
            if let Some(dir) = &parameters.work_directory {
                self.line(&format!("  Work directory: {}", dir.display()));
            }
            if let Some(dir) = &parameters.report_directory {
                self.line(&format!("  Report directory: {}", dir.display()));
            }
            if !parameters.tests.is_empty() {
                self.line(&format!("  Tests: {}", parameters.tests.join(", ")));
            }
        }
    }

    fn starting_test(&mut self, test: &dyn TestRecord) {
        if self.quiet || !self.verbose {
            return;
        }

        let name = self.paint(&test.presentation_name(), |s| s.cyan());
        let repeat_mode = test.repeat_mode();
        if repeat_mode.is_repeated() {
            self.line(&format!("Starting test: {} (repeat {})", name, repeat_mode));
        } else {
            self.line(&format!("Starting test: {}", name));
        }
        if let Ok(hint) = test.location_hint() {
            self.line(&format!("  Location: {}", hint));
        }
    }

    fn finished_test(&mut self, test: &dyn TestRecord) {
        let kind = test.status().kind;
        self.counts.record(kind);
        if self.quiet {
            return;
        }

        let mut line = format!("{} {}", self.format_status(kind), test.presentation_name());
        if let Some(elapsed) = Self::format_elapsed(&test.elapsed_millis()) {
            line.push_str(&format!(" ({})", elapsed));
        }
        self.line(&line);

        let reason = &test.status().reason;
        if kind != StatusKind::Passed && !reason.is_empty() {
            self.line(&format!("  Reason: {}", reason));
        }
        if self.verbose {
            self.line(&format!("  Output: {}", test.output_file().display()));
        }
    }

    fn stopping_test_run(&mut self) {
        if self.verbose && !self.quiet {
            self.line("Stopping test run...");
        }
    }

    fn finished_test_run(&mut self, all_ok: bool) {
        let overall = if all_ok { StatusKind::Passed } else { StatusKind::Failed };
        let counts = self.counts;
        let summary = format!(
            "{} passed: {}, failed: {}, error: {}, not run: {}",
            self.format_status(overall),
            counts.passed,
            counts.failed,
            counts.error,
            counts.not_run
        );

        if self.quiet {
            self.line(&summary);
            return;
        }

        let title = self.paint("TEST RUN RESULTS", |s| s.bold());
        self.line("");
        self.line(&title);
        self.line("================");
        self.line(&format!("Total: {}", counts.total()));
        self.line(&summary);
    }

    fn error(&mut self, message: &str) {
        let label = self.paint("ERROR", |s| s.red().bold());
        self.line(&format!("{}: {}", label, message));
    }
}
