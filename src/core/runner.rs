use std::io::BufRead;
use log::{debug, info, warn};

use crate::core::error::{ProgressError, Result};
use crate::core::event::HarnessEvent;
use crate::core::test::StatusCounts;
use crate::reporters::Reporter;

/// What a replay dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub skipped_lines: usize,
    pub results: StatusCounts,
    pub run_finished: bool,
}

/// Drives a reporter from a JSON-lines log of harness callbacks.
pub struct EventReplay<'r> {
    reporter: &'r mut dyn Reporter,
}

impl<'r> EventReplay<'r> {
    pub fn new(reporter: &'r mut dyn Reporter) -> Self {
        Self { reporter }
    }

    /// Parse one log line. Line numbers are 1-based.
    pub fn parse_line(line: &str, line_number: usize) -> Result<HarnessEvent> {
        serde_json::from_str(line).map_err(|source| ProgressError::EventParse {
            line: line_number,
            source,
        })
    }

    /// Hand one event to the reporter
    pub fn dispatch(&mut self, event: &HarnessEvent) {
        match event {
            HarnessEvent::StartingTestRun { parameters } => self.reporter.starting_test_run(parameters),
            HarnessEvent::StartingTest { test } => self.reporter.starting_test(test),
            HarnessEvent::FinishedTest { test } => self.reporter.finished_test(test),
            HarnessEvent::StoppingTestRun => self.reporter.stopping_test_run(),
            HarnessEvent::FinishedTestRun { all_ok } => self.reporter.finished_test_run(*all_ok),
            HarnessEvent::Error { message } => self.reporter.error(message),
        }
    }

    /// Replay every event of `reader` in order.
    ///
    /// Malformed lines, including ones that are not UTF-8, are skipped;
    /// a read error ends the replay.
    pub fn replay<R: BufRead>(&mut self, mut reader: R) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();
        let mut buffer = Vec::new();
        let mut line_number = 0;

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            let line = match std::str::from_utf8(&buffer) {
                Ok(line) => line.trim_end_matches(['\n', '\r']),
                Err(e) => {
                    warn!("Skipping event: line {} is not UTF-8: {}", line_number, e);
                    summary.skipped_lines += 1;
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let event = match Self::parse_line(line, line_number) {
                Ok(event) => event,
                Err(e) => {
                    warn!("Skipping event: {}", e);
                    summary.skipped_lines += 1;
                    continue;
                }
            };

            debug!("Dispatching {:?}", event);
            self.dispatch(&event);
            summary.events += 1;
            match &event {
                HarnessEvent::FinishedTest { test } => summary.results.record(test.status.kind),
                HarnessEvent::FinishedTestRun { .. } => summary.run_finished = true,
                _ => {}
            }
        }

        info!(
            "Replayed {} events ({} tests, {} lines skipped)",
            summary.events,
            summary.results.total(),
            summary.skipped_lines
        );
        Ok(summary)
    }
}
