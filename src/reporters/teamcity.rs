use std::fs;
use std::path::Path;
use log::{debug, warn};

use crate::core::config::ReporterConfig;
use crate::core::error::ProgressError;
use crate::core::message::ServiceMessage;
use crate::core::sink::Sink;
use crate::core::test::{RunParameters, StatusKind, TestRecord};
use crate::reporters::Reporter;

/// Reporter emitting TeamCity service messages for a CI server to parse.
pub struct TeamCityReporter<S: Sink> {
    sink: S,
    config: ReporterConfig,
}

impl<S: Sink> TeamCityReporter<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, ReporterConfig::default())
    }

    pub fn with_config(sink: S, config: ReporterConfig) -> Self {
        Self { sink, config }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn emit(&mut self, message: ServiceMessage) {
        self.emit_raw(&message.to_string());
    }

    fn emit_raw(&mut self, line: &str) {
        if let Err(e) = self.sink.write_line(line) {
            warn!("Failed to write progress line: {}", e);
        }
    }

    /// Output of a test, lines joined by `\n`, or the configured placeholder.
    fn load_output(&self, file: &Path) -> String {
        match fs::read_to_string(file) {
            Ok(contents) => join_lines(&contents),
            Err(e) => {
                debug!("Failed to load {}: {}", file.display(), e);
                self.config.load_failure_message.clone()
            }
        }
    }

    fn location_hint(test: &dyn TestRecord) -> Option<String> {
        match test.location_hint() {
            Ok(hint) => Some(hint),
            Err(ProgressError::NoDescription(name)) => {
                debug!("No description file for {}", name);
                None
            }
            Err(e) => {
                debug!("Cannot resolve location of {}: {}", test.test_name(), e);
                None
            }
        }
    }
}

/// Lines terminated by `\r\n`, `\n` or a lone `\r`, rejoined with `\n`.
fn join_lines(contents: &str) -> String {
    let normalized = contents.replace("\r\n", "\n").replace('\r', "\n");
    normalized.lines().collect::<Vec<_>>().join("\n")
}

fn absolute_path(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

impl<S: Sink> Reporter for TeamCityReporter<S> {
    fn starting_test_run(&mut self, _parameters: &RunParameters) {
        let message = ServiceMessage::suite_started(&self.config.root_suite);
        self.emit(message);
    }

    fn starting_test(&mut self, test: &dyn TestRecord) {
        let presentation_name = test.presentation_name();
        let location = Self::location_hint(test);

        if test.opens_repeat_suite() {
            self.emit(ServiceMessage::suite_started(test.test_name()));
        }

        self.emit(
            ServiceMessage::new("testStarted")
                .attr("name", presentation_name)
                .optional_attr("locationHint", location),
        );
    }

    fn finished_test(&mut self, test: &dyn TestRecord) {
        let status = test.status();
        let kind = status.kind;
        let output_file = test.output_file();
        let elapsed = test.elapsed_millis();
        let presentation_name = test.presentation_name();

        if kind.is_failure() {
            if output_file.is_file() {
                let output = self.load_output(output_file);
                if !output.is_empty() {
                    self.emit(
                        ServiceMessage::new("testStdOut")
                            .attr("name", presentation_name.as_str())
                            .attr("out", output),
                    );
                }
            }
            self.emit(
                ServiceMessage::new("testFailed")
                    .attr("name", presentation_name.as_str())
                    .attr("message", status.reason.as_str()),
            );
        } else if kind == StatusKind::NotRun {
            self.emit(ServiceMessage::new("testIgnored").attr("name", presentation_name.as_str()));
        }

        // Failed output was already streamed as testStdOut.
        let output_path = (kind != StatusKind::Failed).then(|| absolute_path(output_file));
        let duration = (elapsed != "0").then_some(elapsed);
        self.emit(
            ServiceMessage::new("testFinished")
                .attr("name", presentation_name)
                .optional_attr("duration", duration)
                .optional_attr("outputFile", output_path),
        );

        if test.closes_repeat_suite() {
            self.emit(ServiceMessage::suite_finished(test.test_name()));
        }
    }

    fn stopping_test_run(&mut self) {}

    fn finished_test_run(&mut self, _all_ok: bool) {
        let message = ServiceMessage::suite_finished(&self.config.root_suite);
        self.emit(message);
    }

    fn error(&mut self, message: &str) {
        self.emit_raw(message);
    }
}
