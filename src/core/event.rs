use serde::{Serialize, Deserialize};

use crate::core::test::{RunParameters, TestResult};

/// One harness callback, as recorded in a JSON-lines event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HarnessEvent {
    StartingTestRun {
        #[serde(default)]
        parameters: RunParameters,
    },
    StartingTest {
        test: TestResult,
    },
    FinishedTest {
        test: TestResult,
    },
    StoppingTestRun,
    FinishedTestRun {
        #[serde(default)]
        all_ok: bool,
    },
    Error {
        message: String,
    },
}
