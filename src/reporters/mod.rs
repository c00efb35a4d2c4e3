pub mod teamcity;
pub mod text;

use crate::core::test::{RunParameters, TestRecord};

/// Observer of harness lifecycle callbacks.
///
/// The harness calls these in order for a single run. Implementations must
/// not fail or panic: reporting never aborts the run being reported.
pub trait Reporter {
    /// Report the start of a test run
    fn starting_test_run(&mut self, parameters: &RunParameters);

    /// Report the start of a single test execution
    fn starting_test(&mut self, test: &dyn TestRecord);

    /// Report the result of a single test execution
    fn finished_test(&mut self, test: &dyn TestRecord);

    /// The harness is about to stop; may precede `finished_test_run`
    fn stopping_test_run(&mut self);

    /// Report the end of the test run
    fn finished_test_run(&mut self, all_ok: bool);

    /// Relay a harness error message
    fn error(&mut self, message: &str);
}
