//! Computation processors.
//!
//! `Evaluator` does the work. `CountingProcessor` and `TimingProcessor`
//! wrap another processor and observe each `run_one` call without changing
//! what it returns.

pub mod counting;
pub mod evaluator;
pub mod timing;

pub use counting::CountingProcessor;
pub use evaluator::Evaluator;
pub use timing::TimingProcessor;

use std::rc::Rc;

use crate::error::ProcessorError;
use crate::model::{Computation, Value};
use crate::output::OutputSink;

/// Something that can run computation records and holds the ANS slot.
pub trait Processor {
    /// The record sequence this processor was built with.
    fn computations(&self) -> Rc<[Computation]>;

    fn last_result(&self) -> Option<&Value>;

    fn set_last_result(&mut self, value: Value);

    fn output(&mut self) -> &mut dyn OutputSink;

    /// Runs a single record against the current ANS and returns its result.
    /// Does not store the result; `run_all` does that.
    fn run_one(&mut self, computation: &Computation) -> Result<Value, ProcessorError>;

    /// Runs every record in order, storing each result as the new ANS.
    ///
    /// Stops at the first failure. Results stored before the failure are
    /// kept.
    fn run_all(&mut self) -> Result<(), ProcessorError> {
        let computations = self.computations();
        for computation in computations.iter() {
            let value = self.run_one(computation)?;
            self.set_last_result(value);
        }
        Ok(())
    }
}

/// Processors that can report what they observed.
pub trait Statistics: Processor {
    /// Report lines, in the order `show_statistics` writes them.
    fn statistics(&self) -> Vec<String>;

    fn show_statistics(&mut self) -> Result<(), ProcessorError> {
        for line in self.statistics() {
            self.output().write_line(&line)?;
        }
        Ok(())
    }
}

/// The report line for the ANS slot.
pub(crate) fn last_result_line(value: Option<&Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "none".to_string(),
    }
}
