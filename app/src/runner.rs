//! Builds the processor stack for a mode and runs it.

use log::info;
use numproc::{
    Computation, CountingProcessor, Evaluator, ExpressionService, OutputSink, Processor,
    ProcessorError, Statistics, TimingProcessor,
};

use crate::config::Mode;

/// Runs `computations` and, for instrumented modes, writes the statistics
/// report after them.
pub fn run_computations(
    computations: Vec<Computation>,
    mode: Mode,
    service: Box<dyn ExpressionService>,
    output: impl OutputSink + 'static,
) -> Result<(), ProcessorError> {
    info!("Running {} computations in {:?} mode", computations.len(), mode);
    let mut evaluator = Evaluator::new(computations, service).with_output(output);

    match mode {
        Mode::Plain => evaluator.run_all(),
        Mode::Count => run_with_statistics(CountingProcessor::new(evaluator)),
        Mode::Timing => {
            run_with_statistics(TimingProcessor::new(CountingProcessor::new(evaluator)))
        }
    }
}

fn run_with_statistics(mut processor: impl Statistics) -> Result<(), ProcessorError> {
    processor.run_all()?;
    processor.show_statistics()
}
