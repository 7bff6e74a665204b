//! Wall-clock timing layered over `CountingProcessor`.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::{CountingProcessor, Processor, Statistics, last_result_line};
use crate::error::ProcessorError;
use crate::model::{Computation, Operation, Value};
use crate::output::OutputSink;

/// Adds per-operation elapsed time to a `CountingProcessor`.
///
/// Each record is counted first, then only the processor underneath the
/// counter is timed. Every timed operation therefore has a count of at
/// least one.
pub struct TimingProcessor<P> {
    counter: CountingProcessor<P>,
    total_duration: BTreeMap<Operation, Duration>,
}

impl<P: Processor> TimingProcessor<P> {
    pub fn new(counter: CountingProcessor<P>) -> Self {
        Self {
            counter,
            total_duration: BTreeMap::new(),
        }
    }

    pub fn counter(&self) -> &CountingProcessor<P> {
        &self.counter
    }

    pub fn invocation_count(&self) -> &BTreeMap<Operation, u64> {
        self.counter.invocation_count()
    }

    pub fn total_duration(&self) -> &BTreeMap<Operation, Duration> {
        &self.total_duration
    }

    pub fn average_duration(&self, operation: &Operation) -> Option<Duration> {
        let total = self.total_duration.get(operation)?;
        let count = self.counter.count(operation);
        if count == 0 {
            return None;
        }
        Some(total.div_f64(count as f64))
    }
}

impl<P: Processor> Processor for TimingProcessor<P> {
    fn computations(&self) -> Rc<[Computation]> {
        self.counter.computations()
    }

    fn last_result(&self) -> Option<&Value> {
        self.counter.last_result()
    }

    fn set_last_result(&mut self, value: Value) {
        self.counter.set_last_result(value);
    }

    fn output(&mut self) -> &mut dyn OutputSink {
        self.counter.output()
    }

    fn run_one(&mut self, computation: &Computation) -> Result<Value, ProcessorError> {
        self.counter.record_invocation(&computation.operation);

        let started = Instant::now();
        let result = self.counter.inner_mut().run_one(computation);
        let elapsed = started.elapsed();

        *self
            .total_duration
            .entry(computation.operation.clone())
            .or_default() += elapsed;
        result
    }
}

impl<P: Processor> Statistics for TimingProcessor<P> {
    fn statistics(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (operation, count) in self.counter.invocation_count() {
            lines.push(CountingProcessor::<P>::count_line(operation, *count));
            if let Some(average) = self.average_duration(operation) {
                lines.push(format!(
                    "operation: {}, average duration (s): {}",
                    operation,
                    average.as_secs_f64()
                ));
            }
        }
        lines.push(last_result_line(self.last_result()));
        lines
    }
}
