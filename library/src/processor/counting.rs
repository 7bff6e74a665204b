//! Invocation counting around another processor.

use std::collections::BTreeMap;
use std::rc::Rc;

use super::{Processor, Statistics, last_result_line};
use crate::error::ProcessorError;
use crate::model::{Computation, Operation, Value};
use crate::output::OutputSink;

/// Counts how often each operation is run, then delegates to `inner`.
///
/// A record is counted before it runs, so records that fail are counted
/// too.
pub struct CountingProcessor<P> {
    inner: P,
    invocation_count: BTreeMap<Operation, u64>,
}

impl<P: Processor> CountingProcessor<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            invocation_count: BTreeMap::new(),
        }
    }

    pub fn invocation_count(&self) -> &BTreeMap<Operation, u64> {
        &self.invocation_count
    }

    pub fn count(&self, operation: &Operation) -> u64 {
        self.invocation_count.get(operation).copied().unwrap_or(0)
    }

    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.inner
    }

    pub(crate) fn record_invocation(&mut self, operation: &Operation) {
        *self.invocation_count.entry(operation.clone()).or_insert(0) += 1;
    }

    pub(crate) fn count_line(operation: &Operation, count: u64) -> String {
        format!("operation: {}, count: {}", operation, count)
    }
}

impl<P: Processor> Processor for CountingProcessor<P> {
    fn computations(&self) -> Rc<[Computation]> {
        self.inner.computations()
    }

    fn last_result(&self) -> Option<&Value> {
        self.inner.last_result()
    }

    fn set_last_result(&mut self, value: Value) {
        self.inner.set_last_result(value);
    }

    fn output(&mut self) -> &mut dyn OutputSink {
        self.inner.output()
    }

    fn run_one(&mut self, computation: &Computation) -> Result<Value, ProcessorError> {
        self.record_invocation(&computation.operation);
        self.inner.run_one(computation)
    }
}

impl<P: Processor> Statistics for CountingProcessor<P> {
    fn statistics(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .invocation_count
            .iter()
            .map(|(operation, count)| Self::count_line(operation, *count))
            .collect();
        lines.push(last_result_line(self.last_result()));
        lines
    }
}
