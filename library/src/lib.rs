//! Evaluates ordered lists of computation records.
//!
//! Each record names an operation and its operands; the operand `ANS`
//! refers to the result of the previous record. See [`processor`] for the
//! evaluator and its instrumentation wrappers.

pub mod error;
pub mod model;
pub mod output;
pub mod processor;
pub mod service;

pub use error::ProcessorError;
pub use model::{ANS_MARKER, Computation, ComputationList, Operand, Operation, Value};
pub use output::{MemorySink, OutputSink, StdoutSink};
pub use processor::{CountingProcessor, Evaluator, Processor, Statistics, TimingProcessor};
pub use service::{DEFAULT_SERVICE_URL, ExpressionService, HttpExpressionService};
