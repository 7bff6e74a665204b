//! The base processor: ANS substitution and per-operation handlers.

use std::rc::Rc;

use log::debug;

use super::Processor;
use crate::error::ProcessorError;
use crate::model::{Computation, Operand, Operation, Value};
use crate::output::{OutputSink, StdoutSink};
use crate::service::ExpressionService;

pub struct Evaluator {
    computations: Rc<[Computation]>,
    last_result: Option<Value>,
    service: Box<dyn ExpressionService>,
    output: Box<dyn OutputSink>,
}

impl Evaluator {
    /// Creates an evaluator that writes to standard output.
    pub fn new(computations: Vec<Computation>, service: Box<dyn ExpressionService>) -> Self {
        Self {
            computations: computations.into(),
            last_result: None,
            service,
            output: Box::new(StdoutSink),
        }
    }

    pub fn with_output(mut self, output: impl OutputSink + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    /// Replaces every ANS operand with the current result. Before the first
    /// result exists ANS resolves to `None`.
    fn resolve(&self, values: &[Operand]) -> Vec<Option<Value>> {
        values
            .iter()
            .map(|operand| match operand {
                Operand::Ans => self.last_result.clone(),
                Operand::Literal(raw) => Some(Value::Text(raw.clone())),
            })
            .collect()
    }

    fn display(
        &mut self,
        operation: &Operation,
        values: &[Option<Value>],
    ) -> Result<Value, ProcessorError> {
        let value = operand(operation, values, 0)?.clone();
        self.output.write_line(&value.to_string())?;
        Ok(value)
    }

    fn api_compute(
        &self,
        operation: &Operation,
        values: &[Option<Value>],
    ) -> Result<Value, ProcessorError> {
        let expression = operand(operation, values, 0)?.to_string();
        let result = self.service.evaluate_expression(&expression)?;
        Ok(Value::Number(result))
    }
}

impl Processor for Evaluator {
    fn computations(&self) -> Rc<[Computation]> {
        Rc::clone(&self.computations)
    }

    fn last_result(&self) -> Option<&Value> {
        self.last_result.as_ref()
    }

    fn set_last_result(&mut self, value: Value) {
        self.last_result = Some(value);
    }

    fn output(&mut self) -> &mut dyn OutputSink {
        self.output.as_mut()
    }

    fn run_one(&mut self, computation: &Computation) -> Result<Value, ProcessorError> {
        let operation = &computation.operation;
        let values = self.resolve(&computation.values);
        debug!("Running '{}' with {:?}", operation, values);

        match operation {
            Operation::Add => arithmetic(operation, &values, |a, b| a + b),
            Operation::Subtract => arithmetic(operation, &values, |a, b| a - b),
            Operation::Multiply => arithmetic(operation, &values, |a, b| a * b),
            Operation::Divide => {
                let (a, b) = numeric_pair(operation, &values)?;
                if b == 0.0 {
                    return Err(ProcessorError::DivisionByZero);
                }
                Ok(Value::Number(a / b))
            }
            Operation::Display => self.display(operation, &values),
            Operation::ApiCompute => self.api_compute(operation, &values),
            Operation::Unknown(name) => Err(ProcessorError::UnknownOperation(name.clone())),
        }
    }
}

fn operand<'a>(
    operation: &Operation,
    values: &'a [Option<Value>],
    position: usize,
) -> Result<&'a Value, ProcessorError> {
    values
        .get(position)
        .and_then(Option::as_ref)
        .ok_or_else(|| ProcessorError::missing_operand(operation.name(), position))
}

// Operands past the second are ignored.
fn numeric_pair(
    operation: &Operation,
    values: &[Option<Value>],
) -> Result<(f64, f64), ProcessorError> {
    let a = operand(operation, values, 0)?.to_number(operation.name())?;
    let b = operand(operation, values, 1)?.to_number(operation.name())?;
    Ok((a, b))
}

fn arithmetic(
    operation: &Operation,
    values: &[Option<Value>],
    apply: impl Fn(f64, f64) -> f64,
) -> Result<Value, ProcessorError> {
    let (a, b) = numeric_pair(operation, values)?;
    Ok(Value::Number(apply(a, b)))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::output::MemorySink;

    struct FixedService {
        result: f64,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl ExpressionService for FixedService {
        fn evaluate_expression(&self, expression: &str) -> Result<f64, ProcessorError> {
            self.calls.borrow_mut().push(expression.to_string());
            Ok(self.result)
        }
    }

    fn evaluator(computations: Vec<Computation>) -> (Evaluator, MemorySink) {
        let sink = MemorySink::new();
        let service = FixedService {
            result: 0.0,
            calls: Rc::default(),
        };
        let evaluator = Evaluator::new(computations, Box::new(service)).with_output(sink.clone());
        (evaluator, sink)
    }

    #[test]
    fn test_simple_add() {
        let (mut evaluator, sink) = evaluator(vec![
            Computation::new("add", ["1", "2"]),
            Computation::new("display", ["ANS"]),
        ]);
        evaluator.run_all().unwrap();

        assert_eq!(sink.lines(), vec!["3"]);
        assert_eq!(evaluator.last_result(), Some(&Value::Number(3.0)));
    }

    #[test]
    fn test_ans_before_any_result_is_missing_operand() {
        let (mut evaluator, _) = evaluator(vec![Computation::new("add", ["ANS", "1"])]);
        let err = evaluator.run_all().unwrap_err();

        match err {
            ProcessorError::MissingOperand { operation, position } => {
                assert_eq!(operation, "add");
                assert_eq!(position, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(evaluator.last_result(), None);
    }

    #[test]
    fn test_display_of_ans_before_any_result_is_missing_operand() {
        let (mut evaluator, sink) = evaluator(vec![Computation::new("display", ["ANS"])]);
        let err = evaluator.run_all().unwrap_err();

        match err {
            ProcessorError::MissingOperand { operation, position } => {
                assert_eq!(operation, "display");
                assert_eq!(position, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(sink.lines().is_empty(), "nothing should be printed");
        assert_eq!(evaluator.last_result(), None);
    }

    #[test]
    fn test_api_compute_of_ans_before_any_result_skips_service() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let service = Box::new(FixedService {
            result: 1.0,
            calls: Rc::clone(&calls),
        });
        let mut evaluator = Evaluator::new(vec![Computation::new("api-compute", ["ANS"])], service)
            .with_output(MemorySink::new());
        let err = evaluator.run_all().unwrap_err();

        assert!(matches!(
            err,
            ProcessorError::MissingOperand { position: 0, .. }
        ));
        assert!(calls.borrow().is_empty(), "service must not be called");
        assert_eq!(evaluator.last_result(), None);
    }

    #[test]
    fn test_too_few_operands_is_missing_operand() {
        let (mut evaluator, _) = evaluator(vec![Computation::new("multiply", ["2"])]);
        let err = evaluator.run_all().unwrap_err();
        assert!(matches!(err, ProcessorError::MissingOperand { position: 1, .. }));
    }

    #[test]
    fn test_extra_operands_are_ignored() {
        let (mut evaluator, sink) = evaluator(vec![
            Computation::new("subtract", ["10", "4", "100"]),
            Computation::new("display", ["ANS", "ignored"]),
        ]);
        evaluator.run_all().unwrap();
        assert_eq!(sink.lines(), vec!["6"]);
    }

    #[test]
    fn test_display_passes_literal_through() {
        let (mut evaluator, sink) = evaluator(vec![Computation::new("display", ["7.50"])]);
        evaluator.run_all().unwrap();

        assert_eq!(sink.lines(), vec!["7.50"]);
        assert_eq!(evaluator.last_result(), Some(&Value::Text("7.50".to_string())));
    }

    #[test]
    fn test_non_numeric_display_value_fails_later_arithmetic() {
        let (mut evaluator, sink) = evaluator(vec![
            Computation::new("display", ["hello"]),
            Computation::new("add", ["ANS", "1"]),
        ]);
        let err = evaluator.run_all().unwrap_err();

        assert!(matches!(err, ProcessorError::InvalidOperand { .. }));
        assert_eq!(sink.lines(), vec!["hello"]);
    }

    #[test]
    fn test_divide_by_negative_zero() {
        let (mut evaluator, _) = evaluator(vec![Computation::new("divide", ["1", "-0.0"])]);
        assert!(matches!(
            evaluator.run_all().unwrap_err(),
            ProcessorError::DivisionByZero
        ));
    }

    #[test]
    fn test_api_compute_sends_resolved_ans() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let service = Box::new(FixedService {
            result: 9.0,
            calls: Rc::clone(&calls),
        });
        let mut evaluator = Evaluator::new(Vec::new(), service).with_output(MemorySink::new());
        evaluator.set_last_result(Value::Number(4.5));

        let value = evaluator
            .run_one(&Computation::new("api-compute", ["ANS"]))
            .unwrap();
        assert_eq!(value, Value::Number(9.0));
        assert_eq!(*calls.borrow(), vec!["4.5"]);
    }

    #[test]
    fn test_run_one_does_not_store_result() {
        let (mut evaluator, _) = evaluator(Vec::new());
        let value = evaluator
            .run_one(&Computation::new("add", ["1", "1"]))
            .unwrap();

        assert_eq!(value, Value::Number(2.0));
        assert_eq!(evaluator.last_result(), None);
    }
}
