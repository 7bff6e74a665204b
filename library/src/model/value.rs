//! Values flowing through the evaluator and into the ANS slot.

use std::fmt;

use crate::error::ProcessorError;

/// A resolved operand or an operation result.
///
/// Literals stay as `Text` until an arithmetic handler coerces them, so
/// `display` can hand back exactly what it was given.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Coerces the value to a base-10 floating-point number.
    ///
    /// `operation` only names the caller in the error.
    pub fn to_number(&self, operation: &str) -> Result<f64, ProcessorError> {
        match self {
            Value::Number(number) => Ok(*number),
            Value::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ProcessorError::invalid_operand(operation, text.as_str())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(number) => write!(f, "{}", number),
            Value::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}
