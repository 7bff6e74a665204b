use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),
    #[error("Invalid operand '{value}' for '{operation}': expected a decimal number")]
    InvalidOperand { operation: String, value: String },
    #[error("Missing operand {position} for '{operation}'")]
    MissingOperand { operation: String, position: usize },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Expression service error: {0}")]
    Service(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProcessorError {
    pub fn service(message: impl Into<String>) -> Self {
        ProcessorError::Service(message.into())
    }

    pub fn invalid_operand(operation: impl Into<String>, value: impl Into<String>) -> Self {
        ProcessorError::InvalidOperand {
            operation: operation.into(),
            value: value.into(),
        }
    }

    pub fn missing_operand(operation: impl Into<String>, position: usize) -> Self {
        ProcessorError::MissingOperand {
            operation: operation.into(),
            position,
        }
    }
}
