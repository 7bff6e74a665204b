//! External expression evaluation used by `api-compute`.

pub mod http;

pub use http::{DEFAULT_SERVICE_URL, HttpExpressionService, encode_expression};

use crate::error::ProcessorError;

/// Evaluates a mathematical expression somewhere outside the process.
///
/// Implementations block until the result is available. Transport and
/// response failures are reported as `ProcessorError::Service`.
pub trait ExpressionService {
    fn evaluate_expression(&self, expression: &str) -> Result<f64, ProcessorError>;
}

impl<S: ExpressionService + ?Sized> ExpressionService for Box<S> {
    fn evaluate_expression(&self, expression: &str) -> Result<f64, ProcessorError> {
        (**self).evaluate_expression(expression)
    }
}

/// Parses a service response body holding the decimal text of a number.
pub fn parse_service_response(body: &str) -> Result<f64, ProcessorError> {
    let text = body.trim();
    text.parse::<f64>().map_err(|_| {
        ProcessorError::service(format!("response is not a number: '{}'", text))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_response() {
        assert_eq!(parse_service_response("6.0").unwrap(), 6.0);
        assert_eq!(parse_service_response("16\n").unwrap(), 16.0);
    }

    #[test]
    fn test_unparsable_response_is_service_error() {
        let err = parse_service_response("Error: Undefined symbol x").unwrap_err();
        assert!(matches!(err, ProcessorError::Service(_)));
    }
}
