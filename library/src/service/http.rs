//! HTTP transport for mathjs-style endpoints (`GET <base>?expr=<expression>`).

use std::time::Duration;

use log::{debug, info};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::{ExpressionService, parse_service_response};
use crate::error::ProcessorError;

pub const DEFAULT_SERVICE_URL: &str = "http://api.mathjs.org/v4/";

/// Everything except ASCII alphanumerics and `-._~/` is percent-encoded,
/// so `+` becomes `%2B` rather than a space and `*()` are escaped too.
const EXPRESSION_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

pub fn encode_expression(expression: &str) -> String {
    utf8_percent_encode(expression, EXPRESSION_ENCODE_SET).to_string()
}

pub struct HttpExpressionService {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpExpressionService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            base_url: base_url.into(),
            agent: builder.build(),
        }
    }

    /// The exact URL requested for `expression`.
    pub fn request_url(&self, expression: &str) -> String {
        format!("{}?expr={}", self.base_url, encode_expression(expression))
    }
}

impl Default for HttpExpressionService {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL)
    }
}

impl ExpressionService for HttpExpressionService {
    fn evaluate_expression(&self, expression: &str) -> Result<f64, ProcessorError> {
        let url = self.request_url(expression);
        info!("Requesting expression service: {}", url);

        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| ProcessorError::service(format!("request to {} failed: {}", url, e)))?;
        let body = response.into_string().map_err(|e| {
            ProcessorError::service(format!("reading response from {} failed: {}", url, e))
        })?;
        debug!("Expression service answered '{}' for '{}'", body.trim(), expression);

        parse_service_response(&body)
    }
}
