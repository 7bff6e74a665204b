//! Computation records and the JSON document they are loaded from.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProcessorError;

/// Operand placeholder for the most recently computed result.
pub const ANS_MARKER: &str = "ANS";

/// The operation a record asks for.
///
/// Names outside the supported set are kept as `Unknown` so that loading
/// never fails on them; the evaluator rejects them when the record runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Display,
    ApiCompute,
    Unknown(String),
}

impl Operation {
    pub fn from_name(name: &str) -> Self {
        match name {
            "add" => Operation::Add,
            "subtract" => Operation::Subtract,
            "multiply" => Operation::Multiply,
            "divide" => Operation::Divide,
            "display" => Operation::Display,
            "api-compute" => Operation::ApiCompute,
            other => Operation::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Display => "display",
            Operation::ApiCompute => "api-compute",
            Operation::Unknown(name) => name,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Operation {
    fn from(name: String) -> Self {
        Operation::from_name(&name)
    }
}

impl From<&str> for Operation {
    fn from(name: &str) -> Self {
        Operation::from_name(name)
    }
}

impl From<Operation> for String {
    fn from(operation: Operation) -> Self {
        operation.name().to_string()
    }
}

/// One entry of a record's `values` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operand {
    Ans,
    Literal(String),
}

impl From<String> for Operand {
    fn from(raw: String) -> Self {
        if raw == ANS_MARKER {
            Operand::Ans
        } else {
            Operand::Literal(raw)
        }
    }
}

impl From<&str> for Operand {
    fn from(raw: &str) -> Self {
        Operand::from(raw.to_string())
    }
}

impl From<Operand> for String {
    fn from(operand: Operand) -> Self {
        match operand {
            Operand::Ans => ANS_MARKER.to_string(),
            Operand::Literal(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Computation {
    pub operation: Operation,
    #[serde(default)]
    pub values: Vec<Operand>,
}

impl Computation {
    pub fn new<O, I, V>(operation: O, values: I) -> Self
    where
        O: Into<Operation>,
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        Self {
            operation: operation.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Top-level shape of a computations file: `{"computations": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputationList {
    pub computations: Vec<Computation>,
}

impl ComputationList {
    pub fn from_json_str(json: &str) -> Result<Self, ProcessorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProcessorError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn into_computations(self) -> Vec<Computation> {
        self.computations
    }
}
