pub mod computation;
pub mod value;

pub use computation::{ANS_MARKER, Computation, ComputationList, Operand, Operation};
pub use value::Value;
