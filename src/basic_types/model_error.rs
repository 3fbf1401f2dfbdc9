use thiserror::Error;

use crate::basic_types::domain::SUP;

/// Errors raised by misuse of the model-building API. These are programmer
/// errors: nothing is retried and no partial model state is rolled back.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A scale factor below zero was supplied; domains only hold non-negative
    /// values, so a negative factor cannot be expressed.
    #[error("scale factors must be non-negative, got {0}")]
    NegativeScaleFactor(i64),
    /// `sum` or `product` was posted over zero variables.
    #[error("sum and product require at least one variable")]
    EmptyVariableList,
    /// A constant outside the representable band `[0, SUP]`.
    #[error("constant {0} lies outside the representable band [0, {SUP}]")]
    ConstantOutOfRange(u64),
}
