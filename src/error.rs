use crate::op::Operator;
use alloc::string::String;
use derive_more::Display;

///
/// Everything that can go wrong while turning text into an [`Equation`].
///
/// Parsing stops at the first error; no partial tree survives it.
///
/// [`Equation`]: crate::equation::Equation
///
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    /// A token in value position is not a decimal literal.
    #[display("`{token}` is not a valid number")]
    NumberFormat { token: String },

    /// A token in operator position is not one of `+ - * /`.
    #[display("`{token}` is not a valid operator")]
    InvalidOperator { token: String },

    /// The input stopped while `operator` was still waiting for its right operand.
    #[display("expression ends after `{operator}` with no right operand")]
    IncompleteExpression { operator: Operator },

    /// The input had no tokens at all.
    #[display("expression is empty")]
    EmptyExpression,
}

impl core::error::Error for ParseError {}

impl ParseError {
    pub(crate) fn number_format(token: &str) -> Self {
        Self::NumberFormat {
            token: token.into(),
        }
    }

    pub(crate) fn invalid_operator(token: &str) -> Self {
        Self::InvalidOperator {
            token: token.into(),
        }
    }
}
