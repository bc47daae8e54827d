#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod ast;
pub mod equation;
pub mod error;
pub mod lex;
pub mod op;
pub mod value;

pub mod prelude {
    pub use crate::ast::{build::Builder, Eval, Node, NodeId, Tree};
    pub use crate::equation::Equation;
    pub use crate::error::ParseError;
    pub use crate::lex::Lexer;
    pub use crate::op::Operator;
    pub use crate::value::Number;
}

///
/// Parse an infix expression such as `1 + 2 * 3`.
///
/// # Errors
///
/// See [`Equation::parse`](equation::Equation::parse).
///
pub fn parse(src: &str) -> Result<equation::Equation, error::ParseError> {
    equation::Equation::parse(src)
}

#[must_use]
pub fn evaluate(equation: &equation::Equation) -> value::Number {
    ast::Eval::eval(equation)
}
