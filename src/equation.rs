use crate::{
    ast::{build::Builder, Eval, Tree},
    error::ParseError,
    lex::Lexer,
    value::Number,
};
use core::{fmt, str::FromStr};
use log::debug;

///
/// A parsed arithmetic expression, ready to be evaluated any number of times.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    tree: Tree,
}

impl Equation {
    ///
    /// Parse `src` in a single left-to-right pass.
    ///
    /// # Errors
    ///
    /// The first [`ParseError`] encountered; nothing is kept from a failed parse.
    ///
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        Self::try_parse(src)
            .inspect_err(|e| debug!("failed to parse {src:?}: {e}"))
    }

    fn try_parse(src: &str) -> Result<Self, ParseError> {
        let mut tokens = Lexer::new(src);
        let first = tokens.next().ok_or(ParseError::EmptyExpression)?;

        let mut builder = Builder::new(first)?;
        for token in tokens {
            builder.push(token)?;
        }

        Ok(Self {
            tree: builder.build()?,
        })
    }

    #[must_use]
    pub fn evaluate(&self) -> f64 {
        self.eval().get()
    }

    #[must_use]
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }
}

impl Eval for Equation {
    fn eval(&self) -> Number {
        self.tree.eval()
    }
}

impl FromStr for Equation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}
