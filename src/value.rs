use crate::ast::Eval;
use derive_more::{Add, Display, Div, From, Mul, Sub};

///
/// A number.
///
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[derive(Add, Sub, Mul, Div)]
#[derive(From)]
#[derive(Display)]
#[mul(forward)]
#[div(forward)]
pub struct Number(f64);

impl Number {
    #[must_use]
    pub const fn new(f: f64) -> Self {
        Self(f)
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    ///
    /// Parse a decimal literal made only of ASCII digits and at most one `.`.
    ///
    /// Signs, exponents and the named specials (`inf`, `NaN`) are rejected,
    /// even though [`f64`]'s own parser would take them.
    ///
    #[must_use]
    pub fn parse_literal(token: &str) -> Option<Self> {
        if !crate::lex::is_literal(token) {
            return None;
        }

        token.parse::<f64>().ok().map(Self)
    }
}

impl From<Number> for f64 {
    fn from(n: Number) -> Self {
        n.0
    }
}

impl Eval for Number {
    fn eval(&self) -> Number {
        *self
    }
}
