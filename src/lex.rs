use nom::{
    branch::alt,
    bytes::complete::{take_till1, take_while1},
    combinator::{all_consuming, map},
};

pub type Result<'src, O> = nom::IResult<&'src str, O>;

///
/// Splits an expression into value and operator substrings.
///
/// Every maximal run of literal characters (see [`is_literal_char`]) is one
/// token. Whatever sits between two runs is trimmed and, when anything is
/// left, becomes a token of its own. No meaning is attached to the pieces;
/// deciding whether `"+"` is an operator or `"1.2.3"` a number is up to the
/// consumer.
///
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    src: &'src str,
}

#[must_use]
pub const fn is_literal_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

///
/// Whether `src` is made up of literal characters only.
///
#[must_use]
pub fn is_literal(src: &str) -> bool {
    all_consuming(literal)(src).is_ok()
}

///
/// A maximal run of literal characters, assuming no preceding whitespace.
///
#[allow(clippy::missing_errors_doc)]
pub fn literal(src: &str) -> Result<&str> {
    take_while1(is_literal_char)(src)
}

///
/// Everything up to the next literal character, trimmed.
///
/// The result may be empty when the gap is whitespace only.
///
#[allow(clippy::missing_errors_doc)]
pub fn gap(src: &str) -> Result<&str> {
    map(take_till1(is_literal_char), str::trim)(src)
}

impl<'src> Lexer<'src> {
    #[must_use]
    pub fn new(src: &'src str) -> Self {
        Self { src }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = &'src str;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.src.is_empty() {
            let (src, tok) = alt((literal, gap))(self.src).ok()?;
            self.src = src;

            if !tok.is_empty() {
                return Some(tok);
            }
        }

        None
    }
}
