use crate::bcd::Bcd;
use crate::calc::{CalcError, Op};
use nom::branch::alt;
use nom::character::complete::{char, digit0, digit1};
use nom::combinator::{opt, recognize};
use nom::sequence::{pair, preceded};
use nom::IResult;

/// One line of the batch protocol.
#[derive(Debug, PartialEq)]
pub enum Line {
    Push(Bcd),
    Apply(Op),
    Empty,
}

fn literal(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        opt(char('-')),
        alt((
            // digits, optionally a point and more digits
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            // or a leading point
            recognize(preceded(char('.'), digit1)),
        )),
    ))(input)
}

/// Classify a protocol line: blank, operator mnemonic, or decimal literal.
/// A bare `-` is the subtract operator; negative numbers arrive as
/// literals like `-5`.
pub fn parse_line(text: &str) -> Result<Line, CalcError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Line::Empty);
    }
    if let Some(op) = Op::from_mnemonic(text) {
        return Ok(Line::Apply(op));
    }
    match literal(text) {
        Ok(("", body)) => {
            let v: Bcd = body.parse().map_err(|_| CalcError::Parse)?;
            Ok(Line::Push(v))
        }
        _ => Err(CalcError::Parse),
    }
}
