//! Instruction parser.
//!
//! Syntax:
//! ```text
//! 123 -> x            ; literal
//! lx -> y             ; alias
//! NOT x -> h          ; complement
//! x AND y -> d        ; binary gate (AND, OR)
//! 1 OR y -> e         ; operands may be literals
//! y RSHIFT 2 -> g     ; shift (LSHIFT, RSHIFT) by 0-15
//! ```

use crate::netlist::expr::{Expression, Operand, WireId};
use crate::signal::{Signal, MAX_SHIFT};
use thiserror::Error;

/// Separator between the right-hand side and the target wire.
pub const ARROW: &str = "->";

/// Parse one trimmed instruction line into its target wire and expression.
pub fn parse_instruction(line: &str) -> Result<(WireId, Expression), ParseError> {
    let (rhs, target) = line.rsplit_once(ARROW).ok_or_else(|| ParseError::MissingArrow {
        line: line.to_string(),
    })?;

    let target = target.trim();
    if !WireId::is_valid(target) {
        return Err(ParseError::InvalidWire {
            line: line.to_string(),
            token: target.to_string(),
        });
    }

    let tokens: Vec<&str> = rhs.split_whitespace().collect();
    let expr = match tokens.as_slice() {
        [value] => match parse_operand(line, value)? {
            Operand::Literal(v) => Expression::Literal(v),
            Operand::Wire(id) => Expression::WireRef(id),
        },
        ["NOT", a] => Expression::Not(parse_operand(line, a)?),
        [a, op, b] => match *op {
            "AND" => Expression::And(parse_operand(line, a)?, parse_operand(line, b)?),
            "OR" => Expression::Or(parse_operand(line, a)?, parse_operand(line, b)?),
            "LSHIFT" => Expression::Lshift(parse_operand(line, a)?, parse_shift(line, b)?),
            "RSHIFT" => Expression::Rshift(parse_operand(line, a)?, parse_shift(line, b)?),
            _ => {
                return Err(ParseError::UnknownOperator {
                    line: line.to_string(),
                    operator: op.to_string(),
                })
            }
        },
        [op, _] => {
            return Err(ParseError::UnknownOperator {
                line: line.to_string(),
                operator: op.to_string(),
            })
        }
        _ => {
            return Err(ParseError::TokenCount {
                line: line.to_string(),
                count: tokens.len(),
            })
        }
    };

    Ok((WireId::new(target), expr))
}

fn parse_operand(line: &str, token: &str) -> Result<Operand, ParseError> {
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return parse_literal(line, token).map(Operand::Literal);
    }

    if WireId::is_valid(token) {
        return Ok(Operand::Wire(WireId::new(token)));
    }

    // Leading digit means a number was intended (e.g. `12a`)
    if token.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') {
        return Err(ParseError::InvalidLiteral {
            line: line.to_string(),
            token: token.to_string(),
        });
    }

    Err(ParseError::InvalidWire {
        line: line.to_string(),
        token: token.to_string(),
    })
}

fn parse_literal(line: &str, token: &str) -> Result<Signal, ParseError> {
    token.parse::<Signal>().map_err(|_| ParseError::InvalidLiteral {
        line: line.to_string(),
        token: token.to_string(),
    })
}

fn parse_shift(line: &str, token: &str) -> Result<u8, ParseError> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidLiteral {
            line: line.to_string(),
            token: token.to_string(),
        });
    }

    match token.parse::<u8>() {
        Ok(amount) if amount <= MAX_SHIFT => Ok(amount),
        _ => Err(ParseError::ShiftOutOfRange {
            line: line.to_string(),
            amount: token.to_string(),
        }),
    }
}

/// Errors for a line that matches none of the instruction grammars.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing `->` in instruction: {line}")]
    MissingArrow { line: String },

    #[error("expected 1, 2 or 3 tokens before `->`, found {count}: {line}")]
    TokenCount { line: String, count: usize },

    #[error("unknown operator `{operator}`: {line}")]
    UnknownOperator { line: String, operator: String },

    #[error("invalid literal `{token}`: {line}")]
    InvalidLiteral { line: String, token: String },

    #[error("invalid wire name `{token}`: {line}")]
    InvalidWire { line: String, token: String },

    #[error("shift amount `{amount}` outside 0-15: {line}")]
    ShiftOutOfRange { line: String, amount: String },
}

impl ParseError {
    /// The instruction text that failed to parse.
    pub fn line(&self) -> &str {
        match self {
            ParseError::MissingArrow { line }
            | ParseError::TokenCount { line, .. }
            | ParseError::UnknownOperator { line, .. }
            | ParseError::InvalidLiteral { line, .. }
            | ParseError::InvalidWire { line, .. }
            | ParseError::ShiftOutOfRange { line, .. } => line,
        }
    }
}
