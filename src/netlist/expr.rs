//! Expression model for wire assignments.
//!
//! The grammar is flat: a gate's inputs are always literals or wire
//! references, never nested expressions.

use crate::signal::Signal;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A wire identifier (lowercase alphabetic token).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(String);

impl WireId {
    /// Wrap a name without validating it.
    ///
    /// The parser only produces ids that pass [`WireId::is_valid`].
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Check whether a token is a legal wire name.
    pub fn is_valid(token: &str) -> bool {
        !token.is_empty() && token.bytes().all(|b| b.is_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for WireId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WireId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for WireId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A gate input: either a constant signal or another wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Literal(Signal),
    Wire(WireId),
}

impl Operand {
    /// The wire this operand reads, if any.
    pub fn wire(&self) -> Option<&WireId> {
        match self {
            Operand::Literal(_) => None,
            Operand::Wire(id) => Some(id),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) => write!(f, "{}", value),
            Operand::Wire(id) => write!(f, "{}", id),
        }
    }
}

/// The right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// Constant signal: `123 -> x`
    Literal(Signal),
    /// Alias of another wire: `lx -> y`
    WireRef(WireId),
    /// Bitwise complement: `NOT x -> h`
    Not(Operand),
    /// `x AND y -> d`
    And(Operand, Operand),
    /// `x OR y -> e`
    Or(Operand, Operand),
    /// `x LSHIFT 2 -> f`
    Lshift(Operand, u8),
    /// `y RSHIFT 2 -> g`
    Rshift(Operand, u8),
}

impl Expression {
    /// Wires this expression reads, left to right.
    pub fn dependencies(&self) -> impl Iterator<Item = &WireId> {
        let (first, second): (Option<&WireId>, Option<&WireId>) = match self {
            Expression::Literal(_) => (None, None),
            Expression::WireRef(id) => (Some(id), None),
            Expression::Not(a) | Expression::Lshift(a, _) | Expression::Rshift(a, _) => {
                (a.wire(), None)
            }
            Expression::And(a, b) | Expression::Or(a, b) => (a.wire(), b.wire()),
        };
        first.into_iter().chain(second)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::WireRef(id) => write!(f, "{}", id),
            Expression::Not(a) => write!(f, "NOT {}", a),
            Expression::And(a, b) => write!(f, "{} AND {}", a, b),
            Expression::Or(a, b) => write!(f, "{} OR {}", a, b),
            Expression::Lshift(a, n) => write!(f, "{} LSHIFT {}", a, n),
            Expression::Rshift(a, n) => write!(f, "{} RSHIFT {}", a, n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(name: &str) -> Operand {
        Operand::Wire(WireId::from(name))
    }

    #[test]
    fn test_wire_id_validation() {
        assert!(WireId::is_valid("lx"));
        assert!(WireId::is_valid("a"));
        assert!(!WireId::is_valid(""));
        assert!(!WireId::is_valid("Ab"));
        assert!(!WireId::is_valid("x1"));
        assert!(!WireId::is_valid("NOT"));
    }

    #[test]
    fn test_dependencies() {
        let expr = Expression::And(wire("x"), wire("y"));
        let deps: Vec<&str> = expr.dependencies().map(WireId::as_str).collect();
        assert_eq!(deps, vec!["x", "y"]);

        let expr = Expression::Or(Operand::Literal(1), wire("cj"));
        let deps: Vec<&str> = expr.dependencies().map(WireId::as_str).collect();
        assert_eq!(deps, vec!["cj"]);

        assert_eq!(Expression::Literal(7).dependencies().count(), 0);
        assert_eq!(Expression::Lshift(Operand::Literal(3), 2).dependencies().count(), 0);
    }

    #[test]
    fn test_display_renders_instruction_grammar() {
        assert_eq!(Expression::Literal(123).to_string(), "123");
        assert_eq!(Expression::WireRef(WireId::from("lx")).to_string(), "lx");
        assert_eq!(Expression::Not(wire("x")).to_string(), "NOT x");
        assert_eq!(Expression::Or(Operand::Literal(1), wire("y")).to_string(), "1 OR y");
        assert_eq!(Expression::Rshift(wire("y"), 2).to_string(), "y RSHIFT 2");
    }

    #[test]
    fn test_wire_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&WireId::from("ab")).unwrap();
        assert_eq!(json, "\"ab\"");
    }
}
