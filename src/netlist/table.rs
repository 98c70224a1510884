//! The assignment table: every wire and the expression that drives it.

use crate::netlist::expr::{Expression, WireId};
use crate::netlist::parser::{parse_instruction, ParseError};
use crate::signal::Signal;
use std::collections::HashMap;
use thiserror::Error;

/// Read access to wire definitions.
///
/// The resolvers only ever look expressions up through this trait.
pub trait Netlist {
    /// The expression assigned to `wire`, if any.
    fn expression(&self, wire: &str) -> Option<&Expression>;

    /// All assignment targets, sorted by id.
    fn targets(&self) -> Vec<&WireId>;
}

/// Mapping from wire id to its defining expression.
///
/// Built once from the instruction list; the resolvers only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentTable {
    assignments: HashMap<WireId, Expression>,
}

impl AssignmentTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every instruction line, failing on the first bad one.
    pub fn parse<I, S>(lines: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for line in lines {
            table.add_instruction(line.as_ref())?;
        }
        Ok(table)
    }

    /// Parse every instruction line, skipping and collecting bad ones.
    ///
    /// Returns the table built from the good lines along with each failure
    /// and its zero-based position in the input.
    pub fn parse_lenient<I, S>(lines: I) -> (Self, Vec<(usize, TableError)>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        let mut errors = Vec::new();
        for (index, line) in lines.into_iter().enumerate() {
            if let Err(e) = table.add_instruction(line.as_ref()) {
                errors.push((index, e));
            }
        }
        (table, errors)
    }

    /// Parse one line and add it. The table is untouched on failure.
    pub fn add_instruction(&mut self, line: &str) -> Result<(), TableError> {
        let (wire, expr) = parse_instruction(line)?;
        self.insert(wire, expr)
    }

    /// Add an assignment, rejecting a second definition of the same wire.
    pub fn insert(&mut self, wire: WireId, expr: Expression) -> Result<(), TableError> {
        if self.assignments.contains_key(&wire) {
            return Err(TableError::DuplicateAssignment { wire });
        }
        self.assignments.insert(wire, expr);
        Ok(())
    }

    /// A copy of this table with `wire` driven by a constant signal.
    ///
    /// Any previous definition of `wire` is replaced; this table is unchanged.
    /// Fails if `wire` is not a legal wire name.
    pub fn with_override(&self, wire: &str, value: Signal) -> Result<Self, TableError> {
        if !WireId::is_valid(wire) {
            return Err(TableError::InvalidWire {
                wire: wire.to_string(),
            });
        }
        let mut assignments = self.assignments.clone();
        assignments.insert(WireId::new(wire), Expression::Literal(value));
        Ok(Self { assignments })
    }

    pub fn get(&self, wire: &str) -> Option<&Expression> {
        self.assignments.get(wire)
    }

    pub fn contains(&self, wire: &str) -> bool {
        self.assignments.contains_key(wire)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterate assignments in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&WireId, &Expression)> {
        let mut entries: Vec<_> = self.assignments.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}

impl Netlist for AssignmentTable {
    fn expression(&self, wire: &str) -> Option<&Expression> {
        self.get(wire)
    }

    fn targets(&self) -> Vec<&WireId> {
        let mut targets: Vec<&WireId> = self.assignments.keys().collect();
        targets.sort();
        targets
    }
}

/// Errors raised while building an assignment table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("wire `{wire}` is assigned more than once")]
    DuplicateAssignment { wire: WireId },

    #[error("invalid wire name `{wire}`")]
    InvalidWire { wire: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::expr::Operand;

    #[test]
    fn test_parse_builds_table() {
        let table = AssignmentTable::parse(["123 -> x", "x AND y -> d", "456 -> y"]).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("x"), Some(&Expression::Literal(123)));
        assert_eq!(
            table.get("d"),
            Some(&Expression::And(
                Operand::Wire("x".into()),
                Operand::Wire("y".into())
            ))
        );
        assert!(table.get("z").is_none());
    }

    #[test]
    fn test_duplicate_assignment_rejected() {
        let err = AssignmentTable::parse(["1 -> a", "2 -> a"]).unwrap_err();
        assert_eq!(err, TableError::DuplicateAssignment { wire: "a".into() });
    }

    #[test]
    fn test_failed_insert_leaves_table_intact() {
        let mut table = AssignmentTable::new();
        table.add_instruction("1 -> a").unwrap();
        assert!(table.add_instruction("2 -> a").is_err());
        assert!(table.add_instruction("bogus").is_err());
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a"), Some(&Expression::Literal(1)));
    }

    #[test]
    fn test_parse_lenient_collects_errors() {
        let (table, errors) =
            AssignmentTable::parse_lenient(["1 -> a", "x XOR y -> b", "2 -> c", "3 -> a"]);
        assert_eq!(table.len(), 2);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].0, 1);
        assert!(matches!(errors[0].1, TableError::Parse(ParseError::UnknownOperator { .. })));
        assert_eq!(errors[1].0, 3);
        assert!(matches!(errors[1].1, TableError::DuplicateAssignment { .. }));
    }

    #[test]
    fn test_with_override() {
        let table = AssignmentTable::parse(["x -> b", "1 -> x"]).unwrap();
        let rewired = table.with_override("b", 99).unwrap();
        assert_eq!(rewired.get("b"), Some(&Expression::Literal(99)));
        assert_eq!(table.get("b"), Some(&Expression::WireRef("x".into())));

        let extended = table.with_override("q", 5).unwrap();
        assert_eq!(extended.len(), 3);
    }

    #[test]
    fn test_with_override_rejects_bad_names() {
        let table = AssignmentTable::parse(["1 -> x"]).unwrap();
        for name in ["X1", "", "Ab", "a b"] {
            assert_eq!(
                table.with_override(name, 5),
                Err(TableError::InvalidWire { wire: name.to_string() })
            );
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_targets_sorted() {
        let table = AssignmentTable::parse(["1 -> y", "2 -> ab", "3 -> a"]).unwrap();
        let targets: Vec<&str> = table.targets().into_iter().map(WireId::as_str).collect();
        assert_eq!(targets, vec!["a", "ab", "y"]);
        let ids: Vec<&str> = table.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, targets);
    }
}
