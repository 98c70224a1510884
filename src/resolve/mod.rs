//! Circuit resolution.
//!
//! Two interchangeable strategies compute wire signals from an
//! [`AssignmentTable`](crate::netlist::AssignmentTable):
//! - [`Resolver`] - recursive, memoized, on demand
//! - [`worklist`] - iterative fixed point, no recursion depth limit
//!
//! Both stop with a [`ResolveError`] on unknown wires and dependency cycles.

pub mod resolver;
pub mod store;
pub mod worklist;

pub use resolver::Resolver;
pub use store::ResultStore;

use crate::netlist::{Expression, Netlist, Operand, WireId};
use crate::signal::{self, Signal};
use thiserror::Error;

/// How to resolve a whole circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Depth-first recursion with memoization.
    #[default]
    Recursive,
    /// Repeated passes over unresolved wires until nothing is left.
    Worklist,
}

/// Resolve every assignment target with the chosen strategy.
pub fn resolve_all<N>(netlist: &N, strategy: Strategy) -> Result<ResultStore, ResolveError>
where
    N: Netlist + ?Sized,
{
    match strategy {
        Strategy::Recursive => {
            let mut resolver = Resolver::new(netlist);
            resolver.resolve_all()?;
            Ok(resolver.into_results())
        }
        Strategy::Worklist => worklist::resolve_all(netlist),
    }
}

/// Apply an expression's gate, reading wire operands through `read`.
pub fn evaluate<F, E>(expr: &Expression, mut read: F) -> Result<Signal, E>
where
    F: FnMut(&WireId) -> Result<Signal, E>,
{
    let value = match expr {
        Expression::Literal(value) => *value,
        Expression::WireRef(id) => read(id)?,
        Expression::Not(a) => signal::not(operand(a, &mut read)?),
        Expression::And(a, b) => {
            let a = operand(a, &mut read)?;
            signal::and(a, operand(b, &mut read)?)
        }
        Expression::Or(a, b) => {
            let a = operand(a, &mut read)?;
            signal::or(a, operand(b, &mut read)?)
        }
        Expression::Lshift(a, n) => signal::lshift(operand(a, &mut read)?, *n),
        Expression::Rshift(a, n) => signal::rshift(operand(a, &mut read)?, *n),
    };
    Ok(value)
}

fn operand<F, E>(op: &Operand, read: &mut F) -> Result<Signal, E>
where
    F: FnMut(&WireId) -> Result<Signal, E>,
{
    match op {
        Operand::Literal(value) => Ok(*value),
        Operand::Wire(id) => read(id),
    }
}

/// Errors that stop the resolution of a wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("{}", unknown_wire_message(.wire, .referenced_by))]
    UnknownWire {
        wire: WireId,
        referenced_by: Option<WireId>,
    },

    #[error("wire `{wire}` depends on itself: {}", format_cycle(.cycle))]
    CircularDependency { wire: WireId, cycle: Vec<WireId> },
}

fn unknown_wire_message(wire: &WireId, referenced_by: &Option<WireId>) -> String {
    match referenced_by {
        Some(parent) => format!("unknown wire `{}` (read by `{}`)", wire, parent),
        None => format!("unknown wire `{}`", wire),
    }
}

fn format_cycle(cycle: &[WireId]) -> String {
    cycle
        .iter()
        .map(WireId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::AssignmentTable;

    fn no_wires(_: &WireId) -> Result<Signal, ()> {
        Err(())
    }

    #[test]
    fn test_evaluate_literal_gates() {
        let not_zero = Expression::Not(Operand::Literal(0));
        assert_eq!(evaluate(&not_zero, no_wires), Ok(65535));

        let shl = Expression::Lshift(Operand::Literal(0xFFFF), 1);
        assert_eq!(evaluate(&shl, no_wires), Ok(0xFFFE));
    }

    #[test]
    fn test_evaluate_reads_wires_in_order() {
        let expr = Expression::Or(Operand::Wire("x".into()), Operand::Wire("y".into()));
        let mut seen = Vec::new();
        let value = evaluate(&expr, |id| -> Result<Signal, ()> {
            seen.push(id.as_str().to_string());
            Ok(if id.as_str() == "x" { 0x0F00 } else { 0x00F0 })
        });
        assert_eq!(value, Ok(0x0FF0));
        assert_eq!(seen, vec!["x", "y"]);
    }

    #[test]
    fn test_strategies_agree() {
        let table = AssignmentTable::parse([
            "b AND c -> a",
            "d LSHIFT 3 -> b",
            "NOT d -> c",
            "1234 -> d",
        ])
        .unwrap();
        let recursive = resolve_all(&table, Strategy::Recursive).unwrap();
        let iterative = resolve_all(&table, Strategy::Worklist).unwrap();
        assert_eq!(recursive, iterative);
        assert_eq!(recursive.get("a"), Some((1234u16 << 3) & !1234u16));
    }

    #[test]
    fn test_error_messages() {
        let err = ResolveError::CircularDependency {
            wire: "a".into(),
            cycle: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "wire `a` depends on itself: a -> b -> a");

        let err = ResolveError::UnknownWire {
            wire: "z".into(),
            referenced_by: Some("d".into()),
        };
        assert_eq!(err.to_string(), "unknown wire `z` (read by `d`)");
    }
}
