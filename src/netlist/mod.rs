//! Circuit description: the expression model, the instruction parser,
//! and the assignment table built from a list of instructions.
//!
//! This module provides:
//! - [`Expression`] / [`Operand`] - the closed gate grammar
//! - [`parse_instruction`] - one line of text → `(wire, expression)`
//! - [`AssignmentTable`] - every wire's definition, built once
//! - Loading instruction files from disk

pub mod expr;
pub mod parser;
pub mod source;
pub mod table;

pub use expr::{Expression, Operand, WireId};
pub use parser::{parse_instruction, ParseError};
pub use source::{load_circuit, read_instructions, SourceError};
pub use table::{AssignmentTable, Netlist, TableError};
