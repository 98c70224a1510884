//! # wirekit
//!
//! Resolves circuits of named 16-bit wires connected by bitwise logic
//! gates. A circuit is a list of assignments such as `x AND y -> d`, in any
//! order; wires may be read before the line that defines them.
//!
//! ```
//! use wirekit::{AssignmentTable, Resolver};
//!
//! let table = AssignmentTable::parse(["x AND y -> d", "123 -> x", "456 -> y"])?;
//! let mut resolver = Resolver::new(&table);
//! assert_eq!(resolver.resolve("d")?, 72);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod netlist;
pub mod resolve;
pub mod signal;

// Re-export commonly used types
pub use netlist::{
    load_circuit, parse_instruction, AssignmentTable, Expression, Netlist, Operand, ParseError,
    SourceError, TableError, WireId,
};
pub use resolve::{resolve_all, ResolveError, Resolver, ResultStore, Strategy};
pub use signal::Signal;
