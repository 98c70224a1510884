//! Resolved wire signals.

use crate::netlist::WireId;
use crate::signal::Signal;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Read-only view of the signals resolved so far.
///
/// Only the resolvers in this module can add entries; a value, once stored,
/// never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStore {
    values: HashMap<WireId, Signal>,
}

impl ResultStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, wire: WireId, value: Signal) {
        debug_assert!(
            self.values.get(&wire).map_or(true, |&old| old == value),
            "wire {} resolved to two different signals",
            wire
        );
        self.values.insert(wire, value);
    }

    /// The resolved signal of a wire, if it has been resolved.
    pub fn get(&self, wire: &str) -> Option<Signal> {
        self.values.get(wire).copied()
    }

    pub fn contains(&self, wire: &str) -> bool {
        self.values.contains_key(wire)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every resolved wire and its signal, sorted by wire id.
    pub fn all_resolved(&self) -> Vec<(&WireId, Signal)> {
        let mut entries: Vec<(&WireId, Signal)> =
            self.values.iter().map(|(id, &value)| (id, value)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Serialize for ResultStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.all_resolved())
    }
}
