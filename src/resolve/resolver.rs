//! Recursive, memoized circuit resolver.
//!
//! Resolving a wire walks its dependencies depth first. Every computed
//! signal is cached, so each gate is evaluated at most once per resolver,
//! and the set of wires currently on the walk is tracked to catch cycles.

use crate::netlist::{AssignmentTable, Netlist, WireId};
use crate::resolve::store::ResultStore;
use crate::resolve::{evaluate, ResolveError};
use crate::signal::Signal;
use std::collections::HashSet;

/// Computes wire signals on demand from a read-only netlist.
///
/// The cache belongs to this resolver alone. Independent resolvers may
/// share the same netlist.
pub struct Resolver<'a, N: Netlist + ?Sized = AssignmentTable> {
    netlist: &'a N,
    store: ResultStore,
    /// Wires being resolved, outermost first.
    path: Vec<WireId>,
    on_path: HashSet<WireId>,
    evaluations: u64,
    trace: Option<Vec<(WireId, Signal)>>,
}

impl<'a, N: Netlist + ?Sized> Resolver<'a, N> {
    /// Create a resolver with an empty cache.
    pub fn new(netlist: &'a N) -> Self {
        Self {
            netlist,
            store: ResultStore::new(),
            path: Vec::new(),
            on_path: HashSet::new(),
            evaluations: 0,
            trace: None,
        }
    }

    /// Record every gate evaluation in order (see [`Resolver::trace`]).
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    /// Resolve the signal on `wire`.
    ///
    /// A failure leaves every previously cached signal in place.
    pub fn resolve(&mut self, wire: &str) -> Result<Signal, ResolveError> {
        let result = self.resolve_wire(wire, None);
        if result.is_err() {
            self.path.clear();
            self.on_path.clear();
        }
        result
    }

    /// Resolve every assignment target, stopping at the first failure.
    pub fn resolve_all(&mut self) -> Result<&ResultStore, ResolveError> {
        let netlist = self.netlist;
        for wire in netlist.targets() {
            self.resolve(wire.as_str())?;
        }
        Ok(&self.store)
    }

    /// Resolve every assignment target, collecting failures instead of
    /// stopping. Wires that resolve are cached as usual.
    pub fn resolve_each(&mut self) -> Vec<(WireId, ResolveError)> {
        let netlist = self.netlist;
        netlist
            .targets()
            .into_iter()
            .filter_map(|wire| {
                self.resolve(wire.as_str())
                    .err()
                    .map(|e| (wire.clone(), e))
            })
            .collect()
    }

    fn resolve_wire(
        &mut self,
        wire: &str,
        referenced_by: Option<&WireId>,
    ) -> Result<Signal, ResolveError> {
        if let Some(value) = self.store.get(wire) {
            return Ok(value);
        }

        if self.on_path.contains(wire) {
            let start = self.path.iter().position(|w| w.as_str() == wire).unwrap_or(0);
            let mut cycle = self.path[start..].to_vec();
            cycle.push(WireId::new(wire));
            return Err(ResolveError::CircularDependency {
                wire: WireId::new(wire),
                cycle,
            });
        }

        let netlist = self.netlist;
        let expr = netlist
            .expression(wire)
            .ok_or_else(|| ResolveError::UnknownWire {
                wire: WireId::new(wire),
                referenced_by: referenced_by.cloned(),
            })?;

        let id = WireId::new(wire);
        self.path.push(id.clone());
        self.on_path.insert(id.clone());

        let value = evaluate(expr, |dep| self.resolve_wire(dep.as_str(), Some(&id)))?;

        self.path.pop();
        self.on_path.remove(wire);
        self.evaluations += 1;
        if let Some(trace) = self.trace.as_mut() {
            trace.push((id.clone(), value));
        }
        self.store.insert(id, value);

        Ok(value)
    }

    /// Signals resolved so far.
    pub fn results(&self) -> &ResultStore {
        &self.store
    }

    pub fn into_results(self) -> ResultStore {
        self.store
    }

    /// Number of gates evaluated (cache misses) so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Evaluated wires in evaluation order, if tracing is on.
    pub fn trace(&self) -> &[(WireId, Signal)] {
        self.trace.as_deref().unwrap_or(&[])
    }
}
