//! Iterative fixed-point resolver.
//!
//! Each pass evaluates every pending wire whose inputs are already known and
//! keeps the rest for the next pass. A pass that resolves nothing while wires
//! are still pending means the remaining wires sit on or behind a cycle.
//! No recursion is involved, so arbitrarily long dependency chains are fine.

use crate::netlist::{Netlist, WireId};
use crate::resolve::store::ResultStore;
use crate::resolve::{evaluate, ResolveError};
use crate::signal::Signal;
use std::collections::HashSet;

/// Why a wire could not be evaluated on this pass.
enum Stall {
    /// An input is defined but not resolved yet.
    Waiting,
    Unknown(WireId),
}

/// Resolve every assignment target.
pub fn resolve_all<N: Netlist + ?Sized>(netlist: &N) -> Result<ResultStore, ResolveError> {
    run(netlist, netlist.targets())
}

/// Resolve `wire` and everything it depends on.
///
/// Returns the signal together with the store of every wire that was
/// resolved on the way.
pub fn resolve<N: Netlist + ?Sized>(
    netlist: &N,
    wire: &str,
) -> Result<(Signal, ResultStore), ResolveError> {
    let pending = reachable(netlist, wire)?;
    let store = run(netlist, pending)?;
    let value = store
        .get(wire)
        .ok_or_else(|| ResolveError::UnknownWire {
            wire: WireId::new(wire),
            referenced_by: None,
        })?;
    Ok((value, store))
}

/// Every defined wire `wire` transitively reads, including itself.
fn reachable<'n, N: Netlist + ?Sized>(
    netlist: &'n N,
    wire: &str,
) -> Result<Vec<&'n WireId>, ResolveError> {
    let root = netlist
        .targets()
        .into_iter()
        .find(|id| id.as_str() == wire)
        .ok_or_else(|| ResolveError::UnknownWire {
            wire: WireId::new(wire),
            referenced_by: None,
        })?;

    let mut seen: HashSet<&WireId> = HashSet::new();
    let mut stack = vec![root];
    let mut found = Vec::new();
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        found.push(id);
        if let Some(expr) = netlist.expression(id.as_str()) {
            // Undefined inputs stay out; `run` reports them with their reader.
            stack.extend(
                expr.dependencies()
                    .filter(|dep| netlist.expression(dep.as_str()).is_some()),
            );
        }
    }
    found.sort();
    Ok(found)
}

fn run<N: Netlist + ?Sized>(
    netlist: &N,
    mut pending: Vec<&WireId>,
) -> Result<ResultStore, ResolveError> {
    let mut store = ResultStore::new();

    while !pending.is_empty() {
        let before = pending.len();
        let mut waiting = Vec::with_capacity(before);

        for wire in pending {
            let expr = netlist
                .expression(wire.as_str())
                .ok_or_else(|| ResolveError::UnknownWire {
                    wire: wire.clone(),
                    referenced_by: None,
                })?;

            let outcome = evaluate(expr, |dep| match store.get(dep.as_str()) {
                Some(value) => Ok(value),
                None if netlist.expression(dep.as_str()).is_some() => Err(Stall::Waiting),
                None => Err(Stall::Unknown(dep.clone())),
            });

            match outcome {
                Ok(value) => store.insert(wire.clone(), value),
                Err(Stall::Waiting) => waiting.push(wire),
                Err(Stall::Unknown(dep)) => {
                    return Err(ResolveError::UnknownWire {
                        wire: dep,
                        referenced_by: Some(wire.clone()),
                    })
                }
            }
        }

        if waiting.len() == before {
            return Err(find_cycle(netlist, &store, waiting[0]));
        }
        pending = waiting;
    }

    Ok(store)
}

/// Walk unresolved inputs from `start` until a wire repeats.
///
/// Only called once a pass has stalled: every unresolved wire then has an
/// unresolved, defined input, so the walk must close a loop.
fn find_cycle<N: Netlist + ?Sized>(
    netlist: &N,
    store: &ResultStore,
    start: &WireId,
) -> ResolveError {
    let mut path: Vec<WireId> = Vec::new();
    let mut current = start.clone();

    loop {
        if let Some(pos) = path.iter().position(|w| *w == current) {
            let mut cycle = path.split_off(pos);
            cycle.push(current.clone());
            return ResolveError::CircularDependency {
                wire: current,
                cycle,
            };
        }

        let next = netlist.expression(current.as_str()).and_then(|expr| {
            expr.dependencies()
                .find(|dep| !store.contains(dep.as_str()))
                .cloned()
        });
        path.push(current);

        match next {
            Some(dep) => current = dep,
            None => {
                // Unreachable for a stalled pass; report the walk as-is.
                let wire = path.last().cloned().unwrap_or_else(|| start.clone());
                return ResolveError::CircularDependency { wire, cycle: path };
            }
        }
    }
}
