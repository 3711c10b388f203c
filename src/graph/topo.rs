//! Dependency-first ordering of an acyclic graph.

use std::collections::HashSet;

use super::DependencyGraph;
use crate::node_id::NodeId;

/// A [`DependencyGraph`] proven free of cycles.
///
/// Only obtainable through [`DependencyGraph::into_acyclic`], so sorting can
/// never observe a cycle.
#[derive(Debug)]
pub struct AcyclicGraph {
    graph: DependencyGraph,
}

impl AcyclicGraph {
    pub(super) const fn new(graph: DependencyGraph) -> Self {
        Self { graph }
    }

    /// Borrow the underlying graph.
    #[must_use]
    pub const fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Every node exactly once, each after all of the nodes it requires.
    ///
    /// Traversal starts from nodes nobody requires, in scan order, then
    /// sweeps up anything still unvisited. The relative order of nodes the
    /// dependencies leave unordered is not part of the contract.
    #[must_use]
    pub fn sorted(&self) -> Vec<NodeId> {
        let graph = &self.graph;
        let mut sorter = Sorter {
            graph,
            visited: HashSet::with_capacity(graph.len()),
            order: Vec::with_capacity(graph.len()),
        };
        let seeds = graph
            .ids()
            .filter(|id| !graph.is_required(id))
            .chain(graph.ids());
        for seed in seeds {
            sorter.visit(seed);
        }
        sorter.order
    }
}

struct Sorter<'a> {
    graph: &'a DependencyGraph,
    visited: HashSet<&'a NodeId>,
    order: Vec<NodeId>,
}

impl<'a> Sorter<'a> {
    /// Post-order walk from `start`; each node is emitted after its
    /// requirements, visited in declaration order.
    fn visit(&mut self, start: &'a NodeId) {
        if !self.visited.insert(start) {
            return;
        }
        let graph = self.graph;
        let mut stack: Vec<(&'a NodeId, usize)> = vec![(start, 0)];
        while let Some((node, next)) = stack.last_mut() {
            let current: &'a NodeId = *node;
            let Some(dep) = graph.requires_of(current).get(*next) else {
                self.order.push(current.clone());
                stack.pop();
                continue;
            };
            *next += 1;
            if self.visited.insert(dep) {
                stack.push((dep, 0));
            }
        }
    }
}
