//! Cycle detection for the file dependency graph.
//!
//! Every node starts in the `unexplored` set. The outer loop picks any
//! unexplored node and walks depth-first from it with an explicit stack. The
//! walk keeps a path-local set holding only the nodes on the current branch:
//! meeting one of those again closes a cycle. A node leaves the path set when
//! its branch is unwound and leaves `unexplored` once all of its dependencies
//! have been walked, after which no later walk re-enters it. Sibling branches
//! of a diamond therefore never see each other's nodes as "on the path".

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use itertools::Itertools;
use miette::Diagnostic;
use thiserror::Error;

use super::DependencyGraph;
use crate::node_id::NodeId;

/// A circular dependency prevents ordering the files.
#[derive(Debug, Error, Diagnostic)]
#[error("circular dependency detected: {}", .cycle.iter().join(" -> "))]
#[diagnostic(
    code(catena::graph::cycle),
    help("remove one of the `require` directives along the cycle; no output was written")
)]
pub struct CycleError {
    cycle: Vec<Utf8PathBuf>,
}

impl CycleError {
    pub(super) fn new(root: &Utf8Path, members: &[NodeId]) -> Self {
        Self {
            cycle: members
                .iter()
                .map(|id| id.display_relative(root).to_owned())
                .collect(),
        }
    }

    /// Cycle members relative to the root, first member repeated at the end.
    #[must_use]
    pub fn cycle(&self) -> &[Utf8PathBuf] {
        &self.cycle
    }
}

pub(super) fn find_cycle(graph: &DependencyGraph) -> Option<Vec<NodeId>> {
    let mut detector = CycleDetector::new(graph);
    while let Some(start) = detector.unexplored.first().copied() {
        if let Some(cycle) = detector.walk(start) {
            return Some(canonicalize_cycle(cycle));
        }
    }
    None
}

struct Frame<'a> {
    node: &'a NodeId,
    next: usize,
}

struct CycleDetector<'a> {
    graph: &'a DependencyGraph,
    unexplored: IndexSet<&'a NodeId>,
    on_path: HashSet<&'a NodeId>,
    stack: Vec<Frame<'a>>,
}

impl<'a> CycleDetector<'a> {
    fn new(graph: &'a DependencyGraph) -> Self {
        Self {
            graph,
            unexplored: graph.ids().collect(),
            on_path: HashSet::new(),
            stack: Vec::new(),
        }
    }

    fn walk(&mut self, start: &'a NodeId) -> Option<Vec<NodeId>> {
        let graph = self.graph;
        self.enter(start);
        while let Some(frame) = self.stack.last_mut() {
            let Some(dep) = graph.requires_of(frame.node).get(frame.next) else {
                let finished = frame.node;
                self.stack.pop();
                self.on_path.remove(finished);
                self.unexplored.swap_remove(finished);
                continue;
            };
            frame.next += 1;
            if self.on_path.contains(dep) {
                return Some(self.close_cycle(dep));
            }
            if self.unexplored.contains(dep) {
                self.enter(dep);
            }
        }
        None
    }

    fn enter(&mut self, node: &'a NodeId) {
        self.on_path.insert(node);
        self.stack.push(Frame { node, next: 0 });
    }

    /// Members of the current path from `repeated` onwards, closed by
    /// `repeated` itself.
    fn close_cycle(&self, repeated: &NodeId) -> Vec<NodeId> {
        let mut cycle: Vec<NodeId> = self
            .stack
            .iter()
            .skip_while(|frame| frame.node != repeated)
            .map(|frame| frame.node.clone())
            .collect();
        cycle.push(repeated.clone());
        cycle
    }
}

/// Rotate a closed cycle so it starts at its smallest member.
fn canonicalize_cycle(mut cycle: Vec<NodeId>) -> Vec<NodeId> {
    let Some(last) = cycle.pop() else {
        return cycle;
    };
    if let Some(start) = cycle.iter().position_min() {
        cycle.rotate_left(start);
    }
    let closing = cycle.first().cloned().unwrap_or(last);
    cycle.push(closing);
    cycle
}
