//! File dependency graph.
//!
//! The graph is an arena: nodes live in an insertion-ordered map keyed by
//! [`NodeId`] and edges are stored as lists of identifiers, so cyclic
//! dependencies never translate into cyclic ownership. It is filled once by a
//! [`GraphBuilder`] and is read-only afterwards.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use catena::graph::GraphBuilder;
//! use catena::node_id::NodeId;
//!
//! let root = Utf8Path::new("/project");
//! let base = NodeId::resolve(root, "base.txt");
//! let app = NodeId::resolve(root, "app.txt");
//!
//! let mut builder = GraphBuilder::new(root);
//! builder.add_file(base.clone());
//! builder.add_file(app.clone());
//! builder.add_requires(&app, ["base.txt", "missing.txt"]);
//!
//! let graph = builder.build();
//! assert_eq!(graph.requires_of(&app), &[base.clone()]);
//! assert!(graph.is_required(&base));
//!
//! let order = graph.into_acyclic().expect("acyclic").sorted();
//! assert_eq!(order, vec![base, app]);
//! ```

mod cycle;
mod topo;

pub use cycle::CycleError;
pub use topo::AcyclicGraph;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

use crate::node_id::NodeId;

/// One discovered file and the files it requires.
#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    requires: Vec<NodeId>,
}

impl Node {
    const fn new(id: NodeId) -> Self {
        Self {
            id,
            requires: Vec::new(),
        }
    }

    /// Canonical identifier of the file.
    #[must_use]
    pub const fn id(&self) -> &NodeId {
        &self.id
    }

    /// Resolved dependencies in declaration order, duplicates included.
    #[must_use]
    pub fn requires(&self) -> &[NodeId] {
        &self.requires
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

/// Immutable dependency graph over the files of one run.
#[derive(Debug)]
pub struct DependencyGraph {
    root: Utf8PathBuf,
    nodes: IndexMap<NodeId, Node>,
    required_by: HashSet<NodeId>,
}

impl DependencyGraph {
    /// Root directory the graph was built for.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of resolved edges, duplicates included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.requires.len()).sum()
    }

    /// Look up a node by identifier.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Iterate over nodes in scan order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate over node identifiers in scan order.
    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Dependencies of `id`; empty for unknown identifiers.
    #[must_use]
    pub fn requires_of(&self, id: &NodeId) -> &[NodeId] {
        self.nodes.get(id).map(Node::requires).unwrap_or_default()
    }

    /// Whether at least one node requires `id`.
    #[must_use]
    pub fn is_required(&self, id: &NodeId) -> bool {
        self.required_by.contains(id)
    }

    /// Whether the graph contains any directed cycle, in any component.
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        cycle::find_cycle(self).is_some()
    }

    /// Return the members of one directed cycle, if any exists.
    ///
    /// The cycle starts at its smallest identifier and repeats it at the end,
    /// so a file requiring itself is reported as `[a, a]`.
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<NodeId>> {
        cycle::find_cycle(self)
    }

    /// Prove the graph acyclic, unlocking topological sorting.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] naming the members of a detected cycle.
    pub fn into_acyclic(self) -> Result<AcyclicGraph, CycleError> {
        match cycle::find_cycle(&self) {
            Some(members) => Err(CycleError::new(&self.root, &members)),
            None => Ok(AcyclicGraph::new(self)),
        }
    }
}

/// Accumulates discovered files and their directives into a
/// [`DependencyGraph`].
#[derive(Debug)]
pub struct GraphBuilder {
    root: Utf8PathBuf,
    nodes: IndexMap<NodeId, Node>,
    required_by: HashSet<NodeId>,
    dropped: usize,
}

impl GraphBuilder {
    /// Start a graph for files under `root`.
    ///
    /// `root` must already be canonical so that directive paths resolve to
    /// the same identifiers as scanned paths.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            nodes: IndexMap::new(),
            required_by: HashSet::new(),
            dropped: 0,
        }
    }

    /// Register a discovered file. Returns `false` if it was already known.
    pub fn add_file(&mut self, id: NodeId) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id.clone(), Node::new(id));
        true
    }

    /// Attach the raw directive paths declared by `dependent`.
    ///
    /// Each path is resolved against the root. Paths that do not name a known
    /// file are dropped without error; a self-reference becomes an ordinary
    /// edge.
    pub fn add_requires<I, S>(&mut self, dependent: &NodeId, raw_paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.nodes.contains_key(dependent) {
            debug!(%dependent, "ignoring directives of unknown file");
            return;
        }
        let mut resolved = Vec::new();
        for raw in raw_paths {
            let target = NodeId::resolve(&self.root, raw.as_ref());
            if self.nodes.contains_key(&target) {
                debug!(%dependent, dependency = %target, "recorded dependency");
                self.required_by.insert(target.clone());
                resolved.push(target);
            } else {
                debug!(
                    %dependent,
                    directive = raw.as_ref(),
                    "dropping directive that names no discovered file",
                );
                self.dropped += 1;
            }
        }
        if let Some(node) = self.nodes.get_mut(dependent) {
            node.requires.extend(resolved);
        }
    }

    /// Number of directives dropped because their target was unknown.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> DependencyGraph {
        DependencyGraph {
            root: self.root,
            nodes: self.nodes,
            required_by: self.required_by,
        }
    }
}
