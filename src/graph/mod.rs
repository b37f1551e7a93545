pub mod edge;
pub mod importance;
pub mod node;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Instant;

use petgraph::Direction;
use petgraph::Directed;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use rayon::prelude::*;
use tracing::debug;

use crate::language::classify_language;
use crate::parser::{extract, patterns::PatternCatalog};
use crate::resolver::{Snapshot, resolve};

use node::DependencyNode;

/// A vertex of the import graph, keyed by repository path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathNode {
    /// A snapshot file.
    File(String),
    /// A resolved import target that is not a snapshot file.
    Unresolved(String),
}

impl PathNode {
    pub fn path(&self) -> &str {
        match self {
            PathNode::File(p) | PathNode::Unresolved(p) => p,
        }
    }
}

/// The import graph of a whole snapshot.
///
/// - `graph`: one edge per (importer, resolved target) pair
/// - `path_index`: O(1) lookup of a path's vertex
/// - `nodes`: full per-file nodes, importance already scored
pub struct RepoGraph {
    pub graph: StableGraph<PathNode, (), Directed>,
    pub path_index: HashMap<String, NodeIndex>,
    pub nodes: BTreeMap<String, DependencyNode>,
}

impl RepoGraph {
    /// A graph with no files, used when the request carries no snapshot.
    pub fn empty() -> Self {
        Self {
            graph: StableGraph::new(),
            path_index: HashMap::new(),
            nodes: BTreeMap::new(),
        }
    }

    /// Extract and resolve every snapshot file, then score every node.
    ///
    /// Extraction runs in parallel; the catalog is only read.
    pub fn build(catalog: &PatternCatalog, snapshot: &Snapshot) -> Self {
        let start = Instant::now();

        let parsed: Vec<DependencyNode> = snapshot
            .par_iter()
            .map(|(path, content)| {
                let extracted = extract(catalog, content, classify_language(path));
                let dependencies = extracted
                    .imports
                    .iter()
                    .map(|link| link.retarget(resolve(path, &link.target_path, snapshot).path))
                    .collect();
                DependencyNode::new(path, dependencies, extracted.exports)
            })
            .collect();

        let mut repo = Self::empty();
        for node in &parsed {
            repo.add_file(&node.path);
        }
        for node in &parsed {
            let from = repo.path_index[&node.path];
            for link in &node.dependencies {
                let to = repo.add_target(&link.target_path);
                if repo.graph.find_edge(from, to).is_none() {
                    repo.graph.add_edge(from, to, ());
                }
            }
        }
        repo.nodes = parsed.into_iter().map(|n| (n.path.clone(), n)).collect();

        let scores: Vec<(String, u32)> = repo
            .nodes
            .values()
            .map(|n| (n.path.clone(), repo.score(&n.path, n.exports.len())))
            .collect();
        for (path, importance) in scores {
            if let Some(node) = repo.nodes.get_mut(&path) {
                node.importance = importance;
            }
        }

        debug!(
            files = repo.nodes.len(),
            edges = repo.graph.edge_count(),
            unresolved = repo.unresolved_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built repository graph"
        );

        repo
    }

    fn add_file(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.path_index.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(PathNode::File(path.to_owned()));
        self.path_index.insert(path.to_owned(), idx);
        idx
    }

    fn add_target(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.path_index.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(PathNode::Unresolved(path.to_owned()));
        self.path_index.insert(path.to_owned(), idx);
        idx
    }

    /// Number of import targets that are not snapshot files.
    pub fn unresolved_count(&self) -> usize {
        self.graph
            .node_indices()
            .filter(|&i| matches!(self.graph[i], PathNode::Unresolved(_)))
            .count()
    }

    /// Full node for a snapshot file.
    pub fn node(&self, path: &str) -> Option<&DependencyNode> {
        self.nodes.get(path)
    }

    /// Number of distinct other files whose dependency list contains `path`.
    pub fn inbound_count(&self, path: &str) -> usize {
        self.importers(path).len()
    }

    /// Importance of `path` with `export_count` exports against this graph.
    pub fn score(&self, path: &str, export_count: usize) -> u32 {
        importance::score(path, export_count, self.inbound_count(path))
    }

    /// Snapshot files (other than `path` itself) that import `path`, one entry
    /// per file, in path order.
    pub fn dependents(&self, path: &str) -> Vec<&DependencyNode> {
        self.importers(path)
            .into_iter()
            .filter_map(|p| self.nodes.get(p))
            .collect()
    }

    fn importers(&self, path: &str) -> Vec<&str> {
        let Some(&idx) = self.path_index.get(path) else {
            return Vec::new();
        };
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| self.graph[n].path())
            .filter(|p| *p != path && seen.insert(*p))
            .collect();
        out.sort_unstable();
        out
    }
}
