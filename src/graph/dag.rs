//! Wraps the graph view in a petgraph digraph for topology checks and DOT
//! rendering.

use super::view::GraphView;
use crate::resolve::ResolveError;
use petgraph::algo::toposort;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::BTreeMap;

/// A materialized directed graph over the view's node and edge sets.
///
/// Edges run from dependency to dependent, so a topological order lists every
/// source before the nodes that read it.
#[derive(Debug, Clone, Default)]
pub struct DependencyDag {
    graph: DiGraph<String, String>,
}

impl DependencyDag {
    pub fn from_view(view: &GraphView) -> Self {
        let mut graph = DiGraph::new();
        let mut index: BTreeMap<String, NodeIndex> = BTreeMap::new();

        for name in view.nodes() {
            let idx = graph.add_node(name.clone());
            index.insert(name, idx);
        }
        for (source, dependent) in view.edges() {
            graph.add_edge(index[&source], index[&dependent], String::new());
        }

        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// A dependency-first ordering of all node names, or a cycle error
    /// naming one node on the offending loop.
    pub fn toposort(&self) -> Result<Vec<String>, ResolveError> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order
                .into_iter()
                .map(|idx| self.graph[idx].clone())
                .collect()),
            Err(cycle) => Err(ResolveError::Cycle {
                chain: self.graph[cycle.node_id()].clone(),
            }),
        }
    }

    /// Graphviz DOT text for the whole graph; edge labels are suppressed.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }
}
