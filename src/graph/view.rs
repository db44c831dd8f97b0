//! The derived, read-only dependency structure handed to external renderers.

use crate::host::Host;
use crate::store::NodeRegistry;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A snapshot of the declared dependency structure.
///
/// Built from the `deps_by_node` mapping alone; renderers and analysis
/// passes depend on nothing else. Nodes are the union of declared node
/// names and declared source names, edges point from dependency to
/// dependent, and duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphView {
    deps_by_node: BTreeMap<String, BTreeSet<String>>,
}

impl GraphView {
    pub fn new(deps_by_node: BTreeMap<String, BTreeSet<String>>) -> Self {
        Self { deps_by_node }
    }

    pub fn from_registry<H: Host>(registry: &NodeRegistry<H>) -> Self {
        Self::new(registry.deps_by_node())
    }

    pub fn deps_by_node(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.deps_by_node
    }

    /// Union of every declared node name and every declared source name.
    pub fn nodes(&self) -> BTreeSet<String> {
        self.deps_by_node
            .keys()
            .cloned()
            .chain(self.deps_by_node.values().flatten().cloned())
            .collect()
    }

    /// One `(source, dependent)` pair per declared dependency.
    pub fn edges(&self) -> BTreeSet<(String, String)> {
        self.deps_by_node
            .iter()
            .flat_map(|(node, sources)| {
                sources
                    .iter()
                    .map(move |source| (source.clone(), node.clone()))
            })
            .collect()
    }

    /// JSON form of the mapping, for out-of-process renderers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.deps_by_node)
    }
}
