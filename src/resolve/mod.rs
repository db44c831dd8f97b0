//! The resolution surface: argument sets, the host-wrapping `Graph`, and
//! ready-to-call node handles.
//!
//! `Graph` holds one host instance plus the shared registry for the host
//! type; every access resolves fresh from the live host state.

pub mod engine;
pub mod error;

pub use error::ResolveError;

use crate::host::Host;
use crate::store::{NodeId, NodeRegistry};
use engine::Resolver;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// The keyword-argument set handed to a node body.
///
/// Caller-supplied entries are inserted first and are never overwritten by
/// resolution: explicit always beats resolved.
#[derive(Clone, PartialEq, Eq)]
pub struct ArgSet<V>(BTreeMap<String, V>);

impl<V> Default for ArgSet<V> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<V> ArgSet<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaining insert, for call sites building a literal argument set.
    pub fn with(mut self, name: impl Into<String>, value: V) -> Self {
        self.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: V) {
        self.0.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.0.get(name)
    }

    /// Fetches an argument a body cannot do without.
    pub fn required(&self, name: &str) -> Result<&V, ResolveError> {
        self.0.get(name).ok_or_else(|| ResolveError::MissingArgument {
            param: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> FromIterator<(String, V)> for ArgSet<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V: fmt::Debug> fmt::Debug for ArgSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

/// A host instance wrapped together with its node registry.
///
/// The registry is shared across every instance of the host type; the graph
/// owns only the host. All resolution state lives on the call stack, so a
/// `Graph` is as cheap to keep around as the host itself.
pub struct Graph<H: Host> {
    host: H,
    registry: Arc<NodeRegistry<H>>,
}

impl<H: Host> Graph<H> {
    pub fn new(host: H, registry: Arc<NodeRegistry<H>>) -> Self {
        Self { host, registry }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the wrapped host. The next resolution observes the
    /// mutation; nothing is cached.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn registry(&self) -> &NodeRegistry<H> {
        &self.registry
    }

    /// Property-style access: resolves every bound parameter from the host
    /// and invokes the node body.
    pub fn resolve(&self, name: &str) -> Result<H::Value, ResolveError> {
        self.call(name, ArgSet::new())
    }

    /// Method-style access: `supplied` entries pass through untouched and
    /// skip resolution for exactly those parameters.
    pub fn call(&self, name: &str, supplied: ArgSet<H::Value>) -> Result<H::Value, ResolveError> {
        let id = self
            .registry
            .lookup(name)
            .ok_or_else(|| ResolveError::UnknownNode {
                name: name.to_string(),
            })?;
        Resolver::new(&self.registry, &self.host).resolve(id, supplied)
    }

    /// Looks up a node by name, bound to this instance and ready to call.
    ///
    /// Unknown or undecorated names yield a diagnostic handle that is safe
    /// to call with any arguments and returns an empty result, so
    /// exploratory lookups never fail.
    pub fn get_node(&self, name: &str) -> NodeHandle<'_, H> {
        match self.registry.lookup(name) {
            Some(id) => NodeHandle::Bound { graph: self, id },
            None if self.host.has_member(name) => NodeHandle::Undecorated {
                name: name.to_string(),
            },
            None => NodeHandle::Missing {
                name: name.to_string(),
            },
        }
    }

    pub fn node_names(&self) -> BTreeSet<String> {
        self.registry.node_names()
    }

    /// All property-backed nodes, bound to this instance.
    pub fn property_nodes(&self) -> BTreeMap<String, NodeHandle<'_, H>> {
        self.bind_handles(self.registry.property_nodes())
    }

    /// All method-backed nodes, bound to this instance.
    pub fn method_nodes(&self) -> BTreeMap<String, NodeHandle<'_, H>> {
        self.bind_handles(self.registry.method_nodes())
    }

    /// Properties and methods merged; method entries are merged in last.
    pub fn combined_nodes(&self) -> BTreeMap<String, NodeHandle<'_, H>> {
        self.bind_handles(self.registry.combined_nodes())
    }

    /// The dependency graph view mapping, delegated to the registry.
    pub fn deps_by_node(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.registry.deps_by_node()
    }

    fn bind_handles(
        &self,
        ids: BTreeMap<String, NodeId>,
    ) -> BTreeMap<String, NodeHandle<'_, H>> {
        ids.into_iter()
            .map(|(name, id)| (name, NodeHandle::Bound { graph: self, id }))
            .collect()
    }
}

impl<H: Host + fmt::Debug> fmt::Debug for Graph<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("host", &self.host)
            .field("registry", &*self.registry)
            .finish()
    }
}

/// A node looked up on a specific graph instance.
///
/// `Bound` handles resolve and invoke the node; the two diagnostic variants
/// stand in for lookups that found nothing callable. Diagnostic handles
/// accept and ignore any arguments, log a warning, and return `Ok(None)`.
pub enum NodeHandle<'g, H: Host> {
    Bound { graph: &'g Graph<H>, id: NodeId },
    /// The name exists on the host but carries no node declaration.
    Undecorated { name: String },
    /// The name does not exist on the host at all.
    Missing { name: String },
}

impl<'g, H: Host> NodeHandle<'g, H> {
    /// Invokes the node with the supplied arguments.
    ///
    /// Bound handles return `Ok(Some(value))` or a resolution error;
    /// diagnostic handles never fail and return `Ok(None)`.
    pub fn call(&self, supplied: ArgSet<H::Value>) -> Result<Option<H::Value>, ResolveError> {
        match self {
            NodeHandle::Bound { graph, id } => {
                Resolver::new(&graph.registry, &graph.host)
                    .resolve(*id, supplied)
                    .map(Some)
            }
            NodeHandle::Undecorated { name } => {
                tracing::warn!(node = %name, "node is not decorated");
                Ok(None)
            }
            NodeHandle::Missing { name } => {
                tracing::warn!(node = %name, "node does not exist");
                Ok(None)
            }
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, NodeHandle::Bound { .. })
    }

    /// The diagnostic message, for the two stand-in variants.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            NodeHandle::Bound { .. } => None,
            NodeHandle::Undecorated { name } => Some(format!("`{name}` is not decorated")),
            NodeHandle::Missing { name } => Some(format!("`{name}` does not exist")),
        }
    }
}

impl<'g, H: Host> fmt::Debug for NodeHandle<'g, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeHandle::Bound { id, .. } => f.debug_tuple("Bound").field(id).finish(),
            NodeHandle::Undecorated { name } => {
                f.debug_tuple("Undecorated").field(name).finish()
            }
            NodeHandle::Missing { name } => f.debug_tuple("Missing").field(name).finish(),
        }
    }
}
