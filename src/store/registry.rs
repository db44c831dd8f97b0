//! The eager registration table mapping node names to their specs.
//!
//! All wiring is declared up front, at definition time: a `NodeSpec` is the
//! full description of one node (its parameters, bindings, and body), and
//! the `NodeRegistry` aggregates specs under unique names. Resolution never
//! re-discovers structure; it only reads this table.

use super::types::{NodeId, NodeKind, NodeMetadata};
use crate::binding::Binding;
use crate::host::Host;
use crate::resolve::{ArgSet, ResolveError};
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The body of a node: the original function the wiring was declared for.
///
/// Receives the host and the fully resolved argument set; its result is
/// returned to the caller unchanged and never cached.
pub type NodeBody<H> = Arc<
    dyn Fn(&H, &ArgSet<<H as Host>::Value>) -> Result<<H as Host>::Value, ResolveError>
        + Send
        + Sync,
>;

/// Raised while declaring nodes, before any resolution can run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// A binding targets a name that is not a formal parameter of the node.
    #[error("binding target `{param}` is not a parameter of node `{node}`")]
    UnknownParameter { node: String, param: String },

    /// Node names are unique within a registry.
    #[error("a node named `{name}` is already registered")]
    DuplicateNode { name: String },
}

/// One declared node: metadata, formal parameters, parameter bindings, and
/// the body to invoke once arguments are resolved.
pub struct NodeSpec<H: Host> {
    pub(crate) meta: NodeMetadata,
    pub(crate) kind: NodeKind,
    pub(crate) params: SmallVec<[String; 4]>,
    pub(crate) bindings: BTreeMap<String, Binding<H::Value>>,
    pub(crate) body: NodeBody<H>,
}

impl<H: Host> NodeSpec<H> {
    /// Starts a property-style node: zero caller arguments, every bound
    /// parameter resolved from the host on each access.
    pub fn property(name: impl Into<String>) -> NodeSpecBuilder<H> {
        NodeSpecBuilder::new(name, NodeKind::Property)
    }

    /// Starts a method-style node: callers may supply any subset of the
    /// declared parameters explicitly.
    pub fn method(name: impl Into<String>) -> NodeSpecBuilder<H> {
        NodeSpecBuilder::new(name, NodeKind::Method)
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn bindings(&self) -> &BTreeMap<String, Binding<H::Value>> {
        &self.bindings
    }

    /// The set of source names this node declares, one entry per distinct
    /// attribute or upstream node it reads.
    pub fn sources(&self) -> BTreeSet<String> {
        self.bindings
            .values()
            .map(|b| b.source().to_string())
            .collect()
    }
}

impl<H: Host> Clone for NodeSpec<H> {
    fn clone(&self) -> Self {
        Self {
            meta: self.meta.clone(),
            kind: self.kind,
            params: self.params.clone(),
            bindings: self.bindings.clone(),
            body: Arc::clone(&self.body),
        }
    }
}

impl<H: Host> fmt::Debug for NodeSpec<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeSpec")
            .field("meta", &self.meta)
            .field("kind", &self.kind)
            .field("params", &self.params)
            .field("bindings", &self.bindings)
            .finish()
    }
}

/// Builder for a `NodeSpec`.
///
/// Explicit bindings are declared with `bind`/`bind_with`; `auto_link`
/// additionally infers an identity binding for every parameter left
/// unbound, named after the parameter itself. Explicit declarations always
/// take precedence over inferred ones for the same parameter.
pub struct NodeSpecBuilder<H: Host> {
    meta: NodeMetadata,
    kind: NodeKind,
    params: SmallVec<[String; 4]>,
    explicit: Vec<(String, Binding<H::Value>)>,
    auto_link: bool,
}

impl<H: Host> NodeSpecBuilder<H> {
    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            meta: NodeMetadata::named(name),
            kind,
            params: SmallVec::new(),
            explicit: Vec::new(),
            auto_link: false,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.meta.doc = Some(doc.into());
        self
    }

    /// Declares one formal parameter; order is the declaration order.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    pub fn params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(names.into_iter().map(Into::into));
        self
    }

    /// Binds `param` to the host attribute or node named `source`, with the
    /// identity transform. Sugar for `bind_with(param, Binding::new(source))`.
    pub fn bind(self, param: impl Into<String>, source: impl Into<String>) -> Self {
        self.bind_with(param, Binding::new(source))
    }

    /// Binds `param` with a full binding, transform included.
    pub fn bind_with(mut self, param: impl Into<String>, binding: Binding<H::Value>) -> Self {
        self.explicit.push((param.into(), binding));
        self
    }

    /// Infers an identity binding for every parameter without an explicit
    /// one. Whether the inferred source actually exists is deferred to
    /// resolution time; a missing inferred source leaves the parameter to
    /// the caller instead of failing the access.
    pub fn auto_link(mut self) -> Self {
        self.auto_link = true;
        self
    }

    /// Validates the declarations and attaches the body.
    pub fn build<F>(self, body: F) -> Result<NodeSpec<H>, DeclarationError>
    where
        F: Fn(&H, &ArgSet<H::Value>) -> Result<H::Value, ResolveError> + Send + Sync + 'static,
    {
        let mut bindings: BTreeMap<String, Binding<H::Value>> = BTreeMap::new();

        for (param, binding) in self.explicit {
            if !self.params.iter().any(|p| *p == param) {
                return Err(DeclarationError::UnknownParameter {
                    node: self.meta.name,
                    param,
                });
            }
            bindings.insert(param, binding);
        }

        if self.auto_link {
            for param in &self.params {
                bindings
                    .entry(param.clone())
                    .or_insert_with(|| Binding::inferred(param.clone()));
            }
        }

        Ok(NodeSpec {
            meta: self.meta,
            kind: self.kind,
            params: self.params,
            bindings,
            body: Arc::new(body),
        })
    }
}

/// The aggregated name-to-spec table for one wrapped host type.
///
/// Built once at definition time and shared (via `Arc`) by every `Graph`
/// wrapping an instance of the host type.
pub struct NodeRegistry<H: Host> {
    specs: Vec<NodeSpec<H>>,
    by_name: HashMap<String, NodeId>,
}

impl<H: Host> Default for NodeRegistry<H> {
    fn default() -> Self {
        Self {
            specs: Vec::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<H: Host> NodeRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Adds a node under its declared name. Names are unique; registering
    /// a second node under an existing name is a declaration error.
    pub fn register(&mut self, spec: NodeSpec<H>) -> Result<NodeId, DeclarationError> {
        if self.by_name.contains_key(spec.name()) {
            return Err(DeclarationError::DuplicateNode {
                name: spec.name().to_string(),
            });
        }

        let id = NodeId::new(self.specs.len());
        self.by_name.insert(spec.name().to_string(), id);
        self.specs.push(spec);
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: NodeId) -> &NodeSpec<H> {
        &self.specs[id.index()]
    }

    pub fn get_by_name(&self, name: &str) -> Option<&NodeSpec<H>> {
        self.lookup(name).map(|id| self.get(id))
    }

    pub fn node_names(&self) -> BTreeSet<String> {
        self.by_name.keys().cloned().collect()
    }

    /// Property-style nodes only.
    pub fn property_nodes(&self) -> BTreeMap<String, NodeId> {
        self.nodes_of_kind(NodeKind::Property)
    }

    /// Method-style nodes only.
    pub fn method_nodes(&self) -> BTreeMap<String, NodeId> {
        self.nodes_of_kind(NodeKind::Method)
    }

    /// Properties and methods merged into one mapping. Methods are merged
    /// in last, so on a (structurally impossible, names being unique) key
    /// collision the method entry wins.
    pub fn combined_nodes(&self) -> BTreeMap<String, NodeId> {
        let mut combined = self.property_nodes();
        combined.extend(self.method_nodes());
        combined
    }

    fn nodes_of_kind(&self, kind: NodeKind) -> BTreeMap<String, NodeId> {
        self.specs
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.kind == kind)
            .map(|(i, spec)| (spec.name().to_string(), NodeId::new(i)))
            .collect()
    }

    /// The dependency graph view contract: each node name mapped to the set
    /// of source names it declares. External renderers depend on this
    /// mapping and nothing else.
    pub fn deps_by_node(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.specs
            .iter()
            .map(|spec| (spec.name().to_string(), spec.sources()))
            .collect()
    }
}

impl<H: Host> fmt::Debug for NodeRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("nodes", &self.node_names())
            .finish()
    }
}
