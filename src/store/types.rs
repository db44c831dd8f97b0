use serde::{Deserialize, Serialize};

/// A dense, stable identifier for a registered node.
///
/// Only the registry mints ids, so any `NodeId` in caller hands indexes a
/// real spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(u32);

impl NodeId {
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub(crate) fn new(idx: usize) -> Self {
        Self(idx as u32)
    }
}

/// How a node is surfaced on the wrapped host.
///
/// A `Property` takes no caller-supplied arguments; every declared
/// parameter is always resolved from the host. A `Method` may be called
/// with any subset of its parameters supplied explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Property,
    Method,
}

/// Display metadata for a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// The node's registered name, unique within one registry.
    pub name: String,
    /// Optional one-line description, surfaced in debug output only.
    pub doc: Option<String>,
}

impl NodeMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
        }
    }
}
