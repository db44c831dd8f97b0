//! The registration table: node specs, identifiers, and the registry.
pub mod registry;
pub mod types;

pub use registry::{DeclarationError, NodeBody, NodeRegistry, NodeSpec, NodeSpecBuilder};
pub use types::{NodeId, NodeKind, NodeMetadata};
