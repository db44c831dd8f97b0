//! arcbound: dependency-resolved node graphs.
//!
//! A host type declares computed attributes ("nodes") whose inputs are
//! resolved lazily from other attributes of the same host, with the wiring
//! declared once per node in an explicit registration table. Callers may
//! override any input; everything else is fetched off the live host on
//! every access, recursing through nodes that depend on other nodes.
//!
//! ```
//! use arcbound::{Graph, Host, NodeRegistry, NodeSpec};
//! use std::sync::Arc;
//!
//! struct Sapling { root: i64 }
//!
//! impl Host for Sapling {
//!     type Value = i64;
//!     fn attribute(&self, name: &str) -> Option<i64> {
//!         (name == "root").then(|| self.root)
//!     }
//! }
//!
//! let mut registry = NodeRegistry::new();
//! registry.register(
//!     NodeSpec::property("branch")
//!         .param("x")
//!         .bind("x", "root")
//!         .build(|_, args| Ok(args.required("x")? * args.required("x")?))
//!         .unwrap(),
//! ).unwrap();
//!
//! let graph = Graph::new(Sapling { root: 5 }, Arc::new(registry));
//! assert_eq!(graph.resolve("branch").unwrap(), 25);
//! ```

pub mod binding;
pub mod display;
pub mod graph;
pub mod host;
pub mod requires;
pub mod resolve;
pub mod store;

pub use binding::{Binding, BindingOrigin, Transform, TransformCause};
pub use display::DotRenderer;
pub use graph::{DependencyDag, GraphView};
pub use host::Host;
pub use requires::{Requirement, RequirementError};
pub use resolve::{ArgSet, Graph, NodeHandle, ResolveError};
pub use store::{
    DeclarationError, NodeId, NodeKind, NodeMetadata, NodeRegistry, NodeSpec, NodeSpecBuilder,
};
