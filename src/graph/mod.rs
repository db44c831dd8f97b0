//! The dependency graph view and its directed-graph adapter.
pub mod dag;
pub mod view;

pub use dag::DependencyDag;
pub use view::GraphView;
