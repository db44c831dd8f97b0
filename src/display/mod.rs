//! Rendering adapters for the dependency graph view.
pub mod dot;

pub use dot::DotRenderer;
