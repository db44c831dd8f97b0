//! Defines the `Binding` type: how a single parameter of a node is resolved.

use std::fmt;
use std::sync::Arc;

/// The boxed cause carried by a failed transform.
pub type TransformCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A fallible unary function applied to a fetched source value before it is
/// injected into the node body.
pub type Transform<V> = Arc<dyn Fn(V) -> Result<V, TransformCause> + Send + Sync>;

/// Records whether a binding was declared by hand or inferred from a
/// parameter name during auto-linking.
///
/// The distinction matters at resolution time: an `Explicit` binding whose
/// source is missing fails the whole access, while an `Inferred` one simply
/// leaves the parameter to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingOrigin {
    Explicit,
    Inferred,
}

/// The (source name, optional transform) pair governing how one parameter
/// of a node is resolved.
///
/// Created once when a node spec is built and immutable thereafter. The
/// source may name either a plain host attribute or another registered
/// node; the engine decides which at resolution time.
pub struct Binding<V> {
    source: String,
    transform: Option<Transform<V>>,
    origin: BindingOrigin,
}

impl<V> Binding<V> {
    /// An explicit binding with the identity transform.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            transform: None,
            origin: BindingOrigin::Explicit,
        }
    }

    /// An explicit binding that passes the fetched value through `transform`
    /// before injection.
    pub fn with_transform<F>(source: impl Into<String>, transform: F) -> Self
    where
        F: Fn(V) -> Result<V, TransformCause> + Send + Sync + 'static,
    {
        Self {
            source: source.into(),
            transform: Some(Arc::new(transform)),
            origin: BindingOrigin::Explicit,
        }
    }

    /// An identity binding inferred from a parameter name during
    /// auto-linking.
    pub(crate) fn inferred(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            transform: None,
            origin: BindingOrigin::Inferred,
        }
    }

    /// Name of the host attribute or node this binding reads.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn origin(&self) -> BindingOrigin {
        self.origin
    }

    /// Applies the transform, if any, to a fetched source value.
    pub(crate) fn apply(&self, value: V) -> Result<V, TransformCause> {
        match &self.transform {
            Some(transform) => transform(value),
            None => Ok(value),
        }
    }
}

impl<V> Clone for Binding<V> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            transform: self.transform.clone(),
            origin: self.origin,
        }
    }
}

impl<V> fmt::Debug for Binding<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("source", &self.source)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .field("origin", &self.origin)
            .finish()
    }
}
