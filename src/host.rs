//! The attribute-access seam between a host object and the resolution engine.

/// Implemented by any type whose attributes can feed a node graph.
///
/// The engine only ever sees a host through this trait: `attribute` is the
/// typed stand-in for dynamic attribute lookup, and `has_member` lets
/// diagnostics distinguish a member that exists but is not a node from a
/// name that does not exist at all.
pub trait Host {
    /// The value type flowing through bindings, transforms, and node bodies.
    type Value: Clone;

    /// Reads a plain attribute off the host by name.
    ///
    /// Returns `None` when the host has no attribute of that name. Node
    /// names are looked up in the registry first, so a host attribute
    /// shadowed by a node of the same name is never consulted.
    fn attribute(&self, name: &str) -> Option<Self::Value>;

    /// Whether `name` refers to any member of the host at all.
    ///
    /// The default treats exactly the attribute names as members; hosts
    /// with non-value members (helpers that are not injectable) can widen
    /// this so `get_node` reports them as "not decorated" rather than
    /// "does not exist".
    fn has_member(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}
