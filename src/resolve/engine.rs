//! Recursive dependency resolution with an active-chain cycle guard.
//!
//! Resolution is ordinary nested function invocation: resolving a node whose
//! source is itself a node recurses to completion before the outer
//! resolution proceeds. Nothing is cached; a diamond dependency is
//! recomputed once per referencing parameter, and mutating a host attribute
//! between two accesses is always observed by the second.

use super::error::ResolveError;
use super::ArgSet;
use crate::binding::BindingOrigin;
use crate::host::Host;
use crate::store::{NodeId, NodeRegistry};

pub(crate) struct Resolver<'a, H: Host> {
    registry: &'a NodeRegistry<H>,
    host: &'a H,
    // Nodes currently being resolved, outermost first.
    active: Vec<NodeId>,
}

impl<'a, H: Host> Resolver<'a, H> {
    pub(crate) fn new(registry: &'a NodeRegistry<H>, host: &'a H) -> Self {
        Self {
            registry,
            host,
            active: Vec::new(),
        }
    }

    /// Resolves one node: merges `supplied` with lazily computed bindings
    /// and invokes the body. Caller-supplied arguments always win; bound
    /// parameters already present in `supplied` skip resolution entirely.
    pub(crate) fn resolve(
        &mut self,
        id: NodeId,
        supplied: ArgSet<H::Value>,
    ) -> Result<H::Value, ResolveError> {
        if self.active.contains(&id) {
            return Err(self.cycle_error(id));
        }

        self.active.push(id);
        let result = self.resolve_bound(id, supplied);
        self.active.pop();
        result
    }

    fn resolve_bound(
        &mut self,
        id: NodeId,
        supplied: ArgSet<H::Value>,
    ) -> Result<H::Value, ResolveError> {
        let registry = self.registry;
        let spec = registry.get(id);
        let mut resolved = supplied;

        for (param, binding) in spec.bindings() {
            if resolved.contains(param) {
                continue;
            }

            match self.source_value(binding.source())? {
                Some(value) => {
                    let value =
                        binding
                            .apply(value)
                            .map_err(|cause| ResolveError::Transform {
                                node: spec.name().to_string(),
                                param: param.clone(),
                                cause,
                            })?;
                    resolved.insert(param.clone(), value);
                }
                // An inferred name that matches nothing stays an ordinary
                // caller-supplied parameter.
                None if binding.origin() == BindingOrigin::Inferred => continue,
                None => {
                    return Err(ResolveError::AttributeLookup {
                        node: spec.name().to_string(),
                        param: param.clone(),
                        attribute: binding.source().to_string(),
                    });
                }
            }
        }

        (spec.body)(self.host, &resolved)
    }

    /// Fetches a source value: registered nodes win over plain attributes,
    /// and resolving one recurses with no caller arguments.
    fn source_value(&mut self, name: &str) -> Result<Option<H::Value>, ResolveError> {
        if let Some(id) = self.registry.lookup(name) {
            self.resolve(id, ArgSet::new()).map(Some)
        } else {
            Ok(self.host.attribute(name))
        }
    }

    fn cycle_error(&self, revisited: NodeId) -> ResolveError {
        let mut names: Vec<&str> = self
            .active
            .iter()
            .map(|&id| self.registry.get(id).name())
            .collect();
        names.push(self.registry.get(revisited).name());
        ResolveError::Cycle {
            chain: names.join(" -> "),
        }
    }
}
