//! Errors surfaced while resolving a node's arguments.
use crate::binding::TransformCause;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    /// An explicitly declared source name is absent on the host.
    // The field holds the declared source name; it is called `attribute`
    // because thiserror reserves the name `source` for a wrapped cause.
    #[error("attribute `{attribute}` required by `{node}.{param}` does not exist on the host")]
    AttributeLookup {
        node: String,
        param: String,
        attribute: String,
    },

    /// A declared transform failed; the original cause is preserved.
    #[error("transform for `{node}.{param}` failed")]
    Transform {
        node: String,
        param: String,
        #[source]
        cause: TransformCause,
    },

    /// A parameter was neither bound nor supplied by the caller.
    #[error("missing required argument `{param}`")]
    MissingArgument { param: String },

    /// The dependency chain revisited a node already being resolved.
    #[error("dependency cycle detected: {chain}")]
    Cycle { chain: String },

    /// Direct resolution was requested for a name with no registered node.
    #[error("`{name}` is not a registered node")]
    UnknownNode { name: String },
}
