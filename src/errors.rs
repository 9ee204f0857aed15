use std::sync::Arc;

use crate::types::{DynError, TypeInfo};

/// Errors while resolving and building the graph
///
/// All variants are terminal for the `build` call that raised them; nothing
/// is retried internally.
#[derive(thiserror::Error, Debug, Clone)]
pub enum BuildError {
    /// A producer requires an identity that is neither statically supplied
    /// nor producible by another registered producer
    #[error("'{required_by}' needs '{dependency}' but nothing provides it")]
    MissingDependency {
        dependency: TypeInfo,
        required_by: TypeInfo,
    },
    /// The dependency graph contains at least one cycle among the listed
    /// producers
    #[error("Circular dependency among: {}", display_infos(.unresolved))]
    CircularDependency { unresolved: Vec<TypeInfo> },
    /// A producer yielded a number of outputs other than exactly one
    #[error("Producer for '{product}' yielded {got} outputs, expected exactly one")]
    UnexpectedArity { product: TypeInfo, got: usize },
    /// A producer's own body failed
    #[error("Producer for '{product}' failed - error: {error:?}")]
    ProducerFailed {
        product: TypeInfo,
        error: Arc<DynError>,
    },
}

fn display_infos(infos: &[TypeInfo]) -> String {
    infos
        .iter()
        .map(|info| format!("'{info}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors when trying to require a built value from the container
#[derive(thiserror::Error, Debug, Clone)]
pub enum RequireError {
    /// The required type is not known to the container
    #[error("The required type '{0}' is not known.")]
    TypeMissing(&'static str),

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
}

/// Errors when a producer pulls an argument out of its [`Inputs`] view
///
/// [`Inputs`]: crate::producer::Inputs
#[derive(thiserror::Error, Debug, Clone)]
pub enum InputError {
    /// The requested type is not in the producer's declared requirements
    #[error("'{0}' was requested but never declared as a requirement")]
    NotDeclared(&'static str),

    #[error("Failed to downcast input, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
}
