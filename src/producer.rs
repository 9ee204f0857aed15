use std::{
    any::{type_name, TypeId},
    sync::Arc,
};

use crate::{
    errors::InputError,
    types::{DynError, Injectable, Instance, TypeInfo},
};

/// A producer yielding exactly one value of a given type
///
/// Required inputs are declared up front via [`Producer::requires`]; the
/// build resolves them and hands them back through an [`Inputs`] view when
/// the producer is invoked. A producer is invoked at most once per build.
pub trait Producer: Send + Sync + 'static {
    type Output: Injectable;

    /// Returns the identity of the producer's output type
    fn provides() -> TypeInfo {
        TypeInfo::of::<Self::Output>()
    }

    /// Returns the identities the producer consumes, in declaration order
    ///
    /// Every identity listed here must be covered by a static value or by
    /// another registered producer, otherwise the build fails before
    /// anything is invoked.
    fn requires() -> Vec<TypeInfo>;

    /// Builds one value from the resolved inputs
    fn produce(&mut self, inputs: Inputs<'_>) -> Result<Self::Output, DynError>;
}

/// Wrapper Trait for producers, yielding type-erased instances
///
/// This is the registration surface the graph actually stores. The output
/// count is only known at invocation time here, which is why the build
/// checks that exactly one instance came back.
pub trait DynProducer: Send + Sync {
    /// Returns the identity this producer is registered under
    fn provides(&self) -> TypeInfo;

    /// Returns the identities the producer consumes, in declaration order
    fn requires(&self) -> Vec<TypeInfo>;

    /// Invokes the producer with the resolved inputs
    fn produce(&mut self, inputs: Inputs<'_>) -> Result<Vec<Instance>, DynError>;
}

// Impl DynProducer for any Producer
impl<T: Injectable, SpecificProducer: Producer<Output = T>> DynProducer for SpecificProducer {
    fn provides(&self) -> TypeInfo {
        SpecificProducer::provides()
    }

    fn requires(&self) -> Vec<TypeInfo> {
        SpecificProducer::requires()
    }

    fn produce(&mut self, inputs: Inputs<'_>) -> Result<Vec<Instance>, DynError> {
        // Forward the call to the specific implementation
        SpecificProducer::produce(self, inputs)
            .map(Instance::new)
            .map(|instance| vec![instance])
    }
}

/// A [`DynProducer`] backed by a closure
///
/// Useful when the produced identity or the requirement list is only known
/// at runtime. Unlike the typed [`Producer`] trait, nothing forces the
/// closure to yield exactly one instance; the build enforces that when it
/// invokes the producer.
pub struct FnProducer<F> {
    provides: TypeInfo,
    requires: Vec<TypeInfo>,
    produce: F,
}

impl<F> FnProducer<F>
where
    F: FnMut(Inputs<'_>) -> Result<Vec<Instance>, DynError> + Send + Sync,
{
    pub fn new(provides: TypeInfo, requires: Vec<TypeInfo>, produce: F) -> Self {
        FnProducer {
            provides,
            requires,
            produce,
        }
    }
}

impl<F> DynProducer for FnProducer<F>
where
    F: FnMut(Inputs<'_>) -> Result<Vec<Instance>, DynError> + Send + Sync,
{
    fn provides(&self) -> TypeInfo {
        self.provides
    }

    fn requires(&self) -> Vec<TypeInfo> {
        self.requires.clone()
    }

    fn produce(&mut self, inputs: Inputs<'_>) -> Result<Vec<Instance>, DynError> {
        (self.produce)(inputs)
    }
}

/// View over a producer's resolved arguments
///
/// Arguments sit in declaration order, each one either a static value or the
/// output of an already invoked producer. [`Inputs::get`] resolves by type
/// against the declared requirement list, so a producer can only reach what
/// it declared.
pub struct Inputs<'a> {
    declared: &'a [TypeInfo],
    args: &'a [Instance],
}

impl<'a> Inputs<'a> {
    pub(crate) fn new(declared: &'a [TypeInfo], args: &'a [Instance]) -> Self {
        debug_assert_eq!(declared.len(), args.len());
        Inputs { declared, args }
    }

    /// Attempts to get the argument of the requested type
    pub fn get<T: Injectable>(&self) -> Result<Arc<T>, InputError> {
        let wanted = TypeId::of::<T>();
        let position = self
            .declared
            .iter()
            .position(|info| info.type_id == wanted)
            .ok_or(InputError::NotDeclared(type_name::<T>()))?;

        self.args[position]
            .downcast()
            .map_err(|actual_type| InputError::DowncastFailed {
                required_type: type_name::<T>(),
                actual_type,
            })
    }

    /// The resolved argument at `position` in declaration order
    pub fn arg(&self, position: usize) -> Option<&Instance> {
        self.args.get(position)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}
