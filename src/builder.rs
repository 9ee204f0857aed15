use std::{any::TypeId, collections::HashMap, sync::Arc};

use crate::{
    container::Container,
    errors::BuildError,
    graph::DependencyGraph,
    producer::{DynProducer, Inputs, Producer},
    types::{Injectable, Instance},
};

/// Registration surface for producers and static values
///
/// The graph is built in three strictly sequential steps once [`build`] is
/// called:
/// 1. Edge discovery over every producer's declared requirements
/// 2. Topological ordering of the producers
/// 3. One invocation per producer, in that order
///
/// `build` consumes the builder, so a graph is built exactly once or not at
/// all.
///
/// [`build`]: GraphBuilder::build
pub struct GraphBuilder {
    /// Registered producers, in registration order
    pub(crate) producers: Vec<Box<dyn DynProducer>>,
    /// Produced identity to arena index in `producers`
    pub(crate) index: HashMap<TypeId, usize>,
    /// Registered already built values
    pub(crate) statics: HashMap<TypeId, Instance>,
}
impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder {
            producers: Vec::new(),
            index: HashMap::new(),
            statics: HashMap::new(),
        }
    }
}
impl GraphBuilder {
    /// Registers `value` under the identity of its own type
    ///
    /// Statics are treated as already built: they never impose an ordering
    /// constraint and are handed to producers as-is. Registering a second
    /// static of the same type silently replaces the first.
    pub fn add_static<T: Injectable>(mut self, value: T) -> Self {
        self.statics
            .insert(TypeId::of::<T>(), Instance::new(value));
        self
    }

    /// Registers a typed producer under the identity of its output type
    ///
    /// The producer's signature is not validated here; requirements are
    /// checked against the full registered set when [`build`] runs.
    /// Registering a second producer for the same identity silently replaces
    /// the first, keeping the original registration slot.
    ///
    /// [`build`]: GraphBuilder::build
    pub fn add_producer<P: Producer>(self, producer: P) -> Self {
        self.add_dyn_producer(Box::new(producer))
    }

    /// Registers a type-erased producer under the identity it reports
    pub fn add_dyn_producer(mut self, producer: Box<dyn DynProducer>) -> Self {
        let type_id = producer.provides().type_id;
        match self.index.get(&type_id) {
            Some(&slot) => self.producers[slot] = producer,
            None => {
                self.index.insert(type_id, self.producers.len());
                self.producers.push(producer);
            }
        }
        self
    }

    /// Resolves the construction order and builds every registered producer
    ///
    /// Returns the [`Container`] of built values, or the first error
    /// encountered. Failures are terminal: a missing requirement or a cycle
    /// is reported before any producer runs, and an invocation failure
    /// aborts the remaining sequence.
    pub fn build(self) -> Result<Container, BuildError> {
        tracing::debug!(
            "Building graph with {} producers and {} statics",
            self.producers.len(),
            self.statics.len()
        );

        let mut graph = DependencyGraph::new(&self)?;
        let order = graph.construction_order()?;

        let GraphBuilder {
            mut producers,
            index,
            statics,
        } = self;

        // Transient per-build values, indexed like `producers`
        let mut values: Vec<Option<Instance>> = Vec::new();
        values.resize_with(producers.len(), || None);

        for node in order {
            let product = producers[node].provides();
            let declared = graph.requires(node);

            let mut args = Vec::with_capacity(declared.len());
            for dependency in declared {
                let arg = match statics.get(&dependency.type_id) {
                    Some(value) => value.clone(),
                    None => {
                        let provider = index[&dependency.type_id];
                        values[provider]
                            .clone()
                            .expect("providers precede requirers in the order")
                    }
                };
                args.push(arg);
            }

            let outputs = producers[node]
                .produce(Inputs::new(declared, &args))
                .map_err(|error| BuildError::ProducerFailed {
                    product,
                    error: Arc::new(error),
                })?;

            let [output] = <[Instance; 1]>::try_from(outputs).map_err(|outputs| {
                BuildError::UnexpectedArity {
                    product,
                    got: outputs.len(),
                }
            })?;

            tracing::debug!("Constructed instance of {}", product.type_name);
            values[node] = Some(output);
        }

        tracing::debug!("All producers have finished - graph build completed");

        let mut instances: HashMap<TypeId, Instance> = statics;
        for value in values.into_iter() {
            let instance = value.expect("every node was invoked");
            instances.insert(instance.info.type_id, instance);
        }

        Ok(Container::new(instances))
    }
}
