use std::collections::VecDeque;

use crate::{builder::GraphBuilder, errors::BuildError, types::TypeInfo};

/// Dependency graph over the registered producers
///
/// Producers are addressed by their arena index in the builder's
/// registration list. Edges, pending counts and the resulting order are
/// computed fresh for every build, so nothing long-lived is ever left in a
/// half-sorted state.
pub(crate) struct DependencyGraph {
    /// Identity produced by each arena index
    provides: Vec<TypeInfo>,
    /// Declared requirements per producer, in declaration order
    requires: Vec<Vec<TypeInfo>>,
    /// Arena indices of producers waiting on this producer's output
    dependents: Vec<Vec<usize>>,
    /// How many non-static prerequisites each producer still waits on
    pending: Vec<usize>,
}

impl DependencyGraph {
    /// Discovers all edges between the registered producers
    ///
    /// A requirement covered by a static value imposes no ordering
    /// constraint; statics are checked before producers, which is what makes
    /// a static win over a producer registered under the same identity. A
    /// requirement covered by neither fails the whole build before anything
    /// is invoked.
    pub(crate) fn new(builder: &GraphBuilder) -> Result<Self, BuildError> {
        let count = builder.producers.len();
        let mut provides = Vec::with_capacity(count);
        let mut requires = Vec::with_capacity(count);
        for producer in &builder.producers {
            provides.push(producer.provides());
            requires.push(producer.requires());
        }

        let mut dependents = vec![Vec::new(); count];
        let mut pending = vec![0; count];
        for (requirer, wants) in requires.iter().enumerate() {
            for dependency in wants {
                if builder.statics.contains_key(&dependency.type_id) {
                    continue;
                }

                let Some(&provider) = builder.index.get(&dependency.type_id) else {
                    return Err(BuildError::MissingDependency {
                        dependency: *dependency,
                        required_by: provides[requirer],
                    });
                };

                dependents[provider].push(requirer);
                pending[requirer] += 1;
            }
        }

        Ok(DependencyGraph {
            provides,
            requires,
            dependents,
            pending,
        })
    }

    /// The declared requirements of the producer at `index`
    pub(crate) fn requires(&self, index: usize) -> &[TypeInfo] {
        &self.requires[index]
    }

    /// Computes a total order consistent with every edge
    ///
    /// Kahn's algorithm over the initial frontier of producers with no
    /// pending prerequisites. The worklist is FIFO, so producers that become
    /// eligible at the same time keep their relative registration order.
    pub(crate) fn construction_order(&mut self) -> Result<Vec<usize>, BuildError> {
        let count = self.provides.len();
        let mut worklist: VecDeque<usize> =
            (0..count).filter(|&index| self.pending[index] == 0).collect();

        tracing::debug!(
            "Sorting {} producers, initial frontier of {}",
            count,
            worklist.len()
        );

        let mut order = Vec::with_capacity(count);
        while let Some(node) = worklist.pop_front() {
            order.push(node);
            // Visited nodes give up their dependent list; it must not be
            // walked again.
            for dependent in std::mem::take(&mut self.dependents[node]) {
                self.pending[dependent] -= 1;
                if self.pending[dependent] == 0 {
                    worklist.push_back(dependent);
                }
            }
        }

        if order.len() != count {
            let unresolved = (0..count)
                .filter(|&index| self.pending[index] > 0)
                .map(|index| self.provides[index])
                .collect();
            return Err(BuildError::CircularDependency { unresolved });
        }

        Ok(order)
    }
}
