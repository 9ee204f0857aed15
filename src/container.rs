use std::{
    any::{type_name, TypeId},
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
};

use crate::{
    errors::RequireError,
    types::{Injectable, Instance},
};

/// Container holding every value of a successfully built graph
///
/// Statics are included alongside produced values; for an identity that was
/// registered both ways, the produced value is what a lookup returns.
#[derive(Clone)]
pub struct Container(Arc<ContainerInner>);
struct ContainerInner {
    instances: HashMap<TypeId, Instance>,
}
impl Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_struct("Container");
        for instance in self.0.instances.values() {
            map.field(instance.info.type_name, &"built");
        }
        map.finish()
    }
}

impl Container {
    pub(crate) fn new(instances: HashMap<TypeId, Instance>) -> Self {
        Self(Arc::new(ContainerInner { instances }))
    }

    /// Attempts to get the built value of the requested type
    pub fn require<T: Injectable>(&self) -> Result<Arc<T>, RequireError> {
        match self.0.instances.get(&TypeId::of::<T>()) {
            Some(instance) => {
                instance
                    .downcast()
                    .map_err(|actual_type| RequireError::DowncastFailed {
                        required_type: type_name::<T>(),
                        actual_type,
                    })
            }
            None => Err(RequireError::TypeMissing(type_name::<T>())),
        }
    }

    /// Whether a value of the requested type was built or supplied
    pub fn contains<T: Injectable>(&self) -> bool {
        self.0.instances.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.0.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.instances.is_empty()
    }
}
