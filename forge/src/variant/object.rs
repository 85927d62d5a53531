//! References to host engine objects

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// A host object type that can be referenced by a property
///
/// Registering an `Option<Arc<T>>` property for any `T: EngineClass` always
/// succeeds: the record reports the object tag with a resource-type hint
/// naming [`EngineClass::CLASS_NAME`].
pub trait EngineClass: Any + Send + Sync {
    /// Class name the host uses for this type (e.g. `"Texture"`)
    const CLASS_NAME: &'static str;
}

/// Type-erased shared handle to an engine object
#[derive(Clone)]
pub struct ObjectRef {
    class_name: &'static str,
    instance:   Arc<dyn Any + Send + Sync>,
}

impl ObjectRef {
    /// Wrap a typed object handle
    pub fn new<T: EngineClass>(instance: Arc<T>) -> Self {
        Self {
            class_name: T::CLASS_NAME,
            instance,
        }
    }

    /// Declared class name of the referenced object
    #[must_use]
    pub const fn class_name(&self) -> &'static str { self.class_name }

    /// Recover the typed handle, if the object is a `T`
    #[must_use]
    pub fn downcast<T: EngineClass>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.instance).downcast::<T>().ok()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.instance, &other.instance) }
}

impl Serialize for ObjectRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ObjectRef", 1)?;
        state.serialize_field("class", self.class_name)?;
        state.end()
    }
}
