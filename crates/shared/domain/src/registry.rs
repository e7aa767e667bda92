//! Type-erased registry entries for initialized feature slices.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Feature state that the API state can hold and hand back by type.
///
/// Implemented by `#[atelier_slice]`.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Short lowercase name (`catalog`, `inquiries`).
    fn name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

/// A slice ready for registration.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub name: &'static str,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), name: state.name(), state: Box::new(state) }
    }
}
