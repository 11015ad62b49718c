use crate::entities::PlacementObject;
use crate::geometry::{DTransformation, Transformation};

/// A rigid transformation together with the object it is meant to move.
/// Normally the object is the pending object of a [`State`](crate::entities::State).
#[derive(Clone, Debug)]
pub struct Action {
    pub transform: Transformation,
    pub object: PlacementObject,
}

impl Action {
    pub fn new(transform: Transformation, object: PlacementObject) -> Self {
        Self { transform, object }
    }

    /// The 2x2 rotation block of the transformation
    pub fn rotation(&self) -> [[f64; 2]; 2] {
        self.transform.rotation()
    }

    pub fn translation(&self) -> (f64, f64) {
        self.transform.translation()
    }

    pub fn d_transformation(&self) -> DTransformation {
        self.transform.decompose()
    }

    /// The object as it would be after executing the action
    pub fn placed_object(&self) -> PlacementObject {
        self.object.transform_clone(&self.transform)
    }
}
