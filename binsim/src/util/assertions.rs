use crate::entities::{PlacementObject, State};
use crate::geometry::geo_traits::Transformable;

//Various checks to verify correctness of the state of the system
//Used in debug_assert!() blocks

/// The realized polygon matches the base polygon under the cumulative transformation
pub fn object_is_consistent(object: &PlacementObject) -> bool {
    let expected = object.base().transform_clone(object.transform());
    expected.n_vertices() == object.shape().n_vertices()
        && expected
            .vertices
            .iter()
            .zip(object.shape().vertices.iter())
            .all(|(a, b)| a.sq_distance(b) < 1e-12)
}

/// `next` extends `prev` by exactly one placed object, sharing all the others
pub fn state_extends(prev: &State, next: &State) -> bool {
    next.objects.len() == prev.objects.len() + 1
        && prev
            .objects
            .iter()
            .zip(next.objects.iter())
            .all(|(a, b)| std::sync::Arc::ptr_eq(a, b))
        && next.objects.iter().all(|o| object_is_consistent(o))
}
