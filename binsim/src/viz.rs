use crate::entities::PlacementObject;

/// Receives every committed placement, e.g. to draw the bin.
/// Nothing is ever read back from a `Visualizer`.
pub trait Visualizer {
    fn create_environment(&mut self) {}

    fn add_bin(&mut self, length: f64, width: f64);

    fn add_object(&mut self, object: &PlacementObject);

    fn display(&mut self) {}
}

/// [`Visualizer`] that ignores everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoVisualizer;

impl Visualizer for NoVisualizer {
    fn add_bin(&mut self, _length: f64, _width: f64) {}

    fn add_object(&mut self, _object: &PlacementObject) {}
}
