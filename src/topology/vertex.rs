use crate::math::{points_connected, Point3};

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the topology store.
    pub struct VertexId;
}

/// A vertex: an edge end point in model space.
#[derive(Debug, Clone, Copy)]
pub struct VertexData {
    pub point: Point3,
}

impl VertexData {
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }

    /// Returns `true` if the two vertices touch within the connectivity tolerance.
    #[must_use]
    pub fn touches(&self, other: &Self) -> bool {
        points_connected(&self.point, &other.point)
    }
}
