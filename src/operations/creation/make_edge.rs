use crate::error::{GeometryError, Result};
use crate::geometry::curve::Curve;
use crate::math::points_connected;
use crate::topology::{EdgeCurve, EdgeData, EdgeId, TopologyStore, VertexData};

/// Creates an edge bounding a curve to a parameter range.
///
/// When both ends of the range land on the same point (a full circle, a
/// closed spline) the edge gets a single vertex.
pub struct MakeEdge {
    curve: EdgeCurve,
    t_start: f64,
    t_end: f64,
}

impl MakeEdge {
    #[must_use]
    pub fn new(curve: EdgeCurve, t_start: f64, t_end: f64) -> Self {
        Self {
            curve,
            t_start,
            t_end,
        }
    }

    /// An edge over the whole curve domain.
    #[must_use]
    pub fn from_curve(curve: EdgeCurve) -> Self {
        let domain = curve.domain();
        Self::new(curve, domain.t_min, domain.t_max)
    }

    /// Executes the operation, creating the edge and its vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty or unbounded, or lies outside
    /// the curve domain.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<EdgeId> {
        if !self.t_start.is_finite() || !self.t_end.is_finite() || self.t_end <= self.t_start {
            return Err(GeometryError::Degenerate(format!(
                "invalid parameter range [{}, {}] for a {} edge",
                self.t_start,
                self.t_end,
                self.curve.kind()
            ))
            .into());
        }
        let first = self.curve.evaluate(self.t_start)?;
        let last = self.curve.evaluate(self.t_end)?;

        let start = store.add_vertex(VertexData::new(first));
        let end = if points_connected(&first, &last) {
            start
        } else {
            store.add_vertex(VertexData::new(last))
        };
        Ok(store.add_edge(EdgeData {
            start,
            end,
            curve: self.curve.clone(),
            t_start: self.t_start,
            t_end: self.t_end,
        }))
    }
}
