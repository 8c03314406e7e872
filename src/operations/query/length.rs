use crate::error::Result;
use crate::geometry::curve::Curve;
use crate::topology::{EdgeCurve, EdgeData, EdgeId, TopologyStore};

/// Chord samples used for curves without a closed-form length.
const LENGTH_SAMPLES: u32 = 512;

/// Computes the length of an edge over its parameter range.
pub struct Length {
    edge: EdgeId,
}

impl Length {
    /// Creates a new `Length` query.
    #[must_use]
    pub fn new(edge: EdgeId) -> Self {
        Self { edge }
    }

    /// Executes the query, returning the edge length.
    ///
    /// Lines and circular arcs are measured exactly; ellipses and free-form
    /// curves by summing dense chords.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found or cannot be evaluated.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        edge_length(store.edge(self.edge)?)
    }
}

pub(crate) fn edge_length(edge: &EdgeData) -> Result<f64> {
    match &edge.curve {
        // lines are parameterized by arc length
        EdgeCurve::Line(_) => Ok(edge.parameter_span().abs()),
        EdgeCurve::Circle(circle) => Ok(circle.arc_length(edge.t_start, edge.t_end)),
        curve => {
            let mut length = 0.0;
            let mut previous = curve.evaluate(edge.t_start)?;
            for i in 1..=LENGTH_SAMPLES {
                let t = edge.t_start + edge.parameter_span() * f64::from(i) / f64::from(LENGTH_SAMPLES);
                let point = curve.evaluate(t)?;
                length += (point - previous).norm();
                previous = point;
            }
            Ok(length)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::{BezierCurve, Circle, Ellipse};
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::{MakeEdge, MakeWire};
    use std::f64::consts::{PI, TAU};

    #[test]
    fn line_length_3_4_5() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0)],
            false,
        )
        .execute(&mut store)
        .unwrap();
        let edge_id = store.wire(wire).unwrap().edges[0].edge;

        let len = Length::new(edge_id).execute(&store).unwrap();
        assert!((len - 5.0).abs() < 1e-10);
    }

    #[test]
    fn half_circle_length() {
        let mut store = TopologyStore::new();
        let circle = Circle::from_axis(Point3::origin(), 2.0, Vector3::z()).unwrap();
        let edge = MakeEdge::new(EdgeCurve::Circle(circle), 0.0, PI)
            .execute(&mut store)
            .unwrap();
        let len = Length::new(edge).execute(&store).unwrap();
        assert!((len - 2.0 * PI).abs() < 1e-10);
    }

    #[test]
    fn ellipse_length_matches_ramanujan() {
        let mut store = TopologyStore::new();
        let (a, b) = (3.0, 2.0);
        let ellipse = Ellipse::new(Point3::origin(), a, b, Vector3::z(), Vector3::x()).unwrap();
        let edge = MakeEdge::new(EdgeCurve::Ellipse(ellipse), 0.0, TAU)
            .execute(&mut store)
            .unwrap();
        let len = Length::new(edge).execute(&store).unwrap();
        let h = ((a - b) / (a + b)).powi(2);
        let expected = PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()));
        assert!((len - expected).abs() < 1e-3);
    }

    #[test]
    fn straight_bezier_length() {
        let mut store = TopologyStore::new();
        let bez = BezierCurve::new(vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        ])
        .unwrap();
        let edge = MakeEdge::from_curve(EdgeCurve::Bezier(bez))
            .execute(&mut store)
            .unwrap();
        let len = Length::new(edge).execute(&store).unwrap();
        assert!((len - 4.0).abs() < 1e-9);
    }
}
