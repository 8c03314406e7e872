use crate::error::{GeometryError, Result};
use crate::geometry::curve::{BSplineCurve, BezierCurve, Circle, Curve, CurveDomain, Ellipse, Line};
use crate::math::{Point3, Vector3};

use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// The geometric curve associated with an edge.
#[derive(Debug, Clone)]
pub enum EdgeCurve {
    /// A straight segment.
    Line(Line),
    /// A circle or circular arc.
    Circle(Circle),
    /// An ellipse or elliptical arc.
    Ellipse(Ellipse),
    /// A single Bezier segment.
    Bezier(BezierCurve),
    /// A (possibly rational) B-spline.
    BSpline(BSplineCurve),
}

impl EdgeCurve {
    /// Short name of the curve kind, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line(_) => "line",
            Self::Circle(_) => "circle",
            Self::Ellipse(_) => "ellipse",
            Self::Bezier(_) => "bezier",
            Self::BSpline(_) => "bspline",
        }
    }

    /// Axis of the curve plane for circles and ellipses.
    #[must_use]
    pub fn conic_axis(&self) -> Option<&Vector3> {
        match self {
            Self::Circle(c) => Some(c.axis()),
            Self::Ellipse(e) => Some(e.axis()),
            _ => None,
        }
    }

    /// B-spline form of a free-form curve restricted to `[t0, t1]`.
    ///
    /// # Errors
    ///
    /// Returns an error for lines and conics, or if the range is empty.
    pub fn to_bspline(&self, t0: f64, t1: f64) -> Result<BSplineCurve> {
        let spline = match self {
            Self::Bezier(b) => b.to_bspline()?,
            Self::BSpline(s) => s.clone(),
            other => {
                return Err(GeometryError::Degenerate(format!(
                    "{} has no B-spline form",
                    other.kind()
                ))
                .into())
            }
        };
        let domain = spline.domain();
        if (t0 - domain.t_min).abs() < f64::EPSILON && (t1 - domain.t_max).abs() < f64::EPSILON {
            return Ok(spline);
        }
        spline.segment(t0, t1)
    }
}

impl Curve for EdgeCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        match self {
            Self::Line(c) => c.evaluate(t),
            Self::Circle(c) => c.evaluate(t),
            Self::Ellipse(c) => c.evaluate(t),
            Self::Bezier(c) => c.evaluate(t),
            Self::BSpline(c) => c.evaluate(t),
        }
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        match self {
            Self::Line(c) => c.tangent(t),
            Self::Circle(c) => c.tangent(t),
            Self::Ellipse(c) => c.tangent(t),
            Self::Bezier(c) => c.tangent(t),
            Self::BSpline(c) => c.tangent(t),
        }
    }

    fn domain(&self) -> CurveDomain {
        match self {
            Self::Line(c) => c.domain(),
            Self::Circle(c) => c.domain(),
            Self::Ellipse(c) => c.domain(),
            Self::Bezier(c) => c.domain(),
            Self::BSpline(c) => c.domain(),
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Self::Line(c) => c.is_closed(),
            Self::Circle(c) => c.is_closed(),
            Self::Ellipse(c) => c.is_closed(),
            Self::Bezier(c) => c.is_closed(),
            Self::BSpline(c) => c.is_closed(),
        }
    }
}

/// Data associated with a topological edge.
///
/// An edge bounds the curve between `t_start` and `t_end`. A closed curve
/// edge (full circle, closed spline) starts and ends on the same vertex.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
    /// The geometric curve defining this edge's shape.
    pub curve: EdgeCurve,
    /// Parameter on the curve corresponding to the start vertex.
    pub t_start: f64,
    /// Parameter on the curve corresponding to the end vertex.
    pub t_end: f64,
}

impl EdgeData {
    /// Returns `true` if both ends share one vertex.
    #[must_use]
    pub fn is_single_vertex(&self) -> bool {
        self.start == self.end
    }

    /// Width of the parameter range.
    #[must_use]
    pub fn parameter_span(&self) -> f64 {
        self.t_end - self.t_start
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bezier_restricts_to_edge_range() {
        let bez = BezierCurve::new(vec![
            Point3::origin(),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ])
        .unwrap();
        let curve = EdgeCurve::Bezier(bez.clone());
        let part = curve.to_bspline(0.25, 0.75).unwrap();
        assert!((part.point_at(0.25) - bez.point_at(0.25)).norm() < 1e-12);
        assert!((part.point_at(0.75) - bez.point_at(0.75)).norm() < 1e-12);
    }

    #[test]
    fn line_has_no_bspline_form() {
        let line = Line::through(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(EdgeCurve::Line(line).to_bspline(0.0, 1.0).is_err());
    }

    #[test]
    fn conic_axis_only_for_conics() {
        let circle = Circle::from_axis(Point3::origin(), 1.0, Vector3::z()).unwrap();
        assert_eq!(EdgeCurve::Circle(circle).conic_axis(), Some(&Vector3::z()));
        let line = Line::through(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert!(EdgeCurve::Line(line).conic_axis().is_none());
    }
}
