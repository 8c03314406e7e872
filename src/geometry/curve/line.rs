use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::{unit, Curve, CurveDomain};

/// An infinite line defined by an origin point and a unit direction.
///
/// The parametric form is `P(t) = origin + t * direction`, so the
/// parameter measures arc length from the origin.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Point3,
    direction: Vector3,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        Ok(Self {
            origin,
            direction: unit(direction)?,
        })
    }

    /// Creates the line through `start` and `end`, with `start` at `t = 0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn through(start: Point3, end: Point3) -> Result<Self> {
        Self::new(start, end - start)
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Returns the parameter of the orthogonal projection of `point` onto the line.
    #[must_use]
    pub fn parameter_of(&self, point: &Point3) -> f64 {
        (point - self.origin).dot(&self.direction)
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.origin + self.direction * t)
    }

    fn tangent(&self, _t: f64) -> Result<Vector3> {
        Ok(self.direction)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn through_two_points_is_arc_length_parameterized() {
        let line = Line::through(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0)).unwrap();
        let end = line.evaluate(5.0).unwrap();
        assert_abs_diff_eq!(end.x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(end.y, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn parameter_of_projects_onto_line() {
        let line = Line::new(Point3::origin(), Vector3::x()).unwrap();
        assert_abs_diff_eq!(line.parameter_of(&Point3::new(2.5, 7.0, -1.0)), 2.5);
    }

    #[test]
    fn coincident_points_are_rejected() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(Line::through(p, p).is_err());
    }
}
