use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{unit, Curve, CurveDomain};

/// A full circle in 3D space.
///
/// `P(t) = center + radius * (cos(t) * x_dir + sin(t) * (axis x x_dir))`
///
/// The parameter is the angle in radians; the domain is `[0, 2*pi]`.
/// Arcs are edges restricted to a sub-range of this domain.
#[derive(Debug, Clone)]
pub struct Circle {
    center: Point3,
    radius: f64,
    axis: Vector3,
    x_dir: Vector3,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the circle
    /// * `radius` - Radius (must be positive)
    /// * `axis` - Axis of the circle; the curve turns counter-clockwise around it
    /// * `x_dir` - Direction of the point at `t = 0` (must be perpendicular to `axis`)
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, a direction is
    /// zero-length, or `x_dir` is not perpendicular to `axis`.
    pub fn new(center: Point3, radius: f64, axis: Vector3, x_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("circle radius must be positive".into()).into(),
            );
        }
        let axis = unit(axis)?;
        let x_dir = unit(x_dir)?;
        if axis.dot(&x_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to the axis".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            axis,
            x_dir,
        })
    }

    /// Creates a circle around `axis`, choosing the reference direction
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or the axis is zero-length.
    pub fn from_axis(center: Point3, radius: f64, axis: Vector3) -> Result<Self> {
        let axis = unit(axis)?;
        let reference = if axis.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        // Gram-Schmidt keeps +X as the start direction for circles in the XY plane
        let x_dir = reference - axis * axis.dot(&reference);
        Self::new(center, radius, axis, x_dir)
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the unit axis of the circle.
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Returns the direction of the point at `t = 0`.
    #[must_use]
    pub fn x_dir(&self) -> &Vector3 {
        &self.x_dir
    }

    /// Length of the arc between two parameters.
    #[must_use]
    pub fn arc_length(&self, t0: f64, t1: f64) -> f64 {
        self.radius * (t1 - t0).abs()
    }

    fn y_dir(&self) -> Vector3 {
        self.axis.cross(&self.x_dir)
    }
}

impl Curve for Circle {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let (sin, cos) = t.sin_cos();
        Ok(self.center + (self.x_dir * cos + self.y_dir() * sin) * self.radius)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let (sin, cos) = t.sin_cos();
        unit(self.y_dir() * cos - self.x_dir * sin)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, std::f64::consts::TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn xy_circle(radius: f64) -> Circle {
        Circle::new(Point3::origin(), radius, Vector3::z(), Vector3::x()).unwrap()
    }

    #[test]
    fn evaluate_at_quarter_turn() {
        let c = xy_circle(3.0);
        let p = c.evaluate(FRAC_PI_2).unwrap();
        assert!((p - Point3::new(0.0, 3.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn tangent_turns_counter_clockwise() {
        let c = xy_circle(1.0);
        let t = c.tangent(0.0).unwrap();
        assert!((t - Vector3::y()).norm() < 1e-9);
    }

    #[test]
    fn from_axis_starts_on_x_for_xy_plane() {
        let c = Circle::from_axis(Point3::new(1.0, 2.0, 0.0), 2.0, Vector3::z()).unwrap();
        let p = c.evaluate(0.0).unwrap();
        assert!((p - Point3::new(3.0, 2.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn flipped_axis_turns_clockwise() {
        let c = Circle::new(Point3::origin(), 1.0, -Vector3::z(), Vector3::x()).unwrap();
        let p = c.evaluate(FRAC_PI_2).unwrap();
        assert!((p - Point3::new(0.0, -1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn arc_length_of_half_circle() {
        let c = xy_circle(2.0);
        assert!((c.arc_length(0.0, PI) - 2.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn invalid_radius() {
        assert!(Circle::new(Point3::origin(), 0.0, Vector3::z(), Vector3::x()).is_err());
    }

    #[test]
    fn non_perpendicular_reference() {
        let r = Circle::new(Point3::origin(), 1.0, Vector3::z(), Vector3::new(1.0, 0.0, 1.0));
        assert!(r.is_err());
    }
}
