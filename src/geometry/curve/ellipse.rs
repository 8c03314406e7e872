use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{unit, Curve, CurveDomain};

/// A full ellipse in 3D space.
///
/// `P(t) = center + a * cos(t) * major_dir + b * sin(t) * (axis x major_dir)`
///
/// where `a` is the major radius and `b` the minor radius. The domain is
/// `[0, 2*pi]`; elliptical arcs are edges over a sub-range.
#[derive(Debug, Clone)]
pub struct Ellipse {
    center: Point3,
    major_radius: f64,
    minor_radius: f64,
    axis: Vector3,
    major_dir: Vector3,
}

impl Ellipse {
    /// Creates a new ellipse.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the ellipse
    /// * `major_radius` - Semi-major axis length
    /// * `minor_radius` - Semi-minor axis length (positive, not above `major_radius`)
    /// * `axis` - Axis of the ellipse plane
    /// * `major_dir` - Major axis direction (must be perpendicular to `axis`)
    ///
    /// # Errors
    ///
    /// Returns an error if a radius is non-positive, the minor radius exceeds
    /// the major one, a direction is zero-length, or `major_dir` is not
    /// perpendicular to `axis`.
    pub fn new(
        center: Point3,
        major_radius: f64,
        minor_radius: f64,
        axis: Vector3,
        major_dir: Vector3,
    ) -> Result<Self> {
        if minor_radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("minor radius must be positive".into()).into(),
            );
        }
        if major_radius < minor_radius {
            return Err(GeometryError::Degenerate(
                "major radius must not be smaller than minor radius".into(),
            )
            .into());
        }
        let axis = unit(axis)?;
        let major_dir = unit(major_dir)?;
        if axis.dot(&major_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "major direction must be perpendicular to the axis".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            major_radius,
            minor_radius,
            axis,
            major_dir,
        })
    }

    /// Returns the center of the ellipse.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the semi-major axis length.
    #[must_use]
    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    /// Returns the semi-minor axis length.
    #[must_use]
    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    /// Returns the unit axis of the ellipse plane.
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Returns the major axis direction.
    #[must_use]
    pub fn major_dir(&self) -> &Vector3 {
        &self.major_dir
    }

    fn minor_dir(&self) -> Vector3 {
        self.axis.cross(&self.major_dir)
    }
}

impl Curve for Ellipse {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let (sin, cos) = t.sin_cos();
        Ok(self.center
            + self.major_dir * (self.major_radius * cos)
            + self.minor_dir() * (self.minor_radius * sin))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let (sin, cos) = t.sin_cos();
        unit(self.minor_dir() * (self.minor_radius * cos) - self.major_dir * (self.major_radius * sin))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, std::f64::consts::TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}
