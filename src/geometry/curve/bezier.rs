use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{unit, BSplineCurve, Curve, CurveDomain};

/// A polynomial Bezier curve of arbitrary degree over `t` in `[0, 1]`.
///
/// The degree is `poles.len() - 1`; the curve passes through the first
/// and last pole.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve {
    poles: Vec<Point3>,
}

impl BezierCurve {
    /// Creates a Bezier curve from its control poles.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two poles are given.
    pub fn new(poles: Vec<Point3>) -> Result<Self> {
        if poles.len() < 2 {
            return Err(
                GeometryError::Degenerate("bezier curve needs at least 2 poles".into()).into(),
            );
        }
        Ok(Self { poles })
    }

    /// Returns the control poles.
    #[must_use]
    pub fn poles(&self) -> &[Point3] {
        &self.poles
    }

    /// Returns the polynomial degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.poles.len() - 1
    }

    /// Returns the first pole (the curve start point).
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.poles[0]
    }

    /// Returns the last pole (the curve end point).
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.poles[self.poles.len() - 1]
    }

    /// De Casteljau evaluation.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        let mut work: Vec<Vector3> = self.poles.iter().map(|p| p.coords).collect();
        de_casteljau(&mut work, t);
        Point3::from(work[0])
    }

    /// First derivative (not normalised) at `t`.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vector3 {
        let mut diffs = differences(&self.poles.iter().map(|p| p.coords).collect::<Vec<_>>());
        #[allow(clippy::cast_precision_loss)]
        let n = self.degree() as f64;
        de_casteljau(&mut diffs, t);
        diffs[0] * n
    }

    /// Second derivative at `t`; zero for curves below degree 2.
    #[must_use]
    pub fn second_derivative_at(&self, t: f64) -> Vector3 {
        let degree = self.degree();
        if degree < 2 {
            return Vector3::zeros();
        }
        let coords: Vec<Vector3> = self.poles.iter().map(|p| p.coords).collect();
        let mut second = differences(&differences(&coords));
        de_casteljau(&mut second, t);
        #[allow(clippy::cast_precision_loss)]
        let factor = (degree * (degree - 1)) as f64;
        second[0] * factor
    }

    /// Converts the curve to a clamped B-spline over `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline cannot be built (never for a valid curve).
    pub fn to_bspline(&self) -> Result<BSplineCurve> {
        let degree = self.degree();
        let mut knots = vec![0.0; degree + 1];
        knots.resize(2 * (degree + 1), 1.0);
        BSplineCurve::new(self.poles.clone(), degree, knots)
    }
}

impl Curve for BezierCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        unit(self.derivative_at(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        (self.start() - self.end()).norm() < TOLERANCE
    }
}

/// Collapses `work` in place; the result is left in `work[0]`.
fn de_casteljau(work: &mut [Vector3], t: f64) {
    let n = work.len();
    for r in 1..n {
        for i in 0..n - r {
            work[i] = work[i] * (1.0 - t) + work[i + 1] * t;
        }
    }
}

fn differences(points: &[Vector3]) -> Vec<Vector3> {
    points.windows(2).map(|w| w[1] - w[0]).collect()
}
