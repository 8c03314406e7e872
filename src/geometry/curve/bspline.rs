//! Clamped (optionally rational) B-spline curves.
//!
//! Evaluation runs de Boor's algorithm in homogeneous coordinates, so the
//! same code path serves polynomial and rational splines. Knot insertion
//! (Boehm) drives both sub-range extraction and Bezier decomposition.

use nalgebra::Vector4;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

use super::{unit, BezierCurve, Curve, CurveDomain};

/// Knots closer than this are treated as the same knot.
const KNOT_EPSILON: f64 = 1e-12;

/// Subdivision depth every discretized span reaches before the chord test applies.
const MIN_SUBDIVISION_DEPTH: u32 = 2;

const MAX_SUBDIVISION_DEPTH: u32 = 20;

/// Samples fitted per piece when approximating by cubics.
const FIT_SAMPLES: usize = 24;

const FIT_ITERATIONS: usize = 4;

type Homogeneous = Vector4<f64>;

/// A clamped B-spline curve in 3D space.
///
/// The knot vector has `poles.len() + degree + 1` entries, its first and
/// last knots repeat exactly `degree + 1` times and no interior knot
/// repeats more than `degree` times. Weights are all `1.0` for
/// polynomial splines.
#[derive(Debug, Clone, PartialEq)]
pub struct BSplineCurve {
    poles: Vec<Point3>,
    weights: Vec<f64>,
    degree: usize,
    knots: Vec<f64>,
}

impl BSplineCurve {
    /// Creates a polynomial B-spline.
    ///
    /// # Errors
    ///
    /// Returns an error if the degree, pole count and knot vector are inconsistent
    /// or the knot vector is not clamped.
    pub fn new(poles: Vec<Point3>, degree: usize, knots: Vec<f64>) -> Result<Self> {
        let weights = vec![1.0; poles.len()];
        Self::build(poles, weights, degree, knots)
    }

    /// Creates a rational B-spline (NURBS).
    ///
    /// # Errors
    ///
    /// Returns an error if the weights are not one positive finite value per
    /// pole, or for any reason [`BSplineCurve::new`] fails.
    pub fn rational(
        poles: Vec<Point3>,
        weights: Vec<f64>,
        degree: usize,
        knots: Vec<f64>,
    ) -> Result<Self> {
        if weights.len() != poles.len() {
            return Err(
                GeometryError::Degenerate("one weight per pole is required".into()).into(),
            );
        }
        if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(GeometryError::Degenerate("weights must be positive".into()).into());
        }
        Self::build(poles, weights, degree, knots)
    }

    /// Creates a polynomial B-spline with a clamped uniform knot vector on `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `degree` is zero or not below the pole count.
    pub fn with_uniform_knots(poles: Vec<Point3>, degree: usize) -> Result<Self> {
        let n = poles.len();
        if degree == 0 || degree >= n {
            return Err(GeometryError::Degenerate(format!(
                "degree {degree} is invalid for {n} poles"
            ))
            .into());
        }
        let spans = n - degree;
        let mut knots = vec![0.0; degree + 1];
        #[allow(clippy::cast_precision_loss)]
        let interior = (1..spans).map(|i| i as f64 / spans as f64);
        knots.extend(interior);
        knots.resize(n + degree + 1, 1.0);
        Self::new(poles, degree, knots)
    }

    fn build(poles: Vec<Point3>, weights: Vec<f64>, degree: usize, knots: Vec<f64>) -> Result<Self> {
        let n = poles.len();
        if degree == 0 || degree >= n {
            return Err(GeometryError::Degenerate(format!(
                "degree {degree} is invalid for {n} poles"
            ))
            .into());
        }
        if knots.len() != n + degree + 1 {
            return Err(GeometryError::Degenerate(format!(
                "expected {} knots, got {}",
                n + degree + 1,
                knots.len()
            ))
            .into());
        }
        if knots.windows(2).any(|w| w[1] < w[0]) || knots.iter().any(|k| !k.is_finite()) {
            return Err(GeometryError::Degenerate("knots must be non-decreasing".into()).into());
        }

        let start = knots[degree];
        let end = knots[n];
        let clamped = knots[..=degree].iter().all(|&k| k == start)
            && knots[n..].iter().all(|&k| k == end)
            && knots[degree + 1] > start
            && knots[n - 1] < end;
        if !clamped {
            return Err(GeometryError::Degenerate("knot vector must be clamped".into()).into());
        }
        if distinct_interior(&knots, degree, n)
            .iter()
            .any(|&u| multiplicity_in(&knots, u) > degree)
        {
            return Err(GeometryError::Degenerate(
                "interior knot multiplicity exceeds the degree".into(),
            )
            .into());
        }

        Ok(Self {
            poles,
            weights,
            degree,
            knots,
        })
    }

    /// Returns the control poles.
    #[must_use]
    pub fn poles(&self) -> &[Point3] {
        &self.poles
    }

    /// Returns the pole weights (`1.0` for polynomial splines).
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Returns the polynomial degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the full knot vector.
    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Returns `true` if the weights are not all equal.
    #[must_use]
    pub fn is_rational(&self) -> bool {
        let first = self.weights[0];
        self.weights
            .iter()
            .any(|w| (w - first).abs() > KNOT_EPSILON * first.abs().max(1.0))
    }

    /// Evaluates the curve, clamping `t` into the domain.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        let t = self.clamp(t);
        let h = self.homogeneous();
        let k = find_span(&self.knots, self.degree, self.poles.len(), t);
        dehomogenize(&de_boor(&h, &self.knots, self.degree, t, k))
    }

    /// First derivative (not normalised) at `t`.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vector3 {
        let t = self.clamp(t);
        let p = self.degree;
        let n = self.poles.len();
        let h = self.homogeneous();

        let a = de_boor(&h, &self.knots, p, t, find_span(&self.knots, p, n, t));

        #[allow(clippy::cast_precision_loss)]
        let pf = p as f64;
        let d_poles: Vec<Homogeneous> = (0..n - 1)
            .map(|i| {
                let denom = self.knots[i + p + 1] - self.knots[i + 1];
                if denom.abs() < KNOT_EPSILON {
                    Homogeneous::zeros()
                } else {
                    (h[i + 1] - h[i]) * (pf / denom)
                }
            })
            .collect();
        let d_knots = &self.knots[1..self.knots.len() - 1];
        let da = de_boor(&d_poles, d_knots, p - 1, t, find_span(d_knots, p - 1, n - 1, t));

        let point = a.xyz() / a.w;
        (da.xyz() - point * da.w) / a.w
    }

    /// Restricts the spline to the parameter range `[t0, t1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty after clamping to the domain.
    pub fn segment(&self, t0: f64, t1: f64) -> Result<Self> {
        let (t0, t1) = (self.clamp(t0.min(t1)), self.clamp(t0.max(t1)));
        if t1 - t0 <= KNOT_EPSILON {
            return Err(GeometryError::Degenerate("empty spline segment".into()).into());
        }
        let p = self.degree;
        let (start, end) = (self.knots[p], self.knots[self.poles.len()]);

        let mut h = self.homogeneous();
        let mut knots = self.knots.clone();
        let mut bounds = [t0, t1];
        for bound in &mut bounds {
            if *bound - start <= KNOT_EPSILON {
                *bound = start;
            } else if end - *bound <= KNOT_EPSILON {
                *bound = end;
            } else {
                *bound = snap(&knots, *bound);
                while multiplicity_in(&knots, *bound) <= p {
                    insert_knot(&mut h, &mut knots, p, *bound);
                }
            }
        }

        let first_index = |u: f64| knots.iter().position(|&k| k == u).unwrap_or(0);
        let a = first_index(bounds[0]);
        let b = first_index(bounds[1]);
        Ok(Self::from_homogeneous(
            &h[a..b],
            p,
            knots[a..=b + p].to_vec(),
        ))
    }

    /// Returns the same curve traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let sum = self.knots[0] + self.knots[self.knots.len() - 1];
        Self {
            poles: self.poles.iter().rev().copied().collect(),
            weights: self.weights.iter().rev().copied().collect(),
            degree: self.degree,
            knots: self.knots.iter().rev().map(|k| sum - k).collect(),
        }
    }

    /// Splits a polynomial spline into its Bezier segments.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline is rational.
    pub fn to_bezier(&self) -> Result<Vec<BezierCurve>> {
        if self.is_rational() {
            return Err(GeometryError::Degenerate(
                "rational spline has no polynomial bezier form".into(),
            )
            .into());
        }
        let p = self.degree;
        let mut h = self.homogeneous();
        let mut knots = self.knots.clone();
        for u in distinct_interior(&self.knots, p, self.poles.len()) {
            while multiplicity_in(&knots, u) < p {
                insert_knot(&mut h, &mut knots, p, u);
            }
        }

        let poles: Vec<Point3> = h.iter().map(dehomogenize).collect();
        poles
            .windows(p + 1)
            .step_by(p)
            .map(|w| BezierCurve::new(w.to_vec()))
            .collect()
    }

    /// Samples the curve adaptively until every chord deviates from the
    /// curve by at most `tolerance` at its midpoint.
    ///
    /// The returned points include both curve ends.
    #[must_use]
    pub fn discretize(&self, tolerance: f64) -> Vec<Point3> {
        let tolerance = tolerance.max(KNOT_EPSILON);
        let mut breaks = vec![self.knots[self.degree]];
        breaks.extend(distinct_interior(&self.knots, self.degree, self.poles.len()));
        breaks.push(self.knots[self.poles.len()]);

        let mut points = vec![self.point_at(breaks[0])];
        for span in breaks.windows(2) {
            self.subdivide(span[0], span[1], tolerance, 0, &mut points);
        }
        points
    }

    fn subdivide(&self, t0: f64, t1: f64, tolerance: f64, depth: u32, points: &mut Vec<Point3>) {
        let t_mid = 0.5 * (t0 + t1);
        let p0 = self.point_at(t0);
        let p1 = self.point_at(t1);
        let chord_mid = Point3::from((p0.coords + p1.coords) * 0.5);
        let deviation = (self.point_at(t_mid) - chord_mid).norm();

        let flat = depth >= MIN_SUBDIVISION_DEPTH && deviation <= tolerance;
        if flat || depth >= MAX_SUBDIVISION_DEPTH {
            points.push(p1);
        } else {
            self.subdivide(t0, t_mid, tolerance, depth + 1, points);
            self.subdivide(t_mid, t1, tolerance, depth + 1, points);
        }
    }

    /// Approximates the curve by a polynomial cubic spline with C0 joins.
    ///
    /// The domain is split into 1, 2, 4, ... equal pieces (at most
    /// `max_segments`) until each least-squares cubic stays within
    /// `tolerance` of the samples it was fitted to.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ApproximationFailed`] if `max_segments`
    /// pieces are not enough.
    pub fn approximate(&self, tolerance: f64, max_segments: usize) -> Result<Self> {
        let max_segments = max_segments.max(1);
        let mut pieces = 1;
        loop {
            if let Some(spline) = self.fit_cubic_pieces(pieces, tolerance) {
                return Ok(spline);
            }
            if pieces >= max_segments {
                return Err(GeometryError::ApproximationFailed {
                    tolerance,
                    max_segments,
                }
                .into());
            }
            pieces = (pieces * 2).min(max_segments);
        }
    }

    fn fit_cubic_pieces(&self, pieces: usize, tolerance: f64) -> Option<Self> {
        let (start, end) = (self.knots[self.degree], self.knots[self.poles.len()]);
        #[allow(clippy::cast_precision_loss)]
        let breaks: Vec<f64> = (0..=pieces)
            .map(|i| start + (end - start) * i as f64 / pieces as f64)
            .collect();

        let mut poles = vec![self.point_at(start)];
        let mut knots = vec![start; 4];
        for (index, span) in breaks.windows(2).enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let samples: Vec<Point3> = (0..=FIT_SAMPLES)
                .map(|i| self.point_at(span[0] + (span[1] - span[0]) * i as f64 / FIT_SAMPLES as f64))
                .collect();
            let (c1, c2) = fit_cubic(&samples, tolerance)?;
            poles.extend([c1, c2, samples[FIT_SAMPLES]]);
            if index + 1 < pieces {
                knots.extend([span[1]; 3]);
            }
        }
        knots.extend([end; 4]);

        Some(Self {
            weights: vec![1.0; poles.len()],
            poles,
            degree: 3,
            knots,
        })
    }

    fn clamp(&self, t: f64) -> f64 {
        t.clamp(self.knots[self.degree], self.knots[self.poles.len()])
    }

    fn homogeneous(&self) -> Vec<Homogeneous> {
        self.poles
            .iter()
            .zip(&self.weights)
            .map(|(p, &w)| Homogeneous::new(p.x * w, p.y * w, p.z * w, w))
            .collect()
    }

    fn from_homogeneous(h: &[Homogeneous], degree: usize, knots: Vec<f64>) -> Self {
        Self {
            poles: h.iter().map(dehomogenize).collect(),
            weights: h.iter().map(|v| v.w).collect(),
            degree,
            knots,
        }
    }
}

impl Curve for BSplineCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let domain = self.domain();
        if t < domain.t_min - KNOT_EPSILON || t > domain.t_max + KNOT_EPSILON {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: domain.t_min,
                max: domain.t_max,
            }
            .into());
        }
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        unit(self.derivative_at(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.knots[self.degree], self.knots[self.poles.len()])
    }

    fn is_closed(&self) -> bool {
        (self.poles[0] - self.poles[self.poles.len() - 1]).norm() < crate::math::TOLERANCE
    }
}

fn dehomogenize(h: &Homogeneous) -> Point3 {
    Point3::new(h.x / h.w, h.y / h.w, h.z / h.w)
}

/// Largest span index `k` in `[degree, n - 1]` with `knots[k] <= t < knots[k + 1]`.
fn find_span(knots: &[f64], degree: usize, n: usize, t: f64) -> usize {
    if t >= knots[n] {
        return n - 1;
    }
    let mut low = degree;
    let mut high = n;
    while low < high {
        let mid = (low + high) / 2;
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    low.max(degree + 1) - 1
}

fn de_boor(h: &[Homogeneous], knots: &[f64], degree: usize, t: f64, k: usize) -> Homogeneous {
    let p = degree;
    let mut d: Vec<Homogeneous> = (0..=p).map(|j| h[k - p + j]).collect();
    for r in 1..=p {
        for j in (r..=p).rev() {
            let i = k - p + j;
            let denom = knots[i + p - r + 1] - knots[i];
            let alpha = if denom.abs() < KNOT_EPSILON {
                0.0
            } else {
                (t - knots[i]) / denom
            };
            d[j] = d[j - 1] * (1.0 - alpha) + d[j] * alpha;
        }
    }
    d[p]
}

/// Boehm knot insertion in homogeneous space.
fn insert_knot(h: &mut Vec<Homogeneous>, knots: &mut Vec<f64>, degree: usize, t: f64) {
    let p = degree;
    let n = h.len();
    let k = find_span(knots, p, n, t);

    let inserted: Vec<Homogeneous> = (0..=n)
        .map(|i| {
            if i + p <= k {
                h[i]
            } else if i > k {
                h[i - 1]
            } else {
                let denom = knots[i + p] - knots[i];
                let alpha = if denom.abs() < KNOT_EPSILON {
                    0.0
                } else {
                    (t - knots[i]) / denom
                };
                h[i - 1] * (1.0 - alpha) + h[i] * alpha
            }
        })
        .collect();

    *h = inserted;
    knots.insert(k + 1, t);
}

fn multiplicity_in(knots: &[f64], u: f64) -> usize {
    knots.iter().filter(|&&k| (k - u).abs() <= KNOT_EPSILON).count()
}

/// Returns the existing knot within tolerance of `t`, or `t` itself.
fn snap(knots: &[f64], t: f64) -> f64 {
    knots
        .iter()
        .copied()
        .find(|k| (k - t).abs() <= KNOT_EPSILON)
        .unwrap_or(t)
}

fn distinct_interior(knots: &[f64], degree: usize, n: usize) -> Vec<f64> {
    let (start, end) = (knots[degree], knots[n]);
    let mut out: Vec<f64> = Vec::new();
    for &k in &knots[degree + 1..n] {
        if k > start && k < end && out.last().map_or(true, |&last| k - last > KNOT_EPSILON) {
            out.push(k);
        }
    }
    out
}

/// Least-squares cubic through the end samples of `points`.
///
/// Returns the inner control points if the fit ends within `tolerance`.
fn fit_cubic(points: &[Point3], tolerance: f64) -> Option<(Point3, Point3)> {
    let p0 = points[0];
    let p3 = points[points.len() - 1];
    let mut params = chord_length_params(points);

    for _ in 0..FIT_ITERATIONS {
        let (c1, c2) = least_squares_inner(points, &params);
        let curve = BezierCurve::new(vec![p0, c1, c2, p3]).ok()?;
        let max_error = points
            .iter()
            .zip(&params)
            .map(|(q, &u)| (curve.point_at(u) - q).norm())
            .fold(0.0, f64::max);
        if max_error <= tolerance {
            return Some((c1, c2));
        }
        params = reparameterize(&curve, points, &params);
    }
    None
}

fn chord_length_params(points: &[Point3]) -> Vec<f64> {
    let mut params = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    params.push(0.0);
    for w in points.windows(2) {
        acc += (w[1] - w[0]).norm();
        params.push(acc);
    }
    if acc <= KNOT_EPSILON {
        #[allow(clippy::cast_precision_loss)]
        let uniform = (0..points.len()).map(|i| i as f64 / (points.len() - 1) as f64);
        return uniform.collect();
    }
    params.iter().map(|u| u / acc).collect()
}

fn least_squares_inner(points: &[Point3], params: &[f64]) -> (Point3, Point3) {
    let p0 = points[0].coords;
    let p3 = points[points.len() - 1].coords;

    let mut c00 = 0.0;
    let mut c01 = 0.0;
    let mut c11 = 0.0;
    let mut x0 = Vector3::zeros();
    let mut x1 = Vector3::zeros();
    for (q, &t) in points.iter().zip(params) {
        let s = 1.0 - t;
        let a1 = 3.0 * s * s * t;
        let a2 = 3.0 * s * t * t;
        let rest = q.coords - p0 * (s * s * s) - p3 * (t * t * t);
        c00 += a1 * a1;
        c01 += a1 * a2;
        c11 += a2 * a2;
        x0 += rest * a1;
        x1 += rest * a2;
    }

    let det = c00 * c11 - c01 * c01;
    if det.abs() < 1e-12 {
        let third = (p3 - p0) / 3.0;
        return (Point3::from(p0 + third), Point3::from(p0 + third * 2.0));
    }
    let c1 = (x0 * c11 - x1 * c01) / det;
    let c2 = (x1 * c00 - x0 * c01) / det;
    (Point3::from(c1), Point3::from(c2))
}

/// One Newton-Raphson step per sample towards its closest curve parameter.
fn reparameterize(curve: &BezierCurve, points: &[Point3], params: &[f64]) -> Vec<f64> {
    points
        .iter()
        .zip(params)
        .map(|(q, &u)| {
            let diff = curve.point_at(u) - q;
            let d1 = curve.derivative_at(u);
            let d2 = curve.second_derivative_at(u);
            let numerator = diff.dot(&d1);
            let denominator = d1.dot(&d1) + diff.dot(&d2);
            if denominator.abs() < KNOT_EPSILON {
                u
            } else {
                (u - numerator / denominator).clamp(0.0, 1.0)
            }
        })
        .collect()
}
