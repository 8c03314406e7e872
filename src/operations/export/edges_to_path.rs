use tracing::{debug, trace};

use crate::error::{PathError, Result, TopologyError};
use crate::geometry::curve::Curve;
use crate::geometry::Plane;
use crate::math::{points_connected, project_point, Point2, Point3, Vector3, TOLERANCE};
use crate::svg::{CircleElement, PathStyle, SvgPath};
use crate::tessellation::DiscretizeEdge;
use crate::topology::{EdgeCurve, EdgeData, EdgeId, TopologyStore, WireId};

use super::circle_to_svg::CircleToSvg;
use super::group_edges::{first_edge_orientation, FixWire, GroupEdges};
use super::ExportContext;

/// Tolerance for the approximation of high-degree or rational splines.
const APPROXIMATION_TOLERANCE: f64 = 0.05;
const APPROXIMATION_MAX_SEGMENTS: usize = 50;
/// Chord tolerance when a spline has to be drawn as a polyline.
const FINE_DISCRETIZATION: f64 = 0.1;

/// External projector able to render an arc seen along `view_normal` as a
/// ready-made arc fragment (the arguments after the `A` letter).
pub trait ArcProjector {
    /// Returns `None` to let the translator compute the arc itself.
    fn project_arc(&self, store: &TopologyStore, edge: EdgeId, view_normal: &Vector3) -> Option<String>;
}

/// The result of translating one group of edges.
#[derive(Debug, Clone, PartialEq)]
pub enum SvgFragment {
    /// A path element built from the edges.
    Path(SvgPath),
    /// A complete circle seen face-on, emitted as a `<circle>` element.
    Circle(CircleElement),
    /// Nothing to draw: there were no edges, or the path repeats one
    /// already emitted in this export.
    Suppressed,
}

impl SvgFragment {
    /// The element text; empty when suppressed.
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        match self {
            Self::Path(path) => path.to_svg_string(),
            Self::Circle(circle) => circle.to_svg_string(),
            Self::Suppressed => String::new(),
        }
    }

    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed)
    }
}

enum EdgeSource {
    Edges(Vec<EdgeId>),
    Wires(Vec<WireId>),
}

/// Translates connected edges into one SVG path.
///
/// Loose edges are grouped into chains first; wires are re-sorted. Each
/// chain starts a subpath with `MoveTo` and every edge continues from the
/// end of the previous one:
///
/// - lines become `L`,
/// - circles and ellipses facing the viewer become `A` arcs (a complete
///   circle short-circuits to a `<circle>` element),
/// - conics seen at an angle are discretized,
/// - Bezier and B-spline edges become `L`/`Q`/`C` segments, after a cubic
///   approximation when they are rational or above degree 3.
pub struct EdgesToPath<'a> {
    source: EdgeSource,
    style: PathStyle,
    name: Option<String>,
    plane: Option<&'a Plane>,
    arc_projector: Option<&'a dyn ArcProjector>,
}

impl<'a> EdgesToPath<'a> {
    /// Translates loose edges, grouping them into chains.
    #[must_use]
    pub fn from_edges(edges: Vec<EdgeId>, style: PathStyle) -> Self {
        Self::with_source(EdgeSource::Edges(edges), style)
    }

    /// Translates wires, one chain per wire.
    #[must_use]
    pub fn from_wires(wires: Vec<WireId>, style: PathStyle) -> Self {
        Self::with_source(EdgeSource::Wires(wires), style)
    }

    fn with_source(source: EdgeSource, style: PathStyle) -> Self {
        Self {
            source,
            style,
            name: None,
            plane: None,
            arc_projector: None,
        }
    }

    /// Sets the element id.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Drawing plane; without one, `z` is dropped and the context's view
    /// normal decides which arcs face the viewer.
    #[must_use]
    pub fn with_plane(mut self, plane: Option<&'a Plane>) -> Self {
        self.plane = plane;
        self
    }

    #[must_use]
    pub fn with_arc_projector(mut self, projector: &'a dyn ArcProjector) -> Self {
        self.arc_projector = Some(projector);
        self
    }

    /// Executes the translation.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EdgesNotOrdered`] if an edge does not touch
    /// the previous one, [`PathError::UnsupportedBezierDegree`] if a Bezier
    /// decomposition yields an unexpected degree, or any geometry error
    /// raised while evaluating the curves.
    pub fn execute(&self, store: &TopologyStore, ctx: &mut ExportContext<'_>) -> Result<SvgFragment> {
        let groups = match &self.source {
            EdgeSource::Edges(edges) => GroupEdges::new(edges.clone()).execute(store)?,
            EdgeSource::Wires(wires) => wires
                .iter()
                .map(|&wire| FixWire::new(wire).execute(store))
                .collect::<Result<Vec<_>>>()?,
        };

        let mut path = match &self.name {
            Some(name) => SvgPath::named(name.clone()),
            None => SvgPath::new(),
        };
        path.set_style(self.style.clone());

        for group in groups.iter().filter(|group| !group.is_empty()) {
            if let Some(circle) = self.translate_chain(store, ctx, group, &mut path)? {
                return Ok(circle);
            }
        }

        if path.is_empty() {
            debug!(name = ?self.name, "no edges to translate");
            return Ok(SvgFragment::Suppressed);
        }
        let d = path.d();
        if ctx.is_emitted(&d) {
            debug!(name = ?self.name, "identical path already emitted, suppressing");
            return Ok(SvgFragment::Suppressed);
        }
        ctx.register(d);
        Ok(SvgFragment::Path(path))
    }

    /// Appends one chain; returns a fragment when a complete circle
    /// short-circuits the translation.
    fn translate_chain(
        &self,
        store: &TopologyStore,
        ctx: &ExportContext<'_>,
        chain: &[EdgeId],
        path: &mut SvgPath,
    ) -> Result<Option<SvgFragment>> {
        let first = first_edge_orientation(store, chain)?;
        let mut current: Option<Point3> = None;

        for (index, &edge_id) in chain.iter().enumerate() {
            let edge = store.edge(edge_id)?;
            let (start, end) = store.edge_endpoints(edge_id)?;
            let forward = match current {
                None => first.forward,
                Some(previous) if points_connected(&start, &previous) => true,
                Some(previous) if points_connected(&end, &previous) => false,
                Some(_) => return Err(TopologyError::EdgesNotOrdered { index }.into()),
            };
            let (from, to) = if forward { (start, end) } else { (end, start) };
            if current.is_none() {
                path.move_to(self.project(&from));
            }
            trace!(edge = ?edge_id, kind = edge.curve.kind(), forward, "translating edge");

            match &edge.curve {
                EdgeCurve::Line(_) => path.line_to(self.project(&to)),
                EdgeCurve::Circle(_) | EdgeCurve::Ellipse(_) => {
                    if let Some(circle) = self.conic(store, ctx, edge_id, edge, forward, &to, path)? {
                        return Ok(Some(circle));
                    }
                }
                EdgeCurve::Bezier(_) | EdgeCurve::BSpline(_) => {
                    self.free_form(edge_id, edge, forward, path)?;
                }
            }
            current = Some(to);
        }
        Ok(None)
    }

    #[allow(clippy::too_many_arguments)]
    fn conic(
        &self,
        store: &TopologyStore,
        ctx: &ExportContext<'_>,
        edge_id: EdgeId,
        edge: &EdgeData,
        forward: bool,
        to: &Point3,
        path: &mut SvgPath,
    ) -> Result<Option<SvgFragment>> {
        let view_normal = self.plane.map_or(*ctx.view_normal(), |plane| *plane.axis());
        let faces_viewer = edge
            .curve
            .conic_axis()
            .is_some_and(|axis| faces_view(axis, &view_normal));

        if !faces_viewer {
            let polyline = DiscretizeEdge::new(edge_id)
                .with_plane(self.plane)
                .with_params(ctx.params())
                .reversed(!forward)
                .execute(store)?;
            path.append_data(&polyline);
            return Ok(None);
        }

        if let Some(fragment) = self
            .arc_projector
            .and_then(|projector| projector.project_arc(store, edge_id, &view_normal))
        {
            path.append_raw('A', fragment)?;
            return Ok(None);
        }

        let (rx, ry, rotation) = match &edge.curve {
            EdgeCurve::Circle(circle) => {
                if edge.is_single_vertex() {
                    let fragment = CircleToSvg::new(edge_id, self.style.clone())
                        .with_plane(self.plane)
                        .execute(store, ctx)?;
                    return Ok(Some(fragment));
                }
                (circle.radius(), circle.radius(), 0.0)
            }
            EdgeCurve::Ellipse(ellipse) => {
                let major = ellipse.major_dir();
                let (u, v) = self
                    .plane
                    .map_or((Vector3::x(), Vector3::y()), |p| (*p.u_dir(), *p.v_dir()));
                let rotation = normalize_rotation(major.dot(&v).atan2(major.dot(&u)).to_degrees());
                (ellipse.major_radius(), ellipse.minor_radius(), rotation)
            }
            _ => return Ok(None),
        };

        let sweep = sweep_flag(edge, &view_normal)? ^ !forward;
        let mut arc = |span: f64, end: Point2| {
            path.elliptical_arc_to(rx, ry, rotation, span.abs() > std::f64::consts::PI + TOLERANCE, sweep, end)
        };
        if edge.is_single_vertex() {
            let half = edge.parameter_span() / 2.0;
            let middle = edge.curve.evaluate(edge.t_start + half)?;
            arc(half, self.project(&middle))?;
            arc(half, self.project(to))?;
        } else {
            arc(edge.parameter_span(), self.project(to))?;
        }
        Ok(None)
    }

    fn free_form(&self, edge_id: EdgeId, edge: &EdgeData, forward: bool, path: &mut SvgPath) -> Result<()> {
        let mut spline = edge.curve.to_bspline(edge.t_start, edge.t_end)?;
        if spline.degree() > 3 || spline.is_rational() {
            match spline.approximate(APPROXIMATION_TOLERANCE, APPROXIMATION_MAX_SEGMENTS) {
                Ok(approximation) => spline = approximation,
                Err(err) => debug!(edge = ?edge_id, %err, "unable to approximate bspline"),
            }
        }
        if !forward {
            spline = spline.reversed();
        }

        if spline.degree() <= 3 && !spline.is_rational() {
            for segment in spline.to_bezier()? {
                let poles: Vec<Point2> = segment.poles()[1..].iter().map(|p| self.project(p)).collect();
                match segment.degree() {
                    1 => path.line_to(poles[0]),
                    2 => path.quadratic_curve_to(poles[0], poles[1])?,
                    3 => path.cubic_curve_to(poles[0], poles[1], poles[2])?,
                    degree => return Err(PathError::UnsupportedBezierDegree(degree).into()),
                }
            }
        } else {
            debug!(edge = ?edge_id, tolerance = FINE_DISCRETIZATION, "edge discretized");
            for point in spline.discretize(FINE_DISCRETIZATION).iter().skip(1) {
                path.line_to(self.project(point));
            }
        }
        Ok(())
    }

    fn project(&self, point: &Point3) -> Point2 {
        project_point(point, self.plane)
    }
}

/// Whether the curve axis is parallel or anti-parallel to the view normal,
/// with the angle rounded to hundredths of a radian.
pub(crate) fn faces_view(axis: &Vector3, view_normal: &Vector3) -> bool {
    let hundredths = (axis.angle(view_normal) * 100.0).round();
    hundredths == 0.0 || hundredths == 314.0
}

/// Folds an angle in degrees into `(-90, 90]`.
fn normalize_rotation(mut degrees: f64) -> f64 {
    if degrees > 90.0 {
        degrees -= 180.0;
    }
    if degrees <= -90.0 {
        degrees += 180.0;
    }
    degrees
}

/// Sweep sense of the edge in its natural direction: set when the tangent
/// turns clockwise about the view normal over the first tenth of the range.
fn sweep_flag(edge: &EdgeData, view_normal: &Vector3) -> Result<bool> {
    let t1 = edge.curve.tangent(edge.t_start)?;
    let t2 = edge.curve.tangent(edge.t_start + edge.parameter_span() / 10.0)?;
    Ok(t1.cross(&t2).dot(view_normal) < 0.0)
}
