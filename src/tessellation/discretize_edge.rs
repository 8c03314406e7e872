use crate::config::{discretization, BuiltinDefaults, ParamStore};
use crate::error::Result;
use crate::geometry::curve::Curve;
use crate::geometry::Plane;
use crate::math::project_point;
use crate::operations::query::edge_length;
use crate::svg::SvgPath;
use crate::topology::{EdgeId, TopologyStore};

/// Upper bound on the samples taken from one edge.
const MAX_SEGMENTS: u32 = 10_000;

/// Samples an edge evenly in parameter space and projects the samples into
/// a polyline path.
///
/// The segment count is `floor(length / max_segment_length)`, at least 1
/// and at most 10 000, so the path has one `MoveTo` followed by that many
/// `LineTo` commands.
pub struct DiscretizeEdge<'a> {
    edge: EdgeId,
    plane: Option<&'a Plane>,
    max_segment_length: f64,
    reversed: bool,
}

impl<'a> DiscretizeEdge<'a> {
    /// Creates the operation with the built-in segment length of `10.0`.
    #[must_use]
    pub fn new(edge: EdgeId) -> Self {
        Self {
            edge,
            plane: None,
            max_segment_length: discretization(&BuiltinDefaults),
            reversed: false,
        }
    }

    /// Projects samples onto `plane` instead of dropping `z`.
    #[must_use]
    pub fn with_plane(mut self, plane: Option<&'a Plane>) -> Self {
        self.plane = plane;
        self
    }

    /// Reads the segment length from `params` (`svgDiscretization`).
    #[must_use]
    pub fn with_params(mut self, params: &dyn ParamStore) -> Self {
        self.max_segment_length = discretization(params);
        self
    }

    /// Samples from the end of the parameter range back to its start.
    #[must_use]
    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Executes the operation, returning the unserialized path.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is missing or its curve cannot be evaluated.
    pub fn execute(&self, store: &TopologyStore) -> Result<SvgPath> {
        let edge = store.edge(self.edge)?;
        let length = edge_length(edge)?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let segments = (length / self.max_segment_length)
            .floor()
            .clamp(1.0, f64::from(MAX_SEGMENTS)) as u32;

        let (from, to) = if self.reversed {
            (edge.t_end, edge.t_start)
        } else {
            (edge.t_start, edge.t_end)
        };

        let mut path = SvgPath::new();
        for i in 0..=segments {
            let t = from + (to - from) * f64::from(i) / f64::from(segments);
            let point = edge.curve.evaluate(t)?;
            path.line_to(project_point(&point, self.plane));
        }
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DraftParams;
    use crate::geometry::curve::Circle;
    use crate::math::{Point2, Point3, Vector3};
    use crate::operations::creation::{MakeEdge, MakeWire};
    use crate::svg::PathCommand;
    use crate::topology::EdgeCurve;

    fn line_edge(store: &mut TopologyStore, from: Point3, to: Point3) -> EdgeId {
        let wire = MakeWire::new(vec![from, to], false).execute(store).unwrap();
        store.wire(wire).unwrap().edges[0].edge
    }

    #[test]
    fn short_line_is_one_segment() {
        let mut store = TopologyStore::new();
        let edge = line_edge(&mut store, Point3::origin(), Point3::new(2.0, 0.0, 0.0));
        let path = DiscretizeEdge::new(edge).execute(&store).unwrap();
        assert_eq!(path.d(), "M 0.0 0.0 L 2.0 0.0");
    }

    #[test]
    fn segment_count_follows_length() {
        let mut store = TopologyStore::new();
        let edge = line_edge(&mut store, Point3::origin(), Point3::new(35.0, 0.0, 0.0));
        let path = DiscretizeEdge::new(edge).execute(&store).unwrap();
        // floor(35 / 10) = 3 segments
        assert_eq!(path.commands().len(), 4);
        assert!(path.commands()[0].is_move_to());
    }

    #[test]
    fn params_override_segment_length() {
        let mut store = TopologyStore::new();
        let edge = line_edge(&mut store, Point3::origin(), Point3::new(4.0, 0.0, 0.0));
        let params = DraftParams::from_json(r#"{"svgDiscretization": 1.0}"#).unwrap();
        let path = DiscretizeEdge::new(edge)
            .with_params(&params)
            .execute(&store)
            .unwrap();
        assert_eq!(path.d(), "M 0.0 0.0 L 1.0 0.0 L 2.0 0.0 L 3.0 0.0 L 4.0 0.0");
    }

    #[test]
    fn tiny_segment_length_is_capped() {
        let mut store = TopologyStore::new();
        let edge = line_edge(&mut store, Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let params = DraftParams::from_json(r#"{"svgDiscretization": 1e-12}"#).unwrap();
        let path = DiscretizeEdge::new(edge)
            .with_params(&params)
            .execute(&store)
            .unwrap();
        assert_eq!(path.commands().len(), 10_001);
        let Some(PathCommand::LineTo(end)) = path.commands().last() else {
            panic!("expected a line");
        };
        assert!((end - Point2::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn reversed_walks_backwards() {
        let mut store = TopologyStore::new();
        let edge = line_edge(&mut store, Point3::origin(), Point3::new(2.0, 0.0, 0.0));
        let path = DiscretizeEdge::new(edge).reversed(true).execute(&store).unwrap();
        assert_eq!(path.d(), "M 2.0 0.0 L 0.0 0.0");
    }

    #[test]
    fn circle_samples_lie_on_circle() {
        let mut store = TopologyStore::new();
        let circle = Circle::from_axis(Point3::origin(), 20.0, Vector3::z()).unwrap();
        let edge = MakeEdge::from_curve(EdgeCurve::Circle(circle))
            .execute(&mut store)
            .unwrap();
        let path = DiscretizeEdge::new(edge).execute(&store).unwrap();
        // floor(40 pi / 10) = 12 segments
        assert_eq!(path.commands().len(), 13);
        for command in path.commands() {
            let (PathCommand::MoveTo(p) | PathCommand::LineTo(p)) = command else {
                panic!("unexpected command {command}");
            };
            assert!((p.coords.norm() - 20.0).abs() < 1e-9);
        }
    }
}
