use crate::error::{GeometryError, Result, TopologyError};
use crate::geometry::curve::Line;
use crate::math::{points_connected, Point3};
use crate::topology::{
    EdgeCurve, EdgeData, EdgeId, OrientedEdge, TopologyStore, VertexData, WireData, WireId,
};

enum WireSource {
    Polyline { points: Vec<Point3>, close: bool },
    Edges(Vec<EdgeId>),
}

/// Creates a wire, either as a polyline through points or by chaining
/// existing edges.
pub struct MakeWire {
    source: WireSource,
}

impl MakeWire {
    /// A polyline of line edges through `points`; `close` adds the edge
    /// back to the first point unless the last point already lies on it.
    #[must_use]
    pub fn new(points: Vec<Point3>, close: bool) -> Self {
        Self {
            source: WireSource::Polyline { points, close },
        }
    }

    /// A wire through existing edges, given in chain order.
    ///
    /// Each edge is walked in whichever direction continues the chain.
    #[must_use]
    pub fn from_edges(edges: Vec<EdgeId>) -> Self {
        Self {
            source: WireSource::Edges(edges),
        }
    }

    /// Executes the operation, creating the wire in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two points (or no edges) are given,
    /// two consecutive points coincide, or the edges do not form a chain.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        let wire = match &self.source {
            WireSource::Polyline { points, close } => polyline(store, points, *close)?,
            WireSource::Edges(edges) => chain(store, edges)?,
        };
        Ok(store.add_wire(wire))
    }
}

fn polyline(store: &mut TopologyStore, points: &[Point3], close: bool) -> Result<WireData> {
    if points.len() < 2 {
        return Err(GeometryError::Degenerate("a wire needs at least 2 points".into()).into());
    }
    let mut points = points.to_vec();
    let already_closed = points.len() > 2 && points_connected(&points[0], &points[points.len() - 1]);
    if already_closed {
        points.pop();
    }
    let closed = close || already_closed;

    let vertices: Vec<_> = points
        .iter()
        .map(|p| store.add_vertex(VertexData::new(*p)))
        .collect();
    let mut pairs: Vec<(usize, usize)> = (0..points.len() - 1).map(|i| (i, i + 1)).collect();
    if closed {
        pairs.push((points.len() - 1, 0));
    }

    let mut edges = Vec::with_capacity(pairs.len());
    for (a, b) in pairs {
        let line = Line::through(points[a], points[b])?;
        let id = store.add_edge(EdgeData {
            start: vertices[a],
            end: vertices[b],
            curve: EdgeCurve::Line(line),
            t_start: 0.0,
            t_end: (points[b] - points[a]).norm(),
        });
        edges.push(OrientedEdge::new(id, true));
    }
    Ok(WireData::new(edges, closed))
}

fn chain(store: &TopologyStore, edges: &[EdgeId]) -> Result<WireData> {
    let Some(&first) = edges.first() else {
        return Err(TopologyError::InvalidTopology("a wire needs at least one edge".into()).into());
    };

    let mut first = OrientedEdge::new(first, true);
    if let Some(&second) = edges.get(1) {
        let (start, end) = store.edge_endpoints(first.edge)?;
        let (a, b) = store.edge_endpoints(second)?;
        let end_touches = points_connected(&end, &a) || points_connected(&end, &b);
        let start_touches = points_connected(&start, &a) || points_connected(&start, &b);
        if !end_touches && start_touches {
            first = first.reversed();
        }
    }

    let mut oriented = vec![first];
    let mut current = store.oriented_endpoints(first)?.1;
    for (index, &edge) in edges.iter().enumerate().skip(1) {
        let (start, end) = store.edge_endpoints(edge)?;
        let next = if points_connected(&start, &current) {
            OrientedEdge::new(edge, true)
        } else if points_connected(&end, &current) {
            OrientedEdge::new(edge, false)
        } else {
            return Err(TopologyError::EdgesNotOrdered { index }.into());
        };
        current = store.oriented_endpoints(next)?.1;
        oriented.push(next);
    }

    let origin = store.oriented_endpoints(first)?.0;
    Ok(WireData::new(oriented, points_connected(&origin, &current)))
}
