pub mod edge;
pub mod face;
pub mod shape;
pub mod vertex;
pub mod wire;

pub use edge::{EdgeCurve, EdgeData, EdgeId};
pub use face::{FaceData, FaceId};
pub use shape::Shape;
pub use vertex::{VertexData, VertexId};
pub use wire::{OrientedEdge, WireData, WireId};

use crate::error::TopologyError;
use crate::math::Point3;
use slotmap::SlotMap;

/// Arena owning the vertices, edges, wires and faces handed to the exporter.
///
/// Entities reference each other via typed IDs (generational indices).
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns the vertex data.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EntityNotFound`] for a stale id.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns the edge data.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EntityNotFound`] for a stale id.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Start and end points of an edge in its natural direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or one of its vertices is missing.
    pub fn edge_endpoints(&self, id: EdgeId) -> Result<(Point3, Point3), TopologyError> {
        let edge = self.edge(id)?;
        Ok((self.vertex(edge.start)?.point, self.vertex(edge.end)?.point))
    }

    /// Start and end points of an edge in the direction `oriented` walks it.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or one of its vertices is missing.
    pub fn oriented_endpoints(
        &self,
        oriented: OrientedEdge,
    ) -> Result<(Point3, Point3), TopologyError> {
        let (start, end) = self.edge_endpoints(oriented.edge)?;
        Ok(if oriented.forward {
            (start, end)
        } else {
            (end, start)
        })
    }

    /// Inserts a wire and returns its ID.
    pub fn add_wire(&mut self, data: WireData) -> WireId {
        self.wires.insert(data)
    }

    /// Returns the wire data.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EntityNotFound`] for a stale id.
    pub fn wire(&self, id: WireId) -> Result<&WireData, TopologyError> {
        self.wires
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wire".into()))
    }

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns the face data.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::EntityNotFound`] for a stale id.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }
}
