use std::collections::HashSet;

use crate::error::TopologyError;

use super::{EdgeId, FaceId, TopologyStore, VertexId, WireId};

/// A compound of faces, free wires and loose edges exported together.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    pub faces: Vec<FaceId>,
    /// Wires that do not bound any of `faces`.
    pub wires: Vec<WireId>,
    /// Edges outside every face and wire of the shape.
    pub edges: Vec<EdgeId>,
}

impl Shape {
    /// A shape made of one loose edge.
    #[must_use]
    pub fn from_edge(edge: EdgeId) -> Self {
        Self {
            edges: vec![edge],
            ..Self::default()
        }
    }

    /// A shape made of one free wire.
    #[must_use]
    pub fn from_wire(wire: WireId) -> Self {
        Self {
            wires: vec![wire],
            ..Self::default()
        }
    }

    /// A shape made of one face.
    #[must_use]
    pub fn from_face(face: FaceId) -> Self {
        Self {
            faces: vec![face],
            ..Self::default()
        }
    }

    /// Every edge of the shape, faces first, each listed once.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is missing from the store.
    pub fn all_edges(&self, store: &TopologyStore) -> Result<Vec<EdgeId>, TopologyError> {
        let mut wires = Vec::new();
        for &face in &self.faces {
            wires.extend(store.face(face)?.wires());
        }
        wires.extend(self.wires.iter().copied());

        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for wire in wires {
            for edge in store.wire(wire)?.edge_ids() {
                if seen.insert(edge) {
                    edges.push(edge);
                }
            }
        }
        edges.extend(self.edges.iter().copied().filter(|e| seen.insert(*e)));
        Ok(edges)
    }

    /// Number of distinct vertices touched by the shape's edges.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is missing from the store.
    pub fn vertex_count(&self, store: &TopologyStore) -> Result<usize, TopologyError> {
        let mut vertices: HashSet<VertexId> = HashSet::new();
        for edge in self.all_edges(store)? {
            let data = store.edge(edge)?;
            vertices.insert(data.start);
            vertices.insert(data.end);
        }
        Ok(vertices.len())
    }
}
