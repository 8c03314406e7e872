use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a wire in the topology store.
    pub struct WireId;
}

/// An edge together with the direction a wire walks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedEdge {
    /// The edge identifier.
    pub edge: EdgeId,
    /// `true` walks start → end, `false` walks end → start.
    pub forward: bool,
}

impl OrientedEdge {
    #[must_use]
    pub fn new(edge: EdgeId, forward: bool) -> Self {
        Self { edge, forward }
    }

    /// The same edge walked the other way.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            edge: self.edge,
            forward: !self.forward,
        }
    }
}

/// An ordered chain of oriented edges, open or closed.
#[derive(Debug, Clone, Default)]
pub struct WireData {
    pub edges: Vec<OrientedEdge>,
    /// Whether the chain is expected to return to its first vertex.
    pub is_closed: bool,
}

impl WireData {
    #[must_use]
    pub fn new(edges: Vec<OrientedEdge>, is_closed: bool) -> Self {
        Self { edges, is_closed }
    }

    /// Edge ids in wire order, without orientation.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().map(|oe| oe.edge)
    }
}
