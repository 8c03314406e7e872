use super::wire::WireId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// Data associated with a topological face.
///
/// A face is a planar region bounded by an outer wire and optional inner
/// wires (holes). Export only needs its boundary, so no surface is stored.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The outer boundary wire.
    pub outer_wire: WireId,
    /// Inner boundary wires (holes).
    pub inner_wires: Vec<WireId>,
}

impl FaceData {
    /// Outer wire followed by the holes.
    pub fn wires(&self) -> impl Iterator<Item = WireId> + '_ {
        std::iter::once(self.outer_wire).chain(self.inner_wires.iter().copied())
    }
}
