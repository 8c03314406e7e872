use crate::error::{Result, TopologyError};
use crate::topology::{FaceData, FaceId, TopologyStore, WireId};

/// Creates a face from a closed outer wire and closed hole wires.
pub struct MakeFace {
    outer_wire: WireId,
    inner_wires: Vec<WireId>,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation.
    #[must_use]
    pub fn new(outer_wire: WireId, inner_wires: Vec<WireId>) -> Self {
        Self {
            outer_wire,
            inner_wires,
        }
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if a wire is missing or not closed.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        for &wire in std::iter::once(&self.outer_wire).chain(&self.inner_wires) {
            if !store.wire(wire)?.is_closed {
                return Err(TopologyError::WireNotClosed.into());
            }
        }
        Ok(store.add_face(FaceData {
            outer_wire: self.outer_wire,
            inner_wires: self.inner_wires.clone(),
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakeWire;

    fn square(store: &mut TopologyStore, close: bool) -> WireId {
        MakeWire::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            close,
        )
        .execute(store)
        .unwrap()
    }

    #[test]
    fn face_from_closed_wire() {
        let mut store = TopologyStore::new();
        let wire = square(&mut store, true);
        let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();
        assert_eq!(store.face(face).unwrap().wires().count(), 1);
    }

    #[test]
    fn open_wire_is_rejected() {
        let mut store = TopologyStore::new();
        let wire = square(&mut store, false);
        assert!(MakeFace::new(wire, vec![]).execute(&mut store).is_err());
    }
}
