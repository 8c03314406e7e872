use std::collections::VecDeque;

use tracing::warn;

use crate::error::Result;
use crate::math::{points_connected, Point3};
use crate::topology::{EdgeId, OrientedEdge, TopologyStore, WireId};

/// Sorts loose edges into connected chains.
///
/// Each chain starts from the first unused edge and grows greedily at both
/// ends while some remaining edge touches an end within the connectivity
/// tolerance. Edges keep their identity; orientation is settled by the
/// translator.
pub struct GroupEdges {
    edges: Vec<EdgeId>,
}

impl GroupEdges {
    #[must_use]
    pub fn new(edges: Vec<EdgeId>) -> Self {
        Self { edges }
    }

    /// # Errors
    ///
    /// Returns an error if an edge or vertex is missing from the store.
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<Vec<EdgeId>>> {
        sort_chains(store, &self.edges)
    }
}

/// Re-sorts the edges of a wire into chain order.
///
/// A wire flagged closed whose sorted chain does not close is still
/// returned, with a warning.
pub struct FixWire {
    wire: WireId,
}

impl FixWire {
    #[must_use]
    pub fn new(wire: WireId) -> Self {
        Self { wire }
    }

    /// # Errors
    ///
    /// Returns an error if the wire or one of its edges is missing.
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<EdgeId>> {
        let wire = store.wire(self.wire)?;
        let edges: Vec<EdgeId> = wire.edge_ids().collect();
        let chains = sort_chains(store, &edges)?;
        if wire.is_closed && (chains.len() != 1 || !chain_is_closed(store, &chains[0])?) {
            warn!(wire = ?self.wire, chains = chains.len(), "closed wire does not close after sorting");
        }
        Ok(chains.into_iter().flatten().collect())
    }
}

fn sort_chains(store: &TopologyStore, edges: &[EdgeId]) -> Result<Vec<Vec<EdgeId>>> {
    let mut remaining: Vec<(EdgeId, Point3, Point3)> = edges
        .iter()
        .map(|&id| store.edge_endpoints(id).map(|(s, e)| (id, s, e)))
        .collect::<std::result::Result<_, _>>()?;
    remaining.reverse();

    let mut chains = Vec::new();
    while let Some((seed, start, end)) = remaining.pop() {
        let mut chain = VecDeque::from([seed]);
        let (mut head, mut tail) = (start, end);

        while !(chain.len() > 1 && points_connected(&head, &tail)) {
            if let Some(index) = touching(&remaining, &tail) {
                let (id, s, e) = remaining.remove(index);
                tail = if points_connected(&s, &tail) { e } else { s };
                chain.push_back(id);
            } else if let Some(index) = touching(&remaining, &head) {
                let (id, s, e) = remaining.remove(index);
                head = if points_connected(&e, &head) { s } else { e };
                chain.push_front(id);
            } else {
                break;
            }
        }
        chains.push(chain.into_iter().collect());
    }
    Ok(chains)
}

/// Index of the earliest listed remaining edge with an end at `point`.
fn touching(remaining: &[(EdgeId, Point3, Point3)], point: &Point3) -> Option<usize> {
    remaining
        .iter()
        .rposition(|(_, s, e)| points_connected(s, point) || points_connected(e, point))
}

fn chain_is_closed(store: &TopologyStore, chain: &[EdgeId]) -> Result<bool> {
    if chain.is_empty() {
        return Ok(false);
    }
    let first = first_edge_orientation(store, chain)?;
    let (origin, mut current) = store.oriented_endpoints(first)?;
    for &edge in &chain[1..] {
        let (start, end) = store.edge_endpoints(edge)?;
        current = if points_connected(&start, &current) { end } else { start };
    }
    Ok(points_connected(&origin, &current))
}

/// Orientation for the first edge of a chain: reversed only when its start,
/// but not its end, meets the second edge.
pub(crate) fn first_edge_orientation(
    store: &TopologyStore,
    chain: &[EdgeId],
) -> Result<OrientedEdge> {
    let first = chain[0];
    let Some(&second) = chain.get(1) else {
        return Ok(OrientedEdge::new(first, true));
    };
    let (start, end) = store.edge_endpoints(first)?;
    let (a, b) = store.edge_endpoints(second)?;
    let touches = |p: &Point3| points_connected(p, &a) || points_connected(p, &b);
    Ok(OrientedEdge::new(first, touches(&end) || !touches(&start)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeWire;
    use crate::topology::WireData;

    fn segment(store: &mut TopologyStore, a: (f64, f64), b: (f64, f64)) -> EdgeId {
        let wire = MakeWire::new(
            vec![Point3::new(a.0, a.1, 0.0), Point3::new(b.0, b.1, 0.0)],
            false,
        )
        .execute(store)
        .unwrap();
        store.wire(wire).unwrap().edges[0].edge
    }

    #[test]
    fn shuffled_square_forms_one_chain() {
        let mut store = TopologyStore::new();
        let e0 = segment(&mut store, (0.0, 0.0), (1.0, 0.0));
        let e2 = segment(&mut store, (1.0, 1.0), (0.0, 1.0));
        let e1 = segment(&mut store, (1.0, 0.0), (1.0, 1.0));
        let e3 = segment(&mut store, (0.0, 0.0), (0.0, 1.0));

        let chains = GroupEdges::new(vec![e0, e2, e1, e3]).execute(&store).unwrap();
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].len(), 4);
        assert!(chain_is_closed(&store, &chains[0]).unwrap());
    }

    #[test]
    fn disjoint_segments_form_separate_chains() {
        let mut store = TopologyStore::new();
        let a = segment(&mut store, (0.0, 0.0), (1.0, 0.0));
        let b = segment(&mut store, (5.0, 5.0), (6.0, 5.0));
        let c = segment(&mut store, (1.0, 0.0), (2.0, 0.0));

        let chains = GroupEdges::new(vec![a, b, c]).execute(&store).unwrap();
        assert_eq!(chains, vec![vec![a, c], vec![b]]);
    }

    #[test]
    fn chain_grows_at_the_front() {
        let mut store = TopologyStore::new();
        let a = segment(&mut store, (1.0, 0.0), (2.0, 0.0));
        let b = segment(&mut store, (0.0, 0.0), (1.0, 0.0));
        let chains = GroupEdges::new(vec![a, b]).execute(&store).unwrap();
        assert_eq!(chains, vec![vec![b, a]]);
    }

    #[test]
    fn fix_wire_reorders_edges() {
        let mut store = TopologyStore::new();
        let e0 = segment(&mut store, (0.0, 0.0), (1.0, 0.0));
        let e1 = segment(&mut store, (1.0, 0.0), (1.0, 1.0));
        let e2 = segment(&mut store, (1.0, 1.0), (0.0, 0.0));
        let wire = store.add_wire(WireData::new(
            vec![
                OrientedEdge::new(e0, true),
                OrientedEdge::new(e2, true),
                OrientedEdge::new(e1, true),
            ],
            true,
        ));
        let sorted = FixWire::new(wire).execute(&store).unwrap();
        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted[0], e0);
        let (_, end) = store.edge_endpoints(sorted[0]).unwrap();
        let (next_start, _) = store.edge_endpoints(sorted[1]).unwrap();
        assert!(points_connected(&end, &next_start));
    }

    #[test]
    fn first_edge_turns_towards_second() {
        let mut store = TopologyStore::new();
        let a = segment(&mut store, (1.0, 0.0), (0.0, 0.0));
        let b = segment(&mut store, (1.0, 0.0), (2.0, 0.0));
        let oriented = first_edge_orientation(&store, &[a, b]).unwrap();
        assert!(!oriented.forward);
    }
}
