//! Polyline approximation of edges for projections without a closed form.

mod discretize_edge;

pub use discretize_edge::DiscretizeEdge;
