mod length;

pub use length::Length;
pub(crate) use length::edge_length;
