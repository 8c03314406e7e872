//! SVG export of edges, wires and shapes.

mod circle_to_svg;
mod context;
mod edges_to_path;
mod group_edges;
mod shape_to_svg;

pub use circle_to_svg::CircleToSvg;
pub use context::ExportContext;
pub use edges_to_path::{ArcProjector, EdgesToPath, SvgFragment};
pub use group_edges::{FixWire, GroupEdges};
pub use shape_to_svg::{ExportOptions, FillStyle, ShapeToSvg};
