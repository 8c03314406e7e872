use std::collections::HashSet;

use crate::config::ParamStore;
use crate::error::Result;
use crate::geometry::Plane;
use crate::math::Vector3;
use crate::svg::{resolve_line_style, rgb_to_hex, Fill, PathStyle};
use crate::topology::{EdgeCurve, Shape, TopologyStore, WireId};

use super::circle_to_svg::CircleToSvg;
use super::edges_to_path::EdgesToPath;
use super::ExportContext;

/// Fill used for shapes that have faces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FillStyle {
    /// The neutral shape colour `#888888`.
    #[default]
    ShapeColor,
    /// A colour literal such as `#cccccc`.
    Color(String),
    /// A pattern reference, written as `url(#name)`.
    Pattern(String),
}

impl FillStyle {
    fn to_fill(&self) -> Fill {
        match self {
            Self::ShapeColor => Fill::Color("#888888".to_owned()),
            Self::Color(color) => Fill::Color(color.clone()),
            Self::Pattern(name) => Fill::Pattern(name.clone()),
        }
    }
}

/// Presentation options for a shape export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Drawing scale; line widths and custom dashes are divided by it.
    pub scale: f64,
    pub line_width: f64,
    pub fill_style: FillStyle,
    /// `Dashed`, `Dashdot`, `Dotted` or a literal dash list such as `"5,2"`.
    pub line_style: Option<String>,
    /// Stroke colour; black when unset.
    pub color: Option<String>,
    pub plane: Option<Plane>,
    /// Flips the output vertically for sheet coordinates.
    pub techdraw: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            line_width: 0.35,
            fill_style: FillStyle::default(),
            line_style: None,
            color: None,
            plane: None,
            techdraw: false,
        }
    }
}

impl ExportOptions {
    /// Projects onto a plane looking along `direction`; a zero vector keeps
    /// the plain top view.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction has non-finite components.
    pub fn with_direction(mut self, direction: Vector3) -> Result<Self> {
        self.plane = if direction.norm() == 0.0 {
            None
        } else {
            Some(Plane::from_normal(direction)?)
        };
        Ok(self)
    }

    /// Sets the stroke colour from unit-range components.
    #[must_use]
    pub fn with_rgb(mut self, r: f64, g: f64, b: f64) -> Self {
        self.color = Some(rgb_to_hex(r, g, b));
        self
    }

    fn style(&self, has_faces: bool, params: &dyn ParamStore) -> Result<PathStyle> {
        let fill = if has_faces {
            self.fill_style.to_fill()
        } else {
            Fill::None
        };
        PathStyle::new(
            self.color.as_deref().unwrap_or("#000000"),
            self.line_width / self.scale,
            resolve_line_style(self.line_style.as_deref(), self.scale, params),
            fill,
        )
    }
}

/// Exports a whole shape as SVG elements.
///
/// Faces become one path each (`<name>_f0000`, ...), or, for shapes
/// without faces, wires do (`<name>_w0000`, ...). Edges left over get a
/// path of their own (`<name>_nwe0000`, ...), numbered by their position in
/// [`Shape::all_edges`]. A shape with a single vertex is a closed curve and
/// is exported as one element.
pub struct ShapeToSvg<'s> {
    name: String,
    shape: &'s Shape,
    options: ExportOptions,
}

impl<'s> ShapeToSvg<'s> {
    #[must_use]
    pub fn new(name: impl Into<String>, shape: &'s Shape, options: ExportOptions) -> Self {
        Self {
            name: name.into(),
            shape,
            options,
        }
    }

    /// Executes the export, returning the concatenated elements.
    ///
    /// # Errors
    ///
    /// Returns an error if the line width scales to a non-finite value, an
    /// entity is missing from the store, or an edge group cannot be
    /// translated.
    pub fn execute(&self, store: &TopologyStore, ctx: &mut ExportContext<'_>) -> Result<String> {
        let all_edges = self.shape.all_edges(store)?;
        if all_edges.is_empty() {
            return Ok(String::new());
        }
        let style = self.options.style(!self.shape.faces.is_empty(), ctx.params())?;
        let plane = self.options.plane.as_ref();

        let mut svg = String::new();
        if self.shape.vertex_count(store)? > 1 {
            let mut covered = HashSet::new();
            if self.shape.faces.is_empty() {
                for (i, &wire) in self.shape.wires.iter().enumerate() {
                    covered.extend(store.wire(wire)?.edge_ids());
                    let fragment = EdgesToPath::from_wires(vec![wire], style.clone())
                        .named(format!("{}_w{i:04}", self.name))
                        .with_plane(plane)
                        .execute(store, ctx)?;
                    svg.push_str(&fragment.to_svg_string());
                }
            } else {
                for (i, &face) in self.shape.faces.iter().enumerate() {
                    let wires: Vec<WireId> = store.face(face)?.wires().collect();
                    for &wire in &wires {
                        covered.extend(store.wire(wire)?.edge_ids());
                    }
                    let fragment = EdgesToPath::from_wires(wires, style.clone())
                        .named(format!("{}_f{i:04}", self.name))
                        .with_plane(plane)
                        .execute(store, ctx)?;
                    svg.push_str(&fragment.to_svg_string());
                }
            }

            for (i, &edge) in all_edges.iter().enumerate() {
                if covered.contains(&edge) {
                    continue;
                }
                let fragment = EdgesToPath::from_edges(vec![edge], style.clone())
                    .named(format!("{}_nwe{i:04}", self.name))
                    .with_plane(plane)
                    .execute(store, ctx)?;
                svg.push_str(&fragment.to_svg_string());
            }
        } else {
            let first = all_edges[0];
            let fragment = if matches!(store.edge(first)?.curve, EdgeCurve::Circle(_)) {
                CircleToSvg::new(first, style)
                    .with_plane(plane)
                    .execute(store, ctx)?
            } else {
                EdgesToPath::from_edges(all_edges, style)
                    .named(self.name.clone())
                    .with_plane(plane)
                    .execute(store, ctx)?
            };
            svg.push_str(&fragment.to_svg_string());
        }

        if self.options.techdraw {
            svg = format!("<g transform =\"scale(1,-1)\">{svg}</g>");
        }
        Ok(svg)
    }
}
