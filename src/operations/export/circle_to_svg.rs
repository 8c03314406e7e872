use crate::error::{Result, TopologyError};
use crate::geometry::Plane;
use crate::math::project_point;
use crate::svg::{CircleElement, PathStyle};
use crate::tessellation::DiscretizeEdge;
use crate::topology::{EdgeCurve, EdgeId, TopologyStore};

use super::edges_to_path::{faces_view, SvgFragment};
use super::ExportContext;

/// Translates a circular edge into a `<circle>` element when it faces the
/// viewer, or into a discretized path otherwise.
pub struct CircleToSvg<'a> {
    edge: EdgeId,
    style: PathStyle,
    plane: Option<&'a Plane>,
}

impl<'a> CircleToSvg<'a> {
    #[must_use]
    pub fn new(edge: EdgeId, style: PathStyle) -> Self {
        Self {
            edge,
            style,
            plane: None,
        }
    }

    #[must_use]
    pub fn with_plane(mut self, plane: Option<&'a Plane>) -> Self {
        self.plane = plane;
        self
    }

    /// Executes the translation.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidTopology`] if the edge is not circular,
    /// or an error if it is missing from the store.
    pub fn execute(&self, store: &TopologyStore, ctx: &ExportContext<'_>) -> Result<SvgFragment> {
        let edge = store.edge(self.edge)?;
        let EdgeCurve::Circle(circle) = &edge.curve else {
            return Err(TopologyError::InvalidTopology(format!(
                "expected a circle edge, found a {}",
                edge.curve.kind()
            ))
            .into());
        };

        let view_normal = self.plane.map_or(*ctx.view_normal(), |plane| *plane.axis());
        if faces_view(circle.axis(), &view_normal) {
            let center = project_point(circle.center(), self.plane);
            return Ok(SvgFragment::Circle(CircleElement::new(
                center,
                circle.radius(),
                self.style.clone(),
            )));
        }

        let path = DiscretizeEdge::new(self.edge)
            .with_plane(self.plane)
            .with_params(ctx.params())
            .execute(store)?;
        Ok(SvgFragment::Path(path.with_style(self.style.clone())))
    }
}
