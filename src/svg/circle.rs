use crate::math::Point2;

use super::{format_number, PathStyle};

/// A standalone `<circle>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleElement {
    pub center: Point2,
    pub radius: f64,
    pub style: PathStyle,
}

impl CircleElement {
    #[must_use]
    pub fn new(center: Point2, radius: f64, style: PathStyle) -> Self {
        Self {
            center,
            radius,
            style,
        }
    }

    /// The `<circle …/>` element followed by a newline.
    ///
    /// Circles carry no fill rule, unlike paths.
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {} style=\"{}\"/>\n",
            format_number(self.center.x),
            format_number(self.center.y),
            format_number(self.radius),
            self.style.stroke_attributes(),
            self.style.base_declarations()
        )
    }
}
