use std::fmt;

use crate::error::{Result, StyleError};

use super::format_number;

/// Fill paint of an SVG element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fill {
    #[default]
    None,
    /// A colour literal such as `#cccccc`.
    Color(String),
    /// A reference to a pattern definition, written as `url(#name)`.
    Pattern(String),
}

impl Fill {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Color(color) => f.write_str(color),
            Self::Pattern(name) => write!(f, "url(#{name})"),
        }
    }
}

/// Presentation attributes shared by exported path and circle elements.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    stroke: String,
    stroke_width: f64,
    dash_array: String,
    fill: Fill,
    fill_opacity: Option<f64>,
    fill_rule: String,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            stroke: "none".to_owned(),
            stroke_width: 1.0,
            dash_array: "none".to_owned(),
            fill: Fill::None,
            fill_opacity: None,
            fill_rule: "evenodd".to_owned(),
        }
    }
}

impl PathStyle {
    /// Miter limit written into every style attribute.
    pub const MITER_LIMIT: u32 = 4;

    /// Creates a style with the default fill rule and no opacity.
    ///
    /// # Errors
    ///
    /// Returns an error if `stroke_width` is negative or not finite.
    pub fn new(
        stroke: impl Into<String>,
        stroke_width: f64,
        dash_array: impl Into<String>,
        fill: Fill,
    ) -> Result<Self> {
        if !stroke_width.is_finite() || stroke_width < 0.0 {
            return Err(StyleError::InvalidStrokeWidth(stroke_width).into());
        }
        Ok(Self {
            stroke: stroke.into(),
            stroke_width,
            dash_array: dash_array.into(),
            fill,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn with_fill_rule(mut self, rule: impl Into<String>) -> Self {
        self.fill_rule = rule.into();
        self
    }

    #[must_use]
    pub fn stroke(&self) -> &str {
        &self.stroke
    }

    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    #[must_use]
    pub fn dash_array(&self) -> &str {
        &self.dash_array
    }

    #[must_use]
    pub fn fill(&self) -> &Fill {
        &self.fill
    }

    /// `stroke="…" stroke-width="W px"` attributes.
    pub(crate) fn stroke_attributes(&self) -> String {
        format!(
            "stroke=\"{}\" stroke-width=\"{} px\"",
            self.stroke,
            format_number(self.stroke_width)
        )
    }

    /// Style declarations common to paths and circles, ending with the fill.
    pub(crate) fn base_declarations(&self) -> String {
        format!(
            "stroke-width:{};stroke-miterlimit:{};stroke-dasharray:{};fill:{}",
            format_number(self.stroke_width),
            Self::MITER_LIMIT,
            self.dash_array,
            self.fill
        )
    }

    /// Full style attribute value for a path element.
    pub(crate) fn path_declarations(&self) -> String {
        let mut style = format!("{};fill-rule:{}", self.base_declarations(), self.fill_rule);
        if let Some(opacity) = self.fill_opacity {
            style.push_str(&format!(";fill-opacity:{}", format_number(opacity)));
        }
        style
    }
}

/// Converts unit-range colour components to a `#rrggbb` literal.
#[must_use]
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_bare_path() {
        let style = PathStyle::default();
        assert_eq!(
            style.path_declarations(),
            "stroke-width:1.0;stroke-miterlimit:4;stroke-dasharray:none;fill:none;fill-rule:evenodd"
        );
    }

    #[test]
    fn pattern_fill_is_url_reference() {
        assert_eq!(Fill::Pattern("hatch".into()).to_string(), "url(#hatch)");
    }

    #[test]
    fn opacity_is_appended() {
        let style = PathStyle::new("#000000", 0.5, "none", Fill::Color("#ff0000".into()))
            .unwrap()
            .with_fill_opacity(0.25);
        assert!(style.path_declarations().ends_with(";fill-rule:evenodd;fill-opacity:0.25"));
    }

    #[test]
    fn fill_rule_can_be_replaced() {
        let style = PathStyle::default().with_fill_rule("nonzero");
        assert!(style.path_declarations().ends_with("fill:none;fill-rule:nonzero"));
    }

    #[test]
    fn negative_width_fails() {
        assert!(PathStyle::new("#000000", -1.0, "none", Fill::None).is_err());
    }

    #[test]
    fn nan_width_fails() {
        assert!(PathStyle::new("#000000", f64::NAN, "none", Fill::None).is_err());
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(rgb_to_hex(1.0, 0.0, 0.5), "#ff0080");
        assert_eq!(rgb_to_hex(0.8, 0.8, 0.8), "#cccccc");
        assert_eq!(rgb_to_hex(2.0, -1.0, 0.0), "#ff0000");
    }
}
