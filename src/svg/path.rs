use crate::error::{PathError, Result};
use crate::math::Point2;

use super::{PathCommand, PathStyle};

/// Whether a subpath has been started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PathState {
    #[default]
    Empty,
    /// At least one command is present and the first one is a `MoveTo`.
    Open,
}

/// Incremental builder for an SVG `<path>` element.
///
/// The first command is always a `MoveTo`: `line_to` on an empty path
/// starts the subpath instead, and every other drawing command fails with
/// [`PathError::MissingMoveTo`] until a subpath exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgPath {
    name: Option<String>,
    style: PathStyle,
    state: PathState,
    commands: Vec<PathCommand>,
}

impl SvgPath {
    /// Creates an empty, unnamed path with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty path written with `id="name"`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    pub fn set_style(&mut self, style: PathStyle) {
        self.style = style;
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn style(&self) -> &PathStyle {
        &self.style
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state == PathState::Empty
    }

    pub fn move_to(&mut self, point: Point2) {
        self.commands.push(PathCommand::MoveTo(point));
        self.state = PathState::Open;
    }

    /// Appends a line, or starts the subpath at `point` if the path is empty.
    pub fn line_to(&mut self, point: Point2) {
        match self.state {
            PathState::Empty => self.move_to(point),
            PathState::Open => self.commands.push(PathCommand::LineTo(point)),
        }
    }

    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] on an empty path.
    pub fn horizontal_line_to(&mut self, x: f64) -> Result<()> {
        self.push_open(PathCommand::HorizontalLineTo(x))
    }

    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] on an empty path.
    pub fn vertical_line_to(&mut self, y: f64) -> Result<()> {
        self.push_open(PathCommand::VerticalLineTo(y))
    }

    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] on an empty path.
    pub fn cubic_curve_to(&mut self, control1: Point2, control2: Point2, end: Point2) -> Result<()> {
        self.push_open(PathCommand::CubicCurveTo {
            control1,
            control2,
            end,
        })
    }

    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] on an empty path.
    pub fn quadratic_curve_to(&mut self, control: Point2, end: Point2) -> Result<()> {
        self.push_open(PathCommand::QuadraticCurveTo { control, end })
    }

    /// Appends an elliptical arc; `rotation` is in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] on an empty path.
    pub fn elliptical_arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: Point2,
    ) -> Result<()> {
        self.push_open(PathCommand::EllipticalArcTo {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            end,
        })
    }

    /// Appends a pre-formatted fragment after the command letter `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] on an empty path.
    pub fn append_raw(&mut self, tag: char, payload: impl Into<String>) -> Result<()> {
        self.push_open(PathCommand::Raw {
            tag,
            payload: payload.into(),
        })
    }

    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] on an empty path.
    pub fn close_path(&mut self) -> Result<()> {
        self.push_open(PathCommand::ClosePath)
    }

    /// Appends every command of `other`; its style and name are ignored.
    pub fn append_data(&mut self, other: &SvgPath) {
        if other.is_empty() {
            return;
        }
        self.commands.extend_from_slice(&other.commands);
        self.state = PathState::Open;
    }

    /// The `d` attribute value.
    ///
    /// Filled paths get a trailing `Z` unless they already end with one.
    #[must_use]
    pub fn d(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut parts: Vec<String> = self.commands.iter().map(ToString::to_string).collect();
        let closed = matches!(self.commands.last(), Some(PathCommand::ClosePath));
        if !self.style.fill().is_none() && !closed {
            parts.push(PathCommand::ClosePath.to_string());
        }
        parts.join(" ")
    }

    /// The complete `<path …/>` element followed by a newline.
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        let id = self
            .name
            .as_ref()
            .map(|name| format!("id=\"{name}\" "))
            .unwrap_or_default();
        format!(
            "<path {id}d=\"{}\" {} style=\"{}\"/>\n",
            self.d(),
            self.style.stroke_attributes(),
            self.style.path_declarations()
        )
    }

    fn push_open(&mut self, command: PathCommand) -> Result<()> {
        if self.state == PathState::Empty {
            return Err(PathError::MissingMoveTo.into());
        }
        self.commands.push(command);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::svg::Fill;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn empty_path_has_empty_data() {
        assert_eq!(SvgPath::new().d(), "");
    }

    #[test]
    fn first_line_to_becomes_move_to() {
        let mut path = SvgPath::new();
        path.line_to(p(0.0, 0.0));
        assert_eq!(path.d(), "M 0.0 0.0");
        assert_eq!(path.commands(), &[PathCommand::MoveTo(p(0.0, 0.0))]);
    }

    #[test]
    fn consecutive_line_to() {
        let mut path = SvgPath::new();
        path.line_to(p(0.0, 0.0));
        path.line_to(p(10.0, 1.0));
        path.line_to(p(0.0, -10.0));
        assert_eq!(path.d(), "M 0.0 0.0 L 10.0 1.0 L 0.0 -10.0");
    }

    #[test]
    fn horizontal_and_vertical_lines() {
        let mut path = SvgPath::new();
        path.move_to(p(0.0, 0.0));
        path.horizontal_line_to(3.0).unwrap();
        path.move_to(p(0.0, -10.0));
        path.vertical_line_to(-1.0).unwrap();
        path.vertical_line_to(-1.0).unwrap();
        assert_eq!(path.d(), "M 0.0 0.0 H 3.0 M 0.0 -10.0 V -1.0 V -1.0");
    }

    #[test]
    fn drawing_before_move_to_fails() {
        let mut path = SvgPath::new();
        assert!(path.horizontal_line_to(1.0).is_err());
        assert!(path.vertical_line_to(1.0).is_err());
        assert!(path.close_path().is_err());
        assert!(path.append_raw('A', "1 1 0 0 1 2 2").is_err());
        assert!(path.is_empty());
    }

    #[test]
    fn append_data_splices_commands() {
        let mut first = SvgPath::new();
        first.move_to(p(0.0, 0.0));
        first.line_to(p(1.0, 1.0));
        let mut second = SvgPath::new();
        second.move_to(p(0.0, -10.0));
        second.line_to(p(2.0, 2.0));
        first.append_data(&second);
        assert_eq!(first.d(), "M 0.0 0.0 L 1.0 1.0 M 0.0 -10.0 L 2.0 2.0");
    }

    #[test]
    fn append_into_empty_opens_path() {
        let mut target = SvgPath::new();
        let mut source = SvgPath::new();
        source.line_to(p(1.0, 2.0));
        target.append_data(&source);
        assert!(!target.is_empty());
        target.horizontal_line_to(4.0).unwrap();
        assert_eq!(target.d(), "M 1.0 2.0 H 4.0");
    }

    #[test]
    fn filled_path_closes_once() {
        let style = PathStyle::new("#000000", 1.0, "none", Fill::Color("#cccccc".into())).unwrap();
        let mut path = SvgPath::new().with_style(style);
        path.move_to(p(0.0, 0.0));
        path.line_to(p(1.0, 0.0));
        assert_eq!(path.d(), "M 0.0 0.0 L 1.0 0.0 Z");
        path.close_path().unwrap();
        assert_eq!(path.d(), "M 0.0 0.0 L 1.0 0.0 Z");
    }

    #[test]
    fn full_element_attribute_order() {
        let style = PathStyle::new("#000000", 0.21, "none", Fill::None).unwrap();
        let mut path = SvgPath::named("Line").with_style(style);
        path.move_to(p(-1.0, 1.0));
        path.line_to(p(-3.0, 5.0));
        assert_eq!(
            path.to_svg_string(),
            "<path id=\"Line\" d=\"M -1.0 1.0 L -3.0 5.0\" stroke=\"#000000\" \
             stroke-width=\"0.21 px\" style=\"stroke-width:0.21;stroke-miterlimit:4;\
             stroke-dasharray:none;fill:none;fill-rule:evenodd\"/>\n"
        );
    }

    #[test]
    fn unnamed_path_has_no_id() {
        let mut path = SvgPath::new();
        path.move_to(p(0.0, 0.0));
        assert!(path.to_svg_string().starts_with("<path d=\"M 0.0 0.0\""));
    }

    fn arb_path() -> impl Strategy<Value = SvgPath> {
        prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 0..6).prop_map(|pts| {
            let mut path = SvgPath::new();
            for (x, y) in pts {
                path.line_to(Point2::new(x, y));
            }
            path
        })
    }

    proptest! {
        #[test]
        fn append_data_is_associative(a in arb_path(), b in arb_path(), c in arb_path()) {
            let mut left = a.clone();
            left.append_data(&b);
            left.append_data(&c);

            let mut bc = b.clone();
            bc.append_data(&c);
            let mut right = a;
            right.append_data(&bc);

            prop_assert_eq!(left.commands(), right.commands());
        }
    }
}
