use std::fmt;

use crate::math::Point2;

use super::format_number;

/// One command of the SVG path mini-language, in absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(Point2),
    LineTo(Point2),
    HorizontalLineTo(f64),
    VerticalLineTo(f64),
    CubicCurveTo {
        control1: Point2,
        control2: Point2,
        end: Point2,
    },
    QuadraticCurveTo {
        control: Point2,
        end: Point2,
    },
    /// The 7-argument arc form `A rx ry rotation large-arc sweep x y`.
    EllipticalArcTo {
        rx: f64,
        ry: f64,
        /// X-axis rotation in degrees.
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: Point2,
    },
    ClosePath,
    /// A pre-formatted fragment written verbatim after its command letter.
    Raw { tag: char, payload: String },
}

impl PathCommand {
    /// The command letter.
    #[must_use]
    pub fn letter(&self) -> char {
        match self {
            Self::MoveTo(_) => 'M',
            Self::LineTo(_) => 'L',
            Self::HorizontalLineTo(_) => 'H',
            Self::VerticalLineTo(_) => 'V',
            Self::CubicCurveTo { .. } => 'C',
            Self::QuadraticCurveTo { .. } => 'Q',
            Self::EllipticalArcTo { .. } => 'A',
            Self::ClosePath => 'Z',
            Self::Raw { tag, .. } => *tag,
        }
    }

    /// Returns `true` for `MoveTo`.
    #[must_use]
    pub fn is_move_to(&self) -> bool {
        matches!(self, Self::MoveTo(_))
    }
}

fn write_point(f: &mut fmt::Formatter<'_>, p: &Point2) -> fmt::Result {
    write!(f, " {} {}", format_number(p.x), format_number(p.y))
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => write_point(f, p),
            Self::HorizontalLineTo(v) | Self::VerticalLineTo(v) => {
                write!(f, " {}", format_number(*v))
            }
            Self::CubicCurveTo {
                control1,
                control2,
                end,
            } => {
                write_point(f, control1)?;
                write_point(f, control2)?;
                write_point(f, end)
            }
            Self::QuadraticCurveTo { control, end } => {
                write_point(f, control)?;
                write_point(f, end)
            }
            Self::EllipticalArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                end,
            } => {
                write!(
                    f,
                    " {} {} {} {} {}",
                    format_number(*rx),
                    format_number(*ry),
                    format_number(*rotation),
                    u8::from(*large_arc),
                    u8::from(*sweep)
                )?;
                write_point(f, end)
            }
            Self::ClosePath => Ok(()),
            Self::Raw { payload, .. } => write!(f, " {payload}"),
        }
    }
}
