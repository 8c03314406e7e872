//! SVG output primitives: path commands, the path builder, element styles
//! and dash pattern resolution.

mod circle;
mod command;
pub mod linestyle;
mod path;
mod style;

pub use circle::CircleElement;
pub use command::PathCommand;
pub use linestyle::{resolve_line_style, resolve_line_style_value};
pub use path::SvgPath;
pub use style::{rgb_to_hex, Fill, PathStyle};

/// Formats a coordinate with the shortest representation that round-trips.
///
/// Integral values keep a trailing `.0` and negative zero prints as `0.0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0.0".to_owned();
    }
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_keep_decimal_point() {
        assert_eq!(format_number(1.0), "1.0");
        assert_eq!(format_number(-10.0), "-10.0");
    }

    #[test]
    fn fractions_use_shortest_form() {
        assert_eq!(format_number(0.05), "0.05");
        assert_eq!(format_number(0.1 / 10.0), "0.01");
    }

    #[test]
    fn negative_zero_is_positive() {
        assert_eq!(format_number(-0.0), "0.0");
    }
}
