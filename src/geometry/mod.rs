pub mod curve;
mod plane;

pub use curve::{BSplineCurve, BezierCurve, Circle, Curve, CurveDomain, Ellipse, Line};
pub use plane::Plane;
