pub mod projection;

pub use projection::{project, project_point, projected_length};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance under which two edge endpoints are considered connected.
pub const CONNECTIVITY_TOLERANCE: f64 = 1e-6;

/// Returns `true` if two points coincide within [`CONNECTIVITY_TOLERANCE`].
#[must_use]
pub fn points_connected(a: &Point3, b: &Point3) -> bool {
    (a - b).norm() <= CONNECTIVITY_TOLERANCE
}
