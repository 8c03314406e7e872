//! Projection of 3D geometry onto a 2D drawing plane.
//!
//! Coordinates are signed lengths along the plane's `u` and `v` axes:
//! a component pointing away from an axis (angle above 90 degrees)
//! yields a negative coordinate.

use crate::geometry::Plane;

use super::{Point2, Point3, Vector3, TOLERANCE};

/// Signed length of the projection of `vec` onto `axis`.
///
/// Returns `0.0` when either vector is zero-length.
#[must_use]
pub fn projected_length(vec: &Vector3, axis: &Vector3) -> f64 {
    let axis_len = axis.norm();
    if axis_len < TOLERANCE {
        return 0.0;
    }
    vec.dot(axis) / axis_len
}

/// Projects a vector onto the drawing plane.
///
/// With no plane the vector is taken as already planar and its `z`
/// component is dropped.
#[must_use]
pub fn project(vec: &Vector3, plane: Option<&Plane>) -> Point2 {
    match plane {
        None => Point2::new(vec.x, vec.y),
        Some(plane) => Point2::new(
            projected_length(vec, plane.u_dir()),
            projected_length(vec, plane.v_dir()),
        ),
    }
}

/// Projects a point (as a position vector) onto the drawing plane.
#[must_use]
pub fn project_point(point: &Point3, plane: Option<&Plane>) -> Point2 {
    project(&point.coords, plane)
}
