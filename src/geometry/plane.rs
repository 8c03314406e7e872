use crate::error::{GeometryError, Result};
use crate::math::{Vector3, TOLERANCE};

/// A drawing plane: the 2D coordinate system geometry is projected onto.
///
/// Defined by two in-plane axes (`u_dir`, `v_dir`) and the viewing axis.
/// All three are stored normalised. The in-plane axes are not
/// re-orthogonalised, so a skewed basis projects exactly as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    u_dir: Vector3,
    v_dir: Vector3,
    axis: Vector3,
}

impl Plane {
    /// Creates a new plane from its three basis vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if any vector is zero-length or if `u_dir` and
    /// `v_dir` are parallel.
    pub fn new(u_dir: Vector3, v_dir: Vector3, axis: Vector3) -> Result<Self> {
        let u_dir = normalized(u_dir)?;
        let v_dir = normalized(v_dir)?;
        let axis = normalized(axis)?;

        if u_dir.cross(&v_dir).norm() < TOLERANCE {
            return Err(
                GeometryError::Degenerate("plane directions are parallel".into()).into(),
            );
        }

        Ok(Self { u_dir, v_dir, axis })
    }

    /// Creates a plane looking along `normal`, kept upright.
    ///
    /// `v_dir` is the part of +Z perpendicular to the normal, or +Y when
    /// the normal is (nearly) vertical, and `u_dir = v_dir × normal`. The
    /// top view along +Z gets `u = X`, `v = Y`; the front view along -Y
    /// gets `u = X`, `v = Z`.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(normal: Vector3) -> Result<Self> {
        let normal = normalized(normal)?;

        let up = if normal.z.abs() > 0.9 {
            Vector3::y()
        } else {
            Vector3::z()
        };
        let v_dir = (up - normal * up.dot(&normal)).normalize();
        let u_dir = v_dir.cross(&normal);

        Ok(Self {
            u_dir,
            v_dir,
            axis: normal,
        })
    }

    /// The standard XY plane viewed along +Z.
    #[must_use]
    pub fn xy() -> Self {
        Self {
            u_dir: Vector3::x(),
            v_dir: Vector3::y(),
            axis: Vector3::z(),
        }
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the viewing axis (plane normal).
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }
}

fn normalized(v: Vector3) -> Result<Vector3> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}
