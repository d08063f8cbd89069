//! Math utilities and types
//!
//! Provides the vector/matrix aliases used across the editor plus the
//! transform model: composing translation, Euler rotation and scale into a
//! 4x4 matrix, and decomposing an edited matrix back into those parts.
//!
//! ## Conventions
//! - Right-handed, Y-up world space
//! - Euler angles are radians in XYZ order; the quaternion built from them is
//!   `qz * qy * qx` (X applied first)
//! - Composition order is `Translate * Rotate * Scale`; [`decompose`] assumes it

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};
use nalgebra::{Perspective3, Rotation3, UnitQuaternion};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Build a rotation quaternion from XYZ Euler angles (radians).
pub fn quat_from_euler(euler: &Vec3) -> Quat {
    Quat::from_euler_angles(euler.x, euler.y, euler.z)
}

/// Recover XYZ Euler angles (radians) from a rotation quaternion.
///
/// Inverse of [`quat_from_euler`]; the Y angle is returned in `[-pi/2, pi/2]`.
pub fn euler_from_quat(rotation: &Quat) -> Vec3 {
    let (x, y, z) = rotation.euler_angles();
    Vec3::new(x, y, z)
}

/// Compose `Translate(t) * RotateFromEuler(r) * Scale(s)`.
pub fn compose(translation: &Vec3, rotation: &Vec3, scale: &Vec3) -> Mat4 {
    Mat4::new_translation(translation)
        * quat_from_euler(rotation).to_homogeneous()
        * Mat4::new_nonuniform_scaling(scale)
}

/// Result of decomposing an affine (or projective) 4x4 matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposed {
    /// Translation component
    pub translation: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors (negative on all axes when the basis was left-handed)
    pub scale: Vec3,

    /// Shear factors (YZ, XZ, XY); zero for rigid transforms
    pub skew: Vec3,

    /// Perspective partition; `(0, 0, 0, 1)` for affine transforms
    pub perspective: Vec4,
}

impl Decomposed {
    /// Rotation as XYZ Euler angles
    pub fn euler_rotation(&self) -> Vec3 {
        euler_from_quat(&self.rotation)
    }

    /// Whether skew or perspective terms exceed `tolerance`
    pub fn has_residual_terms(&self, tolerance: f32) -> bool {
        let perspective_error = self.perspective - Vec4::new(0.0, 0.0, 0.0, 1.0);
        self.skew.amax() > tolerance || perspective_error.amax() > tolerance
    }

    /// Rebuild the TRS matrix, ignoring skew and perspective
    pub fn recompose(&self) -> Mat4 {
        Mat4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Decompose a 4x4 matrix into translation, rotation, scale, skew and perspective.
///
/// Returns `None` when the matrix cannot be normalized (`m[3][3] == 0`) or its
/// upper 3x3 block is singular relative to the length of its basis vectors.
pub fn decompose(matrix: &Mat4) -> Option<Decomposed> {
    let mut local = *matrix;
    let w = local[(3, 3)];
    if w.abs() <= f32::EPSILON {
        return None;
    }
    local /= w;

    // Same matrix with the projective row cleared; its determinant equals the 3x3 block's.
    let mut perspective_matrix = local;
    for col in 0..3 {
        perspective_matrix[(3, col)] = 0.0;
    }
    perspective_matrix[(3, 3)] = 1.0;

    // Relative to the basis lengths, so uniformly tiny scales still decompose.
    let basis_volume: f32 = (0..3)
        .map(|col| Vec3::new(local[(0, col)], local[(1, col)], local[(2, col)]).norm())
        .product();
    let determinant = perspective_matrix.determinant();
    if !determinant.is_finite() || determinant.abs() <= f32::EPSILON * basis_volume {
        return None;
    }

    let has_perspective = (0..3).any(|col| local[(3, col)] != 0.0);
    let perspective = if has_perspective {
        let rhs = Vec4::new(local[(3, 0)], local[(3, 1)], local[(3, 2)], local[(3, 3)]);
        let inverse_transposed = perspective_matrix.try_inverse()?.transpose();
        for col in 0..3 {
            local[(3, col)] = 0.0;
        }
        local[(3, 3)] = 1.0;
        inverse_transposed * rhs
    } else {
        Vec4::new(0.0, 0.0, 0.0, 1.0)
    };

    let translation = Vec3::new(local[(0, 3)], local[(1, 3)], local[(2, 3)]);

    let column = |index: usize| Vec3::new(local[(0, index)], local[(1, index)], local[(2, index)]);
    let mut axis_x = column(0);
    let mut axis_y = column(1);
    let mut axis_z = column(2);

    let mut scale = Vec3::zeros();
    let mut skew = Vec3::zeros();

    // Gram-Schmidt: peel scale and shear off each basis vector in turn.
    scale.x = axis_x.norm();
    axis_x /= scale.x;

    skew.z = axis_x.dot(&axis_y);
    axis_y -= axis_x * skew.z;

    scale.y = axis_y.norm();
    axis_y /= scale.y;
    skew.z /= scale.y;

    skew.y = axis_x.dot(&axis_z);
    axis_z -= axis_x * skew.y;
    skew.x = axis_y.dot(&axis_z);
    axis_z -= axis_y * skew.x;

    scale.z = axis_z.norm();
    axis_z /= scale.z;
    skew.y /= scale.z;
    skew.x /= scale.z;

    // Coordinate system flip: negate scale and basis to keep a proper rotation.
    if axis_x.dot(&axis_y.cross(&axis_z)) < 0.0 {
        scale = -scale;
        axis_x = -axis_x;
        axis_y = -axis_y;
        axis_z = -axis_z;
    }

    let basis = Mat3::from_columns(&[axis_x, axis_y, axis_z]);
    let rotation = Quat::from_rotation_matrix(&Rotation3::from_matrix_unchecked(basis));

    Some(Decomposed {
        translation,
        rotation,
        scale,
        skew,
        perspective,
    })
}

/// Right-handed perspective projection with a `[-1, 1]` depth range.
///
/// Callers must pass a non-zero aspect ratio and `near != far`.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Perspective3::new(aspect, fov_y, near, far).to_homogeneous()
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}
