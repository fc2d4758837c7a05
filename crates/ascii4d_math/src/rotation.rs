//! Rotation builders for 3D and 4D space
//!
//! In 4D, rotations happen in planes rather than around axes.
//! There are 6 rotation planes: XY, XZ, XW, YZ, YW, ZW.
//!
//! Every matrix here is rebuilt from the current animation angle each frame;
//! nothing is cached between frames.

use serde::{Deserialize, Serialize};

use crate::matrix::{Mat3, Mat4, Matrix};

/// The 6 rotation planes in 4D space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPlane {
    XY,
    XZ,
    XW,
    YZ,
    YW,
    ZW,
}

impl RotationPlane {
    /// All planes, in the order [`RotationSet`] stores them
    pub const ALL: [RotationPlane; 6] = [
        RotationPlane::XY,
        RotationPlane::XZ,
        RotationPlane::XW,
        RotationPlane::YZ,
        RotationPlane::YW,
        RotationPlane::ZW,
    ];

    /// Indices of the axes spanning this plane (0=X, 1=Y, 2=Z, 3=W)
    pub const fn axes(self) -> (usize, usize) {
        match self {
            RotationPlane::XY => (0, 1),
            RotationPlane::XZ => (0, 2),
            RotationPlane::XW => (0, 3),
            RotationPlane::YZ => (1, 2),
            RotationPlane::YW => (1, 3),
            RotationPlane::ZW => (2, 3),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Create a rotation matrix in a 2D plane within 4D space.
///
/// Row-major: `m[p][p] = cos`, `m[p][q] = -sin`, `m[q][p] = sin`,
/// `m[q][q] = cos`, identity elsewhere.
///
/// # Example
/// ```
/// use ascii4d_math::rotation::{plane_rotation, RotationPlane};
/// let zw = plane_rotation(RotationPlane::ZW, 0.5);
/// assert_eq!(zw.get(0, 0), 1.0);
/// ```
pub fn plane_rotation(plane: RotationPlane, angle: f32) -> Mat4 {
    let (p, q) = plane.axes();
    let (sn, cs) = angle.sin_cos();

    let mut m = Mat4::identity();
    m.0[p][p] = cs;
    m.0[p][q] = -sn;
    m.0[q][p] = sn;
    m.0[q][q] = cs;
    m
}

/// 3D rotation about the x axis
pub fn rotation_x(angle: f32) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Matrix([
        [1.0, 0.0, 0.0],
        [0.0, c, -s],
        [0.0, s, c],
    ])
}

/// 3D rotation about the y axis
pub fn rotation_y(angle: f32) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Matrix([
        [c, 0.0, -s],
        [0.0, 1.0, 0.0],
        [s, 0.0, c],
    ])
}

/// 3D rotation about the z axis
pub fn rotation_z(angle: f32) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Matrix([
        [c, -s, 0.0],
        [s, c, 0.0],
        [0.0, 0.0, 1.0],
    ])
}

/// Fixed −90° rotation about x, independent of the animation angle.
pub fn orientation_correction() -> Mat3 {
    rotation_x(-std::f32::consts::FRAC_PI_2)
}

/// Every rotation matrix the pipeline can use for one angle
#[derive(Clone, Debug)]
pub struct RotationSet {
    angle: f32,
    pub x: Mat3,
    pub y: Mat3,
    pub z: Mat3,
    pub correction: Mat3,
    planes: [Mat4; 6],
}

impl RotationSet {
    /// Build all matrices for `angle` (radians)
    pub fn new(angle: f32) -> Self {
        Self {
            angle,
            x: rotation_x(angle),
            y: rotation_y(angle),
            z: rotation_z(angle),
            correction: orientation_correction(),
            planes: RotationPlane::ALL.map(|plane| plane_rotation(plane, angle)),
        }
    }

    /// The angle these matrices were built for
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// 4×4 rotation in `plane`
    #[inline]
    pub fn plane(&self, plane: RotationPlane) -> &Mat4 {
        &self.planes[plane.index()]
    }

    /// Apply the plane rotations in order: the first plane is applied first.
    pub fn rotate_4d(&self, sequence: &[RotationPlane], v: [f32; 4]) -> [f32; 4] {
        sequence
            .iter()
            .fold(v, |acc, &plane| self.plane(plane).transform(acc))
    }
}
