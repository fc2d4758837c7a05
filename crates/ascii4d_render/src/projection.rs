//! 4D → 2D projection pipeline
//!
//! Each vertex goes through:
//! 1. the configured 4D plane rotations (xy then zw by default)
//! 2. a perspective divide on w, giving `w_depth`
//! 3. a depth probe through the fixed orientation correction, giving `z_depth`
//! 4. the 3D x-axis rotation and a perspective divide by `z_depth`
//! 5. scaling and centering into screen pixels
//!
//! Steps 3 and 4 start from the same w-projected point but rotate it
//! differently: `z_depth` comes from the orientation-corrected point while the
//! screen position comes from the x-rotated one.

use ascii4d_math::{Matrix, RotationPlane, RotationSet, Vec4};

/// A vertex in screen space with the two depth weights used for shading
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub x: i32,
    pub y: i32,
    /// Weight from the second perspective divide (drives vertex color)
    pub z_depth: f32,
    /// Weight from the 4D perspective divide (drives vertex size)
    pub w_depth: f32,
}

impl ProjectedPoint {
    /// Screen position as a lattice point
    #[inline]
    pub fn screen(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Constants of the projection
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionParams {
    /// Viewer distance used by both perspective divides
    pub distance: f32,
    /// Pixels per projected unit
    pub scale: f32,
    /// Screen-space origin of the projection
    pub center: (i32, i32),
    /// 4D plane rotations applied in order before projecting
    pub planes: Vec<RotationPlane>,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            distance: 5.0,
            scale: 2800.0,
            center: (400, 400),
            planes: vec![RotationPlane::XY, RotationPlane::ZW],
        }
    }
}

/// Projects tesseract vertices for a given angle
#[derive(Clone, Debug, Default)]
pub struct Projector {
    params: ProjectionParams,
}

impl Projector {
    pub fn new(params: ProjectionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Project a single vertex using the matrices in `rotations`.
    pub fn project(&self, rotations: &RotationSet, vertex: Vec4) -> ProjectedPoint {
        let distance = self.params.distance;

        let rotated = rotations.rotate_4d(&self.params.planes, vertex.to_array());
        let r_w = rotated[3];

        let w_depth = 1.0 / (distance - r_w);
        let projected_3d = Matrix::<3, 4>::diagonal(w_depth).transform(rotated);

        let corrected = rotations.correction.transform(projected_3d);
        let z_depth = 1.0 / (distance - (corrected[2] + r_w));

        let rotated_3d = rotations.x.transform(projected_3d);
        let projected_2d = Matrix::<2, 3>::diagonal(z_depth).transform(rotated_3d);

        let (cx, cy) = self.params.center;
        ProjectedPoint {
            x: (projected_2d[0] * self.params.scale).round() as i32 + cx,
            y: (projected_2d[1] * self.params.scale).round() as i32 + cy,
            z_depth,
            w_depth,
        }
    }

    /// Project every vertex for `angle`, preserving order.
    pub fn project_all<const N: usize>(&self, angle: f32, vertices: &[Vec4; N]) -> [ProjectedPoint; N] {
        let rotations = RotationSet::new(angle);
        (*vertices).map(|v| self.project(&rotations, v))
    }
}
