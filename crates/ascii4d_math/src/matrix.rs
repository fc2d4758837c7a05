//! Row-major matrices with compile-time checked shapes
//!
//! The projection pipeline multiplies 4×4, 3×4, 3×3 and 2×3 matrices by column
//! vectors. Shapes are const generics, so a non-conformant product does not
//! compile.

/// R×C matrix (row-major)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix<const R: usize, const C: usize>(pub [[f32; C]; R]);

/// 3×3 matrix
pub type Mat3 = Matrix<3, 3>;
/// 4×4 matrix
pub type Mat4 = Matrix<4, 4>;

impl<const R: usize, const C: usize> Matrix<R, C> {
    /// All-zero matrix
    pub const fn zero() -> Self {
        Self([[0.0; C]; R])
    }

    /// Matrix with `weight` on the main diagonal and zero elsewhere.
    ///
    /// For non-square shapes this is the perspective-weight projection:
    /// a 3×4 keeps x, y, z scaled by `weight` and drops w, a 2×3 keeps
    /// x, y and drops z.
    pub fn diagonal(weight: f32) -> Self {
        let mut m = Self::zero();
        for i in 0..R.min(C) {
            m.0[i][i] = weight;
        }
        m
    }

    /// Element at `row`, `col`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.0[row][col]
    }

    /// Matrix × column vector
    #[inline]
    pub fn transform(&self, v: [f32; C]) -> [f32; R] {
        multiply(self, v)
    }

    /// Matrix product: result = self * other
    ///
    /// Applying the result to a vector applies `other` first, then `self`.
    #[allow(clippy::needless_range_loop)]
    pub fn mul<const K: usize>(&self, other: &Matrix<C, K>) -> Matrix<R, K> {
        let mut result = Matrix::<R, K>::zero();
        for i in 0..R {
            for j in 0..K {
                for k in 0..C {
                    result.0[i][j] += self.0[i][k] * other.0[k][j];
                }
            }
        }
        result
    }
}

impl<const N: usize> Matrix<N, N> {
    /// Identity matrix
    pub fn identity() -> Self {
        Self::diagonal(1.0)
    }
}

/// Multiply an R×C matrix by a C-component column vector.
#[allow(clippy::needless_range_loop)]
pub fn multiply<const R: usize, const C: usize>(a: &Matrix<R, C>, b: [f32; C]) -> [f32; R] {
    let mut result = [0.0f32; R];
    for i in 0..R {
        for j in 0..C {
            result[i] += a.0[i][j] * b[j];
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq<const N: usize>(a: [f32; N], b: [f32; N]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y))
    }

    fn sample_3x4() -> Matrix<3, 4> {
        Matrix([
            [1.0, 2.0, 0.0, -1.0],
            [0.5, 0.0, 3.0, 2.0],
            [-2.0, 1.0, 1.0, 0.0],
        ])
    }

    #[test]
    fn test_identity_returns_input() {
        let v = [1.0, -2.0, 3.5, 4.0];
        assert_eq!(multiply(&Mat4::identity(), v), v);

        let v3 = [0.25, 7.0, -1.0];
        assert_eq!(Mat3::identity().transform(v3), v3);
    }

    #[test]
    fn test_zero_returns_zero() {
        let v = [1.0, -2.0, 3.5, 4.0];
        assert_eq!(multiply(&Matrix::<3, 4>::zero(), v), [0.0; 3]);
    }

    #[test]
    fn test_rectangular_multiply() {
        let v = [1.0, 2.0, 3.0, 4.0];
        // [1+4+0-4, 0.5+0+9+8, -2+2+3+0]
        assert_eq!(multiply(&sample_3x4(), v), [1.0, 17.5, 3.0]);
    }

    #[test]
    fn test_diagonal_projection_drops_trailing_components() {
        let p = Matrix::<3, 4>::diagonal(0.5);
        assert_eq!(p.transform([2.0, 4.0, 6.0, 8.0]), [1.0, 2.0, 3.0]);

        let q = Matrix::<2, 3>::diagonal(2.0);
        assert_eq!(q.transform([1.0, -1.0, 9.0]), [2.0, -2.0]);
    }

    #[test]
    fn test_mul_identity() {
        let a = sample_3x4();
        assert_eq!(Mat3::identity().mul(&a), a);
        assert_eq!(a.mul(&Mat4::identity()), a);
    }

    #[test]
    fn test_chain_is_associative() {
        let a = Matrix::<2, 3>([[1.0, 0.5, -1.0], [2.0, 0.0, 3.0]]);
        let b = sample_3x4();
        let c = Matrix::<4, 4>([
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 0.0, -1.0, 0.0],
            [0.5, 0.0, 0.0, 1.0],
        ]);

        let left = a.mul(&b).mul(&c);
        let right = a.mul(&b.mul(&c));
        for i in 0..2 {
            assert!(vec_approx_eq(left.0[i], right.0[i]), "{:?} vs {:?}", left, right);
        }

        // Applying the chain equals applying each factor in turn
        let v = [1.0, 2.0, 3.0, 4.0];
        let stepwise = multiply(&a, multiply(&b, multiply(&c, v)));
        assert!(vec_approx_eq(left.transform(v), stepwise));
    }
}
