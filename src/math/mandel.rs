//! Mandel notation codec
//!
//! Symmetric second-order tensors map to 6-vectors and minor-symmetric
//! fourth-order tensors to 6x6 matrices. Component order follows the pairs
//! in [`MANDEL_PAIRS`]; every off-diagonal pair carries a factor √2 so that
//! the double contraction A:B equals the dot product of the Mandel vectors.

use std::f64::consts::SQRT_2;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use super::{is_symmetric, Mat3, Mat6, Rank4Tensor, Vec6, SYMMETRY_TOLERANCE};
use crate::error::{ElasticError, ElasticResult};

/// Tensor index pair behind each Mandel component
pub const MANDEL_PAIRS: [(usize, usize); 6] = [(0, 0), (1, 1), (2, 2), (1, 2), (0, 2), (0, 1)];

/// Scale factor of a Mandel component: 1 for normal, √2 for shear pairs
#[inline]
fn weight(component: usize) -> f64 {
    if component < 3 {
        1.0
    } else {
        SQRT_2
    }
}

/// Vector notation used by a caller for 6-component stress or strain data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Convention {
    /// Shear components already scaled by √2
    Mandel,
    /// Shear components are plain tensor components (σ_yz, σ_xz, σ_xy)
    Voigt,
}

impl Default for Convention {
    fn default() -> Self {
        Self::Mandel
    }
}

impl Convention {
    /// Re-express a 6-vector given in this convention in Mandel form
    pub fn vector_to_mandel(self, v: &Vec6) -> Vec6 {
        match self {
            Self::Mandel => *v,
            Self::Voigt => {
                let mut out = *v;
                for i in 3..6 {
                    out[i] *= SQRT_2;
                }
                out
            }
        }
    }

    /// Express a Mandel 6-vector in this convention
    pub fn vector_from_mandel(self, v: &Vec6) -> Vec6 {
        match self {
            Self::Mandel => *v,
            Self::Voigt => {
                let mut out = *v;
                for i in 3..6 {
                    out[i] /= SQRT_2;
                }
                out
            }
        }
    }
}

/// Convert a symmetric 3x3 tensor to its Mandel vector
///
/// # Errors
/// [`ElasticError::Shape`] when `t` is not symmetric within tolerance
pub fn to_mandel_vector(t: &Mat3) -> ElasticResult<Vec6> {
    if !is_symmetric(t, SYMMETRY_TOLERANCE) {
        return Err(ElasticError::Shape(format!(
            "rank-2 tensor is not symmetric (max asymmetry {:.3e})",
            (t - t.transpose()).amax()
        )));
    }
    Ok(Vec6::from_fn(|n, _| {
        let (i, j) = MANDEL_PAIRS[n];
        weight(n) * t[(i, j)]
    }))
}

/// Inverse of [`to_mandel_vector`]
pub fn from_mandel_vector(v: &Vec6) -> Mat3 {
    let mut t = Mat3::zeros();
    for (n, &(i, j)) in MANDEL_PAIRS.iter().enumerate() {
        let value = v[n] / weight(n);
        t[(i, j)] = value;
        t[(j, i)] = value;
    }
    t
}

/// Convert a minor-symmetric rank-4 tensor to a 6x6 Mandel matrix
///
/// Entries are scaled by 1 (two normal pairs), √2 (one shear pair) or 2
/// (two shear pairs), so that ε:C:ε = eᵀ M e for Mandel strain e.
///
/// # Errors
/// [`ElasticError::Shape`] when `t` lacks minor symmetry; such a tensor has
/// no Mandel representation.
pub fn to_mandel_matrix(t: &Rank4Tensor) -> ElasticResult<Mat6> {
    let tol = SYMMETRY_TOLERANCE * t.amax().max(1.0);
    if !t.has_minor_symmetry(tol) {
        return Err(ElasticError::Shape(
            "rank-4 tensor lacks minor symmetry".to_string(),
        ));
    }
    Ok(Mat6::from_fn(|row, col| {
        let (i, j) = MANDEL_PAIRS[row];
        let (k, l) = MANDEL_PAIRS[col];
        weight(row) * weight(col) * t[(i, j, k, l)]
    }))
}

/// Inverse of [`to_mandel_matrix`], filling all 81 entries
///
/// Each Mandel entry is written to the four index permutations allowed by
/// minor symmetry. A symmetric `m` yields a tensor with major symmetry.
pub fn to_full_rank4(m: &Mat6) -> Rank4Tensor {
    let mut t = Rank4Tensor::zeros();
    for row in 0..6 {
        let (i, j) = MANDEL_PAIRS[row];
        for col in 0..6 {
            let (k, l) = MANDEL_PAIRS[col];
            let value = m[(row, col)] / (weight(row) * weight(col));
            t[(i, j, k, l)] = value;
            t[(j, i, k, l)] = value;
            t[(i, j, l, k)] = value;
            t[(j, i, l, k)] = value;
        }
    }
    t
}

/// Checked conversion from a dynamically sized matrix
///
/// # Errors
/// [`ElasticError::Shape`] unless `m` is 6x6
pub fn mandel_matrix_from_dmatrix(m: &DMatrix<f64>) -> ElasticResult<Mat6> {
    if m.shape() != (6, 6) {
        return Err(ElasticError::Shape(format!(
            "expected a 6x6 matrix, got {}x{}",
            m.nrows(),
            m.ncols()
        )));
    }
    Ok(Mat6::from_fn(|i, j| m[(i, j)]))
}

/// Rescale a Mandel stiffness to plain Voigt scaling
///
/// Normal/shear blocks are divided by √2 and the shear/shear block by 2.
/// Matrix inversion commutes with Voigt scaling of stiffness/compliance
/// pairs only in this form.
pub fn mandel_to_voigt(m: &Mat6) -> Mat6 {
    Mat6::from_fn(|i, j| m[(i, j)] / (weight(i) * weight(j)))
}

/// Inverse of [`mandel_to_voigt`]
pub fn voigt_to_mandel(m: &Mat6) -> Mat6 {
    Mat6::from_fn(|i, j| m[(i, j)] * weight(i) * weight(j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn random_symmetric_mat3() -> Mat3 {
        let a = Mat3::new_random();
        a + a.transpose()
    }

    fn random_symmetric_mat6() -> Mat6 {
        let a = Mat6::new_random();
        a + a.transpose()
    }

    #[test]
    fn test_vector_layout() {
        let t = Mat3::new(
            1.0, 6.0, 5.0,
            6.0, 2.0, 4.0,
            5.0, 4.0, 3.0,
        );
        let v = to_mandel_vector(&t).unwrap();
        assert_relative_eq!(v[0], 1.0);
        assert_relative_eq!(v[1], 2.0);
        assert_relative_eq!(v[2], 3.0);
        assert_relative_eq!(v[3], 4.0 * SQRT_2, epsilon = 1e-14);
        assert_relative_eq!(v[4], 5.0 * SQRT_2, epsilon = 1e-14);
        assert_relative_eq!(v[5], 6.0 * SQRT_2, epsilon = 1e-14);
    }

    #[test]
    fn test_vector_round_trip() {
        for _ in 0..20 {
            let t = random_symmetric_mat3();
            let back = from_mandel_vector(&to_mandel_vector(&t).unwrap());
            assert!((back - t).amax() < 1e-10);
        }
    }

    #[test]
    fn test_non_symmetric_rank2_is_rejected() {
        let t = Mat3::new(
            1.0, 0.5, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        );
        assert!(matches!(to_mandel_vector(&t), Err(ElasticError::Shape(_))));
    }

    #[test]
    fn test_inner_product_is_preserved() {
        for _ in 0..20 {
            let a = random_symmetric_mat3();
            let b = random_symmetric_mat3();
            let full = a.component_mul(&b).sum();
            let mandel = to_mandel_vector(&a).unwrap().dot(&to_mandel_vector(&b).unwrap());
            assert_relative_eq!(full, mandel, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_matrix_round_trip() {
        for _ in 0..20 {
            let m = random_symmetric_mat6();
            let full = to_full_rank4(&m);
            assert!(full.has_minor_symmetry(1e-14));
            assert!(full.has_major_symmetry(1e-14));
            let back = to_mandel_matrix(&full).unwrap();
            assert!((back - m).amax() < 1e-10);
        }
    }

    #[test]
    fn test_quadratic_form_matches_full_contraction() {
        let m = random_symmetric_mat6();
        let c = to_full_rank4(&m);
        let eps = random_symmetric_mat3();
        let e = to_mandel_vector(&eps).unwrap();

        let mut full = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    for l in 0..3 {
                        full += eps[(i, j)] * c[(i, j, k, l)] * eps[(k, l)];
                    }
                }
            }
        }
        assert_relative_eq!(full, e.dot(&(m * e)), epsilon = 1e-10);
    }

    #[test]
    fn test_missing_minor_symmetry_is_rejected() {
        let mut t = Rank4Tensor::zeros();
        t[(0, 1, 0, 0)] = 1.0;
        assert!(matches!(to_mandel_matrix(&t), Err(ElasticError::Shape(_))));
    }

    #[test]
    fn test_dmatrix_shape_check() {
        assert!(mandel_matrix_from_dmatrix(&DMatrix::zeros(6, 5)).is_err());
        assert!(mandel_matrix_from_dmatrix(&DMatrix::identity(6, 6)).is_ok());
    }

    #[test]
    fn test_voigt_rescale_round_trip() {
        let m = random_symmetric_mat6();
        let voigt = mandel_to_voigt(&m);
        assert_relative_eq!(voigt[(0, 3)], m[(0, 3)] / SQRT_2, epsilon = 1e-14);
        assert_relative_eq!(voigt[(4, 5)], m[(4, 5)] / 2.0, epsilon = 1e-14);
        assert_relative_eq!(voigt[(1, 2)], m[(1, 2)], epsilon = 1e-14);
        assert!((voigt_to_mandel(&voigt) - m).amax() < 1e-14);
    }

    #[test]
    fn test_convention_conversion() {
        let v = Vec6::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let m = Convention::Voigt.vector_to_mandel(&v);
        assert_relative_eq!(m[3], 4.0 * SQRT_2, epsilon = 1e-14);
        assert_relative_eq!(m[0], 1.0);
        assert_eq!(Convention::Mandel.vector_to_mandel(&v), v);
        assert!((Convention::Voigt.vector_from_mandel(&m) - v).amax() < 1e-14);
    }
}
