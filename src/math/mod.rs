//! Tensor math shared by the engine
//!
//! Second-order tensors are plain nalgebra 3x3 matrices, Mandel vectors and
//! matrices are their 6-component counterparts. Fourth-order tensors live in
//! [`Rank4Tensor`].

pub mod mandel;
pub mod rank4;

use nalgebra::{Matrix3, Matrix6, Matrix6xX, Vector3, Vector6};

pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec6 = Vector6<f64>;
/// Column-wise sample matrix (6 rows, one column per sample)
pub type Mat6xN = Matrix6xX<f64>;

pub use mandel::{
    from_mandel_vector, mandel_matrix_from_dmatrix, mandel_to_voigt, to_full_rank4,
    to_mandel_matrix, to_mandel_vector, voigt_to_mandel, Convention, MANDEL_PAIRS,
};
pub use rank4::Rank4Tensor;

/// Absolute tolerance for symmetry checks, scaled by the magnitude of the tensor
pub const SYMMETRY_TOLERANCE: f64 = 1e-8;

/// Tolerance on RᵀR = I and |det R| = 1 for symmetry operators
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-8;

/// Check that a 3x3 tensor is symmetric within `tol`, relative to its largest entry
pub fn is_symmetric(m: &Mat3, tol: f64) -> bool {
    let scale = m.amax().max(1.0);
    (m - m.transpose()).amax() <= tol * scale
}

/// Verify that `r` is a proper or improper rotation
///
/// # Returns
/// `Err` with a human readable reason when RᵀR deviates from the identity or
/// the determinant is not ±1
pub fn check_orthogonal(r: &Mat3, tol: f64) -> Result<(), String> {
    if r.iter().any(|v| !v.is_finite()) {
        return Err("operator contains non-finite entries".to_string());
    }

    let residual = (r.transpose() * r - Mat3::identity()).amax();
    if residual > tol {
        return Err(format!("RᵀR deviates from identity by {residual:.3e}"));
    }

    let det = r.determinant();
    if (det.abs() - 1.0).abs() > tol {
        return Err(format!("determinant {det:.6} is not ±1"));
    }

    Ok(())
}
