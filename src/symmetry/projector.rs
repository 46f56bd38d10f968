//! Projection of an elastic tensor onto a point group
//!
//! The tensor is expanded to rank 4, rotated by every operator R of the
//! group via C'_abcd = R_ai R_bj R_ck R_dl C_ijkl, and the results are
//! averaged. The group average is invariant under each of its operators.

use log::debug;

use super::point_group::{validate_operators, PointGroup};
use crate::error::ElasticResult;
use crate::math::{Mat3, Rank4Tensor, ORTHOGONALITY_TOLERANCE};
use crate::tensor::ElasticTensor;

/// Averages elastic tensors over point-group operators
#[derive(Debug, Clone, Copy)]
pub struct SymmetryProjector {
    tolerance: f64,
}

impl Default for SymmetryProjector {
    fn default() -> Self {
        Self {
            tolerance: ORTHOGONALITY_TOLERANCE,
        }
    }
}

impl SymmetryProjector {
    /// # Arguments
    /// * `tolerance` - Accepted deviation of RᵀR from I for raw operators
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Group average of `tensor` over `group`
    ///
    /// The trivial group returns the input unchanged.
    pub fn project(&self, tensor: &ElasticTensor, group: &PointGroup) -> ElasticResult<ElasticTensor> {
        self.project_operators(tensor, group.operators())
    }

    /// Group average over a raw operator list
    ///
    /// # Errors
    /// [`crate::ElasticError::InvalidSymmetryOperator`] if any operator is
    /// not orthogonal
    pub fn project_operators(
        &self,
        tensor: &ElasticTensor,
        operators: &[Mat3],
    ) -> ElasticResult<ElasticTensor> {
        validate_operators(operators, self.tolerance)?;

        let identity = Mat3::identity();
        if operators.iter().all(|op| (op - identity).amax() < self.tolerance) {
            return Ok(*tensor);
        }

        debug!("projecting elastic tensor onto group of order {}", operators.len());
        let full = tensor.to_rank4();
        let mut sum = Rank4Tensor::zeros();
        for op in operators {
            sum += &full.rotated(op);
        }
        sum.scale_mut(1.0 / operators.len() as f64);

        ElasticTensor::from_rank4(&sum)
    }

    /// Whether rotating `tensor` by every operator of `group` leaves it
    /// unchanged within `tol`, relative to its largest entry
    pub fn is_invariant(&self, tensor: &ElasticTensor, group: &PointGroup, tol: f64) -> bool {
        let full = tensor.to_rank4();
        let scale = full.amax().max(1.0);
        group
            .operators()
            .iter()
            .all(|op| full.rotated(op).max_abs_diff(&full) <= tol * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ElasticError;
    use crate::math::Mat6;
    use approx::assert_relative_eq;

    fn random_tensor() -> ElasticTensor {
        let a = Mat6::new_random();
        ElasticTensor::from_mandel(a + a.transpose())
    }

    #[test]
    fn test_trivial_group_is_identity() {
        let c = ElasticTensor::from_mandel(Mat6::new_random());
        let projected = SymmetryProjector::default()
            .project(&c, &PointGroup::trivial())
            .unwrap();
        assert_eq!(projected, c);
    }

    #[test]
    fn test_projection_is_invariant() {
        let projector = SymmetryProjector::default();
        for group in [
            PointGroup::monoclinic(),
            PointGroup::orthorhombic(),
            PointGroup::tetragonal(),
            PointGroup::trigonal(),
            PointGroup::hexagonal(),
            PointGroup::cubic(),
        ] {
            let projected = projector.project(&random_tensor(), &group).unwrap();
            assert!(projector.is_invariant(&projected, &group, 1e-10));
        }
    }

    #[test]
    fn test_projection_is_idempotent() {
        let projector = SymmetryProjector::default();
        let group = PointGroup::hexagonal();
        let once = projector.project(&random_tensor(), &group).unwrap();
        let twice = projector.project(&once, &group).unwrap();
        assert!((once.mandel() - twice.mandel()).amax() < 1e-10);
    }

    #[test]
    fn test_cubic_projection_pattern() {
        let projector = SymmetryProjector::default();
        let projected = projector
            .project(&random_tensor(), &PointGroup::cubic())
            .unwrap();
        let v = projected.voigt();

        assert_relative_eq!(v[(0, 0)], v[(1, 1)], epsilon = 1e-10);
        assert_relative_eq!(v[(0, 0)], v[(2, 2)], epsilon = 1e-10);
        assert_relative_eq!(v[(0, 1)], v[(1, 2)], epsilon = 1e-10);
        assert_relative_eq!(v[(0, 1)], v[(0, 2)], epsilon = 1e-10);
        assert_relative_eq!(v[(3, 3)], v[(5, 5)], epsilon = 1e-10);
        for i in 0..3 {
            for j in 3..6 {
                assert_relative_eq!(v[(i, j)], 0.0, epsilon = 1e-10);
            }
        }
        assert_relative_eq!(v[(3, 4)], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_cubic_tensor_is_fixed_point_of_cubic_group() {
        let c = ElasticTensor::cubic(110.0, 60.0, 30.0);
        let projected = SymmetryProjector::default()
            .project(&c, &PointGroup::cubic())
            .unwrap();
        assert!((projected.mandel() - c.mandel()).amax() < 1e-10);
    }

    #[test]
    fn test_isotropic_tensor_is_fixed_point() {
        let c = ElasticTensor::isotropic(50.0, 20.0);
        let projector = SymmetryProjector::default();
        for group in [
            PointGroup::triclinic(),
            PointGroup::trigonal(),
            PointGroup::hexagonal().permuted(crate::symmetry::AxisPermutation::Zxy),
            PointGroup::cubic(),
        ] {
            let projected = projector.project(&c, &group).unwrap();
            assert!((projected.mandel() - c.mandel()).amax() < 1e-10);
        }
    }

    #[test]
    fn test_invalid_operator_is_rejected() {
        let c = random_tensor();
        let bad = Mat3::new(
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 0.5,
        );
        let result = SymmetryProjector::default().project_operators(&c, &[Mat3::identity(), bad]);
        assert!(matches!(
            result,
            Err(ElasticError::InvalidSymmetryOperator { index: 1, .. })
        ));
    }
}
