//! Elastic stiffness tensor in Mandel basis

use serde::{Deserialize, Serialize};

use crate::error::ElasticResult;
use crate::math::{self, Mat6, Rank4Tensor, Vec6};

/// 6x6 stiffness mapping Mandel strain to Mandel stress
///
/// A freshly fitted tensor is not guaranteed to be symmetric; projection onto
/// a point group restores the symmetries the crystal requires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElasticTensor {
    mandel: Mat6,
}

impl ElasticTensor {
    /// Wrap a matrix that is already in Mandel scaling
    pub fn from_mandel(mandel: Mat6) -> Self {
        Self { mandel }
    }

    /// Build from a stiffness in plain Voigt scaling (engineering shear)
    pub fn from_voigt(voigt: &Mat6) -> Self {
        Self {
            mandel: math::voigt_to_mandel(voigt),
        }
    }

    /// Build from a full rank-4 tensor
    pub fn from_rank4(t: &Rank4Tensor) -> ElasticResult<Self> {
        Ok(Self {
            mandel: math::to_mandel_matrix(t)?,
        })
    }

    /// Isotropic stiffness with bulk modulus `k` and shear modulus `g`
    pub fn isotropic(k: f64, g: f64) -> Self {
        let diag = k + 4.0 * g / 3.0;
        let off = k - 2.0 * g / 3.0;
        let mut mandel = Mat6::zeros();
        for i in 0..3 {
            for j in 0..3 {
                mandel[(i, j)] = if i == j { diag } else { off };
            }
            mandel[(i + 3, i + 3)] = 2.0 * g;
        }
        Self { mandel }
    }

    /// Cubic stiffness from the Voigt constants C11, C12 and C44
    pub fn cubic(c11: f64, c12: f64, c44: f64) -> Self {
        let mut voigt = Mat6::zeros();
        for i in 0..3 {
            for j in 0..3 {
                voigt[(i, j)] = if i == j { c11 } else { c12 };
            }
            voigt[(i + 3, i + 3)] = c44;
        }
        Self::from_voigt(&voigt)
    }

    pub fn mandel(&self) -> &Mat6 {
        &self.mandel
    }

    /// The same tensor in plain Voigt scaling
    pub fn voigt(&self) -> Mat6 {
        math::mandel_to_voigt(&self.mandel)
    }

    pub fn to_rank4(&self) -> Rank4Tensor {
        math::to_full_rank4(&self.mandel)
    }

    /// Stress produced by a Mandel strain vector
    pub fn stress(&self, strain: &Vec6) -> Vec6 {
        self.mandel * strain
    }

    /// Largest deviation from the transpose, relative to the largest entry
    pub fn asymmetry(&self) -> f64 {
        let scale = self.mandel.amax().max(f64::MIN_POSITIVE);
        (self.mandel - self.mandel.transpose()).amax() / scale
    }
}

impl From<Mat6> for ElasticTensor {
    fn from(mandel: Mat6) -> Self {
        Self::from_mandel(mandel)
    }
}
