//! A single strain probe and its measured stress

use serde::{Deserialize, Serialize};

use crate::error::{ElasticError, ElasticResult};
use crate::math::{self, Mat3, Vec6};

/// One deformation applied to the reference structure
///
/// The stress is unset when the sample is created and may be filled exactly
/// once by the external evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainSample {
    id: u64,
    /// Deformation gradient F
    deformation: Mat3,
    /// Green-Lagrange strain in Mandel form
    strain: Vec6,
    stress: Option<Vec6>,
}

/// Green-Lagrange strain E = ½(FᵀF − I)
pub fn green_lagrange(f: &Mat3) -> Mat3 {
    0.5 * (f.transpose() * f - Mat3::identity())
}

impl StrainSample {
    /// Create a sample from a deformation gradient
    ///
    /// # Errors
    /// [`ElasticError::Shape`] if the resulting strain is not symmetric, which
    /// only happens for non-finite input.
    pub fn from_deformation(id: u64, deformation: Mat3) -> ElasticResult<Self> {
        let strain = math::to_mandel_vector(&green_lagrange(&deformation))?;
        Ok(Self {
            id,
            deformation,
            strain,
            stress: None,
        })
    }

    /// Create a sample from externally measured strain and stress
    ///
    /// The deformation gradient is reconstructed as the symmetric stretch
    /// I + ε, which is exact to first order in the strain. Both vectors must
    /// use the conventions later passed to the fit.
    pub fn from_measurement(id: u64, strain: Vec6, stress: Vec6) -> Self {
        Self {
            id,
            deformation: Mat3::identity() + math::from_mandel_vector(&strain),
            strain,
            stress: Some(stress),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn deformation(&self) -> &Mat3 {
        &self.deformation
    }

    /// Mandel strain vector
    pub fn strain(&self) -> &Vec6 {
        &self.strain
    }

    /// Full 3x3 strain tensor
    pub fn strain_tensor(&self) -> Mat3 {
        math::from_mandel_vector(&self.strain)
    }

    pub fn is_evaluated(&self) -> bool {
        self.stress.is_some()
    }

    /// Measured stress
    ///
    /// # Errors
    /// [`ElasticError::NotComputed`] before the stress has been set
    pub fn stress(&self) -> ElasticResult<&Vec6> {
        self.stress.as_ref().ok_or_else(|| {
            ElasticError::NotComputed(format!("stress of sample {} has not been set", self.id))
        })
    }

    /// Record the stress for this sample
    ///
    /// # Errors
    /// [`ElasticError::InvalidArgument`] if a stress was already recorded or
    /// contains non-finite values
    pub fn set_stress(&mut self, stress: Vec6) -> ElasticResult<()> {
        if self.stress.is_some() {
            return Err(ElasticError::InvalidArgument(format!(
                "stress of sample {} is already set",
                self.id
            )));
        }
        if stress.iter().any(|v| !v.is_finite()) {
            return Err(ElasticError::InvalidArgument(format!(
                "stress of sample {} contains non-finite values",
                self.id
            )));
        }
        self.stress = Some(stress);
        Ok(())
    }

    /// Cell of the strained configuration, lattice vectors stored as rows
    pub fn strained_cell(&self, cell: &Mat3) -> Mat3 {
        cell * self.deformation
    }
}
