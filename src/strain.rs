//! Canonical strain probes and cell strain utilities

use log::debug;

use crate::config::SamplerConfig;
use crate::error::{ElasticError, ElasticResult};
use crate::math::{is_symmetric, Mat3, Vec3, SYMMETRY_TOLERANCE};
use crate::samples::StrainSample;

/// Axis pairs probed by the shear deformations
const SHEAR_PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

/// Generates the deformation gradients used to probe elasticity
#[derive(Debug, Clone, Default)]
pub struct StrainSampler {
    config: SamplerConfig,
}

impl StrainSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// F = I + δ eᵢ⊗eᵢ for every magnitude δ and axis i
    ///
    /// # Arguments
    /// * `first_id` - Id of the first generated sample; ids increase by one
    pub fn generate_normal_strains(&self, first_id: u64) -> ElasticResult<Vec<StrainSample>> {
        validate_magnitudes(&self.config.normal_magnitudes, "normal")?;

        let mut samples = Vec::with_capacity(3 * self.config.normal_magnitudes.len());
        let mut id = first_id;
        for &delta in &self.config.normal_magnitudes {
            for axis in 0..3 {
                let mut f = Mat3::identity();
                f[(axis, axis)] += delta;
                samples.push(StrainSample::from_deformation(id, f)?);
                id += 1;
            }
        }
        Ok(samples)
    }

    /// F = I + δ eᵢ⊗eⱼ for every magnitude δ and axis pair (i, j)
    pub fn generate_shear_strains(&self, first_id: u64) -> ElasticResult<Vec<StrainSample>> {
        validate_magnitudes(&self.config.shear_magnitudes, "shear")?;

        let mut samples = Vec::with_capacity(SHEAR_PAIRS.len() * self.config.shear_magnitudes.len());
        let mut id = first_id;
        for &delta in &self.config.shear_magnitudes {
            for &(i, j) in &SHEAR_PAIRS {
                let mut f = Mat3::identity();
                f[(i, j)] = delta;
                samples.push(StrainSample::from_deformation(id, f)?);
                id += 1;
            }
        }
        Ok(samples)
    }

    /// Normal probes followed by shear probes, ids numbered from zero
    pub fn prepare(&self) -> ElasticResult<Vec<StrainSample>> {
        let mut samples = self.generate_normal_strains(0)?;
        let shear = self.generate_shear_strains(samples.len() as u64)?;
        samples.extend(shear);
        debug!("prepared {} strain samples", samples.len());
        Ok(samples)
    }
}

fn validate_magnitudes(magnitudes: &[f64], kind: &str) -> ElasticResult<()> {
    for &delta in magnitudes {
        if !delta.is_finite() || delta == 0.0 {
            return Err(ElasticError::InvalidArgument(format!(
                "{kind} strain magnitude {delta} must be finite and non-zero"
            )));
        }
        if delta <= -1.0 {
            return Err(ElasticError::InvalidArgument(format!(
                "{kind} strain magnitude {delta} collapses the cell"
            )));
        }
    }
    Ok(())
}

/// Strain that maps `strained_cell` back onto `ref_cell`
///
/// Defined through ref = (I + ε) · strained, hence ε = ref · strained⁻¹ − I.
/// Cell vectors are the columns of both matrices.
///
/// # Errors
/// * [`ElasticError::InvalidArgument`] if `strained_cell` is singular
/// * [`ElasticError::Shape`] if the result is not symmetric, i.e. the two
///   cells differ by a rotation
pub fn eigenstrain(ref_cell: &Mat3, strained_cell: &Mat3) -> ElasticResult<Mat3> {
    let inv = strained_cell
        .try_inverse()
        .ok_or_else(|| ElasticError::InvalidArgument("strained cell is singular".to_string()))?;
    let strain = ref_cell * inv - Mat3::identity();
    if !is_symmetric(&strain, SYMMETRY_TOLERANCE) {
        return Err(ElasticError::Shape(
            "cells differ by more than a pure strain".to_string(),
        ));
    }
    Ok(strain)
}

/// Principal values of [`eigenstrain`], ascending
pub fn principal_strains(ref_cell: &Mat3, strained_cell: &Mat3) -> ElasticResult<Vec3> {
    let strain = eigenstrain(ref_cell, strained_cell)?;
    let mut values = strain.symmetric_eigenvalues();
    values.as_mut_slice().sort_by(f64::total_cmp);
    Ok(values)
}
