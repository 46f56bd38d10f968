//! ElasticConstants - stateful front end of the engine

use log::info;

use crate::config::EngineConfig;
use crate::error::{ElasticError, ElasticResult};
use crate::estimator::{evaluate_samples, ElasticTensorEstimator, EvaluationFailure, StressSource};
use crate::math::Mat6;
use crate::moduli::{compliance_tensor, ModulusCalculator, ModulusSet, Scheme};
use crate::samples::StrainSample;
use crate::strain::StrainSampler;
use crate::symmetry::{PointGroup, SymmetryProjector};
use crate::tensor::ElasticTensor;

/// Runs the prepare → evaluate → fit → symmetrize → moduli pipeline
///
/// Holds the last successfully computed tensor. Failed calls never touch it.
#[derive(Debug, Clone, Default)]
pub struct ElasticConstants {
    config: EngineConfig,
    tensor: Option<ElasticTensor>,
}

impl ElasticConstants {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            tensor: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Deformation configurations to evaluate, ordered by id
    pub fn prepare(&self) -> ElasticResult<Vec<StrainSample>> {
        StrainSampler::new(self.config.sampler.clone()).prepare()
    }

    /// Evaluate pending samples with `source`, reporting every failure
    pub fn evaluate<S>(&self, samples: &mut [StrainSample], source: &mut S) -> Vec<EvaluationFailure>
    where
        S: StressSource + ?Sized,
    {
        let failures = evaluate_samples(samples, source);
        info!(
            "evaluated {} samples, {} failed",
            samples.len(),
            failures.len()
        );
        failures
    }

    /// Fit the unsymmetrized tensor and keep it
    ///
    /// # Errors
    /// See [`ElasticTensorEstimator::fit`]; on error the previous tensor
    /// stays in place.
    pub fn fit(&mut self, samples: &[StrainSample]) -> ElasticResult<&ElasticTensor> {
        let tensor = ElasticTensorEstimator::new(self.config.fit).fit(samples)?;
        info!(
            "fitted elastic tensor from {} samples (asymmetry {:.3e})",
            samples.len(),
            tensor.asymmetry()
        );
        Ok(self.tensor.insert(tensor))
    }

    /// Project the current tensor onto `group` and keep the result
    pub fn symmetrize(&mut self, group: &PointGroup) -> ElasticResult<&ElasticTensor> {
        let current = self.tensor()?;
        let projected =
            SymmetryProjector::new(self.config.symmetry_tolerance).project(current, group)?;
        Ok(self.tensor.insert(projected))
    }

    /// Replace the current tensor, e.g. one loaded from an earlier run
    pub fn set_tensor(&mut self, tensor: ElasticTensor) {
        self.tensor = Some(tensor);
    }

    /// # Errors
    /// [`ElasticError::NotComputed`] before a successful fit
    pub fn tensor(&self) -> ElasticResult<&ElasticTensor> {
        self.tensor.as_ref().ok_or_else(|| {
            ElasticError::NotComputed("elastic tensor not computed - call fit() first".to_string())
        })
    }

    fn calculator(&self) -> ElasticResult<ModulusCalculator> {
        Ok(ModulusCalculator::new(self.tensor()?))
    }

    pub fn compliance(&self) -> ElasticResult<Mat6> {
        compliance_tensor(self.tensor()?)
    }

    pub fn bulk_modulus(&self, scheme: Scheme) -> ElasticResult<f64> {
        self.calculator()?.bulk_modulus(scheme)
    }

    pub fn shear_modulus(&self, scheme: Scheme) -> ElasticResult<f64> {
        self.calculator()?.shear_modulus(scheme)
    }

    pub fn youngs_modulus(&self, scheme: Scheme) -> ElasticResult<f64> {
        self.calculator()?.youngs_modulus(scheme)
    }

    pub fn poisson_ratio(&self) -> ElasticResult<f64> {
        self.calculator()?.poisson_ratio()
    }

    pub fn moduli(&self, scheme: Scheme) -> ElasticResult<ModulusSet> {
        self.calculator()?.moduli(scheme)
    }

    pub fn isotropic_tensor(&self, scheme: Scheme) -> ElasticResult<ElasticTensor> {
        self.calculator()?.isotropic_tensor(scheme)
    }
}
