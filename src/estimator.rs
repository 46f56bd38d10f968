//! Least-squares estimation of the elastic tensor
//!
//! Strains and stresses of N evaluated samples are assembled column-wise
//! into 6xN matrices Ɛ and S (ordered by sample id). The stiffness follows
//! from ordinary least squares in Mandel basis:
//!
//! C = S Ɛᵀ (Ɛ Ɛᵀ)⁻¹
//!
//! At least six linearly independent strain directions are needed.

use std::fmt::Display;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::FitOptions;
use crate::error::{ElasticError, ElasticResult};
use crate::math::{Mat6, Mat6xN, Vec6};
use crate::samples::StrainSample;
use crate::tensor::ElasticTensor;

/// Supplier of the stress belonging to a strained configuration
///
/// This is the seam to the physics engine. Implementations return the
/// stress as a 6-vector in the convention later declared in [`FitOptions`].
/// Closures `FnMut(&StrainSample) -> Result<Vec6, E>` implement it directly.
pub trait StressSource {
    type Error: Display;

    fn evaluate_stress(&mut self, sample: &StrainSample) -> Result<Vec6, Self::Error>;
}

impl<F, E> StressSource for F
where
    F: FnMut(&StrainSample) -> Result<Vec6, E>,
    E: Display,
{
    type Error = E;

    fn evaluate_stress(&mut self, sample: &StrainSample) -> Result<Vec6, E> {
        self(sample)
    }
}

/// A sample the stress source could not evaluate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationFailure {
    pub id: u64,
    pub message: String,
}

impl From<EvaluationFailure> for ElasticError {
    fn from(failure: EvaluationFailure) -> Self {
        ElasticError::Evaluation {
            id: failure.id,
            message: failure.message,
        }
    }
}

/// Fill in the stress of every sample that has none yet
///
/// Failures are not swallowed: each failed sample is reported and left
/// unevaluated so the caller can retry it or drop it before fitting.
pub fn evaluate_samples<S>(samples: &mut [StrainSample], source: &mut S) -> Vec<EvaluationFailure>
where
    S: StressSource + ?Sized,
{
    let mut failures = Vec::new();
    for sample in samples.iter_mut().filter(|s| !s.is_evaluated()) {
        let outcome = source
            .evaluate_stress(sample)
            .map_err(|e| e.to_string())
            .and_then(|stress| sample.set_stress(stress).map_err(|e| e.to_string()));

        if let Err(message) = outcome {
            warn!("stress evaluation of sample {} failed: {}", sample.id(), message);
            failures.push(EvaluationFailure {
                id: sample.id(),
                message,
            });
        }
    }
    failures
}

/// Fits the 6x6 stiffness from evaluated samples
#[derive(Debug, Clone, Default)]
pub struct ElasticTensorEstimator {
    options: FitOptions,
}

impl ElasticTensorEstimator {
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Fit the unsymmetrized elastic tensor
    ///
    /// # Errors
    /// * [`ElasticError::NotComputed`] if any sample has no stress
    /// * [`ElasticError::InvalidArgument`] for repeated sample ids
    /// * [`ElasticError::SingularFit`] when ƐƐᵀ is not invertible, e.g. fewer
    ///   than six independent strain directions
    pub fn fit(&self, samples: &[StrainSample]) -> ElasticResult<ElasticTensor> {
        let mut ordered: Vec<&StrainSample> = samples.iter().collect();
        ordered.sort_by_key(|s| s.id());
        if let Some(pair) = ordered.windows(2).find(|w| w[0].id() == w[1].id()) {
            return Err(ElasticError::InvalidArgument(format!(
                "sample id {} appears more than once",
                pair[0].id()
            )));
        }

        let (strain, stress) = self.assemble(&ordered)?;
        let gram: Mat6 = &strain * strain.transpose();
        let gram_inv = self.invert_normal_matrix(&gram, ordered.len())?;

        let mandel: Mat6 = &stress * strain.transpose() * gram_inv;
        debug!("fitted elastic tensor from {} samples", ordered.len());
        Ok(ElasticTensor::from_mandel(mandel))
    }

    /// Build the Mandel strain and stress matrices, one column per sample
    fn assemble(&self, samples: &[&StrainSample]) -> ElasticResult<(Mat6xN, Mat6xN)> {
        let n = samples.len();
        let mut strain = Mat6xN::zeros(n);
        let mut stress = Mat6xN::zeros(n);
        for (col, sample) in samples.iter().enumerate() {
            let eps = self.options.strain_convention.vector_to_mandel(sample.strain());
            let sigma = self.options.stress_convention.vector_to_mandel(sample.stress()?);
            strain.set_column(col, &eps);
            stress.set_column(col, &sigma);
        }
        Ok((strain, stress))
    }

    fn invert_normal_matrix(&self, gram: &Mat6, n_samples: usize) -> ElasticResult<Mat6> {
        let eigenvalues = gram.symmetric_eigenvalues();
        let largest = eigenvalues.max();
        let smallest = eigenvalues.min();
        let ratio = if largest > 0.0 { smallest / largest } else { 0.0 };
        debug!(
            "normal matrix from {} samples: eigenvalue ratio {:.3e}",
            n_samples, ratio
        );

        if !(ratio > self.options.singular_tolerance) {
            warn!(
                "strain set of {} samples spans fewer than 6 independent directions",
                n_samples
            );
            return Err(ElasticError::SingularFit(format!(
                "strain matrix of {n_samples} samples is rank deficient (eigenvalue ratio {ratio:.3e})"
            )));
        }

        gram.try_inverse().ok_or_else(|| {
            ElasticError::SingularFit(format!("normal matrix of {n_samples} samples is not invertible"))
        })
    }
}
