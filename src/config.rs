//! Engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ElasticResult;
use crate::math::{Convention, ORTHOGONALITY_TOLERANCE};

/// Strain magnitudes of the canonical probes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Magnitudes δ of F = I + δ eᵢ⊗eᵢ
    pub normal_magnitudes: Vec<f64>,
    /// Magnitudes δ of F = I + δ eᵢ⊗eⱼ
    pub shear_magnitudes: Vec<f64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            normal_magnitudes: vec![-0.01, -0.005, 0.005, 0.01],
            shear_magnitudes: vec![-0.06, -0.03, 0.03, 0.06],
        }
    }
}

/// Options for the least-squares stiffness fit
///
/// The conventions describe the input data. Mixing them up silently
/// produces wrong shear coefficients; the fit cannot detect it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Convention of the recorded stresses
    pub stress_convention: Convention,
    /// Convention of the recorded strains
    pub strain_convention: Convention,
    /// Smallest accepted ratio between the extreme eigenvalues of ƐƐᵀ
    pub singular_tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            stress_convention: Convention::Voigt,
            strain_convention: Convention::Mandel,
            singular_tolerance: 1e-12,
        }
    }
}

impl FitOptions {
    /// Both stress and strain already in Mandel form
    pub fn mandel() -> Self {
        Self {
            stress_convention: Convention::Mandel,
            strain_convention: Convention::Mandel,
            ..Self::default()
        }
    }

    pub fn with_stress_convention(mut self, convention: Convention) -> Self {
        self.stress_convention = convention;
        self
    }

    pub fn with_strain_convention(mut self, convention: Convention) -> Self {
        self.strain_convention = convention;
        self
    }

    pub fn with_singular_tolerance(mut self, tol: f64) -> Self {
        self.singular_tolerance = tol;
        self
    }
}

/// Top-level configuration of [`crate::ElasticConstants`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sampler: SamplerConfig,
    pub fit: FitOptions,
    /// Tolerance on RᵀR = I for supplied symmetry operators
    pub symmetry_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sampler: SamplerConfig::default(),
            fit: FitOptions::default(),
            symmetry_tolerance: ORTHOGONALITY_TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> ElasticResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> ElasticResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> ElasticResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_sampler(mut self, sampler: SamplerConfig) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_fit_options(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_symmetry_tolerance(mut self, tol: f64) -> Self {
        self.symmetry_tolerance = tol;
        self
    }
}
