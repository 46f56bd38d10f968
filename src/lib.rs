//! Elastic Constants - a Rust engine for single-crystal elasticity
//!
//! Turns stress responses to small deformations into an elastic tensor and
//! scalar engineering moduli:
//! - Canonical normal and shear strain probes
//! - Mandel notation codec for rank-2 and rank-4 tensors
//! - Least-squares fit of the 6x6 stiffness
//! - Projection onto crystallographic point groups
//! - Voigt, Reuss and Hill bulk/shear/Young's moduli and Poisson ratio
//!
//! The physics engine that produces stresses is not part of this crate; it
//! is plugged in through [`estimator::StressSource`].
//!
//! ## Example
//! ```rust
//! use elastic_constants::prelude::*;
//!
//! let reference = ElasticTensor::cubic(110.0, 60.0, 30.0);
//!
//! let mut engine = ElasticConstants::new(
//!     EngineConfig::default().with_fit_options(FitOptions::mandel()),
//! );
//! let mut samples = engine.prepare().unwrap();
//!
//! // Stand-in for the physics engine
//! let failures = engine.evaluate(&mut samples, &mut |s: &StrainSample| {
//!     Ok::<_, String>(reference.stress(s.strain()))
//! });
//! assert!(failures.is_empty());
//!
//! engine.fit(&samples).unwrap();
//! engine.symmetrize(&PointGroup::cubic()).unwrap();
//!
//! let hill = engine.moduli(Scheme::Hill).unwrap();
//! assert!((hill.bulk_modulus - 230.0 / 3.0).abs() < 1e-6);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod math;
pub mod moduli;
pub mod samples;
pub mod strain;
pub mod symmetry;
pub mod tensor;

pub use engine::ElasticConstants;
pub use error::{ElasticError, ElasticResult};

// Re-export common types
pub mod prelude {
    pub use crate::config::{EngineConfig, FitOptions, SamplerConfig};
    pub use crate::engine::ElasticConstants;
    pub use crate::error::{ElasticError, ElasticResult};
    pub use crate::estimator::{
        evaluate_samples, ElasticTensorEstimator, EvaluationFailure, StressSource,
    };
    pub use crate::math::{Convention, Mat3, Mat6, Rank4Tensor, Vec6};
    pub use crate::moduli::{compliance_tensor, ModulusCalculator, ModulusSet, Scheme};
    pub use crate::samples::{MemorySampleStore, SampleStore, StrainSample};
    pub use crate::strain::{eigenstrain, principal_strains, StrainSampler};
    pub use crate::symmetry::{AxisPermutation, PointGroup, SymmetryProjector};
    pub use crate::tensor::ElasticTensor;
}
