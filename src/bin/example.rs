//! Elastic Constants Example - Synthetic Cubic Crystal
//!
//! Probes a made-up aluminium-like cubic crystal, fits its elastic tensor,
//! symmetrizes it under m-3m and prints the homogenized moduli.
//!
//! An optional first argument names a JSON file with an `EngineConfig`.

use anyhow::Context;
use elastic_constants::prelude::*;
use log::warn;

/// Voigt constants in GPa
const C11: f64 = 107.0;
const C12: f64 = 61.0;
const C44: f64 = 28.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_path(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => EngineConfig::default(),
    };

    println!("=== Elastic Constants Example: Cubic Crystal ===\n");

    let crystal = ElasticTensor::cubic(C11, C12, C44);
    let cell = 4.05 * Mat3::identity();

    let mut engine = ElasticConstants::new(config);
    let mut samples = engine.prepare()?;
    println!("Prepared {} strained configurations", samples.len());

    // Stand-in for the physics engine: reports stress in Voigt order and
    // "crashes" on one configuration.
    let mut calculator = |sample: &StrainSample| -> Result<Vec6, String> {
        let strained = sample.strained_cell(&cell);
        if sample.id() == 7 {
            return Err(format!("SCF did not converge for cell {:?}", strained.diagonal()));
        }
        Ok(Convention::Voigt.vector_from_mandel(&crystal.stress(sample.strain())))
    };

    let failures = engine.evaluate(&mut samples, &mut calculator);
    for failure in &failures {
        warn!("excluding sample {}: {}", failure.id, failure.message);
    }
    let evaluated: Vec<StrainSample> = samples.into_iter().filter(|s| s.is_evaluated()).collect();

    let fitted = *engine.fit(&evaluated)?;
    println!("\nFitted tensor (Voigt scaling, GPa):\n{:.3}", fitted.voigt());

    let projected = *engine.symmetrize(&PointGroup::cubic())?;
    println!("Symmetrized tensor (Voigt scaling, GPa):\n{:.3}", projected.voigt());

    for scheme in Scheme::ALL {
        let set = engine.moduli(scheme)?;
        println!("{}", serde_json::to_string(&set)?);
    }

    println!("\nCompliance (1/GPa):\n{:.5}", engine.compliance()?);

    Ok(())
}
