//! Benchmarks for the elastic-constants pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use elastic_constants::prelude::*;

fn evaluated_samples(tensor: &ElasticTensor) -> Vec<StrainSample> {
    let mut samples = StrainSampler::default().prepare().unwrap();
    let failures = evaluate_samples(&mut samples, &mut |s: &StrainSample| {
        Ok::<_, String>(Convention::Voigt.vector_from_mandel(&tensor.stress(s.strain())))
    });
    assert!(failures.is_empty());
    samples
}

fn benchmark_prepare(c: &mut Criterion) {
    let sampler = StrainSampler::default();
    c.bench_function("prepare_default_samples", |b| {
        b.iter(|| black_box(sampler.prepare().unwrap()))
    });
}

fn benchmark_fit(c: &mut Criterion) {
    let samples = evaluated_samples(&ElasticTensor::cubic(110.0, 60.0, 30.0));
    let estimator = ElasticTensorEstimator::default();
    c.bench_function("fit_24_samples", |b| {
        b.iter(|| black_box(estimator.fit(black_box(&samples)).unwrap()))
    });
}

fn benchmark_cubic_projection(c: &mut Criterion) {
    let samples = evaluated_samples(&ElasticTensor::cubic(110.0, 60.0, 30.0));
    let fitted = ElasticTensorEstimator::default().fit(&samples).unwrap();
    let group = PointGroup::cubic();
    let projector = SymmetryProjector::default();
    c.bench_function("project_cubic_48_ops", |b| {
        b.iter(|| black_box(projector.project(black_box(&fitted), &group).unwrap()))
    });
}

fn benchmark_moduli(c: &mut Criterion) {
    let tensor = ElasticTensor::cubic(110.0, 60.0, 30.0);
    c.bench_function("moduli_all_schemes", |b| {
        b.iter(|| {
            let calc = ModulusCalculator::new(black_box(&tensor));
            for scheme in Scheme::ALL {
                black_box(calc.moduli(scheme).unwrap());
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_prepare,
    benchmark_fit,
    benchmark_cubic_projection,
    benchmark_moduli,
);

criterion_main!(benches);
