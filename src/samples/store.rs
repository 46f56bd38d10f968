//! Sample persistence seam
//!
//! The engine only needs append, update-by-id and retrieval; where samples
//! actually live (database, job queue, memory) is up to the caller.

use std::collections::HashMap;

use crate::error::{ElasticError, ElasticResult};
use crate::math::Vec6;

use super::StrainSample;

/// Storage for strain samples keyed by id
pub trait SampleStore {
    /// Add a new, not yet evaluated sample
    fn append(&mut self, sample: StrainSample) -> ElasticResult<()>;

    /// Record the stress of an existing sample
    fn set_stress(&mut self, id: u64, stress: Vec6) -> ElasticResult<()>;

    fn get(&self, id: u64) -> ElasticResult<&StrainSample>;

    /// All samples, in no particular order
    fn all(&self) -> Vec<&StrainSample>;

    /// Samples whose stress has been recorded, sorted by id
    fn evaluated(&self) -> Vec<StrainSample> {
        let mut out: Vec<StrainSample> = self
            .all()
            .into_iter()
            .filter(|s| s.is_evaluated())
            .cloned()
            .collect();
        out.sort_by_key(|s| s.id());
        out
    }

    /// Ids of samples still waiting for a stress, sorted
    fn pending(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .all()
            .into_iter()
            .filter(|s| !s.is_evaluated())
            .map(|s| s.id())
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// In-memory [`SampleStore`]
#[derive(Debug, Clone, Default)]
pub struct MemorySampleStore {
    samples: HashMap<u64, StrainSample>,
}

impl MemorySampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl SampleStore for MemorySampleStore {
    fn append(&mut self, sample: StrainSample) -> ElasticResult<()> {
        if self.samples.contains_key(&sample.id()) {
            return Err(ElasticError::DuplicateSample(sample.id()));
        }
        self.samples.insert(sample.id(), sample);
        Ok(())
    }

    fn set_stress(&mut self, id: u64, stress: Vec6) -> ElasticResult<()> {
        self.samples
            .get_mut(&id)
            .ok_or(ElasticError::SampleNotFound(id))?
            .set_stress(stress)
    }

    fn get(&self, id: u64) -> ElasticResult<&StrainSample> {
        self.samples.get(&id).ok_or(ElasticError::SampleNotFound(id))
    }

    fn all(&self) -> Vec<&StrainSample> {
        self.samples.values().collect()
    }
}
