//! Strain samples and their bookkeeping

mod sample;
mod store;

pub use sample::{green_lagrange, StrainSample};
pub use store::{MemorySampleStore, SampleStore};
