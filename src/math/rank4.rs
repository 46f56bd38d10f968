//! Dense fourth-order tensors in three dimensions

use std::ops::{AddAssign, Index, IndexMut};

use super::Mat3;
use crate::error::{ElasticError, ElasticResult};

const LEN: usize = 81;

/// A 3x3x3x3 tensor stored row-major, indexed as `t[(i, j, k, l)]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rank4Tensor {
    data: [f64; LEN],
}

#[inline]
fn offset(i: usize, j: usize, k: usize, l: usize) -> usize {
    ((i * 3 + j) * 3 + k) * 3 + l
}

/// All 81 index tuples in storage order
fn indices() -> impl Iterator<Item = [usize; 4]> {
    (0..LEN).map(|n| [n / 27, (n / 9) % 3, (n / 3) % 3, n % 3])
}

impl Default for Rank4Tensor {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Rank4Tensor {
    pub fn zeros() -> Self {
        Self { data: [0.0; LEN] }
    }

    /// Build a tensor entry by entry
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize, usize) -> f64,
    {
        let mut out = Self::zeros();
        for [i, j, k, l] in indices() {
            out.data[offset(i, j, k, l)] = f(i, j, k, l);
        }
        out
    }

    /// Build a tensor from 81 row-major values
    ///
    /// # Errors
    /// [`ElasticError::Shape`] if `values` does not hold exactly 81 entries
    pub fn from_slice(values: &[f64]) -> ElasticResult<Self> {
        if values.len() != LEN {
            return Err(ElasticError::Shape(format!(
                "rank-4 tensor needs {LEN} entries, got {}",
                values.len()
            )));
        }
        let mut data = [0.0; LEN];
        data.copy_from_slice(values);
        Ok(Self { data })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Largest absolute entry
    pub fn amax(&self) -> f64 {
        self.data.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
    }

    /// Largest absolute entry-wise difference to `other`
    pub fn max_abs_diff(&self, other: &Rank4Tensor) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(0.0, |acc: f64, (a, b)| acc.max((a - b).abs()))
    }

    pub fn scale_mut(&mut self, factor: f64) {
        for v in self.data.iter_mut() {
            *v *= factor;
        }
    }

    /// Check T_ijkl = T_jikl = T_ijlk within `tol`
    pub fn has_minor_symmetry(&self, tol: f64) -> bool {
        indices().all(|[i, j, k, l]| {
            let v = self[(i, j, k, l)];
            (v - self[(j, i, k, l)]).abs() <= tol && (v - self[(i, j, l, k)]).abs() <= tol
        })
    }

    /// Check T_ijkl = T_klij within `tol`
    pub fn has_major_symmetry(&self, tol: f64) -> bool {
        indices().all(|[i, j, k, l]| (self[(i, j, k, l)] - self[(k, l, i, j)]).abs() <= tol)
    }

    /// Apply the rotation law T'_abcd = R_ai R_bj R_ck R_dl T_ijkl
    ///
    /// The four-fold sum is evaluated as four single-index contractions,
    /// starting from the last index.
    pub fn rotated(&self, r: &Mat3) -> Self {
        (0..4)
            .rev()
            .fold(*self, |acc, axis| acc.contract_axis(r, axis))
    }

    /// out[.., p, ..] = Σ_q R_pq self[.., q, ..] along one index slot
    fn contract_axis(&self, r: &Mat3, axis: usize) -> Self {
        let mut out = Self::zeros();
        for idx in indices() {
            let mut src = idx;
            let mut sum = 0.0;
            for q in 0..3 {
                src[axis] = q;
                sum += r[(idx[axis], q)] * self.data[offset(src[0], src[1], src[2], src[3])];
            }
            out.data[offset(idx[0], idx[1], idx[2], idx[3])] = sum;
        }
        out
    }
}

impl Index<(usize, usize, usize, usize)> for Rank4Tensor {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j, k, l): (usize, usize, usize, usize)) -> &f64 {
        &self.data[offset(i, j, k, l)]
    }
}

impl IndexMut<(usize, usize, usize, usize)> for Rank4Tensor {
    #[inline]
    fn index_mut(&mut self, (i, j, k, l): (usize, usize, usize, usize)) -> &mut f64 {
        &mut self.data[offset(i, j, k, l)]
    }
}

impl AddAssign<&Rank4Tensor> for Rank4Tensor {
    fn add_assign(&mut self, rhs: &Rank4Tensor) {
        for (a, b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a += b;
        }
    }
}
