//! Finite sets of orthogonal operators

use std::f64::consts::FRAC_PI_3;

use serde::{Deserialize, Serialize};

use crate::error::{ElasticError, ElasticResult};
use crate::math::{check_orthogonal, Mat3, ORTHOGONALITY_TOLERANCE};

/// Upper bound on the order reached while closing a generator set
const MAX_GROUP_ORDER: usize = 240;

/// Two operators closer than this are the same group element
const SAME_OPERATOR_TOLERANCE: f64 = 1e-8;

/// Cyclic relabelling of the Cartesian axes
///
/// The built-in groups have their principal axis along z. `Zxy` moves it
/// to y, `Yzx` moves it to x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPermutation {
    Xyz,
    Zxy,
    Yzx,
}

impl Default for AxisPermutation {
    fn default() -> Self {
        Self::Xyz
    }
}

impl AxisPermutation {
    fn shift(self) -> usize {
        match self {
            Self::Xyz => 0,
            Self::Zxy => 1,
            Self::Yzx => 2,
        }
    }

    /// Relabel the axes of one operator
    pub fn apply(self, op: &Mat3) -> Mat3 {
        let s = self.shift();
        Mat3::from_fn(|i, j| op[((i + s) % 3, (j + s) % 3)])
    }
}

/// A crystallographic point group given by its rotation/reflection matrices
///
/// The group {I} is the triclinic default and means "no symmetrization".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGroup {
    operators: Vec<Mat3>,
}

fn same_operator(a: &Mat3, b: &Mat3) -> bool {
    (a - b).amax() < SAME_OPERATOR_TOLERANCE
}

/// Smallest set containing the identity and closed under left
/// multiplication by the generators. Stops growing past `MAX_GROUP_ORDER`.
fn close(generators: &[Mat3]) -> Vec<Mat3> {
    let mut elements = vec![Mat3::identity()];
    let mut frontier = elements.clone();
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for a in &frontier {
            for g in generators {
                let product = g * a;
                if !elements.iter().any(|e| same_operator(e, &product)) {
                    elements.push(product);
                    next.push(product);
                    if elements.len() > MAX_GROUP_ORDER {
                        return elements;
                    }
                }
            }
        }
        frontier = next;
    }
    elements
}

fn rotation_z(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::new(
        c, -s, 0.0,
        s, c, 0.0,
        0.0, 0.0, 1.0,
    )
}

fn inversion() -> Mat3 {
    -Mat3::identity()
}

fn two_fold_x() -> Mat3 {
    Mat3::new(
        1.0, 0.0, 0.0,
        0.0, -1.0, 0.0,
        0.0, 0.0, -1.0,
    )
}

fn two_fold_y() -> Mat3 {
    Mat3::new(
        -1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, -1.0,
    )
}

impl PointGroup {
    /// Validate and wrap a set of operators
    ///
    /// # Errors
    /// * [`ElasticError::InvalidSymmetryOperator`] if an operator is not
    ///   orthogonal or has a determinant other than ±1
    /// * [`ElasticError::InvalidArgument`] for an empty set
    pub fn new(operators: Vec<Mat3>) -> ElasticResult<Self> {
        Self::with_tolerance(operators, ORTHOGONALITY_TOLERANCE)
    }

    /// Like [`PointGroup::new`] with an explicit orthogonality tolerance
    pub fn with_tolerance(operators: Vec<Mat3>, tol: f64) -> ElasticResult<Self> {
        if operators.is_empty() {
            return Err(ElasticError::InvalidArgument(
                "a point group needs at least one operator".to_string(),
            ));
        }
        validate_operators(&operators, tol)?;
        Ok(Self { operators })
    }

    /// Group generated by `generators` under matrix multiplication
    ///
    /// # Errors
    /// [`ElasticError::InvalidSymmetryOperator`] for a non-orthogonal
    /// generator, [`ElasticError::InvalidArgument`] if the generators do not
    /// close to a finite group of reasonable order
    pub fn from_generators(generators: &[Mat3]) -> ElasticResult<Self> {
        validate_operators(generators, ORTHOGONALITY_TOLERANCE)?;
        let operators = close(generators);
        if operators.len() > MAX_GROUP_ORDER {
            return Err(ElasticError::InvalidArgument(format!(
                "generators do not close to a group of order ≤ {MAX_GROUP_ORDER}"
            )));
        }
        Ok(Self { operators })
    }

    /// {I}: leaves every tensor unchanged
    pub fn trivial() -> Self {
        Self {
            operators: vec![Mat3::identity()],
        }
    }

    /// Laue class -1 (Ci), order 2
    pub fn triclinic() -> Self {
        Self {
            operators: close(&[inversion()]),
        }
    }

    /// Laue class 2/m (C2h) with the two-fold axis along y, order 4
    pub fn monoclinic() -> Self {
        Self {
            operators: close(&[two_fold_y(), inversion()]),
        }
    }

    /// Laue class mmm (D2h), order 8
    pub fn orthorhombic() -> Self {
        Self {
            operators: close(&[rotation_z(std::f64::consts::PI), two_fold_y(), inversion()]),
        }
    }

    /// Laue class 4/mmm (D4h), order 16
    pub fn tetragonal() -> Self {
        Self {
            operators: close(&[
                rotation_z(std::f64::consts::FRAC_PI_2),
                two_fold_x(),
                inversion(),
            ]),
        }
    }

    /// Laue class -3m (D3d), order 12
    pub fn trigonal() -> Self {
        Self {
            operators: close(&[rotation_z(2.0 * FRAC_PI_3), two_fold_x(), inversion()]),
        }
    }

    /// Laue class 6/mmm (D6h), order 24
    pub fn hexagonal() -> Self {
        Self {
            operators: close(&[rotation_z(FRAC_PI_3), two_fold_x(), inversion()]),
        }
    }

    /// Laue class m-3m (Oh), order 48
    pub fn cubic() -> Self {
        let three_fold_111 = Mat3::new(
            0.0, 0.0, 1.0,
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
        );
        Self {
            operators: close(&[
                rotation_z(std::f64::consts::FRAC_PI_2),
                three_fold_111,
                inversion(),
            ]),
        }
    }

    pub fn order(&self) -> usize {
        self.operators.len()
    }

    pub fn operators(&self) -> &[Mat3] {
        &self.operators
    }

    /// True when every operator is the identity
    pub fn is_trivial(&self) -> bool {
        let identity = Mat3::identity();
        self.operators.iter().all(|op| same_operator(op, &identity))
    }

    pub fn contains(&self, op: &Mat3) -> bool {
        self.operators.iter().any(|e| same_operator(e, op))
    }

    /// The same group in a relabelled axis setting
    pub fn permuted(&self, permutation: AxisPermutation) -> Self {
        Self {
            operators: self.operators.iter().map(|op| permutation.apply(op)).collect(),
        }
    }
}

impl Default for PointGroup {
    fn default() -> Self {
        Self::trivial()
    }
}

/// Check every operator for orthogonality
///
/// # Errors
/// [`ElasticError::InvalidSymmetryOperator`] naming the first bad operator
pub fn validate_operators(operators: &[Mat3], tol: f64) -> ElasticResult<()> {
    for (index, op) in operators.iter().enumerate() {
        check_orthogonal(op, tol)
            .map_err(|reason| ElasticError::InvalidSymmetryOperator { index, reason })?;
    }
    Ok(())
}
