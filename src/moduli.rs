//! Homogenized polycrystalline moduli
//!
//! Voigt (uniform strain, upper bound), Reuss (uniform stress, lower bound)
//! and their Hill average. All averages are taken on the plain-Voigt
//! scaled stiffness C and its inverse S:
//!
//! - Kv = (C00+C11+C22 + 2(C01+C12+C02)) / 9
//! - Kr = 1 / (S00+S11+S22 + 2(S01+S12+S02))
//! - Gv = (C00+C11+C22 − (C01+C12+C02) + 3(C33+C44+C55)) / 15
//! - Gr = 15 / (4(S00+S11+S22) − 4(S01+S12+S02) + 3(S33+S44+S55))

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ElasticError, ElasticResult};
use crate::math::Mat6;
use crate::tensor::ElasticTensor;

/// Homogenization scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    #[serde(rename = "V")]
    Voigt,
    #[serde(rename = "R")]
    Reuss,
    #[serde(rename = "VRH")]
    Hill,
}

impl Default for Scheme {
    fn default() -> Self {
        Self::Hill
    }
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Voigt, Scheme::Reuss, Scheme::Hill];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Voigt => "V",
            Self::Reuss => "R",
            Self::Hill => "VRH",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ElasticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "V" => Ok(Self::Voigt),
            "R" => Ok(Self::Reuss),
            "VRH" => Ok(Self::Hill),
            other => Err(ElasticError::InvalidArgument(format!(
                "unknown scheme '{other}', expected one of V, R, VRH"
            ))),
        }
    }
}

/// Scalar moduli under one scheme
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModulusSet {
    pub scheme: Scheme,
    pub bulk_modulus: f64,
    pub shear_modulus: f64,
    pub youngs_modulus: f64,
    /// Always the Hill value, whatever the scheme
    pub poisson_ratio: f64,
}

/// Compliance S = C⁻¹, with C rescaled from Mandel to plain Voigt first
///
/// Off-diagonal normal/shear blocks are divided by √2 and the shear block
/// by 2 before inversion.
///
/// # Errors
/// [`ElasticError::SingularCompliance`] if the stiffness is not invertible
pub fn compliance_tensor(tensor: &ElasticTensor) -> ElasticResult<Mat6> {
    tensor
        .voigt()
        .try_inverse()
        .filter(|s| s.iter().all(|v| v.is_finite()))
        .ok_or(ElasticError::SingularCompliance)
}

/// Derives V/R/VRH moduli from an elastic tensor
#[derive(Debug, Clone)]
pub struct ModulusCalculator {
    tensor: ElasticTensor,
    /// Stiffness in plain Voigt scaling
    stiffness: Mat6,
}

impl ModulusCalculator {
    pub fn new(tensor: &ElasticTensor) -> Self {
        Self {
            tensor: *tensor,
            stiffness: tensor.voigt(),
        }
    }

    pub fn compliance(&self) -> ElasticResult<Mat6> {
        compliance_tensor(&self.tensor)
    }

    pub fn voigt_bulk(&self) -> f64 {
        let c = &self.stiffness;
        (c[(0, 0)] + c[(1, 1)] + c[(2, 2)] + 2.0 * (c[(0, 1)] + c[(1, 2)] + c[(0, 2)])) / 9.0
    }

    pub fn reuss_bulk(&self) -> ElasticResult<f64> {
        let s = self.compliance()?;
        let inv = s[(0, 0)] + s[(1, 1)] + s[(2, 2)] + 2.0 * (s[(0, 1)] + s[(1, 2)] + s[(0, 2)]);
        Ok(1.0 / inv)
    }

    pub fn voigt_shear(&self) -> f64 {
        let c = &self.stiffness;
        let normal = c[(0, 0)] + c[(1, 1)] + c[(2, 2)];
        let coupling = c[(0, 1)] + c[(1, 2)] + c[(0, 2)];
        let shear = c[(3, 3)] + c[(4, 4)] + c[(5, 5)];
        (normal - coupling + 3.0 * shear) / 15.0
    }

    pub fn reuss_shear(&self) -> ElasticResult<f64> {
        let s = self.compliance()?;
        let normal = s[(0, 0)] + s[(1, 1)] + s[(2, 2)];
        let coupling = s[(0, 1)] + s[(1, 2)] + s[(0, 2)];
        let shear = s[(3, 3)] + s[(4, 4)] + s[(5, 5)];
        Ok(15.0 / (4.0 * normal - 4.0 * coupling + 3.0 * shear))
    }

    pub fn bulk_modulus(&self, scheme: Scheme) -> ElasticResult<f64> {
        match scheme {
            Scheme::Voigt => Ok(self.voigt_bulk()),
            Scheme::Reuss => self.reuss_bulk(),
            Scheme::Hill => Ok(0.5 * (self.voigt_bulk() + self.reuss_bulk()?)),
        }
    }

    pub fn shear_modulus(&self, scheme: Scheme) -> ElasticResult<f64> {
        match scheme {
            Scheme::Voigt => Ok(self.voigt_shear()),
            Scheme::Reuss => self.reuss_shear(),
            Scheme::Hill => Ok(0.5 * (self.voigt_shear() + self.reuss_shear()?)),
        }
    }

    /// ν = (3K − 2G) / (6K + 2G) from the Hill averages
    pub fn poisson_ratio(&self) -> ElasticResult<f64> {
        let k = self.bulk_modulus(Scheme::Hill)?;
        let g = self.shear_modulus(Scheme::Hill)?;
        Ok((3.0 * k - 2.0 * g) / (6.0 * k + 2.0 * g))
    }

    /// E = 3K(1 − 2ν) with the scheme's K and the Hill ν
    pub fn youngs_modulus(&self, scheme: Scheme) -> ElasticResult<f64> {
        let k = self.bulk_modulus(scheme)?;
        Ok(3.0 * k * (1.0 - 2.0 * self.poisson_ratio()?))
    }

    pub fn moduli(&self, scheme: Scheme) -> ElasticResult<ModulusSet> {
        Ok(ModulusSet {
            scheme,
            bulk_modulus: self.bulk_modulus(scheme)?,
            shear_modulus: self.shear_modulus(scheme)?,
            youngs_modulus: self.youngs_modulus(scheme)?,
            poisson_ratio: self.poisson_ratio()?,
        })
    }

    /// Isotropic stiffness carrying the scheme's bulk and shear moduli
    pub fn isotropic_tensor(&self, scheme: Scheme) -> ElasticResult<ElasticTensor> {
        Ok(ElasticTensor::isotropic(
            self.bulk_modulus(scheme)?,
            self.shear_modulus(scheme)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_isotropic_moduli() {
        let calc = ModulusCalculator::new(&ElasticTensor::isotropic(50.0, 20.0));
        for scheme in Scheme::ALL {
            assert_relative_eq!(calc.bulk_modulus(scheme).unwrap(), 50.0, epsilon = 1e-10);
            assert_relative_eq!(calc.shear_modulus(scheme).unwrap(), 20.0, epsilon = 1e-10);
        }
        let nu = calc.poisson_ratio().unwrap();
        assert_relative_eq!(nu, 110.0 / 340.0, epsilon = 1e-12);
        // E = 9KG / (3K + G)
        assert_relative_eq!(
            calc.youngs_modulus(Scheme::Hill).unwrap(),
            9000.0 / 170.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_cubic_voigt_reuss_bounds() {
        let calc = ModulusCalculator::new(&ElasticTensor::cubic(110.0, 60.0, 30.0));

        assert_relative_eq!(calc.voigt_bulk(), 230.0 / 3.0, epsilon = 1e-10);
        assert_relative_eq!(calc.reuss_bulk().unwrap(), 230.0 / 3.0, epsilon = 1e-10);

        assert_relative_eq!(calc.voigt_shear(), 28.0, epsilon = 1e-10);
        // Gr = 5 (C11 − C12) C44 / (4 C44 + 3 (C11 − C12))
        let gr = 5.0 * 50.0 * 30.0 / (120.0 + 150.0);
        assert_relative_eq!(calc.reuss_shear().unwrap(), gr, epsilon = 1e-10);
        assert_relative_eq!(
            calc.shear_modulus(Scheme::Hill).unwrap(),
            0.5 * (28.0 + gr),
            epsilon = 1e-10
        );
        assert!(calc.reuss_shear().unwrap() < calc.voigt_shear());
    }

    #[test]
    fn test_youngs_modulus_uses_hill_poisson_ratio() {
        let calc = ModulusCalculator::new(&ElasticTensor::cubic(110.0, 60.0, 30.0));
        let nu = calc.poisson_ratio().unwrap();
        for scheme in Scheme::ALL {
            let set = calc.moduli(scheme).unwrap();
            assert_relative_eq!(set.poisson_ratio, nu);
            assert_relative_eq!(
                set.youngs_modulus,
                3.0 * set.bulk_modulus * (1.0 - 2.0 * nu),
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn test_compliance_of_isotropic_solid() {
        let s = compliance_tensor(&ElasticTensor::isotropic(50.0, 20.0)).unwrap();
        let e = 9000.0 / 170.0;
        let nu = 110.0 / 340.0;
        assert_relative_eq!(s[(0, 0)], 1.0 / e, epsilon = 1e-12);
        assert_relative_eq!(s[(0, 1)], -nu / e, epsilon = 1e-12);
        assert_relative_eq!(s[(3, 3)], 1.0 / 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_tensor() {
        let calc = ModulusCalculator::new(&ElasticTensor::from_mandel(Mat6::zeros()));
        assert_relative_eq!(calc.voigt_bulk(), 0.0);
        assert!(matches!(calc.reuss_bulk(), Err(ElasticError::SingularCompliance)));
        assert!(calc.moduli(Scheme::Voigt).is_err());
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("V".parse::<Scheme>().unwrap(), Scheme::Voigt);
        assert_eq!("R".parse::<Scheme>().unwrap(), Scheme::Reuss);
        assert_eq!("VRH".parse::<Scheme>().unwrap(), Scheme::Hill);
        assert!(matches!(
            "Hill".parse::<Scheme>(),
            Err(ElasticError::InvalidArgument(_))
        ));
        assert_eq!(Scheme::Hill.to_string(), "VRH");
    }

    #[test]
    fn test_modulus_set_serializes_scheme_label() {
        let calc = ModulusCalculator::new(&ElasticTensor::isotropic(50.0, 20.0));
        let json = serde_json::to_string(&calc.moduli(Scheme::Reuss).unwrap()).unwrap();
        assert!(json.contains("\"scheme\":\"R\""));
    }
}
