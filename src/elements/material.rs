//! Material properties

use serde::{Deserialize, Serialize};

/// Linear-elastic material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
}

impl Material {
    /// Create a new material with the given modulus
    pub fn new(e: f64) -> Self {
        Self { e }
    }

    /// Structural steel
    pub fn steel() -> Self {
        Self::new(200e9)
    }

    /// Aluminum (6061-T6)
    pub fn aluminum() -> Self {
        Self::new(68.9e9)
    }

    /// Normal weight concrete from its compressive strength `fc` in Pa.
    /// E = 4700 * sqrt(f'c in MPa) MPa (ACI 318).
    pub fn concrete(fc: f64) -> Self {
        let fc_mpa = fc / 1e6;
        Self::new(4700.0 * fc_mpa.sqrt() * 1e6)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_modulus() {
        let mat = Material::concrete(25e6);
        assert!((mat.e - 23.5e9).abs() < 1.0);
    }

    #[test]
    fn test_steel_properties() {
        assert_eq!(Material::steel().e, 200e9);
        assert_eq!(Material::default(), Material::steel());
    }
}
