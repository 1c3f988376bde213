//! Two-node beam element of a planar frame

use serde::{Deserialize, Serialize};

use super::{Material, Section};
use crate::error::{FrameError, FrameResult};

/// A planar Euler-Bernoulli beam element connecting two nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Start node id (1-based)
    pub start: usize,
    /// End node id (1-based)
    pub end: usize,
    /// Cross-sectional area
    pub a: f64,
    /// Second moment of area
    pub i: f64,
    /// Modulus of elasticity
    pub e: f64,
}

impl Element {
    /// Create a new element from its end nodes and section/material properties
    pub fn new(start: usize, end: usize, a: f64, i: f64, e: f64) -> Self {
        Self { start, end, a, i, e }
    }

    /// Create an element taking A and I from a section and E from a material
    pub fn from_section(start: usize, end: usize, section: &Section, material: &Material) -> Self {
        Self::new(start, end, section.a, section.i, material.e)
    }

    /// Node ids as [start, end]
    pub fn nodes(&self) -> [usize; 2] {
        [self.start, self.end]
    }

    /// Axial rigidity EA
    pub fn axial_rigidity(&self) -> f64 {
        self.e * self.a
    }

    /// Flexural rigidity EI
    pub fn flexural_rigidity(&self) -> f64 {
        self.e * self.i
    }

    /// Check that A, I and E are finite and positive
    pub(crate) fn validate_properties(&self, id: usize) -> FrameResult<()> {
        for (property, value) in [("area", self.a), ("inertia", self.i), ("modulus", self.e)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FrameError::InvalidProperty {
                    element: id,
                    property,
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_creation() {
        let element = Element::new(1, 2, 0.01, 1e-4, 2e11);
        assert_eq!(element.nodes(), [1, 2]);
        assert!((element.flexural_rigidity() - 2e7).abs() < 1e-3);
    }

    #[test]
    fn test_element_from_section() {
        let section = Section::rectangular(0.2, 0.4);
        let element = Element::from_section(1, 2, &section, &Material::steel());
        assert_eq!(element.a, section.a);
        assert_eq!(element.i, section.i);
        assert_eq!(element.e, 200e9);
    }

    #[test]
    fn test_rejects_non_positive_properties() {
        let element = Element::new(1, 2, 0.0, 1e-4, 2e11);
        let err = element.validate_properties(3).unwrap_err();
        assert!(matches!(
            err,
            FrameError::InvalidProperty { element: 3, property: "area", .. }
        ));
    }
}
