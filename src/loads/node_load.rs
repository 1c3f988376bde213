//! Node loads - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};

/// A concentrated load applied directly to a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeLoad {
    /// Force in X direction (N)
    pub fx: f64,
    /// Force in Y direction (N)
    pub fy: f64,
    /// Moment about Z axis (N·m)
    pub mz: f64,
}

impl NodeLoad {
    /// Create a new node load with all components
    pub fn new(fx: f64, fy: f64, mz: f64) -> Self {
        Self { fx, fy, mz }
    }

    /// Create a force-only node load
    pub fn force(fx: f64, fy: f64) -> Self {
        Self::new(fx, fy, 0.0)
    }

    /// Create a moment-only node load
    pub fn moment(mz: f64) -> Self {
        Self::new(0.0, 0.0, mz)
    }

    /// Create a load in X direction
    pub fn fx(value: f64) -> Self {
        Self::force(value, 0.0)
    }

    /// Create a load in Y direction
    pub fn fy(value: f64) -> Self {
        Self::force(0.0, value)
    }

    /// Get the load as an array [FX, FY, MZ]
    pub fn as_array(&self) -> [f64; 3] {
        [self.fx, self.fy, self.mz]
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }
}
