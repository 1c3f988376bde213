//! Support conditions

use serde::{Deserialize, Serialize};

/// Restraints at a node. An unrestrained DOF is free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    /// Restrained in X translation
    pub dx: bool,
    /// Restrained in Y translation
    pub dy: bool,
    /// Restrained in rotation about Z
    pub rz: bool,
}

impl Support {
    /// Create a new support with no restraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self::with_restraints(true, true, true)
    }

    /// Create a pinned support (translations restrained, rotation free)
    pub fn pinned() -> Self {
        Self::with_restraints(true, true, false)
    }

    /// Create a roller support (Y translation restrained only)
    pub fn roller_y() -> Self {
        Self::with_restraints(false, true, false)
    }

    /// Create a roller support (X translation restrained only)
    pub fn roller_x() -> Self {
        Self::with_restraints(true, false, false)
    }

    /// Create a support with specific restraints
    pub fn with_restraints(dx: bool, dy: bool, rz: bool) -> Self {
        Self { dx, dy, rz }
    }

    /// Restraint flags in DOF order [DX, DY, RZ]
    pub fn as_array(&self) -> [bool; 3] {
        [self.dx, self.dy, self.rz]
    }

    /// Count number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.as_array().iter().filter(|&&r| r).count()
    }
}

impl From<[bool; 3]> for Support {
    fn from(flags: [bool; 3]) -> Self {
        Self::with_restraints(flags[0], flags[1], flags[2])
    }
}
