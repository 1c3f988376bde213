//! Result types for frame analysis

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::EquationMap;
use crate::error::FrameResult;

/// Displacement of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, RZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            rz: arr[2],
        }
    }

    /// Components as [DX, DY, RZ]
    pub fn as_array(&self) -> [f64; 3] {
        [self.dx, self.dy, self.rz]
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2)).sqrt()
    }
}

/// Reaction forces at a supported node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Create from array [FX, FY, MZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            mz: arr[2],
        }
    }

    /// Components as [FX, FY, MZ]
    pub fn as_array(&self) -> [f64; 3] {
        [self.fx, self.fy, self.mz]
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2)).sqrt()
    }
}

/// End forces of one element.
///
/// `local` is ordered [N_i, V_i, M_i, N_j, V_j, M_j] in the element frame and
/// holds the forces the nodes exert on the element. `global` is the same
/// vector rotated into the global frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementEndForces {
    /// Local end forces
    pub local: [f64; 6],
    /// Global end forces
    pub global: [f64; 6],
}

impl ElementEndForces {
    /// Axial force (positive = tension)
    pub fn axial(&self) -> f64 {
        -self.local[0]
    }

    /// Shear force (constant without member loads)
    pub fn shear(&self) -> f64 {
        self.local[1]
    }

    /// Bending moment at the start node (sagging positive)
    pub fn moment_i(&self) -> f64 {
        -self.local[2]
    }

    /// Bending moment at the end node (sagging positive)
    pub fn moment_j(&self) -> f64 {
        self.local[5]
    }

    /// Bending moment at a distance `x` from the start node
    pub fn moment_at(&self, x: f64) -> f64 {
        -self.local[2] + self.local[1] * x
    }

    /// Maximum absolute end moment
    pub fn max_moment(&self) -> f64 {
        self.local[2].abs().max(self.local[5].abs())
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Maximum nodal translation
    pub max_displacement: f64,
    /// Node with maximum translation
    pub max_disp_node: usize,
    /// Maximum absolute axial force
    pub max_axial: f64,
    /// Element with maximum axial force
    pub max_axial_element: usize,
    /// Maximum absolute end moment
    pub max_moment: f64,
    /// Element with maximum end moment
    pub max_moment_element: usize,
    /// Total number of nodes
    pub num_nodes: usize,
    /// Total number of elements
    pub num_elements: usize,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free DOFs (equations)
    pub free_dofs: usize,
    /// Sum of applied loads and reactions [FX, FY, MZ about the origin]
    pub equilibrium_residual: [f64; 3],
}

/// Everything produced by one solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Equation numbering used for the solve
    pub equation_map: EquationMap,
    /// Solution of the reduced system, indexed by equation number - 1
    pub displacements: Vec<f64>,
    /// Displacements per node, index = node id - 1
    pub node_displacements: Vec<NodeDisplacement>,
    /// End forces keyed by element id
    pub element_forces: BTreeMap<usize, ElementEndForces>,
    /// Reactions keyed by supported node id
    pub reactions: BTreeMap<usize, Reactions>,
    /// Extremes and counts
    pub summary: AnalysisSummary,
}

impl AnalysisResults {
    /// Displacement of a 1-based node
    pub fn node_displacement(&self, node: usize) -> Option<NodeDisplacement> {
        self.node_displacements.get(node.checked_sub(1)?).copied()
    }

    /// End forces of a 1-based element
    pub fn element_forces(&self, element: usize) -> Option<&ElementEndForces> {
        self.element_forces.get(&element)
    }

    /// Reactions at a supported 1-based node
    pub fn reaction(&self, node: usize) -> Option<Reactions> {
        self.reactions.get(&node).copied()
    }

    /// Serialize the results as pretty-printed JSON
    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
