//! Frame Solver - linear static analysis of planar frames
//!
//! Implements the direct stiffness method for 2D frames built from two-node
//! Euler-Bernoulli beam elements with three DOFs per node (X, Y, rotation):
//! - Equation numbering of free DOFs
//! - Element stiffness in local coordinates and rotation to global
//! - Global stiffness and nodal load assembly
//! - Dense LU or Cholesky solution
//! - Element end forces and support reactions
//!
//! ## Example
//! ```rust
//! use frame_solver::prelude::*;
//!
//! let mut model = FrameModel::new();
//!
//! // Add nodes
//! let n1 = model.add_node(Node::new(0.0, 0.0)).unwrap();
//! let n2 = model.add_node(Node::new(4.0, 0.0)).unwrap();
//!
//! // Add element (A, I, E)
//! model.add_element(Element::new(n1, n2, 0.01, 1e-4, 2e11)).unwrap();
//!
//! // Add supports
//! model.add_support(n1, Support::fixed()).unwrap();
//!
//! // Add loads
//! model.add_node_load(n2, NodeLoad::fy(-1000.0)).unwrap();
//!
//! // Analyze
//! let results = model.analyze().unwrap();
//!
//! // Get results
//! let tip = results.node_displacement(n2).unwrap();
//! assert!(tip.dy < 0.0);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod report;
pub mod results;
pub mod tables;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, EquationMap, LinearSolver};
    pub use crate::elements::{Element, Material, Node, Section, Support};
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::NodeLoad;
    pub use crate::model::FrameModel;
    pub use crate::report::{DisplayUnits, SupportKind};
    pub use crate::results::{
        AnalysisResults, AnalysisSummary, ElementEndForces, NodeDisplacement, Reactions,
    };
    pub use crate::tables::{ModelTables, RawTables};
}
