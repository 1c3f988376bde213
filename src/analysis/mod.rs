//! Analysis options and the stiffness-method pipeline

mod assembly;
mod numbering;
mod recovery;
mod session;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

pub use assembly::{assemble_load_vector, assemble_stiffness, ElementStiffness};
pub use numbering::{number_equations, EquationMap, DOF_PER_NODE};
pub use recovery::{element_end_forces, local_end_forces, node_displacements, reactions};
pub use session::Session;

/// Direct solver used for the reduced system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearSolver {
    /// LU decomposition with partial pivoting
    #[default]
    Lu,
    /// Cholesky decomposition, valid for symmetric positive definite systems
    Cholesky,
}

/// Options for a linear static analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Factorization used for the global system
    pub solver: LinearSolver,
    /// Smallest allowed ratio between the smallest and largest pivot
    pub pivot_tolerance: f64,
    /// Check static equilibrium after analysis
    pub check_statics: bool,
    /// Allowed equilibrium residual relative to the applied load magnitude
    pub statics_tolerance: f64,
    /// Elements not longer than this are degenerate
    pub degenerate_length: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            solver: LinearSolver::Lu,
            pivot_tolerance: 1e-12,
            check_statics: true,
            statics_tolerance: 1e-6,
            degenerate_length: 1e-10,
        }
    }
}

impl AnalysisOptions {
    /// Create options for linear analysis
    pub fn linear() -> Self {
        Self::default()
    }

    /// Select the linear solver
    pub fn with_solver(mut self, solver: LinearSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Set the singularity threshold
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    /// Skip the equilibrium check
    pub fn without_statics_check(mut self) -> Self {
        self.check_statics = false;
        self
    }

    /// Check that every tolerance is finite and not negative
    pub fn validate(&self) -> FrameResult<()> {
        let tolerances = [
            ("pivot_tolerance", self.pivot_tolerance),
            ("statics_tolerance", self.statics_tolerance),
            ("degenerate_length", self.degenerate_length),
        ];
        for (name, value) in tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(FrameError::InvalidInput(format!(
                    "option {} must be finite and not negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
