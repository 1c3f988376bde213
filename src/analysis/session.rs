//! One solve of one model

use std::collections::BTreeMap;

use super::{assembly, numbering, recovery, AnalysisOptions, EquationMap, LinearSolver};
use crate::error::{FrameError, FrameResult};
use crate::math::{self, Mat, Vec as FEVec};
use crate::model::FrameModel;
use crate::results::{AnalysisResults, AnalysisSummary, ElementEndForces, NodeDisplacement, Reactions};

/// A planar frame cannot be stable with fewer restrained DOFs than this
const MIN_RESTRAINTS: usize = 3;

/// Working state of a single analysis.
///
/// A session borrows the model, owns every derived artifact (equation map,
/// global stiffness, load vector, displacements) and is consumed by
/// [`Session::run`]. Intermediate matrices are never visible to callers, and
/// a failing stage discards everything built so far.
pub struct Session<'a> {
    model: &'a FrameModel,
    options: AnalysisOptions,
}

impl<'a> Session<'a> {
    /// Create a session for `model`
    pub fn new(model: &'a FrameModel, options: AnalysisOptions) -> Self {
        Self { model, options }
    }

    /// Run numbering, assembly, solution and recovery in order
    pub fn run(self) -> FrameResult<AnalysisResults> {
        self.options.validate()?;

        log::info!(
            "Analyzing frame: {} nodes, {} elements, {} supports, {} loads",
            self.model.node_count(),
            self.model.element_count(),
            self.model.supports().len(),
            self.model.loads().len()
        );

        let map = self.number_equations()?;
        let k_global = assembly::assemble_stiffness(
            self.model.nodes(),
            self.model.elements(),
            &map,
            self.options.degenerate_length,
        )?;
        let p_global = assembly::assemble_load_vector(self.model.loads(), &map)?;
        let d = self.solve(&k_global, &p_global)?;

        let node_displacements = recovery::node_displacements(&map, &d)?;
        let element_forces = recovery::element_end_forces(
            self.model.nodes(),
            self.model.elements(),
            &node_displacements,
            self.options.degenerate_length,
        )?;
        let reactions = recovery::reactions(&map, self.model.elements(), &element_forces, self.model.loads())?;

        let mut summary = summarize(&map, &node_displacements, &element_forces);
        summary.equilibrium_residual = self.check_statics(&reactions);

        log::info!(
            "Analysis complete: {} equations, max displacement {:.6e} at node {}",
            map.num_eq(),
            summary.max_displacement,
            summary.max_disp_node
        );

        Ok(AnalysisResults {
            equation_map: map,
            displacements: d.as_slice().to_vec(),
            node_displacements,
            element_forces,
            reactions,
            summary,
        })
    }

    fn number_equations(&self) -> FrameResult<EquationMap> {
        let map = numbering::number_equations(self.model.node_count(), self.model.supports())?;

        log::debug!("Equation numbering: {:?}", map.rows());
        log::debug!("Number of equations: {}", map.num_eq());

        if map.restrained_count() < MIN_RESTRAINTS {
            return Err(FrameError::UnderRestrained {
                restrained: map.restrained_count(),
            });
        }
        Ok(map)
    }

    fn solve(&self, k_global: &Mat, p_global: &FEVec) -> FrameResult<FEVec> {
        let tol = self.options.pivot_tolerance;
        let d = match self.options.solver {
            LinearSolver::Lu => math::solve_linear_system(k_global, p_global, tol),
            LinearSolver::Cholesky => math::solve_cholesky(k_global, p_global, tol),
        }
        .ok_or(FrameError::SingularMatrix)?;

        log::debug!("Displacements: {:?}", d.as_slice());
        Ok(d)
    }

    /// Residual of global equilibrium: [ΣFx, ΣFy, ΣMz about the origin] over
    /// applied loads and reactions.
    fn check_statics(&self, reactions: &BTreeMap<usize, Reactions>) -> [f64; 3] {
        let nodes = self.model.nodes();
        let mut residual = [0.0; 3];
        let mut scale = [0.0; 3];

        let applied = self.model.loads().iter().map(|(node, load)| (*node, load.as_array()));
        let supports = reactions.iter().map(|(node, r)| (*node, r.as_array()));

        for (node, [fx, fy, mz]) in applied.chain(supports) {
            let Some(position) = node.checked_sub(1).and_then(|i| nodes.get(i)) else {
                continue;
            };
            let moment = position.x * fy - position.y * fx + mz;
            for (k, term) in [fx, fy, moment].into_iter().enumerate() {
                residual[k] += term;
                scale[k] += term.abs();
            }
        }

        if self.options.check_statics {
            let violated = residual
                .iter()
                .zip(&scale)
                .any(|(r, s)| r.abs() > self.options.statics_tolerance * s.max(1.0));
            if violated {
                log::warn!("Statics check failed: residual {:?}", residual);
            } else {
                log::debug!("Statics check passed: residual {:?}", residual);
            }
        }

        residual
    }
}

fn summarize(
    map: &EquationMap,
    displacements: &[NodeDisplacement],
    forces: &BTreeMap<usize, ElementEndForces>,
) -> AnalysisSummary {
    let mut summary = AnalysisSummary {
        num_nodes: map.node_count(),
        num_elements: forces.len(),
        total_dofs: map.total_dofs(),
        free_dofs: map.num_eq(),
        ..AnalysisSummary::default()
    };

    for (index, disp) in displacements.iter().enumerate() {
        let magnitude = disp.translation_magnitude();
        if magnitude > summary.max_displacement {
            summary.max_displacement = magnitude;
            summary.max_disp_node = index + 1;
        }
    }

    for (&id, f) in forces {
        if f.axial().abs() > summary.max_axial {
            summary.max_axial = f.axial().abs();
            summary.max_axial_element = id;
        }
        if f.max_moment() > summary.max_moment {
            summary.max_moment = f.max_moment();
            summary.max_moment_element = id;
        }
    }

    summary
}
