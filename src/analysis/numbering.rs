//! Equation numbering of free degrees of freedom

use serde::{Deserialize, Serialize};

use crate::elements::Support;
use crate::error::{FrameError, FrameResult};

/// Degrees of freedom per node: X translation, Y translation, Z rotation
pub const DOF_PER_NODE: usize = 3;

/// Map from (node, local DOF) to equation number.
///
/// Row `n` holds node `n + 1`. A cell is 0 when the DOF is restrained and
/// otherwise holds its 1-based equation number. Numbers `1..=num_eq` appear
/// exactly once, in node-major, DOF-minor order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EquationRows")]
pub struct EquationMap {
    rows: Vec<[usize; DOF_PER_NODE]>,
    num_eq: usize,
}

/// Unchecked wire form of [`EquationMap`]
#[derive(Deserialize)]
struct EquationRows {
    rows: Vec<[usize; DOF_PER_NODE]>,
    num_eq: usize,
}

impl TryFrom<EquationRows> for EquationMap {
    type Error = FrameError;

    /// Accept only maps numbered 1..=num_eq in node-major, DOF-minor order
    fn try_from(value: EquationRows) -> FrameResult<Self> {
        let mut next = 1;
        for (index, row) in value.rows.iter().enumerate() {
            for &eq in row.iter().filter(|&&eq| eq != 0) {
                if eq != next {
                    return Err(FrameError::InvalidInput(format!(
                        "equation map row {} holds equation {}, expected {}",
                        index + 1,
                        eq,
                        next
                    )));
                }
                next += 1;
            }
        }
        if next - 1 != value.num_eq {
            return Err(FrameError::InvalidInput(format!(
                "equation map numbers {} equations but declares {}",
                next - 1,
                value.num_eq
            )));
        }
        Ok(Self {
            rows: value.rows,
            num_eq: value.num_eq,
        })
    }
}

impl EquationMap {
    /// Number of equations (free DOFs)
    pub fn num_eq(&self) -> usize {
        self.num_eq
    }

    /// Number of nodes covered by the map
    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    /// Total DOFs in the model, free and restrained
    pub fn total_dofs(&self) -> usize {
        self.rows.len() * DOF_PER_NODE
    }

    /// Number of restrained DOFs (cells holding 0)
    pub fn restrained_count(&self) -> usize {
        self.total_dofs() - self.num_eq
    }

    /// Raw rows, 0 meaning restrained
    pub fn rows(&self) -> &[[usize; DOF_PER_NODE]] {
        &self.rows
    }

    /// Equation number of a DOF of a 1-based node, `None` when restrained
    /// or out of range.
    pub fn equation(&self, node: usize, dof: usize) -> Option<usize> {
        let row = self.rows.get(node.checked_sub(1)?)?;
        row.get(dof).copied().filter(|&eq| eq != 0)
    }

    /// The six raw cells for an element's start and end nodes (0 = restrained)
    pub fn element_dofs(&self, start: usize, end: usize) -> [usize; 2 * DOF_PER_NODE] {
        let mut dofs = [0; 2 * DOF_PER_NODE];
        for (slot, node) in [start, end].into_iter().enumerate() {
            for dof in 0..DOF_PER_NODE {
                dofs[slot * DOF_PER_NODE + dof] = self.equation(node, dof).unwrap_or(0);
            }
        }
        dofs
    }
}

/// Assign equation numbers to the free DOFs of `node_count` nodes.
///
/// `supports` pairs 1-based node ids with their restraints; a later entry for
/// the same node overwrites an earlier one. Node ids are assumed to be in
/// range, which the model checks when supports are added.
///
/// Fails with [`FrameError::NoFreeDofs`] if every DOF is restrained.
pub fn number_equations(node_count: usize, supports: &[(usize, Support)]) -> FrameResult<EquationMap> {
    let mut restrained = vec![[false; DOF_PER_NODE]; node_count];
    for (node, support) in supports {
        match node.checked_sub(1).and_then(|row| restrained.get_mut(row)) {
            Some(row) => *row = support.as_array(),
            None => return Err(FrameError::NodeNotFound(*node)),
        }
    }

    let mut num_eq = 0;
    let rows = restrained
        .iter()
        .map(|flags| {
            let mut row = [0; DOF_PER_NODE];
            for (cell, &fixed) in row.iter_mut().zip(flags) {
                if !fixed {
                    num_eq += 1;
                    *cell = num_eq;
                }
            }
            row
        })
        .collect();

    if num_eq == 0 {
        return Err(FrameError::NoFreeDofs);
    }

    Ok(EquationMap { rows, num_eq })
}
