//! Displacement expansion, element end forces and support reactions

use std::collections::BTreeMap;

use super::assembly::node_at;
use super::numbering::{EquationMap, DOF_PER_NODE};
use crate::elements::{Element, Node};
use crate::error::{FrameError, FrameResult};
use crate::loads::NodeLoad;
use crate::math::{self, ElementFrame, Vec as FEVec, Vec6};
use crate::results::{ElementEndForces, NodeDisplacement, Reactions};

/// Expand the solved equation values into full nodal displacements.
/// Restrained DOFs are zero.
pub fn node_displacements(map: &EquationMap, displacements: &FEVec) -> FrameResult<Vec<NodeDisplacement>> {
    if displacements.len() != map.num_eq() {
        return Err(FrameError::InvalidInput(format!(
            "displacement vector has {} entries, expected {}",
            displacements.len(),
            map.num_eq()
        )));
    }

    Ok(map
        .rows()
        .iter()
        .map(|row| {
            let mut disp = [0.0; DOF_PER_NODE];
            for (value, &eq) in disp.iter_mut().zip(row) {
                if eq != 0 {
                    *value = displacements[eq - 1];
                }
            }
            NodeDisplacement::from_array(disp)
        })
        .collect())
}

/// Local end forces of an element for a given global displacement vector
/// [ux_i, uy_i, rz_i, ux_j, uy_j, rz_j].
pub fn local_end_forces(element: &Element, frame: &ElementFrame, d_global: &Vec6) -> Vec6 {
    let d_local = frame.rotation() * d_global;
    let k_local = math::element_local_stiffness(element.e, element.a, element.i, frame.length);
    k_local * d_local
}

/// Recover the end forces of every element, keyed by 1-based element id.
pub fn element_end_forces(
    nodes: &[Node],
    elements: &[Element],
    displacements: &[NodeDisplacement],
    min_length: f64,
) -> FrameResult<BTreeMap<usize, ElementEndForces>> {
    let mut forces = BTreeMap::new();

    for (index, element) in elements.iter().enumerate() {
        let id = index + 1;
        let frame = ElementFrame::between(
            id,
            node_at(nodes, element.start)?,
            node_at(nodes, element.end)?,
            min_length,
        )?;

        let disp_i = displacement_at(displacements, element.start)?;
        let disp_j = displacement_at(displacements, element.end)?;
        let d_global = Vec6::new(
            disp_i.dx, disp_i.dy, disp_i.rz, disp_j.dx, disp_j.dy, disp_j.rz,
        );

        let f_local = local_end_forces(element, &frame, &d_global);
        let f_global = frame.rotation().transpose() * f_local;

        log::debug!("Element {} local end forces: {:?}", id, f_local.as_slice());

        forces.insert(
            id,
            ElementEndForces {
                local: f_local.into(),
                global: f_global.into(),
            },
        );
    }

    Ok(forces)
}

fn displacement_at(displacements: &[NodeDisplacement], node: usize) -> FrameResult<NodeDisplacement> {
    node.checked_sub(1)
        .and_then(|index| displacements.get(index))
        .copied()
        .ok_or(FrameError::NodeNotFound(node))
}

/// Support reactions from element end forces and applied nodal loads.
///
/// At each node the global end forces of the connected elements balance the
/// applied load plus the reaction. Only restrained components are reported;
/// nodes without any restraint are omitted.
pub fn reactions(
    map: &EquationMap,
    elements: &[Element],
    forces: &BTreeMap<usize, ElementEndForces>,
    loads: &[(usize, NodeLoad)],
) -> FrameResult<BTreeMap<usize, Reactions>> {
    let mut nodal = vec![[0.0; DOF_PER_NODE]; map.node_count()];

    for (index, element) in elements.iter().enumerate() {
        let id = index + 1;
        let end_forces = forces.get(&id).ok_or(FrameError::ElementNotFound(id))?;
        for (slot, node) in element.nodes().into_iter().enumerate() {
            let sum = node
                .checked_sub(1)
                .and_then(|row| nodal.get_mut(row))
                .ok_or(FrameError::NodeNotFound(node))?;
            for dof in 0..DOF_PER_NODE {
                sum[dof] += end_forces.global[slot * DOF_PER_NODE + dof];
            }
        }
    }

    for (node, load) in loads {
        let sum = node
            .checked_sub(1)
            .and_then(|row| nodal.get_mut(row))
            .ok_or(FrameError::NodeNotFound(*node))?;
        for (value, component) in sum.iter_mut().zip(load.as_array()) {
            *value -= component;
        }
    }

    let mut result = BTreeMap::new();
    for (row, (equations, sum)) in map.rows().iter().zip(&nodal).enumerate() {
        if equations.iter().all(|&eq| eq != 0) {
            continue;
        }
        let mut reaction = [0.0; DOF_PER_NODE];
        for dof in 0..DOF_PER_NODE {
            if equations[dof] == 0 {
                reaction[dof] = sum[dof];
            }
        }
        result.insert(row + 1, Reactions::from_array(reaction));
    }

    Ok(result)
}
