//! Global stiffness and load assembly

use super::numbering::{EquationMap, DOF_PER_NODE};
use crate::elements::{Element, Node};
use crate::error::{FrameError, FrameResult};
use crate::loads::NodeLoad;
use crate::math::{self, ElementFrame, Mat, Mat6, Vec as FEVec};

/// Stiffness of one element in its local and the global frame
#[derive(Debug, Clone)]
pub struct ElementStiffness {
    /// Length and direction cosines
    pub frame: ElementFrame,
    /// 6x6 local stiffness
    pub k_local: Mat6,
    /// Rotation from global to local, local = R * global
    pub rotation: Mat6,
    /// Rᵗ * k_local * R
    pub k_global: Mat6,
}

impl ElementStiffness {
    /// Formulate element `id` (1-based) against the model's node table
    pub fn formulate(id: usize, element: &Element, nodes: &[Node], min_length: f64) -> FrameResult<Self> {
        let start = node_at(nodes, element.start)?;
        let end = node_at(nodes, element.end)?;

        let frame = ElementFrame::between(id, start, end, min_length)?;
        let k_local = math::element_local_stiffness(element.e, element.a, element.i, frame.length);
        let rotation = frame.rotation();
        let k_global = math::element_global_stiffness(&k_local, &rotation);

        Ok(Self {
            frame,
            k_local,
            rotation,
            k_global,
        })
    }
}

pub(crate) fn node_at(nodes: &[Node], id: usize) -> FrameResult<&Node> {
    id.checked_sub(1)
        .and_then(|index| nodes.get(index))
        .ok_or(FrameError::NodeNotFound(id))
}

/// Build the global stiffness matrix over the free equations.
///
/// Each element's global stiffness is added cell by cell into the rows and
/// columns of its free DOFs; restrained DOFs are skipped.
pub fn assemble_stiffness(
    nodes: &[Node],
    elements: &[Element],
    map: &EquationMap,
    min_length: f64,
) -> FrameResult<Mat> {
    let mut k_global = Mat::zeros(map.num_eq(), map.num_eq());

    for (index, element) in elements.iter().enumerate() {
        let id = index + 1;
        let stiffness = ElementStiffness::formulate(id, element, nodes, min_length)?;

        log::debug!(
            "Element {}: nodes {}-{}, L={:.6}, c={:.6}, s={:.6}, EA={:e}, EI={:e}",
            id,
            element.start,
            element.end,
            stiffness.frame.length,
            stiffness.frame.c,
            stiffness.frame.s,
            element.axial_rigidity(),
            element.flexural_rigidity()
        );
        log::debug!("Element {} local stiffness: {}", id, stiffness.k_local);

        let dofs = map.element_dofs(element.start, element.end);
        for (a, &row) in dofs.iter().enumerate() {
            if row == 0 {
                continue;
            }
            for (b, &col) in dofs.iter().enumerate() {
                if col != 0 {
                    k_global[(row - 1, col - 1)] += stiffness.k_global[(a, b)];
                }
            }
        }
    }

    log::debug!("Assembled {}x{} global stiffness matrix", map.num_eq(), map.num_eq());
    log::trace!("Global stiffness: {}", k_global);

    Ok(k_global)
}

/// Build the global load vector over the free equations.
///
/// Loads at the same node add up. Components acting on restrained DOFs do
/// not enter the vector.
pub fn assemble_load_vector(loads: &[(usize, NodeLoad)], map: &EquationMap) -> FrameResult<FEVec> {
    let mut p_global = FEVec::zeros(map.num_eq());

    for (node, load) in loads {
        if *node == 0 || *node > map.node_count() {
            return Err(FrameError::NodeNotFound(*node));
        }
        let components = load.as_array();
        for dof in 0..DOF_PER_NODE {
            if let Some(eq) = map.equation(*node, dof) {
                p_global[eq - 1] += components[dof];
            }
        }
    }

    log::debug!("Global load vector: {:?}", p_global.as_slice());

    Ok(p_global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::number_equations;
    use crate::elements::Support;
    use approx::assert_relative_eq;

    fn two_bay_beam() -> (Vec<Node>, Vec<Element>) {
        let nodes = vec![Node::new(0.0, 0.0), Node::new(3.0, 0.0), Node::new(6.0, 4.0)];
        let elements = vec![
            Element::new(1, 2, 0.01, 1e-4, 2e11),
            Element::new(2, 3, 0.02, 3e-4, 2e11),
        ];
        (nodes, elements)
    }

    #[test]
    fn test_assembled_stiffness_is_symmetric() {
        let (nodes, elements) = two_bay_beam();
        let map = number_equations(3, &[(1, Support::fixed())]).unwrap();
        let k = assemble_stiffness(&nodes, &elements, &map, 1e-10).unwrap();
        assert_eq!(k.nrows(), 6);
        assert_relative_eq!(k, k.transpose(), max_relative = 1e-12, epsilon = 1e-3);
        assert!(k.clone().cholesky().is_some());
    }

    #[test]
    fn test_shared_node_accumulates_both_elements() {
        let (nodes, elements) = two_bay_beam();
        let map = number_equations(3, &[(1, Support::fixed()), (3, Support::fixed())]).unwrap();
        let k = assemble_stiffness(&nodes, &elements, &map, 1e-10).unwrap();

        let k1 = ElementStiffness::formulate(1, &elements[0], &nodes, 1e-10).unwrap();
        let k2 = ElementStiffness::formulate(2, &elements[1], &nodes, 1e-10).unwrap();
        for a in 0..3 {
            for b in 0..3 {
                assert_relative_eq!(
                    k[(a, b)],
                    k1.k_global[(a + 3, b + 3)] + k2.k_global[(a, b)],
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_degenerate_element_fails_assembly() {
        let nodes = vec![Node::new(1.0, 1.0), Node::new(1.0, 1.0)];
        let elements = vec![Element::new(1, 2, 0.01, 1e-4, 2e11)];
        let map = number_equations(2, &[(1, Support::fixed())]).unwrap();
        let err = assemble_stiffness(&nodes, &elements, &map, 1e-10).unwrap_err();
        assert!(matches!(err, FrameError::DegenerateElement { element: 1, .. }));
    }

    #[test]
    fn test_loads_add_and_skip_restrained_dofs() {
        let map = number_equations(2, &[(1, Support::fixed()), (2, Support::roller_y())]).unwrap();
        let loads = [
            (2, NodeLoad::new(5.0, -100.0, 1.0)),
            (2, NodeLoad::new(1.0, 0.0, 2.0)),
            (1, NodeLoad::new(7.0, 7.0, 7.0)),
        ];
        let p = assemble_load_vector(&loads, &map).unwrap();
        assert_eq!(p.as_slice(), &[6.0, 3.0]);
    }

    #[test]
    fn test_load_on_missing_node() {
        let map = number_equations(2, &[(1, Support::fixed())]).unwrap();
        let err = assemble_load_vector(&[(3, NodeLoad::fy(1.0))], &map).unwrap_err();
        assert!(matches!(err, FrameError::NodeNotFound(3)));
    }
}
