//! Beams with closed-form solutions
//!
//! Cantilevers and simply supported beams under nodal loads, checked against
//! the classical Euler-Bernoulli results.

use approx::assert_relative_eq;
use frame_solver::prelude::*;

const E: f64 = 2e11;
const A: f64 = 0.01;
const I: f64 = 1e-4;

fn cantilever(from: [f64; 2], to: [f64; 2]) -> FrameModel {
    let mut model = FrameModel::new();
    let n1 = model.add_node(Node::from(from)).unwrap();
    let n2 = model.add_node(Node::from(to)).unwrap();
    model.add_element(Element::new(n1, n2, A, I, E)).unwrap();
    model.add_support(n1, Support::fixed()).unwrap();
    model
}

#[test]
fn test_cantilever_tip_load() {
    let (p, l) = (1000.0, 4.0);
    let mut model = cantilever([0.0, 0.0], [l, 0.0]);
    model.add_node_load(2, NodeLoad::new(0.0, -p, 0.0)).unwrap();

    let results = model.analyze().unwrap();

    assert_eq!(results.equation_map.rows(), &[[0, 0, 0], [1, 2, 3]]);
    assert_eq!(results.equation_map.num_eq(), 3);

    let tip = results.node_displacement(2).unwrap();
    assert_relative_eq!(tip.dx, 0.0, epsilon = 1e-12);
    assert_relative_eq!(tip.dy, -p * l.powi(3) / (3.0 * E * I), max_relative = 1e-9);
    assert_relative_eq!(tip.rz, -p * l.powi(2) / (2.0 * E * I), max_relative = 1e-9);

    // Fixed end carries the full shear and the moment P * L
    let reaction = results.reaction(1).unwrap();
    assert_relative_eq!(reaction.fx, 0.0, epsilon = 1e-9);
    assert_relative_eq!(reaction.fy, p, max_relative = 1e-9);
    assert_relative_eq!(reaction.mz, p * l, max_relative = 1e-9);
    assert!(results.reaction(2).is_none());

    let forces = results.element_forces(1).unwrap();
    assert_relative_eq!(forces.moment_i(), -p * l, max_relative = 1e-9);
    assert_relative_eq!(forces.moment_j(), 0.0, epsilon = 1e-6);
    assert_relative_eq!(forces.shear(), p, max_relative = 1e-9);
}

#[test]
fn test_cantilever_tip_moment() {
    let (m, l) = (500.0, 3.0);
    let mut model = cantilever([0.0, 0.0], [l, 0.0]);
    model.add_node_load(2, NodeLoad::moment(m)).unwrap();

    let results = model.analyze().unwrap();
    let tip = results.node_displacement(2).unwrap();

    assert_relative_eq!(tip.rz, m * l / (E * I), max_relative = 1e-9);
    assert_relative_eq!(tip.dy, m * l * l / (2.0 * E * I), max_relative = 1e-9);
    assert_relative_eq!(results.reaction(1).unwrap().mz, -m, max_relative = 1e-9);
}

#[test]
fn test_cantilever_axial_load() {
    let (p, l) = (5000.0, 4.0);
    let mut model = cantilever([0.0, 0.0], [l, 0.0]);
    model.add_node_load(2, NodeLoad::fx(p)).unwrap();

    let results = model.analyze().unwrap();
    let tip = results.node_displacement(2).unwrap();

    assert_relative_eq!(tip.dx, p * l / (E * A), max_relative = 1e-9);
    assert_relative_eq!(tip.dy, 0.0, epsilon = 1e-12);
    assert_relative_eq!(results.element_forces(1).unwrap().axial(), p, max_relative = 1e-9);
    assert_relative_eq!(results.reaction(1).unwrap().fx, -p, max_relative = 1e-9);
}

#[test]
fn test_inclined_cantilever_matches_horizontal() {
    // 3-4-5 triangle: load along the member axis stretches it only
    let p = 2000.0;
    let mut model = cantilever([1.0, 1.0], [4.0, 5.0]);
    model.add_node_load(2, NodeLoad::force(0.6 * p, 0.8 * p)).unwrap();

    let results = model.analyze().unwrap();
    let tip = results.node_displacement(2).unwrap();
    let stretch = p * 5.0 / (E * A);

    assert_relative_eq!(tip.dx, 0.6 * stretch, max_relative = 1e-8);
    assert_relative_eq!(tip.dy, 0.8 * stretch, max_relative = 1e-8);
    assert_relative_eq!(tip.rz, 0.0, epsilon = 1e-12);

    let forces = results.element_forces(1).unwrap();
    assert_relative_eq!(forces.axial(), p, max_relative = 1e-8);
    assert_relative_eq!(forces.shear(), 0.0, epsilon = 1e-6);

    // Transverse load on the same member bends it like a horizontal cantilever
    let mut model = cantilever([1.0, 1.0], [4.0, 5.0]);
    model.add_node_load(2, NodeLoad::force(-0.8 * p, 0.6 * p)).unwrap();
    let tip = model.analyze().unwrap().node_displacement(2).unwrap();
    let deflection = p * 125.0 / (3.0 * E * I);

    assert_relative_eq!(tip.translation_magnitude(), deflection, max_relative = 1e-6);
    assert_relative_eq!(tip.rz, p * 25.0 / (2.0 * E * I), max_relative = 1e-8);
}

#[test]
fn test_simply_supported_midspan_load() {
    let (p, l) = (12000.0, 6.0);
    let mut model = FrameModel::new();
    let n1 = model.add_node(Node::new(0.0, 0.0)).unwrap();
    let n2 = model.add_node(Node::new(l / 2.0, 0.0)).unwrap();
    let n3 = model.add_node(Node::new(l, 0.0)).unwrap();
    model.add_element(Element::new(n1, n2, A, I, E)).unwrap();
    model.add_element(Element::new(n2, n3, A, I, E)).unwrap();
    model.add_support(n1, Support::pinned()).unwrap();
    model.add_support(n3, Support::roller_y()).unwrap();
    model.add_node_load(n2, NodeLoad::fy(-p)).unwrap();

    let results = model.analyze().unwrap();

    let mid = results.node_displacement(n2).unwrap();
    assert_relative_eq!(mid.dy, -p * l.powi(3) / (48.0 * E * I), max_relative = 1e-9);
    assert_relative_eq!(mid.rz, 0.0, epsilon = 1e-12);

    let end_rotation = p * l * l / (16.0 * E * I);
    assert_relative_eq!(results.node_displacement(n1).unwrap().rz, -end_rotation, max_relative = 1e-9);
    assert_relative_eq!(results.node_displacement(n3).unwrap().rz, end_rotation, max_relative = 1e-9);

    assert_relative_eq!(results.reaction(n1).unwrap().fy, p / 2.0, max_relative = 1e-9);
    assert_relative_eq!(results.reaction(n3).unwrap().fy, p / 2.0, max_relative = 1e-9);
    assert_relative_eq!(results.reaction(n1).unwrap().fx, 0.0, epsilon = 1e-9);

    // Released DOFs are not reported as reactions
    assert_eq!(results.reaction(n1).unwrap().mz, 0.0);
    assert_eq!(results.reaction(n3).unwrap().fx, 0.0);

    let left = results.element_forces(1).unwrap();
    assert_relative_eq!(left.moment_i(), 0.0, epsilon = 1e-6);
    assert_relative_eq!(left.moment_j(), p * l / 4.0, max_relative = 1e-9);
    assert_relative_eq!(left.moment_at(l / 4.0), p * l / 8.0, max_relative = 1e-9);
}

#[test]
fn test_simply_supported_end_moment() {
    let (m, l) = (800.0, 5.0);
    let mut model = FrameModel::new();
    model.add_node(Node::new(0.0, 0.0)).unwrap();
    model.add_node(Node::new(l, 0.0)).unwrap();
    model.add_element(Element::new(1, 2, A, I, E)).unwrap();
    model.add_support(1, Support::from([true, true, false])).unwrap();
    model.add_support(2, Support::from([false, true, false])).unwrap();
    model.add_node_load(2, NodeLoad::moment(m)).unwrap();

    let results = model.analyze().unwrap();
    assert_eq!(results.equation_map.rows(), &[[0, 0, 1], [2, 0, 3]]);

    assert_relative_eq!(results.node_displacement(2).unwrap().rz, m * l / (3.0 * E * I), max_relative = 1e-9);
    assert_relative_eq!(results.node_displacement(1).unwrap().rz, -m * l / (6.0 * E * I), max_relative = 1e-9);
    assert_relative_eq!(results.reaction(1).unwrap().fy, m / l, max_relative = 1e-9);
    assert_relative_eq!(results.reaction(2).unwrap().fy, -m / l, max_relative = 1e-9);
}

#[test]
fn test_cholesky_agrees_with_lu() {
    let mut model = cantilever([0.0, 0.0], [4.0, 0.0]);
    model.add_node_load(2, NodeLoad::new(300.0, -1000.0, 250.0)).unwrap();

    let lu = model.analyze().unwrap();
    let cholesky = model
        .analyze_with(AnalysisOptions::linear().with_solver(LinearSolver::Cholesky))
        .unwrap();

    for (a, b) in lu.displacements.iter().zip(&cholesky.displacements) {
        assert_relative_eq!(*a, *b, max_relative = 1e-9);
    }
}
