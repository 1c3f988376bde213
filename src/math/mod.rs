//! Mathematical utilities for planar frame calculations

use nalgebra::{DMatrix, DVector, Matrix6, Vector6};

use crate::elements::Node;
use crate::error::{FrameError, FrameResult};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 6x6 matrix for element stiffness and rotation
pub type Mat6 = Matrix6<f64>;
/// 6-element vector for element end forces/displacements
pub type Vec6 = Vector6<f64>;

/// Length and direction cosines of an element axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementFrame {
    /// Element length
    pub length: f64,
    /// cos of the angle between the element axis and global X
    pub c: f64,
    /// sin of the angle between the element axis and global X
    pub s: f64,
}

impl ElementFrame {
    /// Compute the local frame of the element running from `start` to `end`.
    ///
    /// Fails with [`FrameError::DegenerateElement`] when the length is not
    /// greater than `min_length`, before anything is divided by it.
    pub fn between(element: usize, start: &Node, end: &Node, min_length: f64) -> FrameResult<Self> {
        let length = start.distance_to(end);

        if !(length > min_length) {
            return Err(FrameError::DegenerateElement { element, length });
        }

        Ok(Self {
            length,
            c: (end.x - start.x) / length,
            s: (end.y - start.y) / length,
        })
    }

    /// Rotation from global to local coordinates for this element
    pub fn rotation(&self) -> Mat6 {
        element_rotation_matrix(self.c, self.s)
    }
}

/// Compute the local stiffness matrix for a planar beam element
///
/// DOF order is [axial-i, shear-i, moment-i, axial-j, shear-j, moment-j].
/// Force recovery calls this same function so assembly and recovery always
/// use identical stiffness values.
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `a` - Cross-sectional area
/// * `i` - Second moment of area
/// * `length` - Element length (must be > 0)
pub fn element_local_stiffness(e: f64, a: f64, i: f64, length: f64) -> Mat6 {
    let l = length;

    let ea_l = e * a / l;
    let ei_l = e * i / l;
    let ei_l2 = e * i / (l * l);
    let ei_l3 = e * i / (l * l * l);

    #[rustfmt::skip]
    let data = [
        ea_l,   0.0,          0.0,         -ea_l,  0.0,          0.0,
        0.0,    12.0*ei_l3,   6.0*ei_l2,   0.0,    -12.0*ei_l3,  6.0*ei_l2,
        0.0,    6.0*ei_l2,    4.0*ei_l,    0.0,    -6.0*ei_l2,   2.0*ei_l,
        -ea_l,  0.0,          0.0,         ea_l,   0.0,          0.0,
        0.0,    -12.0*ei_l3,  -6.0*ei_l2,  0.0,    12.0*ei_l3,   -6.0*ei_l2,
        0.0,    6.0*ei_l2,    2.0*ei_l,    0.0,    -6.0*ei_l2,   4.0*ei_l,
    ];

    Mat6::from_row_slice(&data)
}

/// Compute the 6x6 rotation matrix R (local = R * global) from the
/// direction cosines of an element.
pub fn element_rotation_matrix(c: f64, s: f64) -> Mat6 {
    let mut r = Mat6::zeros();

    // One 3x3 block per node: 2D rotation on translations, identity on rotation
    for offset in [0, 3] {
        r[(offset, offset)] = c;
        r[(offset, offset + 1)] = s;
        r[(offset + 1, offset)] = -s;
        r[(offset + 1, offset + 1)] = c;
        r[(offset + 2, offset + 2)] = 1.0;
    }

    r
}

/// Transform a local element stiffness to global: Rᵗ * k * R
pub fn element_global_stiffness(k_local: &Mat6, r: &Mat6) -> Mat6 {
    r.transpose() * k_local * r
}

/// Ratio of the smallest to the largest absolute diagonal entry
fn pivot_ratio(diagonal: &Vec) -> f64 {
    let max = diagonal.amax();
    if !(max > 0.0) {
        return 0.0;
    }
    let min = diagonal.iter().fold(f64::INFINITY, |m, v| m.min(v.abs()));
    min / max
}

/// Solve a linear system using LU decomposition with partial pivoting.
///
/// Returns `None` if the matrix is singular, if the smallest pivot is below
/// `pivot_tolerance` relative to the largest, or if the solution is not finite.
pub fn solve_linear_system(a: &Mat, b: &Vec, pivot_tolerance: f64) -> Option<Vec> {
    let lu = a.clone().lu();
    let ratio = pivot_ratio(&lu.u().diagonal());
    log::trace!("LU pivot ratio: {:e}", ratio);
    if ratio <= pivot_tolerance {
        return None;
    }
    lu.solve(b).filter(|x| x.iter().all(|v| v.is_finite()))
}

/// Solve a linear system using Cholesky decomposition (for symmetric positive definite)
///
/// The pivot check is applied to the squared diagonal of the factor, which
/// equals the pivots of the equivalent LU factorization.
pub fn solve_cholesky(a: &Mat, b: &Vec, pivot_tolerance: f64) -> Option<Vec> {
    let chol = a.clone().cholesky()?;
    let pivots = chol.l().diagonal().map(|v| v * v);
    let ratio = pivot_ratio(&pivots);
    log::trace!("Cholesky pivot ratio: {:e}", ratio);
    if ratio <= pivot_tolerance {
        return None;
    }
    Some(chol.solve(b)).filter(|x| x.iter().all(|v| v.is_finite()))
}
