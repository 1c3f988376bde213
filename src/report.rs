//! Plain-text result tables and support classification for front ends

use serde::{Deserialize, Serialize};

use crate::elements::Support;
use crate::results::AnalysisResults;

/// Unit scaling applied when displaying results.
///
/// Length and rotation scales are independent: results in metres and radians
/// display as millimetres and milliradians by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayUnits {
    pub length_scale: f64,
    pub length_label: String,
    pub rotation_scale: f64,
    pub rotation_label: String,
    pub force_scale: f64,
    pub force_label: String,
    pub moment_scale: f64,
    pub moment_label: String,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            length_scale: 1000.0,
            length_label: "mm".to_string(),
            rotation_scale: 1000.0,
            rotation_label: "mrad".to_string(),
            force_scale: 1e-3,
            force_label: "kN".to_string(),
            moment_scale: 1e-3,
            moment_label: "kNm".to_string(),
        }
    }
}

impl DisplayUnits {
    /// Show results in the units they were computed in
    pub fn unscaled() -> Self {
        Self {
            length_scale: 1.0,
            length_label: "m".to_string(),
            rotation_scale: 1.0,
            rotation_label: "rad".to_string(),
            force_scale: 1.0,
            force_label: "N".to_string(),
            moment_scale: 1.0,
            moment_label: "Nm".to_string(),
        }
    }
}

/// Kind of support, as drawn by a front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportKind {
    /// No restraint
    Free,
    /// One translation restrained
    Roller,
    /// Both translations restrained, rotation free
    Pinned,
    /// All three DOFs restrained
    Fixed,
    /// Any other combination
    Other,
}

impl SupportKind {
    /// Classify a restraint combination
    pub fn classify(support: &Support) -> Self {
        match (support.num_restrained(), support.rz) {
            (0, _) => Self::Free,
            (1, false) => Self::Roller,
            (2, false) => Self::Pinned,
            (3, _) => Self::Fixed,
            _ => Self::Other,
        }
    }
}

/// Node displacement table: `Node | Ux | Uy | Rz`
pub fn displacement_table(results: &AnalysisResults, units: &DisplayUnits) -> String {
    let mut out = format!(
        "{:>6} {:>14} {:>14} {:>14}\n",
        "Node",
        format!("Ux ({})", units.length_label),
        format!("Uy ({})", units.length_label),
        format!("Rz ({})", units.rotation_label),
    );

    for (index, disp) in results.node_displacements.iter().enumerate() {
        out.push_str(&format!(
            "{:>6} {:>14.3} {:>14.3} {:>14.3}\n",
            index + 1,
            disp.dx * units.length_scale,
            disp.dy * units.length_scale,
            disp.rz * units.rotation_scale,
        ));
    }
    out
}

/// Element end force table: start and end axial force, shear, moment
pub fn end_force_table(results: &AnalysisResults, units: &DisplayUnits) -> String {
    let force = |label: &str| format!("{} ({})", label, units.force_label);
    let moment = |label: &str| format!("{} ({})", label, units.moment_label);
    let mut out = format!(
        "{:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
        "Element",
        force("Fx i"),
        force("Fy i"),
        moment("M i"),
        force("Fx j"),
        force("Fy j"),
        moment("M j"),
    );

    for (id, forces) in &results.element_forces {
        let f = forces.local;
        out.push_str(&format!(
            "{:>8} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2}\n",
            id,
            f[0] * units.force_scale,
            f[1] * units.force_scale,
            f[2] * units.moment_scale,
            f[3] * units.force_scale,
            f[4] * units.force_scale,
            f[5] * units.moment_scale,
        ));
    }
    out
}

/// Support reaction table: `Node | Rx | Ry | Mz | R`, where R is the
/// resultant force
pub fn reaction_table(results: &AnalysisResults, units: &DisplayUnits) -> String {
    let mut out = format!(
        "{:>6} {:>14} {:>14} {:>14} {:>14}\n",
        "Node",
        format!("Rx ({})", units.force_label),
        format!("Ry ({})", units.force_label),
        format!("Mz ({})", units.moment_label),
        format!("R ({})", units.force_label),
    );

    for (node, reaction) in &results.reactions {
        out.push_str(&format!(
            "{:>6} {:>14.3} {:>14.3} {:>14.3} {:>14.3}\n",
            node,
            reaction.fx * units.force_scale,
            reaction.fy * units.force_scale,
            reaction.mz * units.moment_scale,
            reaction.force_magnitude() * units.force_scale,
        ));
    }
    out
}
