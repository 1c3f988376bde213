//! Frame Solver Example - Simple Portal Frame

use anyhow::Context;
use frame_solver::prelude::*;
use frame_solver::report;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Frame Solver Example: Portal Frame ===\n");

    let mut model = FrameModel::new();

    // Create a simple portal frame
    //
    //     3 -------- 4
    //     |          |
    //     |          |
    //     |          |
    //     1          2
    //     ^          ^
    //   Fixed      Fixed
    //

    let height = 4.0; // 4m column height
    let span = 6.0; // 6m beam span

    let n1 = model.add_node(Node::new(0.0, 0.0))?;
    let n2 = model.add_node(Node::new(span, 0.0))?;
    let n3 = model.add_node(Node::new(0.0, height))?;
    let n4 = model.add_node(Node::new(span, height))?;

    let steel = Material::steel();
    let column = Section::wide_flange(0.31, 0.165, 0.0097, 0.0058);
    let beam = Section::wide_flange(0.41, 0.18, 0.016, 0.0097);

    model.add_element(Element::from_section(n1, n3, &column, &steel))?;
    model.add_element(Element::from_section(n2, n4, &column, &steel))?;
    model.add_element(Element::from_section(n3, n4, &beam, &steel))?;

    model.add_support(n1, Support::fixed())?;
    model.add_support(n2, Support::fixed())?;

    // 20 kN/m on the beam lumped to its ends, plus 10 kN lateral at roof level
    model.add_node_load(n3, NodeLoad::fy(-span * 20000.0 / 2.0))?;
    model.add_node_load(n4, NodeLoad::fy(-span * 20000.0 / 2.0))?;
    model.add_node_load(n3, NodeLoad::fx(10000.0))?;

    println!("Running linear analysis...\n");
    let results = model.analyze().context("analysis failed")?;

    if std::env::args().any(|arg| arg == "--json") {
        println!("{}", results.to_json()?);
        return Ok(());
    }

    let units = DisplayUnits::default();

    println!("Node Displacements:");
    println!("{}", report::displacement_table(&results, &units));

    println!("Support Reactions:");
    println!("{}", report::reaction_table(&results, &units));

    println!("Element End Forces (local):");
    println!("{}", report::end_force_table(&results, &units));

    let summary = &results.summary;
    println!("Summary:");
    println!(
        "  Max displacement: {:.4}mm at node {}",
        summary.max_displacement * 1000.0,
        summary.max_disp_node
    );
    println!(
        "  Max axial: {:.2}kN in element {}",
        summary.max_axial / 1000.0,
        summary.max_axial_element
    );
    println!(
        "  Max moment: {:.2}kN·m in element {}",
        summary.max_moment / 1000.0,
        summary.max_moment_element
    );
    println!(
        "  Equations: {} of {} DOFs",
        summary.free_dofs, summary.total_dofs
    );

    println!("\n=== Analysis Complete ===");
    Ok(())
}
