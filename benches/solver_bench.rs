//! Benchmarks for the frame solver

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use frame_solver::prelude::*;

fn create_cantilever_model() -> FrameModel {
    let mut model = FrameModel::new();
    let section = Section::rectangular(0.3, 0.5);

    let n1 = model.add_node(Node::new(0.0, 0.0)).unwrap();
    let n2 = model.add_node(Node::new(10.0, 0.0)).unwrap();

    model
        .add_element(Element::from_section(n1, n2, &section, &Material::steel()))
        .unwrap();
    model.add_support(n1, Support::fixed()).unwrap();
    model.add_node_load(n2, NodeLoad::fy(-10000.0)).unwrap();

    model
}

fn create_multi_story_frame(stories: usize, bays: usize) -> FrameModel {
    let mut model = FrameModel::new();

    let steel = Material::steel();
    let column = Section::rectangular(0.4, 0.4);
    let beam = Section::rectangular(0.3, 0.6);

    let story_height = 3.5;
    let bay_width = 6.0;

    // Node id for (story, bay), nodes added row by row
    let id = |story: usize, bay: usize| story * (bays + 1) + bay + 1;

    for story in 0..=stories {
        for bay in 0..=bays {
            let x = bay as f64 * bay_width;
            let y = story as f64 * story_height;
            model.add_node(Node::new(x, y)).unwrap();
        }
    }

    for story in 0..stories {
        for bay in 0..=bays {
            model
                .add_element(Element::from_section(id(story, bay), id(story + 1, bay), &column, &steel))
                .unwrap();
        }
    }

    for story in 1..=stories {
        for bay in 0..bays {
            model
                .add_element(Element::from_section(id(story, bay), id(story, bay + 1), &beam, &steel))
                .unwrap();
        }
    }

    for bay in 0..=bays {
        model.add_support(id(0, bay), Support::fixed()).unwrap();
    }

    for story in 1..=stories {
        for bay in 0..=bays {
            model.add_node_load(id(story, bay), NodeLoad::fy(-50000.0)).unwrap();
        }
    }

    model
}

fn benchmark_cantilever(c: &mut Criterion) {
    let model = create_cantilever_model();
    c.bench_function("cantilever_linear", |b| {
        b.iter(|| black_box(model.analyze().unwrap()))
    });
}

fn benchmark_small_frame(c: &mut Criterion) {
    let model = create_multi_story_frame(3, 2);
    c.bench_function("frame_3story_2bay_linear", |b| {
        b.iter(|| black_box(model.analyze().unwrap()))
    });
}

fn benchmark_medium_frame(c: &mut Criterion) {
    let model = create_multi_story_frame(10, 5);
    c.bench_function("frame_10story_5bay_linear", |b| {
        b.iter(|| black_box(model.analyze().unwrap()))
    });
}

fn benchmark_medium_frame_cholesky(c: &mut Criterion) {
    let model = create_multi_story_frame(10, 5);
    let options = AnalysisOptions::linear().with_solver(LinearSolver::Cholesky);
    c.bench_function("frame_10story_5bay_cholesky", |b| {
        b.iter(|| black_box(model.analyze_with(options.clone()).unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_cantilever,
    benchmark_small_frame,
    benchmark_medium_frame,
    benchmark_medium_frame_cholesky,
);

criterion_main!(benches);
