// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-UmlTutor-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of UML Tutor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use uml_tutor::layout::layout_classes;
use uml_tutor::model::{Diagram, MemberKind, RelationshipKind};
use uml_tutor::ops::{apply_op, initialize, DiagramOp};
use uml_tutor::readiness::evaluate;
use uml_tutor::render::{render_solution, render_svg};

// Benchmark identity (keep stable):
// - Groups: `ops.apply`, `layout.grid`, `render.solution`, `render.svg`, `readiness.evaluate`.
// - Case IDs are the class counts (`small`, `medium`, `large`).
const CASES: [(&str, usize); 3] = [("small", 4), ("medium", 30), ("large", 200)];

fn fixture(class_count: usize) -> Diagram {
    let names: Vec<String> = (0..class_count).map(|idx| format!("Class{idx:03}")).collect();
    let mut diagram = initialize(&names);
    let ids: Vec<_> = diagram.classes().iter().map(|c| c.id().clone()).collect();

    for (idx, class_id) in ids.iter().enumerate() {
        for member in 0..3 {
            diagram = apply_op(
                &diagram,
                &DiagramOp::AddMember {
                    class_id: class_id.clone(),
                    kind: if member % 2 == 0 {
                        MemberKind::Attribute
                    } else {
                        MemberKind::Method
                    },
                    text: format!("member_{idx}_{member}"),
                },
            );
        }
        if idx > 0 {
            diagram = apply_op(
                &diagram,
                &DiagramOp::AddRelationship {
                    from_id: ids[idx - 1].clone(),
                    to_id: class_id.clone(),
                    kind: RelationshipKind::ALL[idx % RelationshipKind::ALL.len()],
                    label: format!("rel_{idx}"),
                },
            );
        }
    }
    diagram
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops.apply");
    for (case, count) in CASES {
        let diagram = fixture(count);
        let target = diagram.classes()[count / 2].id().clone();
        group.throughput(Throughput::Elements(1));
        group.bench_function(case, |b| {
            b.iter_batched(
                || diagram.clone(),
                |diagram| {
                    black_box(apply_op(
                        &diagram,
                        &DiagramOp::AddMember {
                            class_id: target.clone(),
                            kind: MemberKind::Attribute,
                            text: "bench".to_owned(),
                        },
                    ))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout.grid");
    for (case, count) in CASES {
        let diagram = fixture(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(case, |b| b.iter(|| black_box(layout_classes(diagram.classes()))));
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut solution = c.benchmark_group("render.solution");
    for (case, count) in CASES {
        let diagram = fixture(count);
        solution.bench_function(case, |b| b.iter(|| black_box(render_solution(&diagram))));
    }
    solution.finish();

    let mut svg = c.benchmark_group("render.svg");
    for (case, count) in CASES {
        let diagram = fixture(count);
        let layout = layout_classes(diagram.classes());
        svg.bench_function(case, |b| {
            b.iter(|| black_box(render_svg(&diagram, &layout).expect("svg")))
        });
    }
    svg.finish();
}

fn bench_readiness(c: &mut Criterion) {
    let mut group = c.benchmark_group("readiness.evaluate");
    let scenario = "Model a Class001 class, a Class010 class and a Class100 class.";
    for (case, count) in CASES {
        let diagram = fixture(count);
        group.bench_function(case, |b| b.iter(|| black_box(evaluate(&diagram, scenario))));
    }
    group.finish();
}

criterion_group!(benches, bench_apply, bench_layout, bench_render, bench_readiness);
criterion_main!(benches);
