use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradesheet_core::format::format_magnitude;
use gradesheet_core::model::{Category, Coordinate, Deduction, Document};
use gradesheet_core::report::render_report;

fn make_document(categories: usize) -> Document {
    let mut doc = Document::new();
    for n in 0..categories {
        let cat = doc.add_category(Category::new(format!("Category {n}"), 10.0));
        let mut multi = Deduction::new("Style problems");
        multi.set_mapping(1, -1.0).unwrap();
        multi.set_mapping(3, -4.0).unwrap();
        for k in 0..5 {
            multi.add_criterion(format!("Criterion {k}"));
        }
        doc.add_deduction_to_category(cat, multi).unwrap();

        let mut single = Deduction::new("Missing comment");
        single.set_mapping(1, -0.5).unwrap();
        doc.add_deduction_to_category(cat, single).unwrap();
    }
    let sentinel = doc.add_category(Category::new("No submission", 0.0));
    let mut none = Deduction::new("No submission");
    none.set_mapping(1, -(categories as f64) * 10.0).unwrap();
    doc.add_deduction_to_category(sentinel, none).unwrap();

    doc.recompute_maximum();
    doc.reset_totals().unwrap();
    doc
}

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle_criterion");

    group.bench_function("on_off", |b| {
        let mut doc = make_document(50);
        let at = Coordinate::new(25, 0, 3);
        b.iter(|| {
            doc.toggle_criterion(black_box(at), true).unwrap();
            doc.toggle_criterion(black_box(at), false).unwrap()
        })
    });

    group.bench_function("reset_totals", |b| {
        let mut doc = make_document(50);
        for cat in 0..50 {
            doc.toggle_criterion(Coordinate::new(cat, 0, cat % 5), true)
                .unwrap();
        }
        b.iter(|| doc.reset_totals().unwrap())
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut doc = make_document(50);
    for cat in 0..50 {
        doc.toggle_criterion(Coordinate::new(cat, 0, 0), true).unwrap();
        doc.toggle_criterion(Coordinate::new(cat, 1, 0), true).unwrap();
    }

    c.bench_function("render_report", |b| b.iter(|| render_report(black_box(&doc))));
    c.bench_function("format_magnitude", |b| {
        b.iter(|| format_magnitude(black_box(-4.05)))
    });
}

criterion_group!(benches, bench_toggle, bench_render);
criterion_main!(benches);
