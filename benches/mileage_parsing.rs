// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use odo_lens::application::ocr::normalize_annotation;
use odo_lens::domain::mileage;
use std::hint::black_box;

fn mileage_parsing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("mileage_parsing");

    for (name, text) in [
        ("compact_km", "5421km"),
        ("raw_annotation", "  54 21 km\n"),
        ("separators_miles", "1.234.567 miles"),
        ("garbage", "ODO TRIP A"),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let compact = normalize_annotation(black_box(text));
                let _ = black_box(mileage::normalize(&compact));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, mileage_parsing_benchmark);
criterion_main!(benches);
