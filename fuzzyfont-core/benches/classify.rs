//! Criterion benchmark for name-based classification and catalog queries

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fuzzyfont_core::catalog::FontRecord;
use fuzzyfont_core::category::Category;
use fuzzyfont_core::classify::classify_name;
use fuzzyfont_core::query::Query;

const SAMPLE_NAMES: &[&str] = &[
    "Fira Code",
    "Times New Roman",
    "RandoFont123",
    "Pixel Mono Display",
    "Noto Sans CJK JP",
    "Segoe UI Emoji",
    "Bebas Neue Poster",
    "DejaVu Serif Condensed",
];

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_name sample", |b| {
        b.iter(|| {
            for name in SAMPLE_NAMES {
                black_box(classify_name(black_box(name)));
            }
        })
    });
}

fn bench_query(c: &mut Criterion) {
    let fonts: Vec<FontRecord> = (0..2_000)
        .map(|i| {
            let name = format!("{} {i}", SAMPLE_NAMES[i % SAMPLE_NAMES.len()]);
            let cats = classify_name(&name);
            FontRecord::new(name, format!("/fonts/{i}.ttf")).with_categories(cats)
        })
        .collect();
    let query = Query::new()
        .with_categories([Category::Mono, Category::Serif])
        .with_search("new");

    c.bench_function("query apply 2k fonts", |b| b.iter(|| query.apply(black_box(&fonts))));
}

criterion_group!(benches, bench_classify, bench_query);
criterion_main!(benches);
