//! Import pipeline performance benchmarks.
//!
//! Measures the two hot paths: column resolution over messy header sets and
//! the validation rule chain over candidate rows.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use leadpipe::{
    normalize_header, ColumnMapper, ImportSession, Parser, RawCandidate, ValidationEngine,
};

/// Header sets seen in the wild: exact aliases, fuzzy spellings, noise.
const HEADER_SETS: &[&[&str]] = &[
    &["Company", "Name", "Email"],
    &["ORGANIZATION!!", "Decision-Maker", "E-MAIL", "Tel", "Region"],
    &[
        "The Company",
        "Person In Charge",
        "Work E-mail Addr",
        "Cell Phone",
        "LinkedIn Profile",
        "Location",
    ],
];

fn bench_normalizer(c: &mut Criterion) {
    c.bench_function("normalize_header", |b| {
        b.iter(|| {
            for set in HEADER_SETS {
                for header in *set {
                    black_box(normalize_header(black_box(header)));
                }
            }
        })
    });
}

fn bench_column_mapper(c: &mut Criterion) {
    let mapper = ColumnMapper::new();
    let sets: Vec<Vec<String>> = HEADER_SETS
        .iter()
        .map(|set| set.iter().map(|s| s.to_string()).collect())
        .collect();

    c.bench_function("column_mapper_resolve", |b| {
        b.iter(|| {
            for headers in &sets {
                black_box(mapper.resolve(black_box(headers), None).unwrap());
            }
        })
    });
}

fn bench_validation_chain(c: &mut Criterion) {
    let engine = ValidationEngine::new();
    let session = ImportSession::new();

    let candidates: Vec<RawCandidate> = (0..200)
        .map(|i| RawCandidate {
            company_name: Some(format!("Company {i}")),
            person_name: Some(format!("Person {i}")),
            email: Some(format!("person{i}@company{i}.com")),
            phone: (i % 3 == 0).then(|| "+1 555 1234567".to_string()),
            linkedin_profile_url: None,
            country: None,
            row: i + 2,
        })
        .collect();

    c.bench_function("validation_chain_200_rows", |b| {
        b.iter(|| {
            for candidate in &candidates {
                black_box(engine.validate(black_box(candidate), &session));
            }
        })
    });
}

fn bench_parse_blob(c: &mut Criterion) {
    let mut text = String::from("Company,Name,Email\n");
    for i in 0..500 {
        text.push_str(&format!("Company {i},Person {i},person{i}@company{i}.com\n"));
    }
    let parser = Parser::new();

    c.bench_function("parse_500_row_blob", |b| {
        b.iter(|| black_box(parser.parse_str(black_box(&text)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_normalizer,
    bench_column_mapper,
    bench_validation_chain,
    bench_parse_blob
);
criterion_main!(benches);
