use coord_geocoder::processors::ValidityChecker;
use coord_geocoder::readers::{already_cleaned, TableReader};
use coord_geocoder::utils::coordinates::coerce_coordinate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::path::PathBuf;

// Create a semicolon file with padded values and a sprinkling of bad rows
fn create_test_input(rows: usize) -> String {
    let mut text = String::from("Site ; Latitude ; Longitude\n");
    for i in 0..rows {
        let latitude = if i % 50 == 0 {
            "north".to_string()
        } else {
            format!(" {:.6} ", -80.0 + (i % 160) as f64 + 0.123456)
        };
        let longitude = format!("{:.6} ", -170.0 + (i % 340) as f64 + 0.654321);
        text.push_str(&format!("S{};{};{}\n", i, latitude, longitude));
    }
    text
}

fn benchmark_coerce_coordinate(c: &mut Criterion) {
    let cells = [" 27.340833 ", "-0.1278", "north", "\t35.708333\n", ""];

    c.bench_function("coerce_coordinate", |b| {
        b.iter(|| {
            for cell in &cells {
                black_box(coerce_coordinate(black_box(cell)));
            }
        })
    });
}

fn benchmark_parse_and_normalize(c: &mut Criterion) {
    let source = PathBuf::from("bench.csv");
    let mut group = c.benchmark_group("parse_and_normalize");

    for rows in [100, 1_000, 10_000] {
        let input = create_test_input(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, input| {
            b.iter(|| {
                let mut loaded = TableReader::new().parse(input, &source).unwrap();
                loaded.table.normalize_coordinates();
                let report = ValidityChecker::new().check(&loaded.table);
                black_box(report.invalid_count())
            })
        });
    }

    group.finish();
}

fn benchmark_already_cleaned(c: &mut Criterion) {
    let lines = ["Latitude,Longitude,Site", "27.340833,35.708333, Tabuk", "26.255833,36.444444,Duba"];

    c.bench_function("already_cleaned", |b| {
        b.iter(|| black_box(already_cleaned(black_box(&lines))))
    });
}

criterion_group!(
    benches,
    benchmark_coerce_coordinate,
    benchmark_parse_and_normalize,
    benchmark_already_cleaned
);
criterion_main!(benches);
