//! Benchmarks for geo crate distance calculations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use placefinder_geo::{
    count_within_radius, haversine_distance, nearest, rank_by_distance, Coordinate, Place,
};

fn create_test_places(count: usize) -> Vec<Place> {
    (0..count)
        .map(|i| {
            // Generate points in a grid over Ireland
            let lat = 51.5 + (i as f64 * 0.01) % 4.0;
            let lng = -10.0 + (i as f64 * 0.013) % 4.0;
            Place::new(i as i64, format!("place-{i}"), (i % 15) as i64 + 1, lat, lng)
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let dublin = Coordinate::new(53.3498, -6.2603);
    let galway = Coordinate::new(53.2707, -9.0568);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance(black_box(&dublin), black_box(&galway)))
    });
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("proximity");
    let query = Coordinate::new(53.1424, -7.6921);

    for size in [10, 100, 1000, 10000].iter() {
        let places = create_test_places(*size);

        group.bench_with_input(BenchmarkId::new("nearest", size), size, |b, _| {
            b.iter(|| nearest(black_box(&places), black_box(&query)))
        });

        group.bench_with_input(BenchmarkId::new("count_within_radius", size), size, |b, _| {
            b.iter(|| count_within_radius(black_box(&places), black_box(&query), 50.0))
        });
    }

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_by_distance");
    let query = Coordinate::new(53.1424, -7.6921);

    for size in [100, 1000, 10000].iter() {
        let places = create_test_places(*size);
        let refs: Vec<&Place> = places.iter().collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| rank_by_distance(black_box(&refs), black_box(&query), Some(10)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_queries, bench_ranking);
criterion_main!(benches);
