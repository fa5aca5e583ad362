// Criterion benchmarks for the travel time pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use bus_travel_time::core::{extract_total_time, UpstreamQuery};
use bus_travel_time::models::{Coordinate, Language};
use serde_json::{json, Value};

fn create_payload(path_count: usize) -> Value {
    let paths: Vec<Value> = (0..path_count)
        .map(|i| {
            json!({
                "pathType": if i % 3 == 0 { 11 } else { 12 },
                "info": {
                    "totalTime": 60 + (i * 7) % 90,
                    "totalPayment": 5300,
                    "totalDistance": 23150 + i * 100
                },
                "subPath": [
                    { "trafficType": 5, "sectionTime": 60 },
                    { "trafficType": 3, "sectionTime": 5 }
                ]
            })
        })
        .collect();

    json!({ "result": { "searchType": 1, "path": paths } })
}

fn bench_query_params(c: &mut Criterion) {
    let query = UpstreamQuery::new(
        Coordinate::new(37.6134436427887, 126.926493082645),
        Coordinate::new(37.5004198786564, 127.126936754911),
        Language::Korean,
    );

    c.bench_function("upstream_query_params", |b| {
        b.iter(|| black_box(&query).params());
    });
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for path_count in [1, 5, 20, 100].iter() {
        let payload = create_payload(*path_count);

        group.bench_with_input(
            BenchmarkId::new("extract_total_time", path_count),
            path_count,
            |b, _| {
                b.iter(|| extract_total_time(black_box(&payload)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_query_params, bench_extraction);

criterion_main!(benches);
