//! Benchmarks for Cragpulse rendering
//!
//! Run with: cargo bench

use chrono::{TimeZone, Utc};
use cragpulse::model::Changeset;
use cragpulse::render::{present_history, Renderer};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::json;

const OPERATIONS: [&str; 4] = ["addArea", "updateClimb", "deleteArea", "addOrganization"];

fn create_test_changesets(count: usize) -> Vec<Changeset> {
    let changesets: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": format!("cs-{}", i),
                "createdAt": 1718442000000i64 - i as i64 * 60_000,
                "editedByUser": format!("user{}", i % 17),
                "operation": OPERATIONS[i % OPERATIONS.len()],
                "changes": [
                    {
                        "changeId": format!("c-{}-a", i),
                        "dbOp": "update",
                        "fullDocument": { "__typename": "Area", "uuid": format!("a-{}", i), "areaName": "Smith Rock" },
                        "updateDescription": { "updatedFields": ["description", "_change", "updatedAt"] }
                    },
                    {
                        "changeId": format!("c-{}-b", i),
                        "dbOp": "insert",
                        "fullDocument": { "__typename": "Climb", "id": format!("cl-{}", i), "name": "Monkey Face" }
                    }
                ]
            })
        })
        .collect();

    serde_json::from_value(serde_json::Value::Array(changesets)).unwrap()
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");
    let renderer = Renderer::new().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    for size in [10, 100, 1000] {
        let changesets = create_test_changesets(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("present_{}", size), |b| {
            b.iter(|| present_history(black_box(&changesets), now))
        });

        let view = present_history(&changesets, now);

        group.bench_function(format!("render_{}", size), |b| {
            b.iter(|| renderer.history(black_box(&view)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_history);
criterion_main!(benches);
