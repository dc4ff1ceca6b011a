//! Insert-strategy comparison: row-at-a-time vs one bulk statement.
//! The throughput question the batched write path exists to answer.

use chrono::Utc;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use gauge_core::traits::Record;
use gauge_core::Measurement;
use gauge_storage::batch::sql::build_insert;
use gauge_storage::{connection, SqliteWriter};
use rusqlite::{params_from_iter, Connection};
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE measurements (
    device_id   TEXT    NOT NULL,
    recorded_at INTEGER NOT NULL,
    value       REAL    NOT NULL
);
";

const ROWS: usize = 1024;

fn dataset() -> Vec<Measurement> {
    (0..ROWS)
        .map(|i| Measurement::new(Uuid::new_v4(), i as f64, Utc::now()))
        .collect()
}

fn fresh_conn() -> Connection {
    let conn = connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn
}

fn bench_build_insert(c: &mut Criterion) {
    c.bench_function("build_insert_1024x3", |b| {
        b.iter(|| build_insert("measurements", ROWS, 3));
    });
}

fn bench_insert_strategies(c: &mut Criterion) {
    let data = dataset();
    let mut group = c.benchmark_group("insert_1024_rows");

    group.bench_function("row_at_a_time", |b| {
        b.iter_batched_ref(
            fresh_conn,
            |conn| {
                let tx = conn.transaction().unwrap();
                {
                    let mut stmt = tx
                        .prepare(
                            "INSERT INTO measurements (device_id, recorded_at, value) \
                             VALUES (?1, ?2, ?3)",
                        )
                        .unwrap();
                    for m in &data {
                        stmt.execute(params_from_iter(m.flatten())).unwrap();
                    }
                }
                tx.commit().unwrap();
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("single_bulk_statement", |b| {
        b.iter_batched_ref(
            || SqliteWriter::new(fresh_conn(), "measurements").unwrap(),
            |writer| writer.write_batch(&data).unwrap(),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_build_insert, bench_insert_strategies);
criterion_main!(benches);
