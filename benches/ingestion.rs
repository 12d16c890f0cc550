use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chem_equip::ingestion::{ingest_from_bytes, IngestionOptions};

const CATEGORIES: [&str; 4] = ["Pump", "Valve", "Compressor", "HeatExchanger"];

fn equipment_csv(rows: usize) -> Vec<u8> {
    let mut out = String::from("Equipment Name,Type,Flowrate,Pressure,Temperature\n");
    for i in 0..rows {
        let category = CATEGORIES[i % CATEGORIES.len()];
        out.push_str(&format!(
            "{category}-{i},{category},{:.1},{:.2},{:.1}\n",
            50.0 + (i % 100) as f64,
            2.0 + (i % 7) as f64 * 0.5,
            90.0 + (i % 40) as f64,
        ));
    }
    out.into_bytes()
}

fn bench_csv_ingestion(c: &mut Criterion) {
    let opts = IngestionOptions::default();
    let mut group = c.benchmark_group("csv_ingestion");

    for rows in [100usize, 10_000] {
        let bytes = equipment_csv(rows);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &bytes, |b, bytes| {
            b.iter(|| ingest_from_bytes("bench.csv", black_box(bytes), &opts))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_csv_ingestion);
criterion_main!(benches);
