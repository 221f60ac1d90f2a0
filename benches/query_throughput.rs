use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hmf_core::SimBox;
use hmf_query::{query, MemorySource, QueryParams, TableKind};

fn synthetic_source() -> MemorySource {
    let mut histogram = String::from("bucket,snapnum,i,M,N\n");
    let mut redshifts = String::new();
    for snapshot in 0..120i64 {
        redshifts.push_str(&format!("{snapshot} {}\n", 15.0 - snapshot as f64 / 8.0));
        for bin in 95..160i64 {
            let count = (1u64 << 20) >> ((bin - 95) / 4);
            histogram.push_str(&format!(
                "{},{snapshot},{snapshot},{bin},{count}\n",
                snapshot * 10_000 + bin
            ));
        }
    }
    MemorySource::new()
        .with_table(SimBox::Mid, TableKind::Histogram, histogram)
        .with_table(SimBox::Mid, TableKind::Redshift, redshifts)
}

fn query_bench(c: &mut Criterion) {
    let source = synthetic_source();
    let differential = QueryParams::new(10.0, 16.0, 1.0, SimBox::Mid);
    let cumulative = differential.cumulative(true);

    c.bench_function("differential_query", |b| {
        b.iter(|| black_box(query(&source, &differential).unwrap()));
    });

    c.bench_function("cumulative_query", |b| {
        b.iter(|| black_box(query(&source, &cumulative).unwrap()));
    });
}

criterion_group!(benches, query_bench);
criterion_main!(benches);
