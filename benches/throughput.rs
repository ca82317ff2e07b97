//! Criterion benchmark measuring end-to-end throughput of the pipeline on generated batches.

use chrono::Utc;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use event_pipeline_rs::config::{GeneratorConfig, PipelineConfig};
use event_pipeline_rs::generator::{Generate, generate_batch};
use event_pipeline_rs::{Article, Decode, Encode, Order, Pipeline, Record};
use rand::{SeedableRng, rngs::StdRng};

fn bodies<R: Generate>(count: usize) -> Vec<String> {
    let config = GeneratorConfig {
        min_records: count,
        max_records: count,
        ..GeneratorConfig::for_kind::<R>()
    };
    let mut rng = StdRng::seed_from_u64(42);
    generate_batch::<R, _>(&mut rng, &config, Utc::now())
        .iter()
        .map(|record| record.encode().expect("generated records encode").body)
        .collect()
}

fn bench_kind<R: Generate + Decode>(c: &mut Criterion, runtime: &tokio::runtime::Runtime) {
    let mut group = c.benchmark_group(format!("process_batch/{}", R::KIND));

    for size in [16, 256, 1024] {
        let batch = bodies::<R>(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            let pipeline = Pipeline::<R>::new(PipelineConfig::default());
            b.iter(|| {
                let report = runtime.block_on(pipeline.process_batch(batch));
                criterion::black_box(report);
            });
        });
    }

    group.finish();
}

fn bench_process(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build the tokio runtime");

    bench_kind::<Order>(c, &runtime);
    bench_kind::<Article>(c, &runtime);
}

criterion_group!(benches, bench_process);
criterion_main!(benches);
