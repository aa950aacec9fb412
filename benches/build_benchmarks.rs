use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use parkd::{Dataset, TreeBuilder};

fn benchmark_sequential_vs_tasks(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for &n in &[1_000usize, 10_000, 100_000] {
        let data = Dataset::<f64>::uniform(n, 0.0..100.0, 12345);

        group.bench_with_input(BenchmarkId::new("sequential", n), &data, |b, data| {
            b.iter(|| {
                let mut copy = data.clone();
                TreeBuilder::new()
                    .sequential()
                    .build(black_box(&mut copy))
                    .unwrap()
            })
        });

        group.bench_with_input(BenchmarkId::new("tasks", n), &data, |b, data| {
            b.iter(|| {
                let mut copy = data.clone();
                TreeBuilder::new()
                    .cutoff(256)
                    .build(black_box(&mut copy))
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn benchmark_group_tier(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_build");

    let data = Dataset::<f64>::uniform(50_000, 0.0..100.0, 777);
    for &processes in &[1usize, 2, 4] {
        group.bench_with_input(
            BenchmarkId::from_parameter(processes),
            &processes,
            |b, &processes| {
                b.iter(|| {
                    let mut copy = data.clone();
                    TreeBuilder::new()
                        .processes(processes)
                        .cutoff(256)
                        .build(black_box(&mut copy))
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn benchmark_sort_skip(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_skip");

    let data = Dataset::<f64>::uniform(50_000, 0.0..100.0, 999);
    group.bench_function("skip_enabled", |b| {
        b.iter(|| {
            let mut copy = data.clone();
            TreeBuilder::new()
                .sequential()
                .build(black_box(&mut copy))
                .unwrap()
        })
    });
    group.bench_function("skip_disabled", |b| {
        b.iter(|| {
            let mut copy = data.clone();
            TreeBuilder::new()
                .sequential()
                .force_resort(true)
                .build(black_box(&mut copy))
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_sequential_vs_tasks,
    benchmark_group_tier,
    benchmark_sort_skip
);
criterion_main!(benches);
