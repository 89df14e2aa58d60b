use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pcsets::PcSet;
use pcsets::relations::{fit_in, op_path, r1, zpair};

fn bench_canonical_forms(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_forms");
    let all: Vec<PcSet> = (0u16..4096).map(PcSet::from_bits).collect();

    group.bench_function("prime_all_4096", |bencher| {
        bencher.iter(|| {
            for set in black_box(&all) {
                black_box(set.prime());
            }
        })
    });

    for spec in ["047", "0146", "024579B", "0123456789AB"] {
        let set: PcSet = spec.parse().unwrap_or_default();
        group.bench_with_input(BenchmarkId::new("normal", spec), &set, |bencher, set| {
            bencher.iter(|| black_box(set).normal())
        });
    }

    group.finish();
}

fn bench_relations(c: &mut Criterion) {
    let mut group = c.benchmark_group("relations");
    let scale: PcSet = "024579B".parse().unwrap_or_default();
    let seventh: PcSet = "047A".parse().unwrap_or_default();
    let minor: PcSet = "914".parse().unwrap_or_default();
    let major: PcSet = "047".parse().unwrap_or_default();

    group.bench_function("op_path_related", |bencher| {
        bencher.iter(|| op_path(black_box(&major), black_box(&minor)))
    });

    group.bench_function("op_path_rejected", |bencher| {
        bencher.iter(|| op_path(black_box(&major), black_box(&seventh)))
    });

    group.bench_function("fit_in", |bencher| {
        bencher.iter(|| fit_in(black_box(&scale), black_box(&seventh)))
    });

    group.bench_function("ivec_relations", |bencher| {
        bencher.iter(|| {
            let a = black_box(&scale);
            let b = black_box(&seventh);
            (zpair(a, b), r1(a, b))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_canonical_forms, bench_relations);
criterion_main!(benches);
