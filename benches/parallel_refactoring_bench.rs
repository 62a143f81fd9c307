use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use smellfix::{
    CodeSmellName, FnStrategy, MethodModel, MethodsByPath, ParallelConfig, Refactoring,
    StrategyRegistry,
};
use std::hint::black_box;
use std::path::PathBuf;

fn create_methods(num_files: usize, methods_per_file: usize) -> MethodsByPath {
    (0..num_files)
        .map(|file| {
            let methods = (0..methods_per_file)
                .map(|i| {
                    MethodModel::new(format!("method_{}_{}", file, i))
                        .with_smell(CodeSmellName::LongMethod)
                })
                .collect();
            (PathBuf::from(format!("src/File{}.java", file)), methods)
        })
        .collect()
}

/// Half of the methods fail so both the resolve and the record paths run
fn refactoring(parallel: ParallelConfig) -> Refactoring {
    Refactoring::new(StrategyRegistry::new().with_strategy(FnStrategy::new(
        CodeSmellName::LongMethod,
        "alternating",
        |_, method| {
            let work: u64 = method.name.bytes().map(u64::from).sum();
            Ok(black_box(work) % 2 == 0)
        },
    )))
    .with_parallel(parallel)
}

fn bench_refactor_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("refactor_all");

    for num_files in [10, 100, 500] {
        let input = create_methods(num_files, 20);

        group.bench_with_input(BenchmarkId::new("parallel", num_files), &input, |b, input| {
            let refactoring = refactoring(ParallelConfig::default());
            b.iter(|| {
                let mut methods = input.clone();
                black_box(refactoring.refactor_all(&mut methods).unwrap())
            });
        });

        group.bench_with_input(
            BenchmarkId::new("sequential", num_files),
            &input,
            |b, input| {
                let refactoring = refactoring(ParallelConfig::sequential());
                b.iter(|| {
                    let mut methods = input.clone();
                    black_box(refactoring.refactor_all(&mut methods).unwrap())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_refactor_all);
criterion_main!(benches);
