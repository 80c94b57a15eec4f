//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use bracketsmith::*;

fn benchmark_generation(c: &mut Criterion) {
    let generator = BracketGenerator::new(GeneratorConfig::default().with_verification(false));
    let mut group = c.benchmark_group("generate");

    // Just above a power of two: the worst case for byes
    for players in [17u32, 129, 1025, 8193] {
        group.bench_with_input(BenchmarkId::from_parameter(players), &players, |b, &n| {
            b.iter(|| generator.generate(black_box(n)).expect("generation succeeds"));
        });
    }
    group.finish();
}

fn benchmark_collapse(c: &mut Criterion) {
    let players = 1025;
    let tree = BracketTreeBuilder::new(players).build(&mut MatchIdGenerator::new());

    c.bench_function("collapse_n=1025", |b| {
        b.iter(|| {
            ByeCollapser::new(players)
                .collapse(black_box(tree.nodes.clone()))
                .expect("collapse succeeds")
        });
    });
}

fn benchmark_template(c: &mut Criterion) {
    let generator = BracketGenerator::for_style(BracketStyle::FixedSeededTemplate16);

    c.bench_function("template16_n=11", |b| {
        b.iter(|| generator.generate(black_box(11)).expect("generation succeeds"));
    });
}

criterion_group!(benches, benchmark_generation, benchmark_collapse, benchmark_template);
criterion_main!(benches);
