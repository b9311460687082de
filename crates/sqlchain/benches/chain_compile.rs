use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlchain::prelude::*;

/// Build a chain of `n` comparisons joined by AND:
/// ABC = 0 AND ABC = 1 AND ...
fn build_chain(n: usize) -> Chain {
    let mut chain = Chain::new(BuilderConfig::new().with_field("ABC", 1)).unwrap();
    for i in 0..n {
        if i > 0 {
            chain.append(UnitKind::Operator).unwrap();
            let op = chain.last_mut().and_then(Unit::operator_mut).unwrap();
            op.set_category(OperatorCategory::Logical).unwrap();
            op.select_symbol("AND").unwrap();
        }
        chain.append(UnitKind::Field).unwrap();
        chain
            .last_mut()
            .and_then(Unit::field_mut)
            .unwrap()
            .select("ABC")
            .unwrap();
        chain.append(UnitKind::Operator).unwrap();
        chain
            .last_mut()
            .and_then(Unit::operator_mut)
            .unwrap()
            .select_symbol("=")
            .unwrap();
        chain.append(UnitKind::Constant).unwrap();
        chain
            .last_mut()
            .and_then(Unit::constant_mut)
            .unwrap()
            .set_value(i.to_string());
    }
    chain
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain/compile");

    for n in [1, 5, 10, 50, 100] {
        let mut chain = build_chain(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(chain.compile().len()));
        });
    }

    group.finish();
}

fn bench_build_and_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain/build_and_compile");

    for n in [1, 5, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut chain = build_chain(n);
                black_box(chain.compile().len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_build_and_compile);
criterion_main!(benches);
