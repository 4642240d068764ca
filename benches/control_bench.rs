//! Benchmark for capture/restore control lifting.
//!
//! Measures the overhead of a full `control` round trip (capture, run
//! through the base context, restore) against executing the same stack
//! computation directly.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use strata::control::{BaseControl, RunBase, control};
use strata::effect::{IoFamily, StateT, StateTFamily, WriterT, WriterTFamily};

type Logged = WriterTFamily<String, IoFamily>;
type Stack = StateTFamily<i32, Logged>;

fn scenario() -> StateT<i32, Logged, i32> {
    StateT::put(9)
        .flat_map(|()| StateT::lift(WriterT::tell("x".to_string())))
        .flat_map(|()| StateT::pure(7))
}

// =============================================================================
// Direct Execution
// =============================================================================

fn benchmark_direct_execution(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("direct_execution");

    group.bench_function("two_layer_stack", |bencher| {
        bencher.iter(|| {
            let computation = scenario();
            black_box(computation.run(5).run().run_unsafe())
        });
    });

    group.finish();
}

// =============================================================================
// Control Round Trip
// =============================================================================

fn benchmark_control_round_trip(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("control_round_trip");

    group.bench_function("two_layer_stack", |bencher| {
        bencher.iter(|| {
            let computation = scenario();
            let round = control::<Stack, i32, _>(move |run| run.run(computation.clone()));
            black_box(round.run(5).run().run_unsafe())
        });
    });

    group.bench_function("capture_only", |bencher| {
        bencher.iter(|| {
            let computation = scenario();
            let captured =
                Stack::lift_with_base(move |run| run.run(computation.clone()));
            black_box(captured.run(5).run().run_unsafe())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_direct_execution,
    benchmark_control_round_trip
);
criterion_main!(benches);
