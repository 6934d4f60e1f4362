//! Handler benchmarks using criterion.
//!
//! Measures the cost of opening and closing handler scopes, routing an
//! unwind through intervening handlers, and coroutine resumption.
//!
//! Run with: cargo bench --bench handler_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hilt::{
    catch, eval_state, run_state, with_coroutine, with_early_return, Control, Exception, Next,
    Resumed, Step,
};

/// Benchmark scope open/close for each primitive handler
fn bench_handler_open_close(c: &mut Criterion) {
    let mut group = c.benchmark_group("handler_open_close");

    group.bench_function("run_state", |b| {
        b.iter(|| {
            run_state(black_box(1u64), |s| {
                s.modify(|v| *v += 1);
                Ok(s.get())
            })
        });
    });

    group.bench_function("catch_pure", |b| {
        b.iter(|| {
            let got: Control<Result<u64, ()>> = catch(|_e| Ok(black_box(7u64)));
            got
        });
    });

    group.bench_function("early_return_taken", |b| {
        b.iter(|| with_early_return(|stop| stop.exit::<u64>()));
    });

    group.finish();
}

/// Throw beneath `depth` state handlers, all of which the unwind crosses.
fn deep_throw<'scope>(e: &Exception<'scope, u32>, depth: usize) -> Control<u32> {
    if depth == 0 {
        e.throw(black_box(9))
    } else {
        eval_state(depth as u64, |_s| deep_throw(e, depth - 1))
    }
}

/// Benchmark unwind routing at increasing handler depth
fn bench_unwind_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("unwind_routing");

    for depth in [0usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let got: Control<Result<u32, u32>> = catch(|e| deep_throw(e, depth));
                got
            });
        });
    }

    group.finish();
}

/// Body yielding `rounds` running totals before completing.
fn tally(total: i64, rounds: u32) -> Next<'static, i64, i64, i64> {
    Box::new(move |input| {
        let total = total + input;
        if rounds == 0 {
            Step::done(total)
        } else {
            Ok(Step::Yield(total, tally(total, rounds - 1)))
        }
    })
}

/// Benchmark coroutine resumption
fn bench_coroutine_resume(c: &mut Criterion) {
    let mut group = c.benchmark_group("coroutine_resume");

    group.bench_function("resume_to_completion", |b| {
        b.iter(|| {
            with_coroutine(tally(0, 8), |co| loop {
                match co.resume(black_box(1))? {
                    Resumed::Yielded(v) => {
                        black_box(v);
                    }
                    Resumed::Complete(total) => return Ok(total),
                }
            })
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_handler_open_close,
    bench_unwind_routing,
    bench_coroutine_resume
);
criterion_main!(benches);
