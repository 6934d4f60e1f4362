//! Streamed tally demo: count signs off a stream, stopping at the first
//! zero and discarding everything behind it.
//!
//! Run with: cargo run --example stream_tally

use hilt::{eval_state, run_pure, with_coroutine, with_early_return, Next, Step};

fn emit_all(items: &'static [i32]) -> Next<'static, (), i32, ()> {
    Box::new(move |()| match items.split_first() {
        None => Step::done(()),
        Some((head, rest)) => Ok(Step::Yield(*head, emit_all(rest))),
    })
}

fn main() {
    let (pos, neg) = run_pure(|| {
        eval_state((0u32, 0u32), |tally| {
            let _ = with_early_return(|stop| {
                with_coroutine(emit_all(&[1, 2, -1, 3, 0, 5]), |items| {
                    items.for_each(|n| {
                        if n == 0 {
                            return stop.exit();
                        }
                        tally.modify(|(pos, neg)| {
                            if n > 0 {
                                *pos += 1
                            } else {
                                *neg += 1
                            }
                        });
                        Ok(())
                    })
                })
            })?;
            Ok(tally.get())
        })
    });
    println!("{pos} positives, {neg} negatives before the first zero");
}
