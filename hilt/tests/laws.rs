//! Algebraic laws for the primitive capabilities and the coroutine
//! protocol.

use hilt::{catch, eval_state, run_pure, with_coroutine, with_early_return, Next, Resumed, Step};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    #[test]
    fn state_get_observes_last_set(v in any::<i32>(), w in any::<i32>()) {
        let got = run_pure(move || {
            eval_state(v, move |s| {
                s.set(w);
                Ok(s.get())
            })
        });
        prop_assert_eq!(got, w);
    }

    #[test]
    fn thrown_value_reaches_its_catch(x in any::<i64>()) {
        let got: Result<i64, i64> = run_pure(move || catch(move |e| e.throw(x)));
        prop_assert_eq!(got, Err(x));
    }

    #[test]
    fn pure_body_is_untouched_by_catch(y in any::<i64>()) {
        let got: Result<i64, i64> = run_pure(move || catch(move |_e| Ok(y)));
        prop_assert_eq!(got, Ok(y));
    }
}

#[test]
fn test_throw_skips_the_rest_of_the_body() {
    let got: Result<u8, &str> = run_pure(|| {
        catch(|e| {
            let _: std::convert::Infallible = e.throw("stop")?;
            unreachable!("throw must not return")
        })
    });
    assert_eq!(got, Err("stop"));
}

#[test]
fn test_outer_exit_passes_through_inner_early_return() {
    // Same payload kind, different scopes: routing is by identity.
    let got: Option<()> = run_pure(|| {
        with_early_return(|outer| {
            let _ = with_early_return(|_inner| outer.exit::<()>())?;
            unreachable!("the outer exit must cross the inner handler")
        })
    });
    assert_eq!(got, None);
}

/// Body yielding `rounds` running totals before completing with the grand
/// total.
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

fn drive_to_completion(k: u32) -> (u32, i64) {
    with_coroutine(tally(0, k), |co| {
        let mut yields = 0;
        loop {
            match co.resume(1)? {
                Resumed::Yielded(_) => yields += 1,
                Resumed::Complete(total) => return Ok((yields, total)),
            }
        }
    })
    .unwrap()
}

proptest! {
    #[test]
    fn coroutine_yields_k_times_then_completes(k in 0u32..8) {
        let (yields, total) = drive_to_completion(k);
        prop_assert_eq!(yields, k);
        prop_assert_eq!(total, i64::from(k + 1));
    }
}

#[test]
#[should_panic(expected = "resumed after completion")]
fn test_extra_resume_after_final_result_is_a_violation() {
    let _ = with_coroutine(tally(0, 1), |co| {
        let _ = co.resume(1)?; // yield
        let _ = co.resume(1)?; // completion
        co.resume(1) // protocol violation
    });
}
