#![allow(dead_code)]

use gridpath_lib::{Error, GridConfig, Layout, Session, StepOutcome};

/// Session built from layout text with the input cooldown disabled.
pub fn session_from(layout: &str) -> Session {
    let layout: Layout = layout.parse().expect("fixture layout parses");
    Session::from_layout(&layout, GridConfig::default().with_cooldown_ms(0))
        .expect("fixture session builds")
}

/// Step until the finish is reached or `limit` steps have run.
///
/// Returns every outcome plus the error that stopped the search, if any.
pub fn run_until_done(session: &mut Session, limit: usize) -> (Vec<StepOutcome>, Option<Error>) {
    let mut outcomes = Vec::new();
    for tick in 1..=limit {
        match session.advance(tick as u64) {
            Ok(outcome) => {
                let done = outcome.reached_finish;
                outcomes.push(outcome);
                if done {
                    return (outcomes, None);
                }
            }
            Err(err) => return (outcomes, Some(err)),
        }
    }
    (outcomes, None)
}
