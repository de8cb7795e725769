//! Condition chain folding.

use super::condition::evaluate;
use crate::domain::{Combinator, Condition, Context};

/// Fold a condition chain left to right.
///
/// Condition *i* joins the running result using condition *(i-1)*'s combinator; there
/// is no precedence grouping and no short-circuiting, so `a OR b AND c` as stored means
/// `(a OR b) AND c`. A missing combinator mid-chain restarts the fold at the next
/// condition, and an unrecognized one leaves the running result unchanged.
/// An empty chain is `true`.
pub fn evaluate_all(conditions: &[Condition], context: &Context) -> bool {
    let mut result = true;
    let mut previous: Option<&Combinator> = None;

    for condition in conditions {
        let current = evaluate(condition, context);
        result = match previous {
            None => current,
            Some(Combinator::And) => result && current,
            Some(Combinator::Or) => result || current,
            Some(Combinator::Unknown(_)) => result,
        };
        previous = condition.combinator.as_ref();
    }

    result
}
