//! Pure, synchronous rule evaluation.
//!
//! Nothing here blocks, allocates beyond the working context, or returns an error:
//! malformed rule data degrades to `false` conditions and no-op actions.

pub mod action;
pub mod chain;
pub mod condition;
pub mod pipeline;
mod polarity;

pub use action::{execute, execute_all};
pub use chain::evaluate_all;
pub use condition::evaluate;
pub use pipeline::{Evaluation, RuleEngine, RuleOutcome, RuleVerdict};
