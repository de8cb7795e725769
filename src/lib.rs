pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod resolver;

pub use config::Config;
pub use domain::{
    Action, ActionType, Combinator, Condition, Context, NumericKind, Operator, QuantityOperation,
    Rule, Value,
};
pub use engine::{Evaluation, RuleEngine, RuleOutcome, RuleVerdict};
pub use error::AppError;
pub use resolver::{InMemoryRuleSetResolver, ResolverError, RuleSetResolver};
