//! Rule set resolution: where the engine's ordered, active rule list comes from.

use crate::domain::Rule;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub mod memory;

pub use memory::InMemoryRuleSetResolver;

/// Source of the rules a calculation runs for a given scope.
///
/// Implementations must return only rules that are active on `as_of` and applicable to
/// `market`, sorted by ascending priority. Rules are shared read-only via `Arc`.
#[async_trait]
pub trait RuleSetResolver: Send + Sync + fmt::Debug {
    /// Fetch the active rules of `rule_type` for `market` on business date `as_of`.
    ///
    /// # Arguments
    /// * `rule_type` - Rule polarity/type token (e.g., "INCLUDE", "EXCLUDE")
    /// * `market` - Market code (e.g., "US", "JP"); "GLOBAL" rules always apply
    /// * `as_of` - Business date the rules must be active on
    async fn active_rules(
        &self,
        rule_type: &str,
        market: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<Arc<Rule>>, ResolverError>;
}

/// Error type for rule set resolution.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Failed to read rule set: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse rule set: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Rule set error: {0}")]
    Other(String),
}
