//! In-memory rule set, optionally loaded from a JSON fixture file.

use super::{ResolverError, RuleSetResolver};
use crate::domain::Rule;
use crate::engine::RuleEngine;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Resolver over a fixed, fully-constructed rule list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRuleSetResolver {
    rules: Vec<Arc<Rule>>,
}

impl InMemoryRuleSetResolver {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules: rules.into_iter().map(Arc::new).collect(),
        }
    }

    /// Add a rule to the resolver.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Load a JSON array of rules.
    ///
    /// Rules that fail publish validation are still loaded (evaluation degrades to no-ops)
    /// but are logged so they can be fixed at the source.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ResolverError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let rules: Vec<Rule> = serde_json::from_str(&content)?;

        for rule in &rules {
            if let Err(e) = rule.validate() {
                warn!(rule_id = rule.id, error = %e, "Loaded rule failed validation");
            }
        }
        info!(path = %path.display(), count = rules.len(), "Loaded rule set");

        Ok(Self::new(rules))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[async_trait]
impl RuleSetResolver for InMemoryRuleSetResolver {
    async fn active_rules(
        &self,
        rule_type: &str,
        market: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<Arc<Rule>>, ResolverError> {
        let mut rules: Vec<Arc<Rule>> = self
            .rules
            .iter()
            .filter(|r| {
                r.rule_type == rule_type && r.is_active(as_of) && r.is_applicable_for_market(market)
            })
            .cloned()
            .collect();
        RuleEngine::sort_by_priority(&mut rules);
        Ok(rules)
    }
}
