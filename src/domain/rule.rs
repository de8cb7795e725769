//! Rule aggregate: scoping, lifecycle, conditions and actions.
//!
//! Chain matching and polarity live with the evaluators in `engine::polarity`.

use super::{Action, Condition, RuleValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Market value that applies a rule to every market.
pub const MARKET_GLOBAL: &str = "GLOBAL";

/// Rule polarity tokens.
pub mod rule_type {
    pub const INCLUDE: &str = "INCLUDE";
    pub const EXCLUDE: &str = "EXCLUDE";
}

/// Authoring lifecycle states. Only `ACTIVE` rules are ever evaluated.
pub mod status {
    pub const DRAFT: &str = "DRAFT";
    pub const ACTIVE: &str = "ACTIVE";
    pub const INACTIVE: &str = "INACTIVE";
    pub const ARCHIVED: &str = "ARCHIVED";
}

/// A scoped condition→action unit with INCLUDE/EXCLUDE polarity.
///
/// Rules are read-only once loaded; actions mutate the evaluation context, never the rule.
/// `Clone` is a deep copy: conditions and actions are rebuilt element by element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rule_type: String,
    pub market: String,
    /// Lower values are evaluated first. Ordering is the resolver's job, not the engine's.
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    pub status: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl Rule {
    /// Create a draft rule with no conditions or actions.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        rule_type: impl Into<String>,
        market: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            rule_type: rule_type.into(),
            market: market.into(),
            priority: 0,
            effective_date: None,
            expiry_date: None,
            status: status::DRAFT.to_string(),
            conditions: Vec::new(),
            actions: Vec::new(),
            parameters: HashMap::new(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the effective window. Effective is inclusive, expiry exclusive.
    pub fn with_window(mut self, effective: Option<NaiveDate>, expiry: Option<NaiveDate>) -> Self {
        self.effective_date = effective;
        self.expiry_date = expiry;
        self
    }

    /// `ACTIVE` status and `effective_date <= today < expiry_date` (unset bounds are open).
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.status == status::ACTIVE
            && self.effective_date.map_or(true, |effective| today >= effective)
            && self.expiry_date.map_or(true, |expiry| today < expiry)
    }

    pub fn is_applicable_for_market(&self, market: &str) -> bool {
        self.market == MARKET_GLOBAL || self.market == market
    }

    /// Check the definition for authoring mistakes the engine would silently no-op on.
    pub fn validate(&self) -> Result<(), RuleValidationError> {
        super::validation::validate_rule(self)
    }

    /// Validate and return an `ACTIVE` copy. The original is left untouched.
    pub fn publish(&self) -> Result<Rule, RuleValidationError> {
        self.validate()?;
        Ok(self.clone().with_status(status::ACTIVE))
    }

    /// Return an `INACTIVE` copy. The original is left untouched.
    pub fn deactivate(&self) -> Rule {
        self.clone().with_status(status::INACTIVE)
    }
}
