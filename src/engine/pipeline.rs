use super::action::apply;
use crate::domain::{rule_type, Context, Rule};
use chrono::NaiveDate;
use serde::Serialize;
use std::borrow::Borrow;
use tracing::{debug, trace};

/// What happened to a single rule during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleOutcome {
    /// Chain matched and the rule's actions ran.
    Matched,
    /// Chain did not match; context left as is.
    NotMatched,
    /// Not `ACTIVE` or outside its effective window on the business date.
    Inactive,
    /// Scoped to a different market.
    MarketMismatch,
}

impl RuleOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RuleOutcome::Inactive | RuleOutcome::MarketMismatch)
    }
}

/// Per-rule verdict pair plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleVerdict {
    pub rule_id: i64,
    pub rule_name: String,
    pub outcome: RuleOutcome,
    pub included: bool,
    pub excluded: bool,
    /// Actions that took effect; ones that degraded to a no-op are not counted.
    pub actions_applied: usize,
}

/// Result of running a rule set over one context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub context: Context,
    pub verdicts: Vec<RuleVerdict>,
    /// Any evaluated rule asserted inclusion.
    pub included: bool,
    /// Any evaluated rule asserted exclusion.
    pub excluded: bool,
}

/// Runs an ordered rule set over a context.
///
/// Stateless; rules are only read, so one rule set can be shared across threads while
/// each call owns its own context.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `rules` in the order given against `context`.
    ///
    /// Inactive and out-of-market rules are skipped. For the rest the chain is evaluated
    /// against the context as left by earlier rules; on a match the rule's actions run in
    /// order. Verdicts reflect the context each rule saw, before its own actions.
    pub fn evaluate<I>(
        &self,
        rules: I,
        context: Context,
        market: &str,
        as_of: NaiveDate,
    ) -> Evaluation
    where
        I: IntoIterator,
        I::Item: Borrow<Rule>,
    {
        let mut context = context;
        let mut verdicts = Vec::new();

        for rule in rules {
            let rule = rule.borrow();
            let verdict = Self::evaluate_rule(rule, &mut context, market, as_of);
            debug!(
                rule_id = rule.id,
                rule = %rule.name,
                outcome = ?verdict.outcome,
                included = verdict.included,
                excluded = verdict.excluded,
                "rule evaluated"
            );
            verdicts.push(verdict);
        }

        let included = verdicts.iter().any(|v| v.included);
        let excluded = verdicts.iter().any(|v| v.excluded);

        Evaluation {
            context,
            verdicts,
            included,
            excluded,
        }
    }

    fn evaluate_rule(
        rule: &Rule,
        context: &mut Context,
        market: &str,
        as_of: NaiveDate,
    ) -> RuleVerdict {
        let mut verdict = RuleVerdict {
            rule_id: rule.id,
            rule_name: rule.name.clone(),
            outcome: RuleOutcome::NotMatched,
            included: false,
            excluded: false,
            actions_applied: 0,
        };

        if !rule.is_active(as_of) {
            verdict.outcome = RuleOutcome::Inactive;
            return verdict;
        }
        if !rule.is_applicable_for_market(market) {
            verdict.outcome = RuleOutcome::MarketMismatch;
            return verdict;
        }

        // Same result as should_include/should_exclude, with the chain evaluated once.
        let matched = rule.matches(context);
        verdict.included = matched && rule.rule_type == rule_type::INCLUDE;
        verdict.excluded = matched && rule.rule_type == rule_type::EXCLUDE;

        if matched {
            verdict.outcome = RuleOutcome::Matched;
            for action in &rule.actions {
                let applied = apply(action, context);
                trace!(rule_id = rule.id, action = %action.action_type, applied, "action executed");
                if applied {
                    verdict.actions_applied += 1;
                }
            }
        }

        verdict
    }

    /// Stable ascending sort by priority, for callers whose resolver does not order rules.
    pub fn sort_by_priority<R: Borrow<Rule>>(rules: &mut [R]) {
        rules.sort_by_key(|rule| rule.borrow().priority);
    }
}
