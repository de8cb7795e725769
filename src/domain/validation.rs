//! Publish-time checks for rule definitions.
//!
//! Evaluation never fails on malformed rules (it degrades to no-ops), so this is the
//! point where authoring mistakes are surfaced before a rule becomes `ACTIVE`.

use super::{is_bool_text, parse_number, Action, ActionType, QuantityOperation, Rule};
use chrono::NaiveDate;
use thiserror::Error;

/// A single problem found in a rule definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleIssue {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("expiry date {expiry} must be after effective date {effective}")]
    InvalidWindow {
        effective: NaiveDate,
        expiry: NaiveDate,
    },
    #[error("condition {index}: unknown operator {token}")]
    UnknownOperator { index: usize, token: String },
    #[error("condition {index}: unknown combinator {token}")]
    UnknownCombinator { index: usize, token: String },
    #[error("condition {index}: attribute must not be empty")]
    EmptyAttribute { index: usize },
    #[error("action {index}: unknown action type {token}")]
    UnknownActionType { index: usize, token: String },
    #[error("action {index}: missing parameter {parameter}")]
    MissingParameter {
        index: usize,
        parameter: &'static str,
    },
    #[error("action {index}: parameter {parameter} is not a finite number: {value}")]
    InvalidNumber {
        index: usize,
        parameter: &'static str,
        value: String,
    },
    #[error("action {index}: parameter {parameter} is not a boolean: {value}")]
    InvalidBoolean {
        index: usize,
        parameter: &'static str,
        value: String,
    },
    #[error("action {index}: unknown operation {token}")]
    UnknownOperation { index: usize, token: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleValidationError {
    #[error("rule {rule} failed validation with {} issue(s)", .issues.len())]
    Invalid { rule: String, issues: Vec<RuleIssue> },
}

impl RuleValidationError {
    pub fn issues(&self) -> &[RuleIssue] {
        match self {
            RuleValidationError::Invalid { issues, .. } => issues,
        }
    }
}

/// Collect every issue in `rule`; `Ok(())` only when there are none.
pub fn validate_rule(rule: &Rule) -> Result<(), RuleValidationError> {
    let mut issues = Vec::new();

    if rule.name.trim().is_empty() {
        issues.push(RuleIssue::EmptyField("name"));
    }
    if rule.rule_type.trim().is_empty() {
        issues.push(RuleIssue::EmptyField("ruleType"));
    }
    if rule.market.trim().is_empty() {
        issues.push(RuleIssue::EmptyField("market"));
    }
    if let (Some(effective), Some(expiry)) = (rule.effective_date, rule.expiry_date) {
        if expiry <= effective {
            issues.push(RuleIssue::InvalidWindow { effective, expiry });
        }
    }

    for (index, condition) in rule.conditions.iter().enumerate() {
        if condition.attribute.is_empty() {
            issues.push(RuleIssue::EmptyAttribute { index });
        }
        if !condition.operator.is_known() {
            issues.push(RuleIssue::UnknownOperator {
                index,
                token: condition.operator.to_string(),
            });
        }
        if let Some(combinator) = &condition.combinator {
            if !combinator.is_known() {
                issues.push(RuleIssue::UnknownCombinator {
                    index,
                    token: combinator.to_string(),
                });
            }
        }
    }

    for (index, action) in rule.actions.iter().enumerate() {
        validate_action(index, action, &mut issues);
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(RuleValidationError::Invalid {
            rule: rule.name.clone(),
            issues,
        })
    }
}

fn validate_action(index: usize, action: &Action, issues: &mut Vec<RuleIssue>) {
    match &action.action_type {
        ActionType::ModifyQuantity => {
            require(action, index, "field", issues);
            if let Some(token) = require(action, index, "operation", issues) {
                if !QuantityOperation::from_token(&token).is_known() {
                    issues.push(RuleIssue::UnknownOperation { index, token });
                }
            }
            if let Some(value) = require(action, index, "value", issues) {
                check_number(index, "value", value, issues);
            }
        }
        ActionType::ApplyHaircut => {
            require(action, index, "field", issues);
            if let Some(percent) = require(action, index, "percent", issues) {
                check_number(index, "percent", percent, issues);
            }
        }
        ActionType::SetFlag => {
            require(action, index, "flag", issues);
            if let Some(value) = require(action, index, "value", issues) {
                if !is_bool_text(&value) {
                    issues.push(RuleIssue::InvalidBoolean {
                        index,
                        parameter: "value",
                        value,
                    });
                }
            }
        }
        ActionType::SetParameter => {
            require(action, index, "key", issues);
            require(action, index, "value", issues);
        }
        ActionType::ExcludeItem | ActionType::IncludeItem => {}
        ActionType::Unknown(token) => issues.push(RuleIssue::UnknownActionType {
            index,
            token: token.clone(),
        }),
    }
}

fn require(
    action: &Action,
    index: usize,
    parameter: &'static str,
    issues: &mut Vec<RuleIssue>,
) -> Option<String> {
    let value = action.param(parameter).map(str::to_string);
    if value.is_none() {
        issues.push(RuleIssue::MissingParameter { index, parameter });
    }
    value
}

fn check_number(index: usize, parameter: &'static str, value: String, issues: &mut Vec<RuleIssue>) {
    if !parse_number(&value).is_some_and(f64::is_finite) {
        issues.push(RuleIssue::InvalidNumber {
            index,
            parameter,
            value,
        });
    }
}
