//! Conditions: single attribute predicates chained with AND/OR.

use serde::{Deserialize, Serialize};

wire_token_enum! {
    /// Comparison applied between a context attribute and a condition value.
    pub enum Operator {
        Equals => "EQUALS",
        NotEquals => "NOT_EQUALS",
        GreaterThan => "GREATER_THAN",
        LessThan => "LESS_THAN",
        GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
        LessThanOrEqual => "LESS_THAN_OR_EQUAL",
        Contains => "CONTAINS",
        StartsWith => "STARTS_WITH",
        EndsWith => "ENDS_WITH",
        In => "IN",
        IsNull => "IS_NULL",
        IsNotNull => "IS_NOT_NULL",
    }
}

wire_token_enum! {
    /// How a condition's result joins with the *next* condition in the chain.
    pub enum Combinator {
        And => "AND",
        Or => "OR",
    }
}

/// A single predicate over one context attribute.
///
/// `value` is always stored as text and coerced at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub attribute: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combinator: Option<Combinator>,
}

impl Condition {
    pub fn new(
        attribute: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            operator,
            value: value.into(),
            combinator: None,
        }
    }

    /// Set the combinator joining this condition to the next one.
    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = Some(combinator);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_tokens() {
        assert_eq!(Operator::from_token("GREATER_THAN_OR_EQUAL"), Operator::GreaterThanOrEqual);
        assert_eq!(Operator::In.as_str(), "IN");
        assert_eq!(
            Operator::from_token("equals"),
            Operator::Unknown("equals".to_string())
        );
        assert!(!Operator::from_token("BETWEEN").is_known());
    }

    #[test]
    fn test_condition_deserializes_from_camel_case() {
        let json = r#"{"attribute":"temperature","operator":"EQUALS","value":"HTB","combinator":"OR"}"#;
        let cond: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(cond.attribute, "temperature");
        assert_eq!(cond.operator, Operator::Equals);
        assert_eq!(cond.combinator, Some(Combinator::Or));
    }

    #[test]
    fn test_unknown_tokens_round_trip() {
        let json = r#"{"attribute":"x","operator":"MATCHES","value":"a.*","combinator":"XOR"}"#;
        let cond: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(cond.operator, Operator::Unknown("MATCHES".to_string()));
        assert_eq!(cond.combinator, Some(Combinator::Unknown("XOR".to_string())));

        let out: serde_json::Value = serde_json::to_value(&cond).unwrap();
        assert_eq!(out["operator"], "MATCHES");
        assert_eq!(out["combinator"], "XOR");
    }

    #[test]
    fn test_missing_value_and_combinator_default() {
        let cond: Condition =
            serde_json::from_str(r#"{"attribute":"x","operator":"IS_NULL"}"#).unwrap();
        assert_eq!(cond.value, "");
        assert!(cond.combinator.is_none());
    }
}
