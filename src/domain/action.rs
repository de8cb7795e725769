//! Actions: context mutations a rule applies when its conditions match.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

wire_token_enum! {
    /// Kind of mutation an action performs.
    pub enum ActionType {
        ModifyQuantity => "MODIFY_QUANTITY",
        SetFlag => "SET_FLAG",
        ApplyHaircut => "APPLY_HAIRCUT",
        ExcludeItem => "EXCLUDE_ITEM",
        IncludeItem => "INCLUDE_ITEM",
        SetParameter => "SET_PARAMETER",
    }
}

wire_token_enum! {
    /// Arithmetic applied by `MODIFY_QUANTITY` (read from its `operation` parameter).
    pub enum QuantityOperation {
        Add => "ADD",
        Subtract => "SUBTRACT",
        Multiply => "MULTIPLY",
        Divide => "DIVIDE",
        Set => "SET",
    }
}

/// A typed action with free-form string parameters read by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub action_type: ActionType,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl Action {
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            parameters: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// `MODIFY_QUANTITY` on `field` with the given operation and operand.
    pub fn modify_quantity(field: &str, operation: QuantityOperation, value: &str) -> Self {
        Self::new(ActionType::ModifyQuantity)
            .with_param("field", field)
            .with_param("operation", operation.as_str())
            .with_param("value", value)
    }

    /// `APPLY_HAIRCUT` of `percent` on `field`.
    pub fn haircut(field: &str, percent: &str) -> Self {
        Self::new(ActionType::ApplyHaircut)
            .with_param("field", field)
            .with_param("percent", percent)
    }

    pub fn set_flag(flag: &str, value: &str) -> Self {
        Self::new(ActionType::SetFlag)
            .with_param("flag", flag)
            .with_param("value", value)
    }

    pub fn set_parameter(key: &str, value: &str) -> Self {
        Self::new(ActionType::SetParameter)
            .with_param("key", key)
            .with_param("value", value)
    }
}
