//! Rule model and context value types for the calculation rule engine.
//!
//! This module provides:
//! - `Value` / `Context`: the dynamically-typed working set a rule run mutates
//! - `Condition`, `Action`, `Rule`: immutable rule definitions as loaded from storage
//! - Publish-time validation of rule definitions

/// Declares a closed set of upper-case wire tokens with a catch-all `Unknown` variant.
///
/// Unknown tokens never fail to parse; they round-trip through serde verbatim and the
/// engine treats them as unsatisfied / no-op.
macro_rules! wire_token_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $token:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Unrecognized token, kept verbatim.
            Unknown(String),
        }

        impl $name {
            pub fn from_token(token: &str) -> Self {
                match token {
                    $($token => $name::$variant,)+
                    other => $name::Unknown(other.to_string()),
                }
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $token,)+
                    $name::Unknown(token) => token,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl From<String> for $name {
            fn from(token: String) -> Self {
                Self::from_token(&token)
            }
        }

        impl From<&str> for $name {
            fn from(token: &str) -> Self {
                Self::from_token(token)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

pub mod action;
pub mod condition;
pub mod context;
pub mod rule;
pub mod validation;
pub mod value;

pub use action::{Action, ActionType, QuantityOperation};
pub use condition::{Combinator, Condition, Operator};
pub use context::{Context, EXCLUDED_KEY};
pub use rule::{rule_type, status, Rule, MARKET_GLOBAL};
pub use validation::{RuleIssue, RuleValidationError};
pub use value::{is_bool_text, parse_bool, parse_number, NumericKind, Value, ValueError};
