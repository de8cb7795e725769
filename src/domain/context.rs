//! Evaluation context: the key/value working set a rule run operates over.

use super::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key written by `EXCLUDE_ITEM` / `INCLUDE_ITEM`.
pub const EXCLUDED_KEY: &str = "excluded";

/// One evaluation subject, e.g. a security/book/quantity tuple.
///
/// Keys are case-sensitive. An absent key is distinct from a key holding [`Value::Null`].
/// Backed by a `BTreeMap` so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(BTreeMap<String, Value>);

impl Context {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add an entry and return the context (for fixtures and request building).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True only when `excluded` holds boolean `true`.
    pub fn is_excluded(&self) -> bool {
        matches!(self.get(EXCLUDED_KEY), Some(Value::Bool(true)))
    }
}
