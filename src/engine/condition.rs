//! Single-condition evaluation against a context.

use crate::domain::{parse_number, Condition, Context, Operator, Value};
use std::cmp::Ordering;

/// Evaluate one condition. Never fails: anything malformed is simply unsatisfied.
///
/// An absent attribute satisfies nothing (not even `IS_NULL`); a present attribute
/// holding null satisfies only `IS_NULL`.
pub fn evaluate(condition: &Condition, context: &Context) -> bool {
    let Some(actual) = context.get(&condition.attribute) else {
        return false;
    };
    if actual.is_null() {
        return condition.operator == Operator::IsNull;
    }

    let expected = condition.value.as_str();
    match &condition.operator {
        Operator::IsNull => false,
        Operator::IsNotNull => true,
        Operator::Equals => actual.to_display_string() == expected,
        Operator::NotEquals => actual.to_display_string() != expected,
        Operator::Contains => actual.to_display_string().contains(expected),
        Operator::StartsWith => actual.to_display_string().starts_with(expected),
        Operator::EndsWith => actual.to_display_string().ends_with(expected),
        Operator::GreaterThan => compare(actual, expected) == Some(Ordering::Greater),
        Operator::LessThan => compare(actual, expected) == Some(Ordering::Less),
        Operator::GreaterThanOrEqual => matches!(
            compare(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::LessThanOrEqual => matches!(
            compare(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::In => {
            let actual = actual.to_display_string();
            expected.split(',').any(|token| token.trim() == actual)
        }
        Operator::Unknown(_) => false,
    }
}

/// Numeric comparison when both sides are numbers, lexicographic otherwise.
///
/// Text is ordered by UTF-16 code unit, not by UTF-8 byte.
///
/// `None` only for unordered floating values (NaN), which satisfy no ordering operator.
fn compare(actual: &Value, expected: &str) -> Option<Ordering> {
    match (actual.as_f64(), parse_number(expected)) {
        (Some(lhs), Some(rhs)) => lhs.partial_cmp(&rhs),
        _ => Some(
            actual
                .to_display_string()
                .encode_utf16()
                .cmp(expected.encode_utf16()),
        ),
    }
}
