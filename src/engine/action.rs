//! Action execution: type-preserving context mutation.

use crate::domain::{
    parse_bool, parse_number, Action, ActionType, Context, NumericKind, QuantityOperation, Value,
    EXCLUDED_KEY,
};

/// Apply one action and return the resulting context; `context` itself is untouched.
///
/// Missing parameters, unparseable operands, absent or non-numeric fields, division by
/// zero and unrecognized action types all leave the context as it was.
pub fn execute(action: &Action, context: &Context) -> Context {
    let mut next = context.clone();
    apply(action, &mut next);
    next
}

/// Apply actions in order, each one seeing the previous one's output.
pub fn execute_all(actions: &[Action], context: &Context) -> Context {
    let mut next = context.clone();
    for action in actions {
        apply(action, &mut next);
    }
    next
}

/// Apply `action` in place. Returns `false` when the action degraded to a no-op.
pub(crate) fn apply(action: &Action, context: &mut Context) -> bool {
    match &action.action_type {
        ActionType::ModifyQuantity => modify_quantity(action, context),
        ActionType::ApplyHaircut => apply_haircut(action, context),
        ActionType::SetFlag => match (action.param("flag"), action.param("value")) {
            (Some(flag), Some(value)) => {
                context.insert(flag, parse_bool(value));
                true
            }
            _ => false,
        },
        ActionType::ExcludeItem => {
            context.insert(EXCLUDED_KEY, true);
            true
        }
        ActionType::IncludeItem => {
            context.insert(EXCLUDED_KEY, false);
            true
        }
        ActionType::SetParameter => match action.param("key") {
            Some(key) => {
                let value = action
                    .param("value")
                    .map(Value::from)
                    .unwrap_or(Value::Null);
                context.insert(key, value);
                true
            }
            None => false,
        },
        ActionType::Unknown(_) => false,
    }
}

fn modify_quantity(action: &Action, context: &mut Context) -> bool {
    let (Some(field), Some(operation), Some(operand)) = (
        action.param("field"),
        action.param("operation"),
        action.param("value"),
    ) else {
        return false;
    };
    let Some((kind, current)) = numeric_field(context, field) else {
        return false;
    };
    let Some(operand) = parse_number(operand) else {
        return false;
    };

    let result = match QuantityOperation::from_token(operation) {
        QuantityOperation::Add => current + operand,
        QuantityOperation::Subtract => current - operand,
        QuantityOperation::Multiply => current * operand,
        QuantityOperation::Divide if operand == 0.0 => return false,
        QuantityOperation::Divide => current / operand,
        QuantityOperation::Set => operand,
        QuantityOperation::Unknown(_) => return false,
    };

    context.insert(field, kind.cast(result));
    true
}

fn apply_haircut(action: &Action, context: &mut Context) -> bool {
    let (Some(field), Some(percent)) = (action.param("field"), action.param("percent")) else {
        return false;
    };
    let Some((kind, current)) = numeric_field(context, field) else {
        return false;
    };
    let Some(percent) = parse_number(percent) else {
        return false;
    };

    let result = current - current * (percent / 100.0);
    context.insert(field, kind.cast(result));
    true
}

/// The field's numeric kind and widened value, if present and numeric.
fn numeric_field(context: &Context, field: &str) -> Option<(NumericKind, f64)> {
    let value = context.get(field)?;
    Some((value.numeric_kind()?, value.as_f64()?))
}
