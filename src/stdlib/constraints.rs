//! Built-in constraints

use std::sync::Arc;

use super::compare::{compare_values, signum};
use crate::entity::{self, GoalEntity};
use crate::logic::{LogicError, State, Value, Variable};
use crate::registry::{ConstraintConstructor, ConstraintError, ConstraintLibrary, ConstraintResult};

/// Registration name of [`not_eq`]
pub const NOT_EQ: &str = "not_eq";
/// Registration name of [`cmp`]
pub const CMP: &str = "cmp";

/// Fails once both values are known and equal.
pub fn not_eq(first: impl Into<Value>, second: impl Into<Value>) -> GoalEntity {
    let first = first.into();
    let second = second.into();
    let parameters = vec![first.clone(), second.clone()];

    entity::create_constraint(
        NOT_EQ,
        parameters,
        Arc::new(move |state: &State| {
            match (state.resolve(&first), state.resolve(&second)) {
                (Value::Literal(a), Value::Literal(b)) if a == b => None,
                _ => Some(state.clone()),
            }
        }),
    )
}

/// Succeeds when comparing `first` with `second` gives `expected`.
///
/// `expected` is `-1` for less than, `0` for equal and `1` for greater than.
/// Values whose declared types can never be ordered against each other are
/// rejected here. Values that turn out to be incomparable at run time (only
/// possible through `any` variables) fault the branch, which ends the query
/// with [`LogicError::IncomparableValues`].
pub fn cmp(
    first: impl Into<Value>,
    second: impl Into<Value>,
    expected: i64,
) -> ConstraintResult<GoalEntity> {
    let first = first.into();
    let second = second.into();

    if !(-1..=1).contains(&expected) {
        return Err(ConstraintError::InvalidExpectation(expected));
    }
    let (first_type, second_type) = (first.value_type(), second.value_type());
    if !first_type.is_comparable_with(&second_type) {
        return Err(ConstraintError::IncomparableTypes {
            first: first_type,
            second: second_type,
        });
    }

    let parameters = vec![first.clone(), second.clone(), Value::from(expected)];
    Ok(entity::create_constraint(
        CMP,
        parameters,
        Arc::new(move |state: &State| {
            let a = state.resolve(&first).as_literal()?;
            let b = state.resolve(&second).as_literal()?;
            let Some(ordering) = compare_values(a, b) else {
                return Some(state.with_fault(LogicError::IncomparableValues {
                    first: a.clone(),
                    second: b.clone(),
                }));
            };
            (signum(ordering) == expected).then(|| state.clone())
        }),
    ))
}

/// The variable takes each of the given values in turn.
///
/// Duplicate values are only tried once.
pub fn in_set<V>(variable: &Variable, values: impl IntoIterator<Item = V>) -> GoalEntity
where
    V: Into<Value>,
{
    let mut distinct: Vec<Value> = Vec::new();
    for value in values {
        let value = value.into();
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    entity::or(
        distinct
            .into_iter()
            .map(|value| entity::eq(variable, value))
            .collect(),
    )
}

/// Built-in constraint library
#[derive(Debug, Clone, Copy, Default)]
pub struct StdLib;

impl ConstraintLibrary for StdLib {
    fn export_constraints(&self) -> Vec<(String, ConstraintConstructor)> {
        let not_eq_constructor: ConstraintConstructor = Arc::new(build_not_eq);
        let cmp_constructor: ConstraintConstructor = Arc::new(build_cmp);
        vec![
            (NOT_EQ.to_string(), not_eq_constructor),
            (CMP.to_string(), cmp_constructor),
        ]
    }
}

fn build_not_eq(parameters: &[Value]) -> ConstraintResult<GoalEntity> {
    let [first, second] = parameters else {
        return Err(arity(NOT_EQ, 2, parameters));
    };
    Ok(not_eq(first.clone(), second.clone()))
}

fn build_cmp(parameters: &[Value]) -> ConstraintResult<GoalEntity> {
    let [first, second, expected] = parameters else {
        return Err(arity(CMP, 3, parameters));
    };
    let expected = expected
        .as_literal()
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| ConstraintError::InvalidParameter {
            name: CMP.to_string(),
            reason: format!("expected an integer comparison result, got {}", expected),
        })?;
    cmp(first.clone(), second.clone(), expected)
}

fn arity(name: &str, expected: usize, parameters: &[Value]) -> ConstraintError {
    ConstraintError::WrongArity {
        name: name.to_string(),
        expected,
        actual: parameters.len(),
    }
}
