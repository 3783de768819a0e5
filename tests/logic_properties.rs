//! Solver Property Tests
//!
//! Tests for the core relational operations:
//! - Unification is reflexive and symmetric
//! - Chained variable bindings are transitive
//! - Deferred constraints fire regardless of binding order
//! - `and` / `or` behave as set operations on results: associative,
//!   commutative where expected, `and` distributing over `or`
//! - Failures propagate as absent results, never as errors

use std::sync::Arc;

use kanrendb::logic::{
    and, and_all, constraint, equal, fail, or, succeed, Goal, State, Value, ValueType, Variable,
};
use serde_json::json;

// =============================================================================
// Test Utilities
// =============================================================================

fn var(name: &str) -> Variable {
    Variable::new(name, ValueType::Any)
}

/// Runs a finite goal and renders every successful state's projection
/// as sorted JSON strings, so result sets can be compared without order.
fn result_set(goal: &Goal, variables: &[Variable]) -> Vec<String> {
    let mut rendered: Vec<String> = goal
        .run()
        .successes()
        .map(|state| state.values_of(variables).to_json().to_string())
        .collect();
    rendered.sort();
    rendered
}

/// Deferred check that fails when both variables hold the same literal
fn distinct(first: &Variable, second: &Variable) -> Goal {
    let (a, b) = (Value::from(first), Value::from(second));
    constraint(
        vec![first.clone(), second.clone()],
        Arc::new(move |state: &State| {
            if state.resolve(&a) == state.resolve(&b) {
                None
            } else {
                Some(state.clone())
            }
        }),
    )
}

// =============================================================================
// Unification
// =============================================================================

/// Unifying a value with itself leaves the environment unchanged.
#[test]
fn test_unify_reflexive() {
    let empty = State::new();
    let samples = vec![
        Value::from(json!(1)),
        Value::from("text"),
        Value::from(json!({"nested": [1, 2]})),
        Value::from(var("x")),
    ];

    for sample in samples {
        assert_eq!(empty.unify(&sample, &sample), Some(empty.clone()));
    }
}

/// `unify(a, b)` and `unify(b, a)` agree on success or failure.
#[test]
fn test_unify_symmetric() {
    let bound = State::new()
        .unify(&Value::from(var("x")), &Value::from(1))
        .unwrap();
    let samples = vec![
        Value::from(1),
        Value::from(2),
        Value::from("1"),
        Value::from(var("x")),
        Value::from(var("y")),
    ];

    for a in &samples {
        for b in &samples {
            assert_eq!(
                bound.unify(a, b).is_some(),
                bound.unify(b, a).is_some(),
                "unify({}, {}) is not symmetric",
                a,
                b
            );
        }
    }
}

/// Binding X to Y and then Y to 1 makes X equal 1, in either order.
#[test]
fn test_chained_binding_transitive() {
    let (x, y) = (var("x"), var("y"));

    let alias_first = and(equal(&x, &y), equal(&y, 1));
    let value_first = and(equal(&y, 1), equal(&x, &y));

    for goal in [alias_first, value_first] {
        let states: Vec<State> = goal.run().successes().collect();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].value_of(&x), Some(&json!(1)));
        assert_eq!(states[0].value_of(&y), Some(&json!(1)));
    }
}

/// Unifying two different literals through a variable fails.
#[test]
fn test_conflicting_bindings_fail() {
    let x = var("x");
    let goal = and(equal(&x, 1), equal(&x, 2));
    assert!(goal.run().successes().next().is_none());
}

// =============================================================================
// Deferred Constraints
// =============================================================================

/// A constraint declared before its variables are bound fires once they are.
#[test]
fn test_constraint_declare_then_bind() {
    let (x, y) = (var("x"), var("y"));

    let same = and_all(vec![distinct(&x, &y), equal(&x, 1), equal(&y, 1)]);
    let different = and_all(vec![distinct(&x, &y), equal(&x, 1), equal(&y, 2)]);

    assert_eq!(same.run().successes().count(), 0);
    assert_eq!(different.run().successes().count(), 1);
}

/// A constraint declared after its variables are bound is checked at once.
#[test]
fn test_constraint_bind_then_declare() {
    let (x, y) = (var("x"), var("y"));

    let same = and_all(vec![equal(&x, 1), equal(&y, 1), distinct(&x, &y)]);
    let different = and_all(vec![equal(&x, 1), equal(&y, 2), distinct(&x, &y)]);

    assert_eq!(same.run().successes().count(), 0);
    assert_eq!(different.run().successes().count(), 1);
}

/// A constraint binding half its variables before declaration still waits
/// for the other half.
#[test]
fn test_constraint_partially_bound() {
    let (x, y) = (var("x"), var("y"));

    let goal = and_all(vec![equal(&x, 1), distinct(&x, &y), equal(&y, 1)]);
    assert_eq!(goal.run().successes().count(), 0);

    let goal = and_all(vec![equal(&x, 1), distinct(&x, &y), equal(&y, 3)]);
    assert_eq!(goal.run().successes().count(), 1);
}

/// A constraint survives when its variable is aliased to another variable
/// that receives the value.
#[test]
fn test_constraint_follows_alias() {
    let (x, y, z) = (var("x"), var("y"), var("z"));

    let goal = and_all(vec![
        equal(&z, 5),
        distinct(&x, &z),
        equal(&x, &y),
        equal(&y, 5),
    ]);

    assert_eq!(goal.run().successes().count(), 0);
}

/// A constraint declared on an already aliased variable fires when the
/// alias target receives the value.
#[test]
fn test_constraint_declared_after_alias() {
    let (x, y, z) = (var("x"), var("y"), var("z"));

    let goal = and_all(vec![
        equal(&x, &y),
        distinct(&x, &z),
        equal(&z, 1),
        equal(&y, 1),
    ]);
    assert_eq!(goal.run().successes().count(), 0);

    let goal = and_all(vec![
        equal(&x, &y),
        distinct(&x, &z),
        equal(&z, 1),
        equal(&y, 2),
    ]);
    assert_eq!(goal.run().successes().count(), 1);
}

// =============================================================================
// And / Or Algebra
// =============================================================================

/// `and_all` over three goals equals the pairwise left fold.
#[test]
fn test_and_all_equals_left_fold() {
    let (x, y) = (var("x"), var("y"));
    let g1 = || or(vec![equal(&x, 1), equal(&x, 2), equal(&x, 3)]);
    let g2 = || or(vec![equal(&y, 1), equal(&y, 2)]);
    let g3 = || distinct(&x, &y);

    let flat = and_all(vec![g1(), g2(), g3()]);
    let folded = and(and(g1(), g2()), g3());

    let variables = [x.clone(), y.clone()];
    let flat_results = result_set(&flat, &variables);
    assert_eq!(flat_results, result_set(&folded, &variables));
    assert_eq!(flat_results.len(), 4);
}

/// `or(g1, g2)` and `or(g2, g1)` produce the same set of results.
#[test]
fn test_or_commutative_as_set() {
    let x = var("x");
    let g1 = || or(vec![equal(&x, 1), equal(&x, 2)]);
    let g2 = || equal(&x, 3);

    let variables = [x.clone()];
    assert_eq!(
        result_set(&or(vec![g1(), g2()]), &variables),
        result_set(&or(vec![g2(), g1()]), &variables)
    );
}

/// `and` is associative: the grouping of three conjuncts does not change
/// the result set.
#[test]
fn test_and_associative() {
    let (x, y) = (var("x"), var("y"));
    let a = || or(vec![equal(&x, 1), equal(&x, 2), equal(&x, 3)]);
    let b = || or(vec![equal(&y, 2), equal(&y, 3)]);
    let c = || distinct(&x, &y);

    let left = and(and(a(), b()), c());
    let right = and(a(), and(b(), c()));

    let variables = [x.clone(), y.clone()];
    let left_results = result_set(&left, &variables);
    assert_eq!(left_results, result_set(&right, &variables));
    assert_eq!(left_results.len(), 4);
}

/// `or` is associative: nesting disjunctions either way yields the same set.
#[test]
fn test_or_associative() {
    let x = var("x");
    let a = || equal(&x, 1);
    let b = || or(vec![equal(&x, 2), equal(&x, 3)]);
    let c = || equal(&x, 4);

    let left = or(vec![or(vec![a(), b()]), c()]);
    let right = or(vec![a(), or(vec![b(), c()])]);

    let variables = [x.clone()];
    let left_results = result_set(&left, &variables);
    assert_eq!(left_results, result_set(&right, &variables));
    assert_eq!(left_results.len(), 4);
}

/// `and` distributes over `or`.
#[test]
fn test_and_distributes_over_or() {
    let (x, y) = (var("x"), var("y"));
    let a = || or(vec![equal(&x, 1), equal(&x, 2)]);
    let b = || equal(&y, 1);
    let c = || and(equal(&y, 2), distinct(&x, &y));

    let distributed_left = and(a(), or(vec![b(), c()]));
    let distributed_right = or(vec![and(a(), b()), and(a(), c())]);

    let variables = [x.clone(), y.clone()];
    let left_results = result_set(&distributed_left, &variables);
    assert_eq!(left_results, result_set(&distributed_right, &variables));
    assert_eq!(left_results.len(), 3);
}

/// Empty conjunction succeeds once; empty disjunction yields nothing.
#[test]
fn test_empty_combinators() {
    assert_eq!(and_all(vec![]).run().successes().count(), 1);
    assert_eq!(or(vec![]).run().successes().count(), 0);
}

// =============================================================================
// Failure Propagation
// =============================================================================

/// A failing first conjunct yields only failure markers.
#[test]
fn test_and_with_failing_goal_is_empty() {
    let x = var("x");
    let goal = and(equal(1, 2), or(vec![equal(&x, 1), equal(&x, 2)]));

    let items: Vec<Option<State>> = goal.run().collect();

    assert!(!items.is_empty());
    assert!(items.iter().all(Option::is_none));
}

/// A failing disjunct leaves exactly the successful branch's results.
#[test]
fn test_or_with_failing_branch() {
    let x = var("x");
    let goal = or(vec![equal(1, 2), equal(&x, 7)]);

    let states: Vec<State> = goal.run().successes().collect();

    assert_eq!(states.len(), 1);
    assert_eq!(states[0].value_of(&x), Some(&json!(7)));
}

/// `succeed` and `fail` are identities for `and` and `or` respectively.
#[test]
fn test_identities() {
    let x = var("x");
    let variables = [x.clone()];

    assert_eq!(
        result_set(&and(succeed(), equal(&x, 1)), &variables),
        result_set(&equal(&x, 1), &variables)
    );
    assert_eq!(
        result_set(&or(vec![fail(), equal(&x, 1)]), &variables),
        result_set(&equal(&x, 1), &variables)
    );
}

// =============================================================================
// Infinite Relations
// =============================================================================

fn naturals(variable: Variable, from: i64) -> Goal {
    Goal::delay(move || {
        or(vec![
            equal(&variable, from),
            naturals(variable.clone(), from + 1),
        ])
    })
}

/// Pulling a prefix of an infinite relation terminates.
#[test]
fn test_infinite_relation_prefix() {
    let n = var("n");
    let values: Vec<i64> = naturals(n.clone(), 0)
        .run()
        .successes()
        .take(5)
        .filter_map(|state| state.value_of(&n).and_then(|v| v.as_i64()))
        .collect();

    assert_eq!(values, vec![0, 1, 2, 3, 4]);
}

/// An infinite branch does not starve its finite neighbour.
#[test]
fn test_infinite_branch_does_not_starve() {
    let n = var("n");
    let goal = or(vec![naturals(n.clone(), 0), equal(&n, "finite")]);

    let found = goal
        .run()
        .successes()
        .take(10)
        .any(|state| state.value_of(&n) == Some(&json!("finite")));

    assert!(found);
}
