//! Goals and goal combinators
//!
//! A [`Goal`] is a pure function from a [`State`] to a lazy [`GoalStream`].
//! Goals close over arbitrary host logic and therefore cannot be stored; the
//! storable form is a [`GoalEntity`](crate::entity::GoalEntity).

use std::fmt;
use std::sync::Arc;

use super::state::{ConstraintCheck, DeferredConstraint, State};
use super::stream::GoalStream;
use super::value::{Value, Variable};

/// An executable goal.
#[derive(Clone)]
pub struct Goal(Arc<dyn Fn(State) -> GoalStream + Send + Sync>);

impl Goal {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(State) -> GoalStream + Send + Sync + 'static,
    {
        Self(Arc::new(run))
    }

    /// Runs the goal against a state
    pub fn apply(&self, state: State) -> GoalStream {
        (self.0)(state)
    }

    /// Runs the goal against an empty state
    pub fn run(&self) -> GoalStream {
        self.apply(State::new())
    }

    /// Builds the goal only when it is first run.
    ///
    /// This is what allows recursive relations: the recursive call is not
    /// made until a consumer pulls far enough to need it.
    pub fn delay<F>(make: F) -> Self
    where
        F: Fn() -> Goal + Send + Sync + 'static,
    {
        let make = Arc::new(make);
        Goal::new(move |state| {
            let make = make.clone();
            GoalStream::lazy(move || make().apply(state))
        })
    }

    /// True if both handles refer to the same goal function
    pub fn same_as(&self, other: &Goal) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Goal").finish()
    }
}

/// A goal that passes the state through unchanged
pub fn succeed() -> Goal {
    Goal::new(|state| GoalStream::once(Some(state)))
}

/// A goal that always yields a single failure marker
pub fn fail() -> Goal {
    Goal::new(|_| GoalStream::once(None))
}

/// Unifies two values. Yields exactly one item, which is a failure marker
/// when unification fails.
pub fn equal(first: impl Into<Value>, second: impl Into<Value>) -> Goal {
    let first = first.into();
    let second = second.into();
    Goal::new(move |state| GoalStream::once(state.unify(&first, &second)))
}

/// Registers `check` against every variable in `variables`.
///
/// If every variable already has a value the check runs immediately;
/// otherwise it waits until a later unification binds the last of them.
pub fn constraint(variables: Vec<Variable>, check: ConstraintCheck) -> Goal {
    let mut distinct: Vec<Variable> = Vec::with_capacity(variables.len());
    for variable in variables {
        if !distinct.contains(&variable) {
            distinct.push(variable);
        }
    }
    let deferred = DeferredConstraint::new(distinct, check);

    Goal::new(move |state| {
        let all_bound = deferred
            .variables()
            .iter()
            .all(|variable| state.has_value(variable));
        let registered = deferred
            .variables()
            .iter()
            .fold(state, |state, variable| state.add_constraint(variable, deferred.clone()));

        if all_bound {
            GoalStream::once(deferred.apply(&registered))
        } else {
            GoalStream::once(Some(registered))
        }
    })
}

/// Disjunction: every goal runs against the same input state and the
/// results are merged fairly.
pub fn or(goals: Vec<Goal>) -> Goal {
    Goal::new(move |state| {
        let branches = goals
            .iter()
            .map(|goal| {
                let goal = goal.clone();
                let state = state.clone();
                GoalStream::lazy(move || goal.apply(state))
            })
            .collect();
        GoalStream::interleave(branches)
    })
}

/// Conjunction of two goals: `second` runs against every state `first` yields.
///
/// Failure markers from `first` are not discarded: each is forwarded as a
/// marker so a pull returns after bounded work even when `first` rejects
/// every branch. Consumers that only want answers use
/// [`GoalStream::successes`] or [`GoalStream::results`].
pub fn and(first: Goal, second: Goal) -> Goal {
    Goal::new(move |state| first.apply(state).bind(second.clone()))
}

/// Left fold of [`and`] over a list. An empty list succeeds.
pub fn and_all(goals: Vec<Goal>) -> Goal {
    goals.into_iter().reduce(and).unwrap_or_else(succeed)
}
