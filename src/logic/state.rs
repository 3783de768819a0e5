//! Binding environment
//!
//! A [`State`] is an immutable snapshot of variable bindings plus the deferred
//! constraints registered against each variable. Every successful unification
//! produces a new state; unaffected maps are shared between the old and the
//! new state and only copied when written.
//!
//! # Invariants
//!
//! - A variable is only ever bound while it resolves to itself, so no chain of
//!   bindings can lead back to the variable it started from.
//! - Constraints run in registration order.
//! - A constraint is re-checked only when one of its variables becomes bound
//!   and every one of its variables has a value.
//! - A literal is only bound to a variable whose declared type admits it. Two
//!   variables are aliased by pointing the wider-typed one at the narrower
//!   one, so the end of a chain carries the narrowest type in the chain.
//! - A faulted state is final: further unification leaves it unchanged.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use super::errors::LogicError;
use super::value::{Value, Variable};

/// A predicate over a state. `None` rejects the branch.
pub type ConstraintCheck = Arc<dyn Fn(&State) -> Option<State> + Send + Sync>;

/// A constraint waiting for its variables to be bound.
#[derive(Clone)]
pub struct DeferredConstraint {
    variables: Arc<[Variable]>,
    check: ConstraintCheck,
}

impl DeferredConstraint {
    pub fn new(variables: Vec<Variable>, check: ConstraintCheck) -> Self {
        Self {
            variables: variables.into(),
            check,
        }
    }

    /// Variables that must all be bound before the check runs
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Runs the predicate against a state
    pub fn apply(&self, state: &State) -> Option<State> {
        (self.check)(state)
    }

    /// True if both handles refer to the same registered constraint
    pub fn same_as(&self, other: &DeferredConstraint) -> bool {
        Arc::ptr_eq(&self.check, &other.check)
    }

    fn is_ready(&self, state: &State) -> bool {
        self.variables.iter().all(|variable| state.has_value(variable))
    }
}

impl fmt::Debug for DeferredConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredConstraint")
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}

/// Immutable binding environment.
#[derive(Clone, Default)]
pub struct State {
    bindings: Arc<HashMap<Variable, Value>>,
    constraints: Arc<HashMap<Variable, Vec<DeferredConstraint>>>,
    fault: Option<Arc<LogicError>>,
}

impl State {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a value through the binding chain.
    ///
    /// Literals and unbound variables are returned as they are.
    pub fn resolve<'a>(&'a self, value: &'a Value) -> &'a Value {
        let mut current = value;
        while let Value::Variable(variable) = current {
            match self.bindings.get(variable) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// Returns the literal a variable resolves to, if any
    pub fn value_of(&self, variable: &Variable) -> Option<&serde_json::Value> {
        let start = self.bindings.get(variable)?;
        self.resolve(start).as_literal()
    }

    /// True if the variable resolves to a literal
    pub fn has_value(&self, variable: &Variable) -> bool {
        self.value_of(variable).is_some()
    }

    /// Number of direct bindings held by this state
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Variables with a direct binding
    pub fn bound_variables(&self) -> impl Iterator<Item = &Variable> {
        self.bindings.keys()
    }

    /// Constraints registered against a variable, in registration order
    pub fn constraints_of(&self, variable: &Variable) -> &[DeferredConstraint] {
        self.constraints
            .get(variable)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_constraint(&self, variable: &Variable) -> bool {
        !self.constraints_of(variable).is_empty()
    }

    /// Marks this branch as faulted. Constraint checks use this to abort the
    /// query instead of quietly rejecting the branch.
    pub fn with_fault(&self, error: LogicError) -> State {
        let mut next = self.clone();
        next.fault = Some(Arc::new(error));
        next
    }

    pub fn fault(&self) -> Option<&LogicError> {
        self.fault.as_deref()
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    /// Returns a new state with the constraint appended to the list of the
    /// variable at the end of `variable`'s binding chain.
    ///
    /// Registering the same constraint twice on one chain is a no-op.
    pub fn add_constraint(&self, variable: &Variable, constraint: DeferredConstraint) -> State {
        let start = Value::Variable(variable.clone());
        let key = match self.resolve(&start) {
            Value::Variable(root) => root.clone(),
            Value::Literal(_) => variable.clone(),
        };
        if self
            .constraints_of(&key)
            .iter()
            .any(|existing| existing.same_as(&constraint))
        {
            return self.clone();
        }

        let mut next = self.clone();
        Arc::make_mut(&mut next.constraints)
            .entry(key)
            .or_default()
            .push(constraint);
        next
    }

    /// Unifies two values.
    ///
    /// Returns `None` when the values cannot be made equal or when a
    /// constraint woken by the new binding rejects the result.
    pub fn unify(&self, first: &Value, second: &Value) -> Option<State> {
        if self.is_faulted() {
            return Some(self.clone());
        }
        let first = self.resolve(first);
        let second = self.resolve(second);

        if first == second {
            return Some(self.clone());
        }

        match (first, second) {
            (Value::Variable(a), Value::Variable(b)) => {
                let narrow = a.value_type().meet(&b.value_type())?;
                if b.value_type() == narrow {
                    Some(self.bind_to_variable(a, b))
                } else {
                    Some(self.bind_to_variable(b, a))
                }
            }
            (Value::Variable(variable), Value::Literal(literal))
            | (Value::Literal(literal), Value::Variable(variable)) => {
                if !variable.value_type().admits(literal) {
                    return None;
                }
                self.bind_and_check(variable, literal)
            }
            _ => None,
        }
    }

    /// Projects the state onto the given variables.
    ///
    /// An empty selection projects every directly bound variable.
    pub fn values_of(&self, variables: &[Variable]) -> Bindings {
        let project = |variable: &Variable| {
            let value = Value::Variable(variable.clone());
            (variable.clone(), self.resolve(&value).clone())
        };
        if variables.is_empty() {
            Bindings(self.bindings.keys().map(project).collect())
        } else {
            Bindings(variables.iter().map(project).collect())
        }
    }

    // Both sides are unbound: the variable now points at the target and its
    // pending constraints follow, so they wake when the target gets a value.
    fn bind_to_variable(&self, variable: &Variable, target: &Variable) -> State {
        let mut next = self.clone();
        Arc::make_mut(&mut next.bindings)
            .insert(variable.clone(), Value::Variable(target.clone()));

        let carried: Vec<DeferredConstraint> = self
            .constraints_of(variable)
            .iter()
            .filter(|constraint| {
                !self
                    .constraints_of(target)
                    .iter()
                    .any(|existing| existing.same_as(constraint))
            })
            .cloned()
            .collect();
        if !carried.is_empty() {
            Arc::make_mut(&mut next.constraints)
                .entry(target.clone())
                .or_default()
                .extend(carried);
        }
        next
    }

    fn bind_and_check(&self, variable: &Variable, literal: &serde_json::Value) -> Option<State> {
        let mut next = self.clone();
        Arc::make_mut(&mut next.bindings).insert(variable.clone(), Value::Literal(literal.clone()));

        let ready: Vec<DeferredConstraint> = next
            .constraints_of(variable)
            .iter()
            .filter(|constraint| constraint.is_ready(&next))
            .cloned()
            .collect();

        ready.iter().try_fold(next, |state, constraint| {
            if state.is_faulted() {
                Some(state)
            } else {
                constraint.apply(&state)
            }
        })
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        if self.bindings != other.bindings || self.fault != other.fault {
            return false;
        }
        if self.constraints.len() != other.constraints.len() {
            return false;
        }
        self.constraints.iter().all(|(variable, constraints)| {
            let theirs = other.constraints_of(variable);
            theirs.len() == constraints.len()
                && constraints.iter().zip(theirs).all(|(a, b)| a.same_as(b))
        })
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings: BTreeMap<&Variable, &Value> = self.bindings.iter().collect();
        let constraints: BTreeMap<&Variable, usize> = self
            .constraints
            .iter()
            .map(|(variable, list)| (variable, list.len()))
            .collect();
        f.debug_struct("State")
            .field("bindings", &bindings)
            .field("constraints", &constraints)
            .field("fault", &self.fault)
            .finish()
    }
}

/// Variables projected out of a state, resolved as far as possible.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bindings(BTreeMap<Variable, Value>);

impl Bindings {
    pub fn get(&self, variable: &Variable) -> Option<&Value> {
        self.0.get(variable)
    }

    /// Returns the literal bound to a variable, if it has one
    pub fn literal(&self, variable: &Variable) -> Option<&serde_json::Value> {
        self.get(variable).and_then(Value::as_literal)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Value)> {
        self.0.iter()
    }

    /// Renders the bindings as a JSON object keyed by variable name.
    ///
    /// Unbound variables are rendered as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .0
            .iter()
            .map(|(variable, value)| {
                let rendered = value.as_literal().cloned().unwrap_or(serde_json::Value::Null);
                (variable.name().to_string(), rendered)
            })
            .collect();
        serde_json::Value::Object(object)
    }
}
