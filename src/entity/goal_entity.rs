//! Serializable goal trees

use serde::{Deserialize, Serialize};

use super::value_ref::ValueRef;
use crate::logic::{self, ConstraintCheck, Goal, Value};

/// The storable skeleton of a goal.
///
/// Custom constraints are stored by name and parameters only. The inline
/// goal of a freshly built constraint is never written; after a round trip
/// it is `None` and the converter rebuilds it through the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GoalEntity {
    Equal {
        first: ValueRef,
        second: ValueRef,
    },
    And {
        goals: Vec<GoalEntity>,
    },
    Or {
        goals: Vec<GoalEntity>,
    },
    Constraint {
        name: String,
        parameters: Vec<ValueRef>,
        #[serde(skip)]
        goal: Option<Goal>,
    },
}

impl GoalEntity {
    /// Short name of the variant, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            GoalEntity::Equal { .. } => "equal",
            GoalEntity::And { .. } => "and",
            GoalEntity::Or { .. } => "or",
            GoalEntity::Constraint { .. } => "constraint",
        }
    }

    /// True if the tree contains a constraint whose goal lives only in memory
    pub fn has_inline_goals(&self) -> bool {
        let mut pending = vec![self];
        while let Some(entity) = pending.pop() {
            match entity {
                GoalEntity::Constraint { goal: Some(_), .. } => return true,
                GoalEntity::And { goals } | GoalEntity::Or { goals } => pending.extend(goals),
                _ => {}
            }
        }
        false
    }
}

impl PartialEq for GoalEntity {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                GoalEntity::Equal { first, second },
                GoalEntity::Equal {
                    first: other_first,
                    second: other_second,
                },
            ) => first == other_first && second == other_second,
            (GoalEntity::And { goals }, GoalEntity::And { goals: others })
            | (GoalEntity::Or { goals }, GoalEntity::Or { goals: others }) => goals == others,
            (
                GoalEntity::Constraint {
                    name,
                    parameters,
                    goal,
                },
                GoalEntity::Constraint {
                    name: other_name,
                    parameters: other_parameters,
                    goal: other_goal,
                },
            ) => {
                let same_goal = match (goal, other_goal) {
                    (None, None) => true,
                    (Some(a), Some(b)) => a.same_as(b),
                    _ => false,
                };
                name == other_name && parameters == other_parameters && same_goal
            }
            _ => false,
        }
    }
}

/// Equality between two values
pub fn eq(first: impl Into<Value>, second: impl Into<Value>) -> GoalEntity {
    GoalEntity::Equal {
        first: ValueRef::from(first.into()),
        second: ValueRef::from(second.into()),
    }
}

/// Conjunction of goals
pub fn and(goals: Vec<GoalEntity>) -> GoalEntity {
    GoalEntity::And { goals }
}

/// Disjunction of goals
pub fn or(goals: Vec<GoalEntity>) -> GoalEntity {
    GoalEntity::Or { goals }
}

/// Builds a named custom constraint.
///
/// Every variable among `parameters` becomes a dependent variable of the
/// check. `name` must match the name the constructor is registered under so
/// the constraint can be rebuilt after it was stored.
pub fn create_constraint(
    name: impl Into<String>,
    parameters: Vec<Value>,
    check: ConstraintCheck,
) -> GoalEntity {
    let variables = parameters
        .iter()
        .filter_map(Value::as_variable)
        .cloned()
        .collect();
    GoalEntity::Constraint {
        name: name.into(),
        parameters: parameters.iter().map(ValueRef::from).collect(),
        goal: Some(logic::constraint(variables, check)),
    }
}
