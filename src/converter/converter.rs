//! Goal tree to executable goal conversion
//!
//! The walk uses an explicit stack of frames instead of recursion, so the
//! depth of a stored tree is bounded by heap, not by the thread stack.
//!
//! Each frame records the combinator it will apply, the children still to
//! visit and the goals converted so far. Leaves are converted in place;
//! `and`/`or` children get a frame of their own that is finished before the
//! parent resumes.

use std::slice;

use super::errors::{ConverterError, ConverterResult};
use crate::entity::GoalEntity;
use crate::logic::{self, Goal, Value};
use crate::registry::ConstraintRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    None,
    And,
    Or,
}

struct Frame<'a> {
    combinator: Combinator,
    pending: slice::Iter<'a, GoalEntity>,
    goals: Vec<Goal>,
}

impl<'a> Frame<'a> {
    fn leaf(goal: Goal) -> Self {
        Self {
            combinator: Combinator::None,
            pending: <&[GoalEntity]>::default().iter(),
            goals: vec![goal],
        }
    }

    fn branch(combinator: Combinator, children: &'a [GoalEntity]) -> Self {
        Self {
            combinator,
            pending: children.iter(),
            goals: Vec::with_capacity(children.len()),
        }
    }

    fn finish(mut self) -> Option<Goal> {
        match self.combinator {
            Combinator::None => self.goals.pop(),
            Combinator::And => Some(logic::and_all(self.goals)),
            Combinator::Or => Some(logic::or(self.goals)),
        }
    }
}

/// Converts stored goal trees using a constraint registry.
#[derive(Debug, Clone, Copy)]
pub struct GoalConverter<'r> {
    registry: &'r ConstraintRegistry,
}

impl<'r> GoalConverter<'r> {
    pub fn new(registry: &'r ConstraintRegistry) -> Self {
        Self { registry }
    }

    /// Converts a goal tree into an executable goal.
    ///
    /// Children keep their stored order. Fails if a constraint name is not
    /// registered or its constructor rejects the stored parameters.
    pub fn convert(&self, entity: &GoalEntity) -> ConverterResult<Goal> {
        let mut stack = vec![self.frame_for(entity)?];
        let mut output: Vec<Goal> = Vec::with_capacity(1);

        while let Some(mut frame) = stack.pop() {
            let Some(child) = frame.pending.next() else {
                if let Some(goal) = frame.finish() {
                    match stack.last_mut() {
                        Some(parent) => parent.goals.push(goal),
                        None => output.push(goal),
                    }
                }
                continue;
            };

            match child {
                GoalEntity::And { goals } => {
                    stack.push(frame);
                    stack.push(Frame::branch(Combinator::And, goals));
                }
                GoalEntity::Or { goals } => {
                    stack.push(frame);
                    stack.push(Frame::branch(Combinator::Or, goals));
                }
                leaf => {
                    frame.goals.push(self.convert_leaf(leaf)?);
                    stack.push(frame);
                }
            }
        }

        match output.pop() {
            Some(goal) if output.is_empty() => Ok(goal),
            Some(_) => Err(ConverterError::Malformed(output.len() + 1)),
            None => Err(ConverterError::Malformed(0)),
        }
    }

    fn frame_for<'a>(&self, entity: &'a GoalEntity) -> ConverterResult<Frame<'a>> {
        match entity {
            GoalEntity::And { goals } => Ok(Frame::branch(Combinator::And, goals)),
            GoalEntity::Or { goals } => Ok(Frame::branch(Combinator::Or, goals)),
            leaf => Ok(Frame::leaf(self.convert_leaf(leaf)?)),
        }
    }

    fn convert_leaf(&self, entity: &GoalEntity) -> ConverterResult<Goal> {
        match entity {
            GoalEntity::Equal { first, second } => {
                Ok(logic::equal(first.to_value(), second.to_value()))
            }
            GoalEntity::Constraint {
                goal: Some(goal), ..
            } => Ok(goal.clone()),
            GoalEntity::Constraint {
                name,
                parameters,
                goal: None,
            } => {
                let constructor = self
                    .registry
                    .get(name)
                    .ok_or_else(|| ConverterError::UnknownConstraint(name.clone()))?;
                let values: Vec<Value> = parameters.iter().map(|p| p.to_value()).collect();
                let rebuilt = constructor(&values).map_err(|source| ConverterError::Constraint {
                    name: name.clone(),
                    source,
                })?;
                match rebuilt {
                    GoalEntity::Constraint {
                        goal: Some(goal), ..
                    } => Ok(goal),
                    _ => Err(ConverterError::MissingGoal(name.clone())),
                }
            }
            GoalEntity::And { .. } | GoalEntity::Or { .. } => {
                Err(ConverterError::Malformed(0))
            }
        }
    }
}
