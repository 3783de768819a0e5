//! Query builder
//!
//! A [`Query`] holds zero or more goal trees, typically the result of a
//! read or a range read, and combines them with further goals before
//! running them through its engine.

use super::engine::Engine;
use super::errors::{EngineError, EngineResult};
use crate::entity::{self, GoalEntity};
use crate::logic::{Bindings, GoalStream, Variable};

/// Builder over the goal trees returned by the engine.
///
/// Every combinator applies to each held tree separately; an empty query
/// stays empty and yields no results.
#[derive(Debug, Clone)]
pub struct Query {
    engine: Engine,
    goals: Vec<GoalEntity>,
}

impl Query {
    pub(crate) fn new(engine: Engine, goals: Vec<GoalEntity>) -> Self {
        Self { engine, goals }
    }

    /// The goal trees this query will run
    pub fn goals(&self) -> &[GoalEntity] {
        &self.goals
    }

    pub fn into_goals(self) -> Vec<GoalEntity> {
        self.goals
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Replace each held tree `g` with `and([g, goals...])`
    pub fn and(self, goals: Vec<GoalEntity>) -> Self {
        self.map_goals(|goal| entity::and(prepend(goal, &goals)))
    }

    /// Replace each held tree `g` with `or([g, goals...])`
    pub fn or(self, goals: Vec<GoalEntity>) -> Self {
        self.map_goals(|goal| entity::or(prepend(goal, &goals)))
    }

    /// Pairs every held tree with every tree of `other` under `join_goal`.
    ///
    /// The result holds `and([mine, theirs, join_goal])` for each pair.
    pub fn join(self, join_goal: GoalEntity, other: Query) -> Self {
        self.join_all(join_goal, vec![other])
    }

    /// Joins with several queries at once; the result is the cartesian
    /// product of all held trees, each combination anded with `join_goal`.
    pub fn join_all(self, join_goal: GoalEntity, others: Vec<Query>) -> Self {
        let mut combinations: Vec<Vec<GoalEntity>> =
            self.goals.into_iter().map(|goal| vec![goal]).collect();

        for other in others {
            combinations = combinations
                .iter()
                .flat_map(|prefix| {
                    other.goals.iter().map(move |goal| {
                        let mut combined = prefix.clone();
                        combined.push(goal.clone());
                        combined
                    })
                })
                .collect();
        }

        let goals = combinations
            .into_iter()
            .map(|mut combined| {
                combined.push(join_goal.clone());
                entity::and(combined)
            })
            .collect();

        Self {
            engine: self.engine,
            goals,
        }
    }

    /// Runs every held tree and lazily projects `variables` out of each
    /// successful state.
    ///
    /// All trees are converted before the first result is produced; results
    /// of different trees are merged fairly. An empty selection projects
    /// every bound variable. A fault raised while running is yielded as an
    /// error and ends the stream.
    pub fn stream(
        &self,
        variables: &[Variable],
    ) -> EngineResult<impl Iterator<Item = EngineResult<Bindings>> + Send> {
        let streams = self
            .goals
            .iter()
            .map(|goal| self.engine.run(goal))
            .collect::<EngineResult<Vec<_>>>()?;

        let variables = variables.to_vec();
        Ok(GoalStream::interleave(streams)
            .results()
            .map(move |result| {
                result
                    .map(|state| state.values_of(&variables))
                    .map_err(EngineError::from)
            }))
    }

    /// Collects the projected results, stopping at the configured
    /// `select_limit` if there is one
    pub fn select(&self, variables: &[Variable]) -> EngineResult<Vec<Bindings>> {
        let results = self.stream(variables)?;
        match self.engine.config().select_limit {
            Some(limit) => results.take(limit).collect(),
            None => results.collect(),
        }
    }

    fn map_goals(self, f: impl Fn(GoalEntity) -> GoalEntity) -> Self {
        Self {
            goals: self.goals.into_iter().map(f).collect(),
            engine: self.engine,
        }
    }
}

fn prepend(first: GoalEntity, rest: &[GoalEntity]) -> Vec<GoalEntity> {
    let mut goals = Vec::with_capacity(rest.len() + 1);
    goals.push(first);
    goals.extend_from_slice(rest);
    goals
}
