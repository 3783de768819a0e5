//! Lazy result streams
//!
//! A [`GoalStream`] is a pull-based, possibly infinite sequence of
//! `Option<State>`. `None` items are failure markers: a branch that was
//! explored and rejected. A faulted state is passed through untouched and
//! surfaces as an error from [`GoalStream::results`]. Nothing is computed
//! until the consumer pulls, and dropping a stream part-way has no side
//! effects.
//!
//! Merging is fair: [`GoalStream::interleave`] visits its branches round-robin
//! and [`GoalStream::bind`] alternates between discovering new states from the
//! first stream and draining the streams already spawned from them, so no
//! branch is starved by an infinite neighbour.

use std::collections::VecDeque;
use std::fmt;
use std::iter;

use super::errors::{LogicError, LogicResult};
use super::goal::Goal;
use super::state::State;

/// A lazy sequence of states and failure markers.
pub struct GoalStream {
    inner: Box<dyn Iterator<Item = Option<State>> + Send>,
}

impl GoalStream {
    /// Wraps any iterator of states and markers
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Option<State>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            inner: Box::new(items.into_iter()),
        }
    }

    /// A stream with no items
    pub fn empty() -> Self {
        Self::from_items(iter::empty())
    }

    /// A stream with a single item, which may be a failure marker
    pub fn once(item: Option<State>) -> Self {
        Self::from_items(iter::once(item))
    }

    /// A stream whose construction is deferred until the first pull
    pub fn lazy<F>(make: F) -> Self
    where
        F: FnOnce() -> GoalStream + Send + 'static,
    {
        Self {
            inner: Box::new(Lazy::Pending(Some(Box::new(make)))),
        }
    }

    /// Fair round-robin merge of several streams.
    ///
    /// Each stream keeps its internal order; the order across streams is
    /// the visiting order and is not otherwise meaningful.
    pub fn interleave(streams: Vec<GoalStream>) -> Self {
        Self {
            inner: Box::new(Interleave {
                active: streams.into_iter().collect(),
            }),
        }
    }

    /// Runs `goal` against every state of `self` and merges the results.
    ///
    /// Failure markers of `self` are not fed to `goal`; each is forwarded as
    /// a marker so that a pull always returns after bounded work. Faulted
    /// states skip `goal` and are forwarded as they are.
    pub fn bind(self, goal: Goal) -> Self {
        Self {
            inner: Box::new(Bind {
                source: Some(self),
                goal,
                spawned: VecDeque::new(),
                pull_source: true,
            }),
        }
    }

    /// Drops failure markers and faulted states.
    ///
    /// Use [`GoalStream::results`] where a fault must end the query.
    pub fn successes(self) -> impl Iterator<Item = State> + Send {
        self.flatten().filter(|state| !state.is_faulted())
    }

    /// Drops failure markers and reports the first fault as an error, after
    /// which the stream ends.
    pub fn results(self) -> impl Iterator<Item = LogicResult<State>> + Send {
        Results { stream: Some(self) }
    }
}

impl Iterator for GoalStream {
    type Item = Option<State>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl fmt::Debug for GoalStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalStream").finish_non_exhaustive()
    }
}

type Thunk = Box<dyn FnOnce() -> GoalStream + Send>;

enum Lazy {
    Pending(Option<Thunk>),
    Running(GoalStream),
}

impl Iterator for Lazy {
    type Item = Option<State>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Lazy::Pending(make) = self {
            let stream = match make.take() {
                Some(make) => make(),
                None => return None,
            };
            *self = Lazy::Running(stream);
        }
        match self {
            Lazy::Running(stream) => stream.next(),
            Lazy::Pending(_) => None,
        }
    }
}

struct Interleave {
    active: VecDeque<GoalStream>,
}

impl Iterator for Interleave {
    type Item = Option<State>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut stream) = self.active.pop_front() {
            if let Some(item) = stream.next() {
                self.active.push_back(stream);
                return Some(item);
            }
        }
        None
    }
}

struct Bind {
    source: Option<GoalStream>,
    goal: Goal,
    spawned: VecDeque<GoalStream>,
    pull_source: bool,
}

impl Iterator for Bind {
    type Item = Option<State>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.pull_source || self.spawned.is_empty() {
                self.pull_source = false;
                if let Some(source) = self.source.as_mut() {
                    match source.next() {
                        Some(Some(state)) if state.is_faulted() => return Some(Some(state)),
                        Some(Some(state)) => self.spawned.push_back(self.goal.apply(state)),
                        Some(None) => return Some(None),
                        None => self.source = None,
                    }
                }
            }

            let Some(mut stream) = self.spawned.pop_front() else {
                if self.source.is_none() {
                    return None;
                }
                continue;
            };
            self.pull_source = true;
            if let Some(item) = stream.next() {
                self.spawned.push_back(stream);
                return Some(item);
            }
        }
    }
}

struct Results {
    stream: Option<GoalStream>,
}

impl Iterator for Results {
    type Item = LogicResult<State>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stream.as_mut()?.flatten().next();
        let Some(state) = next else {
            self.stream = None;
            return None;
        };
        let fault: Option<LogicError> = state.fault().cloned();
        match fault {
            Some(error) => {
                self.stream = None;
                Some(Err(error))
            }
            None => Some(Ok(state)),
        }
    }
}
