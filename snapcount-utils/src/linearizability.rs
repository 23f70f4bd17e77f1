//! Checking [linearizability](https://en.wikipedia.org/wiki/Linearizability) of a
//! history of operations applied to a shared object.
//!
//! For more information, see the documentation of [`WGLChecker`] and [`History`].
use std::collections::HashSet;

use crate::linearizability::history::{Entry, History};
use crate::specifications::Specification;

pub mod history;

/// A linearizability checker.
///
/// An implementation of the algorithm of Jeannette Wing and Chun Gong
/// [\[WG93\]](https://www.cs.cmu.edu/~wing/publications/WingGong93.pdf),
/// with the memoization introduced by Gavin Lowe
/// [\[L17\]](http://www.cs.ox.ac.uk/people/gavin.lowe/LinearizabiltyTesting/),
/// following the description by Alex Horn and Daniel Kroening
/// [\[HK15\]](https://arxiv.org/abs/1504.00204).
///
/// The checker repeatedly linearizes the earliest pending operation that the
/// specification accepts, and backtracks when no remaining operation can be
/// linearized. Every partial linearization is cached along with the state it
/// leads to, so that the search never explores the same configuration twice.
///
/// # Examples
///
/// Two servers increment a counter, while a reader observes it.
///
/// ```
/// use snapcount_utils::specifications::counter::{CounterOperation::*, CounterSpecification};
/// use snapcount_utils::{Action::{Call, Response}, History, WGLChecker};
///
/// let checker = WGLChecker::new(CounterSpecification);
///
/// // P0 |-------------|        Increment
/// // P1   |----|               Increment
/// // P2          |---------|   Read(Some(2))
/// let history = History::from_actions(vec![
///     (0, Call(Increment(0))),
///     (1, Call(Increment(1))),
///     (1, Response(Increment(1))),
///     (2, Call(Read(None))),
///     (0, Response(Increment(0))),
///     (2, Response(Read(Some(2)))),
/// ]);
/// assert!(checker.is_linearizable(history));
///
/// // P0 |---|                  Increment
/// // P2       |---|            Read(Some(0))
/// let history = History::from_actions(vec![
///     (0, Call(Increment(0))),
///     (0, Response(Increment(0))),
///     (2, Call(Read(None))),
///     (2, Response(Read(Some(0)))),
/// ]);
/// assert!(!checker.is_linearizable(history));
/// ```
pub struct WGLChecker<S: Specification> {
    spec: S,
}

type OperationEntry<S> = Entry<<S as Specification>::Operation>;
type LinearizedCall<S> = (
    (OperationEntry<S>, OperationEntry<S>),
    <S as Specification>::State,
);

impl<S: Specification> WGLChecker<S> {
    /// Creates a checker for objects with the given specification.
    pub fn new(spec: S) -> Self {
        Self { spec }
    }

    /// Returns whether the history of operations is linearizable with respect
    /// to the specification.
    pub fn is_linearizable(&self, mut history: History<S::Operation>) -> bool {
        let mut state = self.spec.init();
        let mut linearized = vec![false; history.len()];
        let mut calls: Vec<LinearizedCall<S>> = Vec::new();
        let mut cache: HashSet<(Vec<bool>, S::State)> = HashSet::new();
        let mut curr = 0;
        while !history.is_empty() {
            let pending = match &history[curr] {
                Entry::Call(call) => Some((call.id, call.response)),
                Entry::Response(_) => None,
            };
            let Some((call_id, response_id)) = pending else {
                // Nothing pending can be linearized next, so undo the most
                // recently linearized operation and try its successor.
                match calls.pop() {
                    None => return false,
                    Some(((call, response), old_state)) => {
                        state = old_state;
                        linearized[call.id()] = false;
                        curr = history.unlift(call, response) + 1;
                    }
                }
                continue;
            };
            let (is_valid, new_state) = match &history[history.index_of_id(response_id)] {
                Entry::Response(response) => self.spec.apply(&response.operation, &state),
                Entry::Call(_) => panic!("Response cannot be a call entry"),
            };
            let mut changed = false;
            if is_valid {
                let mut tmp_linearized = linearized.clone();
                tmp_linearized[call_id] = true;
                changed = cache.insert((tmp_linearized, new_state.clone()));
            }
            if changed {
                linearized[call_id] = true;
                let lifted = history.lift(curr);
                calls.push((lifted, state));
                state = new_state;
                curr = 0;
            } else {
                curr += 1;
            }
        }
        true
    }
}
