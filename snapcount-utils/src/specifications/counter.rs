//! A sequential specification of a shared counter.
use crate::linearizability::history::ProcessId;
use crate::specifications::Specification;

use CounterOperation::{Increment, Read};

/// An operation for a shared counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CounterOperation {
    /// Add one to the counter, on behalf of a server.
    Increment(ProcessId),
    /// Read the value of the counter.
    ///
    /// If the value is not-yet-known, this can be represented as `Read(None)`.
    Read(Option<i64>),
}

/// A specification of a counter that starts at zero and is only ever incremented.
pub struct CounterSpecification;

impl Specification for CounterSpecification {
    type State = i64;
    type Operation = CounterOperation;

    fn init(&self) -> Self::State {
        0
    }

    fn apply(&self, operation: &Self::Operation, state: &Self::State) -> (bool, Self::State) {
        match operation {
            Increment(_) => (true, state + 1),
            Read(Some(value)) => (value == state, *state),
            Read(None) => panic!("Cannot apply Read with an unknown return value."),
        }
    }
}
