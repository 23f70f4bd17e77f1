//! A sequential specification of a [snapshot object](https://en.wikipedia.org/wiki/Shared_snapshot_objects).
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::linearizability::history::ProcessId;
use crate::specifications::Specification;

use SnapshotOperation::{Scan, Update};

/// An operation for a snapshot object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotOperation<T> {
    /// Scan the object and return a view containing the value of each component.
    ///
    /// If the return value of a scan is not-yet-known, this can be represented
    /// as `Scan(pid, None)`.
    Scan(ProcessId, Option<Vec<T>>),
    /// Set the value of a component of the object.
    Update(ProcessId, T),
}

/// A specification of a [snapshot object](https://en.wikipedia.org/wiki/Shared_snapshot_objects)
/// with a fixed number of components.
///
/// Each component contains a value of type `T`, initially `T::default()`.
pub struct SnapshotSpecification<T> {
    components: usize,
    _value_type: PhantomData<T>,
}

impl<T> SnapshotSpecification<T> {
    /// Creates a specification of a snapshot object with the given number of components.
    pub fn new(components: usize) -> Self {
        Self {
            components,
            _value_type: PhantomData,
        }
    }
}

impl<T: Clone + Debug + Default + Eq + Hash> Specification for SnapshotSpecification<T> {
    type State = Vec<T>;
    type Operation = SnapshotOperation<T>;

    fn init(&self) -> Self::State {
        vec![T::default(); self.components]
    }

    fn apply(&self, operation: &Self::Operation, state: &Self::State) -> (bool, Self::State) {
        match operation {
            Scan(_, result) => match result {
                Some(view) => (view == state, state.clone()),
                None => panic!("Cannot apply Scan with an unknown return value."),
            },
            Update(i, value) => {
                let mut new_state = state.clone();
                new_state[*i] = value.clone();
                (true, new_state)
            }
        }
    }
}
