//! Specifying the sequential behavior of shared objects.
use std::fmt::Debug;
use std::hash::Hash;

pub mod counter;
pub mod snapshot;

/// A sequential specification of a shared object.
///
/// This trait defines how operations performed on the object affect its state.
///
/// # Examples
///
/// For an example, see [`CounterSpecification`](counter::CounterSpecification).
pub trait Specification {
    type State: Clone + Eq + Hash + Debug;
    type Operation: Clone + Debug;

    /// Returns the initial state of the object.
    fn init(&self) -> Self::State;

    /// Returns whether applying an operation to a given state is valid, and
    /// the new state that occurs after the operation has been applied.
    ///
    /// If the operation is not valid, then the state of the object should not change.
    fn apply(&self, operation: &Self::Operation, state: &Self::State) -> (bool, Self::State);
}
