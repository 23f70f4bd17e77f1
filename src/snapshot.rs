//! Shared snapshot objects.
//!
//! A snapshot object has one component per writer. Writers [`update`](Snapshot::update)
//! their own component, and scanners obtain a consistent view of every
//! component at once with [`scan`](Snapshot::scan).
//!
//! | Object               | `update`   | `scan`                               |
//! |----------------------|------------|--------------------------------------|
//! | [`AtomicSnapshot`]   | wait-free  | lock-free, any number of scanners    |
//! | [`DualScanSnapshot`] | wait-free  | wait-free, at most two scanners      |
//! | [`MutexSnapshot`]    | blocking   | blocking                             |
mod atomic;
pub use atomic::AtomicSnapshot;

mod dual_scan;
pub use dual_scan::DualScanSnapshot;

mod mutex;
pub use mutex::MutexSnapshot;

/// An ID for a process (or thread).
pub type ProcessId = usize;

/// A single-writer multi-reader snapshot object.
///
/// # Preconditions
///
/// Component `i` must only ever be updated by one thread at a time. How many
/// threads may call `scan` concurrently depends on the implementation. None of
/// these conditions are reported as errors; debug builds panic when they
/// detect a violation.
pub trait Snapshot {
    type Value: Clone;

    /// Creates a snapshot object with the given number of components, each
    /// containing the default value.
    fn new(components: usize) -> Self;

    /// Returns the number of components in the object.
    fn len(&self) -> usize;

    /// Returns whether the object has no components.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value of each component in the object, as performed by
    /// process `i`.
    fn scan(&self, i: ProcessId) -> Vec<Self::Value>;

    /// Sets the contents of the _i^{th}_ component to the specified value.
    fn update(&self, i: ProcessId, value: Self::Value);
}
