use std::hint;

use tracing::debug;

use crate::exclusive::Exclusive;
use crate::register::{AtomicRegister, Register};
use crate::snapshot::{ProcessId, Snapshot};

/// A lock-free single-writer multi-reader snapshot object, based on
/// repeatedly collecting the contents of every component.
///
/// Updates swap in a new register in one atomic step and are wait-free. A
/// scan reads every component twice in a row (a _double collect_) and returns
/// as soon as two consecutive collects are identical. Scans are lock-free but not wait-free:
/// a scanner may retry indefinitely if writers keep changing the object
/// between its collects. Any number of threads may scan concurrently.
///
/// Each component stores its value together with a count of the updates
/// applied to it, so a component that is changed and then changed back
/// between two collects is still detected.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use snapcount::{AtomicSnapshot, Snapshot};
///
/// let snapshot = Arc::new(AtomicSnapshot::new(3));
///
/// let handles: Vec<_> = (0..3)
///     .map(|i| {
///         let snapshot = snapshot.clone();
///         thread::spawn(move || snapshot.update(i, i as i32 + 1))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(snapshot.scan(0), vec![1, 2, 3]);
/// ```
pub struct AtomicSnapshot {
    registers: Box<[AtomicRegister<Register>]>,
    writers: Exclusive,
}

impl AtomicSnapshot {
    /// Returns the contents of every component, read one after another.
    fn collect(&self) -> Vec<Register> {
        self.registers.iter().map(AtomicRegister::read).collect()
    }
}

impl Snapshot for AtomicSnapshot {
    type Value = i32;

    fn new(components: usize) -> Self {
        debug!(components, "creating atomic snapshot");
        Self {
            registers: (0..components).map(|_| AtomicRegister::new()).collect(),
            writers: Exclusive::new(components, "writers"),
        }
    }

    fn len(&self) -> usize {
        self.registers.len()
    }

    fn scan(&self, _: ProcessId) -> Vec<Self::Value> {
        let mut previous = self.collect();
        loop {
            let current = self.collect();
            // No component changed between the two collects, so at the moment
            // the second one began every component held exactly these values.
            if previous == current {
                return current.iter().map(Register::value).collect();
            }
            previous = current;
            hint::spin_loop();
        }
    }

    fn update(&self, i: ProcessId, value: Self::Value) {
        debug_assert!(i < self.len(), "component {i} out of bounds");
        let _writer = self.writers.enter(i);
        // Only this thread writes component i, so reading and then writing
        // its sequence number cannot race with another update.
        let seq = self.registers[i].read().seq() + 1;
        self.registers[i].write(Register::new(value, seq));
    }
}
