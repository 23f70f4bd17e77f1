use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::sync::switch_point;

/// A shared-memory cell holding an immutable value of type `T`.
///
/// A write allocates the new value and atomically swaps a pointer to it into
/// the cell. A read copies out the value the pointer currently refers to. The
/// pointed-to value is never modified, so a read can never observe half of one
/// write and half of another, whatever the size of `T`.
///
/// # Memory Ordering
///
/// Every read and write performs at least one [`SeqCst`] atomic operation,
/// which places all cell accesses, along with the `SeqCst` atomics used by the
/// snapshot algorithms in this crate, in a single global order. The snapshot
/// algorithms reason about the relative order of accesses to *different*
/// locations (for instance, a writer reading the current round before writing
/// its slot while a scanner opens a new round before reading that slot), which
/// acquire/release alone does not order.
///
/// [`SeqCst`]: std::sync::atomic::Ordering::SeqCst
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::{hint, thread};
/// use snapcount::register::AtomicRegister;
/// use snapcount::Register;
///
/// let cell: Arc<AtomicRegister<Register>> = Arc::new(AtomicRegister::new());
///
/// let writer = cell.clone();
/// let thread = thread::spawn(move || writer.write(Register::new(1, 1 << 40)));
///
/// while cell.read().seq() == 0 {
///     hint::spin_loop();
/// }
/// assert_eq!(cell.read(), Register::new(1, 1 << 40));
///
/// thread.join().unwrap();
/// ```
pub struct AtomicRegister<T> {
    cell: ArcSwap<T>,
}

impl<T: Copy + Default> AtomicRegister<T> {
    /// Creates a new cell containing the default value of `T`.
    pub fn new() -> Self {
        Self {
            cell: ArcSwap::from_pointee(T::default()),
        }
    }

    /// Returns the value currently contained in the cell.
    #[inline]
    pub fn read(&self) -> T {
        switch_point();
        **self.cell.load()
    }

    /// Replaces the contents of the cell with the specified value.
    #[inline]
    pub fn write(&self, value: T) {
        switch_point();
        self.cell.store(Arc::new(value))
    }
}

impl<T: Copy + Default> Default for AtomicRegister<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default + fmt::Debug> fmt::Debug for AtomicRegister<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicRegister").field(&self.read()).finish()
    }
}
