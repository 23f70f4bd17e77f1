//! Detection of violated single-owner preconditions.
//!
//! Most operations in this crate require that at most one thread act in a
//! given role at a time: one writer per snapshot component, one reader per
//! counter, one thread per scanner slot. These are obligations of the caller.
//! In debug builds [`Exclusive`] checks them, panicking as soon as two threads
//! claim the same index. In release builds it holds no state and every check
//! compiles away.
#[cfg(not(debug_assertions))]
use std::marker::PhantomData;

#[cfg(debug_assertions)]
use crate::sync::{AtomicBool, Ordering};

/// A set of indices that may each be held by at most one thread at a time.
pub(crate) struct Exclusive {
    #[cfg(debug_assertions)]
    held: Box<[AtomicBool]>,
    role: &'static str,
}

/// Proof that an index of an [`Exclusive`] is held. The index is released on drop.
pub(crate) struct Entered<'a> {
    #[cfg(debug_assertions)]
    flag: &'a AtomicBool,
    #[cfg(not(debug_assertions))]
    _exclusive: PhantomData<&'a Exclusive>,
}

impl Exclusive {
    /// Creates a set of `len` unheld indices for callers acting as `role`.
    pub(crate) fn new(len: usize, role: &'static str) -> Self {
        #[cfg(not(debug_assertions))]
        let _ = len;
        Self {
            #[cfg(debug_assertions)]
            held: (0..len).map(|_| AtomicBool::new(false)).collect(),
            role,
        }
    }

    /// Marks index `i` as held until [`Exclusive::release`] is called.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `i` is already held.
    #[inline]
    pub(crate) fn claim(&self, i: usize) {
        #[cfg(debug_assertions)]
        assert!(
            !self.held[i].swap(true, Ordering::SeqCst),
            "two concurrent {} claimed index {i}",
            self.role
        );
        #[cfg(not(debug_assertions))]
        let _ = (i, self.role);
    }

    /// Releases index `i`.
    #[inline]
    pub(crate) fn release(&self, i: usize) {
        #[cfg(debug_assertions)]
        self.held[i].store(false, Ordering::SeqCst);
        #[cfg(not(debug_assertions))]
        let _ = i;
    }

    /// Holds index `i` for the lifetime of the returned guard.
    #[inline]
    pub(crate) fn enter(&self, i: usize) -> Entered<'_> {
        self.claim(i);
        Entered {
            #[cfg(debug_assertions)]
            flag: &self.held[i],
            #[cfg(not(debug_assertions))]
            _exclusive: PhantomData,
        }
    }
}

impl Drop for Entered<'_> {
    #[inline]
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.flag.store(false, Ordering::SeqCst);
    }
}
