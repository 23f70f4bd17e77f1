//! Synchronization primitives used by every shared object in the crate.
//!
//! With the `shuttle` feature enabled these are replaced by their `shuttle`
//! counterparts, so that tests can explore thread interleavings.
#[cfg(feature = "shuttle")]
pub(crate) use shuttle::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Mutex,
};
#[cfg(not(feature = "shuttle"))]
pub(crate) use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Mutex,
};

/// Marks a shared-memory access that `shuttle` cannot see on its own, such as
/// an operation on an `ArcSwap`, as a point where another thread may run.
#[cfg(feature = "shuttle")]
pub(crate) use shuttle::thread::yield_now as switch_point;

/// Marks a shared-memory access that `shuttle` cannot see on its own, such as
/// an operation on an `ArcSwap`, as a point where another thread may run.
#[cfg(not(feature = "shuttle"))]
#[inline(always)]
pub(crate) fn switch_point() {}
