//! Non-blocking snapshot objects, and a wait-free counter built on top of them.
//!
//! All objects in this crate are built from single-word atomic reads and writes,
//! and never acquire a lock (with the exception of [`snapshot::MutexSnapshot`],
//! which exists as a baseline for comparison).
pub mod counter;
pub(crate) mod exclusive;
pub mod register;
pub mod snapshot;
pub(crate) mod sync;

pub use counter::{Counter, CountingServer, Reader, Server};
pub use register::Register;
pub use snapshot::{AtomicSnapshot, DualScanSnapshot, MutexSnapshot, ProcessId, Snapshot};
