//! A wait-free shared counter, built from a snapshot object.
//!
//! Each [`CountingServer`] owns one component of the counter's snapshot, in
//! which it publishes the number of increments it has performed so far. The
//! value of the [`Counter`] is the sum of a scan of those components.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use snapcount::{Counter, CountingServer, Reader, Server};
//!
//! const SERVERS: usize = 3;
//!
//! let counter: Arc<Counter> = Arc::new(Counter::new(SERVERS));
//!
//! let handles: Vec<_> = (0..SERVERS)
//!     .map(|i| {
//!         let mut server = CountingServer::new(counter.clone(), i);
//!         thread::spawn(move || {
//!             for _ in 0..1000 {
//!                 server.inc();
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(counter.read(), 3000);
//! ```
use std::sync::Arc;

use tracing::debug;

use crate::exclusive::Exclusive;
use crate::snapshot::{AtomicSnapshot, ProcessId, Snapshot};

/// An object whose aggregate value can be read.
pub trait Reader {
    /// Returns the current value of the object.
    fn read(&self) -> i64;
}

/// An object that increments a shared value.
pub trait Server {
    /// Adds one to the shared value.
    fn inc(&mut self);
}

/// A shared counter, incremented by [`CountingServer`]s.
///
/// The counter is wait-free whenever its snapshot object `S` is. With the
/// default [`AtomicSnapshot`], increments are wait-free and reads are
/// lock-free.
///
/// Only one thread may [`read`](Reader::read) a given counter at a time.
pub struct Counter<S: Snapshot<Value = i32> = AtomicSnapshot> {
    snapshot: S,
    servers: Exclusive,
    reader: Exclusive,
}

impl<S: Snapshot<Value = i32>> Counter<S> {
    /// Creates a counter for the given number of servers, with value zero.
    pub fn new(num_servers: usize) -> Self {
        debug!(num_servers, "creating counter");
        Self {
            snapshot: S::new(num_servers),
            servers: Exclusive::new(num_servers, "servers"),
            reader: Exclusive::new(1, "readers"),
        }
    }

    /// Returns the number of servers that can increment the counter.
    pub fn num_servers(&self) -> usize {
        self.snapshot.len()
    }
}

impl<S: Snapshot<Value = i32>> Reader for Counter<S> {
    /// Returns the number of increments linearized before this read.
    fn read(&self) -> i64 {
        let _reader = self.reader.enter(0);
        self.snapshot.scan(0).into_iter().map(i64::from).sum()
    }
}

/// A server that increments a [`Counter`] through one of its components.
///
/// Each server must be operated by exactly one thread, which `inc` taking
/// `&mut self` guarantees, and no two live servers may share a process number.
pub struct CountingServer<S: Snapshot<Value = i32> = AtomicSnapshot> {
    counter: Arc<Counter<S>>,
    process: ProcessId,
    total: i32,
}

impl<S: Snapshot<Value = i32>> CountingServer<S> {
    /// Creates a server that increments `counter` through component `process_num`.
    ///
    /// # Panics
    ///
    /// Panics if `process_num` is not less than the number of servers of the
    /// counter. In debug builds, also panics if another live server is bound
    /// to `process_num`.
    pub fn new(counter: Arc<Counter<S>>, process_num: ProcessId) -> Self {
        assert!(
            process_num < counter.num_servers(),
            "process {process_num} is out of range for a counter with {} servers",
            counter.num_servers()
        );
        counter.servers.claim(process_num);
        Self {
            counter,
            process: process_num,
            total: 0,
        }
    }

    /// Returns the number of increments performed by this server.
    pub fn total(&self) -> i32 {
        self.total
    }
}

impl<S: Snapshot<Value = i32>> Server for CountingServer<S> {
    /// Adds one to this server's total, and publishes the new total.
    ///
    /// A server can perform at most `i32::MAX` increments.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if this server has already performed
    /// `i32::MAX` increments.
    fn inc(&mut self) {
        debug_assert!(
            self.total < i32::MAX,
            "server {} cannot count past {}",
            self.process,
            i32::MAX
        );
        self.total += 1;
        self.counter.snapshot.update(self.process, self.total);
    }
}

impl<S: Snapshot<Value = i32>> Drop for CountingServer<S> {
    fn drop(&mut self) {
        self.counter.servers.release(self.process);
    }
}
