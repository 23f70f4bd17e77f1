use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};
use tracing::{debug, trace};

use crate::exclusive::Exclusive;
use crate::register::{AtomicRegister, Register};
use crate::snapshot::{ProcessId, Snapshot};
use crate::sync::{switch_point, AtomicU64, Ordering};

/// The values of every component, as of the moment a round was opened.
#[derive(Debug)]
struct View {
    round: u64,
    values: Box<[i32]>,
}

/// A wait-free single-writer snapshot object supporting two concurrent scanners.
///
/// Any number of writers may update distinct components concurrently. At most
/// two threads may scan at the same time, and each must identify itself as
/// scanner `0` or scanner `1` when calling [`scan`](Snapshot::scan). Both
/// updates and scans finish in a bounded number of steps, regardless of how
/// fast (or whether) any other thread runs.
///
/// # How it works
///
/// Time is divided into _rounds_, which only scanners open. A writer stamps
/// every [`Register`] it writes with the round that was current when it
/// started. Relative to round `r`, a component's value is _fresh_ if it is
/// stamped with `r`, as it may have been written after the round opened, and
/// _old_ otherwise. Each component has two cells:
///
/// * `high[i]` holds the latest value of component `i`.
/// * `low[i]` holds the value that `high[i]` held before the first write of
///   the current round. A writer copies `high[i]` into `low[i]` whenever it
///   is about to overwrite a value stamped with an earlier round.
///
/// The view of round `r` therefore reports `low[i]` for fresh components and
/// `high[i]` for old ones, and describes the object exactly as it was when
/// round `r` opened.
///
/// A view stays accurate only while round `r` is current, so no round is
/// allowed to end before its view has been published. A scanner first
/// finishes the current round, which the other scanner may have opened and
/// then stalled or crashed inside. It then opens the next round (or, if the
/// other scanner beat it to it, joins that round) and returns that round's
/// view, computing and publishing it itself unless the other scanner already
/// has. Every round returned in this way was opened during the scan, so the
/// scan can be linearized at that moment. A scan performs at most two
/// collects, and never waits on or retries because of another thread.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use snapcount::{DualScanSnapshot, Snapshot};
///
/// const WRITERS: usize = 4;
///
/// let snapshot = Arc::new(DualScanSnapshot::new(WRITERS));
///
/// let writers: Vec<_> = (0..WRITERS)
///     .map(|i| {
///         let snapshot = snapshot.clone();
///         thread::spawn(move || {
///             for value in 1..=100 {
///                 snapshot.update(i, value);
///             }
///         })
///     })
///     .collect();
///
/// // Exactly two threads scan, as scanner 0 and scanner 1.
/// let scanners: Vec<_> = (0..DualScanSnapshot::SCANNERS)
///     .map(|id| {
///         let snapshot = snapshot.clone();
///         thread::spawn(move || {
///             for _ in 0..100 {
///                 let view = snapshot.scan(id);
///                 assert!(view.iter().all(|&value| (0..=100).contains(&value)));
///             }
///         })
///     })
///     .collect();
///
/// for handle in writers.into_iter().chain(scanners) {
///     handle.join().unwrap();
/// }
/// assert_eq!(snapshot.scan(0), vec![100; WRITERS]);
/// ```
pub struct DualScanSnapshot {
    round: AtomicU64,
    high: Box<[AtomicRegister<Register>]>,
    low: Box<[AtomicRegister<Register>]>,
    published: ArcSwap<View>,
    scanners: Exclusive,
    writers: Exclusive,
}

impl DualScanSnapshot {
    /// The number of threads that may scan concurrently.
    pub const SCANNERS: usize = 2;

    /// Returns the view of the given round, computed from the current contents
    /// of every component.
    ///
    /// The result is only accurate if the round is still current when this
    /// returns.
    fn collect(&self, round: u64) -> View {
        let values = self
            .high
            .iter()
            .zip(self.low.iter())
            .map(|(high, low)| {
                let register = high.read();
                if register.seq() == round {
                    low.read().value()
                } else {
                    register.value()
                }
            })
            .collect();
        View { round, values }
    }

    /// Returns a published view of `round`, or of a later round, publishing
    /// one first if necessary.
    fn complete(&self, round: u64) -> Arc<View> {
        switch_point();
        let mut current = self.published.load_full();
        if current.round >= round {
            return current;
        }
        let candidate = Arc::new(self.collect(round));
        // If `round` ended while collecting, its view was published before it
        // ended, so `current` is stale and the candidate is discarded.
        loop {
            switch_point();
            let previous = self
                .published
                .compare_and_swap(&current, Arc::clone(&candidate));
            if Arc::ptr_eq(&*previous, &current) {
                return candidate;
            }
            current = Guard::into_inner(previous);
            if current.round >= round {
                trace!(round, published = current.round, "adopting published view");
                return current;
            }
        }
    }
}

impl Snapshot for DualScanSnapshot {
    type Value = i32;

    fn new(components: usize) -> Self {
        debug!(components, "creating dual-scan snapshot");
        Self {
            round: AtomicU64::new(0),
            high: (0..components).map(|_| AtomicRegister::new()).collect(),
            low: (0..components).map(|_| AtomicRegister::new()).collect(),
            published: ArcSwap::from_pointee(View {
                round: 0,
                values: vec![0; components].into_boxed_slice(),
            }),
            scanners: Exclusive::new(Self::SCANNERS, "scanners"),
            writers: Exclusive::new(components, "writers"),
        }
    }

    fn len(&self) -> usize {
        self.high.len()
    }

    /// Returns the value of each component, as performed by scanner `i`.
    ///
    /// `i` must be `0` or `1`, and no two concurrent scans may use the same `i`.
    fn scan(&self, i: ProcessId) -> Vec<Self::Value> {
        debug_assert!(i < Self::SCANNERS, "scanner {i} does not exist");
        let _scanner = self.scanners.enter(i);
        let start = self.round.load(Ordering::SeqCst);
        self.complete(start);
        let round = match self.round.compare_exchange(
            start,
            start + 1,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            Ok(_) => start + 1,
            Err(round) => {
                trace!(round, "joining round opened by the other scanner");
                round
            }
        };
        self.complete(round).values.to_vec()
    }

    fn update(&self, i: ProcessId, value: Self::Value) {
        debug_assert!(i < self.len(), "component {i} out of bounds");
        let _writer = self.writers.enter(i);
        let seq = self.round.load(Ordering::SeqCst);
        let register = self.high[i].read();
        if register.seq() != seq {
            self.low[i].write(register);
        }
        self.high[i].write(Register::new(value, seq));
    }
}
