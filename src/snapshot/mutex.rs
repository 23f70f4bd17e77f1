//! A snapshot object backed by a [`Mutex`].
use std::sync::PoisonError;

use tracing::debug;

use crate::snapshot::{ProcessId, Snapshot};
use crate::sync::Mutex;

/// A [`Mutex`]-based snapshot object.
///
/// Every operation locks the whole object, so this implementation is trivially
/// linearizable but **not** lock-free. It serves as a baseline for the
/// non-blocking snapshots.
pub struct MutexSnapshot {
    mutex: Mutex<Vec<i32>>,
}

impl Snapshot for MutexSnapshot {
    type Value = i32;

    fn new(components: usize) -> Self {
        debug!(components, "creating mutex snapshot");
        Self {
            mutex: Mutex::new(vec![0; components]),
        }
    }

    fn len(&self) -> usize {
        self.mutex.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn scan(&self, _: ProcessId) -> Vec<Self::Value> {
        self.mutex
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update(&self, i: ProcessId, value: Self::Value) {
        let mut components = self.mutex.lock().unwrap_or_else(PoisonError::into_inner);
        components[i] = value;
    }
}
