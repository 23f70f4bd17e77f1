use std::sync::{Arc, Mutex};

use rand::Rng;
use snapcount::{ProcessId, Snapshot};
use snapcount_utils::specifications::snapshot::{SnapshotOperation, SnapshotSpecification};
use snapcount_utils::{Action, History, WGLChecker};

#[cfg(feature = "shuttle")]
use shuttle::{rand::thread_rng, thread};
#[cfg(not(feature = "shuttle"))]
use std::thread;

#[cfg(not(feature = "shuttle"))]
fn thread_rng() -> rand::rngs::SmallRng {
    rand::SeedableRng::from_entropy()
}

pub const NUM_ITERATIONS: usize = 250;
pub const NUM_OPERATIONS: usize = 50;
pub const NUM_PREEMPTIONS: usize = 3;
pub const NUM_THREADS: usize = 4;
pub const NUM_TRIALS: usize = 20;

/// Values are drawn from a small range, so that components are frequently
/// overwritten with the value they already hold.
const MAX_VALUE: i32 = 3;

type RecordedAction = (ProcessId, Action<SnapshotOperation<i32>>);

/// A snapshot that records every call and response performed on it.
///
/// Actions are recorded in the order they happen: a call is recorded before
/// the operation starts, and its response after the operation finishes.
pub struct RecordingSnapshot<S: Snapshot<Value = i32>> {
    actions: Mutex<Vec<RecordedAction>>,
    snapshot: S,
}

impl<S: Snapshot<Value = i32>> RecordingSnapshot<S> {
    pub fn new(components: usize) -> Self {
        Self {
            actions: Mutex::new(vec![]),
            snapshot: S::new(components),
        }
    }

    fn record(&self, process: ProcessId, action: Action<SnapshotOperation<i32>>) {
        self.actions.lock().unwrap().push((process, action));
    }

    /// Scans the snapshot as `scanner`, on behalf of `process`.
    pub fn scan(&self, process: ProcessId, scanner: ProcessId) -> Vec<i32> {
        self.record(process, Action::Call(SnapshotOperation::Scan(process, None)));
        let view = self.snapshot.scan(scanner);
        let response = SnapshotOperation::Scan(process, Some(view.clone()));
        self.record(process, Action::Response(response));
        view
    }

    /// Updates the component belonging to `process`.
    pub fn update(&self, process: ProcessId, value: i32) {
        let operation = SnapshotOperation::Update(process, value);
        self.record(process, Action::Call(operation.clone()));
        self.snapshot.update(process, value);
        self.record(process, Action::Response(operation));
    }

    /// # Panics
    ///
    /// Panics if the recorded history is not linearizable.
    pub fn assert_linearizable(&self) {
        let actions = self.actions.lock().unwrap().clone();
        let checker = WGLChecker::new(SnapshotSpecification::new(self.snapshot.len()));
        assert!(checker.is_linearizable(History::from_actions(actions)));
    }
}

fn join_all<T>(handles: Vec<thread::JoinHandle<T>>) {
    for handle in handles {
        handle.join().unwrap();
    }
}

/// Assert that a history in which each of `num_threads` threads randomly
/// updates its own component or scans is linearizable.
///
/// # Panics
///
/// Panics if the history of random snapshot operations is not linearizable.
pub fn assert_random_operations_are_linearizable<S>(num_threads: usize)
where
    S: Snapshot<Value = i32> + Send + Sync + 'static,
{
    const UPDATE_PROBABILITY: f64 = 1.0 / 2.0;

    let snapshot: Arc<RecordingSnapshot<S>> = Arc::new(RecordingSnapshot::new(num_threads));
    let handles = (0..num_threads)
        .map(|i| {
            let snapshot = snapshot.clone();
            thread::spawn(move || {
                let mut rng = thread_rng();
                for _ in 0..NUM_OPERATIONS {
                    if rng.gen_bool(UPDATE_PROBABILITY) {
                        snapshot.update(i, rng.gen_range(0..=MAX_VALUE));
                    } else {
                        snapshot.scan(i, i);
                    }
                }
            })
        })
        .collect();
    join_all(handles);
    snapshot.assert_linearizable();
}

/// Assert that a history in which `num_writers` threads randomly update their
/// own component, while two more threads scan as scanner `0` and scanner `1`,
/// is linearizable.
///
/// # Panics
///
/// Panics if the history of snapshot operations is not linearizable.
pub fn assert_two_scanner_operations_are_linearizable<S>(num_writers: usize)
where
    S: Snapshot<Value = i32> + Send + Sync + 'static,
{
    let snapshot: Arc<RecordingSnapshot<S>> = Arc::new(RecordingSnapshot::new(num_writers));
    let mut handles = Vec::new();
    for i in 0..num_writers {
        let snapshot = snapshot.clone();
        handles.push(thread::spawn(move || {
            let mut rng = thread_rng();
            for _ in 0..NUM_OPERATIONS / 2 {
                snapshot.update(i, rng.gen_range(0..=MAX_VALUE));
            }
        }));
    }
    for scanner in 0..2 {
        let snapshot = snapshot.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..NUM_OPERATIONS / 2 {
                snapshot.scan(num_writers + scanner, scanner);
            }
        }));
    }
    join_all(handles);
    snapshot.assert_linearizable();
}

/// Returns whether every component of `first` is at most the corresponding
/// component of `second`.
pub fn dominated_by(first: &[i32], second: &[i32]) -> bool {
    first.iter().zip(second).all(|(a, b)| a <= b)
}

/// Asserts that every pair of views is ordered component-wise.
///
/// If every writer only ever increases the value of its component, the views
/// returned by a linearizable snapshot form a chain.
pub fn assert_views_are_comparable(views: &[Vec<i32>]) {
    for first in views {
        for second in views {
            assert!(
                dominated_by(first, second) || dominated_by(second, first),
                "views {first:?} and {second:?} are incomparable"
            );
        }
    }
}
