use super::common::{assert_random_operations_are_linearizable, NUM_THREADS};
use snapcount::MutexSnapshot;

#[cfg(feature = "shuttle")]
use super::common::{NUM_ITERATIONS, NUM_PREEMPTIONS};

#[cfg(feature = "shuttle")]
#[test]
fn mutex_snapshot_is_linearizable() {
    shuttle::check_pct(
        || {
            assert_random_operations_are_linearizable::<MutexSnapshot>(NUM_THREADS);
        },
        NUM_ITERATIONS,
        NUM_PREEMPTIONS,
    );
}

#[cfg(not(feature = "shuttle"))]
#[test]
fn random_operations_are_linearizable() {
    for _ in 0..super::common::NUM_TRIALS {
        assert_random_operations_are_linearizable::<MutexSnapshot>(NUM_THREADS);
    }
}
