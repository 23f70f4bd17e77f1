use super::common::{assert_random_operations_are_linearizable, NUM_THREADS};
use snapcount::AtomicSnapshot;

#[cfg(feature = "shuttle")]
use super::common::{NUM_ITERATIONS, NUM_PREEMPTIONS};

#[cfg(feature = "shuttle")]
#[test]
fn atomic_snapshot_is_linearizable() {
    shuttle::check_pct(
        || {
            assert_random_operations_are_linearizable::<AtomicSnapshot>(NUM_THREADS);
        },
        NUM_ITERATIONS,
        NUM_PREEMPTIONS,
    );
}

#[cfg(not(feature = "shuttle"))]
mod threads {
    use std::sync::Arc;
    use std::thread;

    use snapcount::Snapshot;

    use super::super::common::{assert_views_are_comparable, dominated_by, NUM_TRIALS};
    use super::*;

    #[test]
    fn random_operations_are_linearizable() {
        for _ in 0..NUM_TRIALS {
            assert_random_operations_are_linearizable::<AtomicSnapshot>(NUM_THREADS);
        }
    }

    #[test]
    fn single_component_is_linearizable() {
        for _ in 0..NUM_TRIALS {
            assert_random_operations_are_linearizable::<AtomicSnapshot>(1);
        }
    }

    #[test]
    fn views_of_increasing_writes_are_monotone() {
        const WRITES: i32 = 500;

        let snapshot = Arc::new(AtomicSnapshot::new(NUM_THREADS));
        let handles: Vec<_> = (0..NUM_THREADS)
            .map(|i| {
                let snapshot = snapshot.clone();
                thread::spawn(move || {
                    let mut views = Vec::new();
                    for value in 1..=WRITES {
                        snapshot.update(i, value);
                        views.push(snapshot.scan(i));
                    }
                    views
                })
            })
            .collect();

        let mut all = Vec::new();
        for handle in handles {
            let views = handle.join().unwrap();
            for pair in views.windows(2) {
                assert!(dominated_by(&pair[0], &pair[1]));
            }
            all.extend(views);
        }
        assert_views_are_comparable(&all);
        assert_eq!(snapshot.scan(0), vec![WRITES; NUM_THREADS]);
    }

    #[test]
    fn scan_observes_own_update() {
        let snapshot = Arc::new(AtomicSnapshot::new(NUM_THREADS));
        let handles: Vec<_> = (0..NUM_THREADS)
            .map(|i| {
                let snapshot = snapshot.clone();
                thread::spawn(move || {
                    for value in 1..=100 {
                        snapshot.update(i, value);
                        assert_eq!(snapshot.scan(i)[i], value);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
