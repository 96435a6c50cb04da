use std::collections::HashSet;
use std::thread;
use std::time::{Duration, Instant};

use sort_race::config::EngineConfig;
use sort_race::patterns;
use sort_race::probe::{Interrupted, Probe, Trace};
use sort_race::{Algorithm, Coordinator, EngineError, RunStatus};

const EXAMPLE: [i32; 12] = [64, 34, 25, 12, 22, 11, 90, 88, 45, 50, 23, 67];
const EXAMPLE_SORTED: [i32; 12] = [11, 12, 22, 23, 25, 34, 45, 50, 64, 67, 88, 90];

const LONG_DELAY: Duration = Duration::from_secs(10);

/// Lets `remaining` comparisons through, then interrupts.
struct StopAfter {
    remaining: u64,
}

impl<T> Probe<T> for StopAfter {
    fn compare(&mut self, _a: usize, _b: usize) -> Result<(), Interrupted> {
        if self.remaining == 0 {
            return Err(Interrupted);
        }
        self.remaining -= 1;
        Ok(())
    }
}

/// The array `algorithm` holds when it makes its `comparisons`-th comparison.
///
/// Only meaningful for sorts that leave the array untouched when interrupted, which excludes merge.
fn array_at(algorithm: Algorithm, input: &[i32], comparisons: u64) -> Vec<i32> {
    let mut v = input.to_vec();
    if comparisons > 0 {
        let _ = algorithm.sort(&mut v, &mut StopAfter { remaining: comparisons - 1 });
    }
    v
}

fn comparison_count(algorithm: Algorithm, input: &[i32]) -> u64 {
    let mut v = input.to_vec();
    let mut trace = Trace::new();
    algorithm.sort(&mut v, &mut trace).unwrap();
    trace.compares().len() as u64
}

#[test]
fn batch_sorts_every_copy() {
    let coordinator = Coordinator::new(Duration::ZERO);
    let report = coordinator.start_all(&EXAMPLE).unwrap().into_report().unwrap();

    assert_eq!(report.outcomes.len(), 6);
    for algorithm in Algorithm::ALL {
        let outcome = report.outcome(algorithm).unwrap();
        assert_eq!(outcome.values, EXAMPLE_SORTED, "{algorithm}");
    }
}

#[test]
fn rankings_cover_every_algorithm_in_duration_order() {
    let coordinator = Coordinator::new(Duration::ZERO);
    let input = patterns::random_uniform(200, -1000..=1000);
    let report = coordinator.start_all(&input).unwrap().into_report().unwrap();
    let rankings = &report.rankings;

    assert_eq!(rankings.len(), 6);

    let algorithms = rankings
        .iter()
        .map(|entry| entry.algorithm)
        .collect::<HashSet<_>>();
    assert_eq!(algorithms.len(), 6);

    assert!(rankings
        .entries()
        .windows(2)
        .all(|w| w[0].elapsed <= w[1].elapsed));

    for entry in rankings.iter() {
        assert_eq!(report.outcome(entry.algorithm).unwrap().elapsed, entry.elapsed);
    }
}

#[test]
fn rankings_appear_only_after_completion() {
    let coordinator = Coordinator::new(Duration::from_millis(5));
    let mut batch = coordinator.start_all(&[3, 1, 2]).unwrap();

    assert!(batch.rankings().is_none());

    let rankings = batch.await_completion().unwrap().clone();
    assert_eq!(batch.rankings(), Some(&rankings));
    assert!(batch.pending().is_empty());

    // Collecting again hands out the same rankings.
    assert_eq!(batch.await_completion().unwrap(), &rankings);
    assert_eq!(batch.try_collect().unwrap(), Some(&rankings));

    for run in batch.runs() {
        let snapshot = run.snapshot();
        assert!(snapshot.is_completed());
        assert_eq!(snapshot.compare, None);
        assert_eq!(snapshot.boundary, Some(0));
    }
}

#[test]
fn empty_input_is_rejected() {
    let coordinator = Coordinator::new(Duration::ZERO);

    assert!(matches!(
        coordinator.start_all(&[]),
        Err(EngineError::InvalidInput(_))
    ));
    assert!(!coordinator.is_busy());
}

#[test]
fn reentrant_start_is_rejected() {
    let coordinator = Coordinator::new(Duration::from_millis(100));
    let mut batch = coordinator.start_all(&[2, 1]).unwrap();

    assert!(coordinator.is_busy());
    assert!(matches!(
        coordinator.start_all(&[2, 1]),
        Err(EngineError::ReentrantStart)
    ));

    batch.await_completion().unwrap();
    assert!(!coordinator.is_busy());

    let next = coordinator.start_all(&[2, 1]).unwrap();
    assert!(next.into_report().is_ok());
}

#[test]
fn dropping_a_batch_releases_the_coordinator() {
    let coordinator = Coordinator::new(LONG_DELAY);
    let start = Instant::now();

    let batch = coordinator.start_all(&EXAMPLE).unwrap();
    let runs = batch.runs().to_vec();
    drop(batch);

    assert!(start.elapsed() < LONG_DELAY);
    assert!(!coordinator.is_busy());
    for run in runs {
        assert_eq!(run.snapshot().status, RunStatus::Cancelled, "{}", run.algorithm());
    }
}

#[test]
fn cancel_interrupts_paced_runs() {
    let coordinator = Coordinator::new(LONG_DELAY);
    let start = Instant::now();

    let mut batch = coordinator.start_all(&EXAMPLE).unwrap();
    batch.cancel();
    assert!(batch.is_cancelled());

    match batch.await_completion() {
        Err(EngineError::Cancelled { pending }) => assert_eq!(pending, Algorithm::ALL),
        other => panic!("expected cancellation, got {other:?}"),
    }
    assert!(batch.rankings().is_none());

    // Every worker has given up, so collecting again reports the same instead of hanging.
    assert!(matches!(
        batch.await_completion(),
        Err(EngineError::Cancelled { .. })
    ));
    assert!(start.elapsed() < LONG_DELAY);
}

#[test]
fn await_times_out() {
    let coordinator = Coordinator::new(LONG_DELAY).with_timeout(Some(Duration::from_millis(50)));
    let mut batch = coordinator.start_all(&EXAMPLE).unwrap();

    match batch.await_completion() {
        Err(EngineError::RunTimedOut { waited, pending }) => {
            assert_eq!(waited, Duration::from_millis(50));
            assert_eq!(pending, Algorithm::ALL);
        }
        other => panic!("expected timeout, got {other:?}"),
    }

    assert!(batch.rankings().is_none());
    assert!(coordinator.is_busy());
    assert!(matches!(
        batch.await_completion_timeout(Some(Duration::ZERO)),
        Err(EngineError::RunTimedOut { .. })
    ));
}

#[test]
fn pacing_delays_every_comparison() {
    let delay = Duration::from_millis(20);
    let coordinator = Coordinator::new(delay);

    // One comparison per algorithm.
    let report = coordinator.start_all(&[2, 1]).unwrap().into_report().unwrap();

    for entry in report.rankings.iter() {
        assert!(entry.elapsed >= delay, "{} took {:?}", entry.algorithm, entry.elapsed);
    }
}

#[test]
fn paced_runs_overlap() {
    let delay = Duration::from_millis(20);
    let coordinator = Coordinator::new(delay);

    let start = Instant::now();
    let report = coordinator
        .start_all(&[5, 4, 3, 2, 1])
        .unwrap()
        .into_report()
        .unwrap();
    let wall = start.elapsed();

    let sum = report.rankings.iter().map(|entry| entry.elapsed).sum::<Duration>();
    let slowest = report.rankings.iter().map(|entry| entry.elapsed).max().unwrap();

    // Bubble alone makes 10 paced comparisons.
    assert!(slowest >= delay * 10);
    assert!(wall < sum, "wall {wall:?}, sum {sum:?}");
    assert!(wall < slowest * 2, "wall {wall:?}, slowest {slowest:?}");
}

#[test]
fn live_arrays_follow_each_run() {
    let input = EXAMPLE;
    let coordinator = Coordinator::new(Duration::from_millis(2));
    let mut batch = coordinator.start_all(&input).unwrap();

    for run in batch.runs() {
        assert_eq!(run.array().values.len(), input.len());
    }

    let replayable = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Quick,
        Algorithm::Heap,
    ];
    let totals = replayable.map(|algorithm| comparison_count(algorithm, &input));

    let mut mid_run_samples = 0;
    while batch.try_collect().unwrap().is_none() {
        // Sample all runs at one instant, each must be exactly where its own sort is.
        let arrays = replayable.map(|algorithm| batch.run(algorithm).array());

        for ((algorithm, array), total) in replayable.into_iter().zip(arrays).zip(totals) {
            let expected = array_at(algorithm, &input, array.comparisons);
            if array.comparisons < total {
                assert_eq!(&*array.values, &expected[..], "{algorithm} at {}", array.comparisons);
                if array.comparisons > 0 {
                    mid_run_samples += 1;
                }
            } else {
                assert!(
                    *array.values == expected[..] || *array.values == EXAMPLE_SORTED,
                    "{algorithm} at {}",
                    array.comparisons
                );
            }
        }

        let merge = batch.run(Algorithm::Merge).array();
        assert_eq!(merge.values.len(), input.len());

        thread::sleep(Duration::from_millis(1));
    }

    assert!(mid_run_samples > 0);
    for run in batch.runs() {
        let array = run.array();
        assert_eq!(&*array.values, &EXAMPLE_SORTED, "{}", run.algorithm());
        assert_eq!(array.comparisons, run.snapshot().comparisons);
    }
}

#[test]
fn live_snapshots_are_observable() {
    let coordinator = Coordinator::new(Duration::from_millis(30));
    let mut batch = coordinator.start_all(&[3, 1, 2]).unwrap();
    let run = batch.run(Algorithm::Bubble).clone();

    let deadline = Instant::now() + Duration::from_secs(5);
    let snapshot = loop {
        let snapshot = run.snapshot();
        if snapshot.compare.is_some() || Instant::now() > deadline {
            break snapshot;
        }
        thread::sleep(Duration::from_millis(1));
    };

    assert!(snapshot.comparisons >= 1);
    assert!(!snapshot.is_completed());

    batch.await_completion().unwrap();

    let snapshot = run.snapshot();
    assert!(snapshot.is_completed());
    assert_eq!(snapshot.comparisons, 3);
}

#[test]
fn runs_do_not_share_arrays() {
    let input = patterns::random_uniform(40, 0..=9);
    let serial = Algorithm::ALL.map(|algorithm| {
        let mut v = input.clone();
        let mut trace = Trace::new();
        algorithm.sort(&mut v, &mut trace).unwrap();
        (v, trace)
    });

    // Two sorts over identical values at the same time see exactly what they see alone.
    let (bubble, heap) = thread::scope(|s| {
        let run = |algorithm: Algorithm| {
            let mut v = input.clone();
            s.spawn(move || {
                let mut trace = Trace::new();
                algorithm.sort(&mut v, &mut trace).unwrap();
                (v, trace)
            })
        };
        let bubble = run(Algorithm::Bubble);
        let heap = run(Algorithm::Heap);
        (bubble.join().unwrap(), heap.join().unwrap())
    });

    assert_eq!(bubble.0, serial[Algorithm::Bubble.index()].0);
    assert_eq!(bubble.1.events(), serial[Algorithm::Bubble.index()].1.events());
    assert_eq!(heap.0, serial[Algorithm::Heap.index()].0);
    assert_eq!(heap.1.events(), serial[Algorithm::Heap.index()].1.events());

    let coordinator = Coordinator::new(Duration::ZERO);
    let mut batch = coordinator.start_all(&input).unwrap();
    batch.await_completion().unwrap();

    for algorithm in Algorithm::ALL {
        let (values, trace) = &serial[algorithm.index()];
        assert_eq!(&batch.outcome(algorithm).unwrap().values, values);
        assert_eq!(
            batch.run(algorithm).snapshot().comparisons,
            trace.compares().len() as u64,
            "{algorithm}"
        );
    }
}

#[test]
fn coordinator_from_config() {
    let config = EngineConfig {
        pacing_delay: "0ms".into(),
        timeout: Some("30s".into()),
        ..EngineConfig::default()
    };
    let coordinator = Coordinator::from_config(&config).unwrap();
    assert_eq!(coordinator.pacing_delay(), Duration::ZERO);

    let report = coordinator.start_all(&[9, -3, 4]).unwrap().into_report().unwrap();
    assert_eq!(report.outcome(Algorithm::Quick).unwrap().values, [-3, 4, 9]);

    let bad = EngineConfig {
        pacing_delay: "soon".into(),
        ..EngineConfig::default()
    };
    assert!(Coordinator::from_config(&bad).is_err());
}
