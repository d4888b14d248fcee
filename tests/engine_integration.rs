//! Integration tests for the engine lifecycle
//!
//! These tests validate the complete worker workflow:
//! - Startup and clean shutdown
//! - Run dispatch and completion events
//! - At-most-one-active-run enforcement
//! - Cooperative cancellation via `stop()`

mod common;

use algovis_rs::model::array::is_sorted;
use algovis_rs::types::{Algorithm, EngineEvent, RunOutcome, SortAlgorithm};
use algovis_rs::VisualizerEngine;
use common::{collect_until_finished, spawn_fast_engine, test_config, wait_idle, wait_until};
use std::time::Duration;

#[test]
fn test_engine_creation_and_shutdown() {
    let (worker, handle) = spawn_fast_engine();

    // the worker publishes the initial models on startup
    assert!(wait_until(Duration::from_secs(5), || {
        handle.array().len() == 50
    }));
    assert_eq!(handle.grid().rows(), 20);
    assert_eq!(handle.graph().nodes.len(), 7);

    handle.shutdown();
    assert!(worker.join().is_ok(), "worker thread should exit cleanly");
}

#[test]
fn test_run_completes_and_reports() {
    let (worker, handle) = spawn_fast_engine();

    assert!(handle.run(Algorithm::Sort(SortAlgorithm::Merge)));
    let (events, outcome) = collect_until_finished(&handle);

    assert_eq!(outcome, Some(RunOutcome::Completed));
    assert!(events.contains(&EngineEvent::RunStarted(Algorithm::Sort(
        SortAlgorithm::Merge
    ))));
    assert!(wait_idle(&handle));
    assert!(is_sorted(&handle.array()));
    assert!(handle.metrics().comparisons > 0);

    handle.shutdown();
    worker.join().unwrap();
}

#[test]
fn test_at_most_one_active_run() {
    // real pacing at minimum speed keeps the first run in flight
    let mut config = test_config();
    config.speed = 1;
    let (engine, handle) = VisualizerEngine::new(config);
    let worker = engine.spawn();

    assert!(handle.run(Algorithm::Sort(SortAlgorithm::Bubble)));
    assert!(!handle.run(Algorithm::Sort(SortAlgorithm::Quick)));
    assert!(!handle.run(Algorithm::Sort(SortAlgorithm::Heap)));

    handle.stop();
    assert!(wait_idle(&handle));

    // once idle, a new run is accepted again
    assert!(handle.run(Algorithm::Sort(SortAlgorithm::Quick)));
    handle.stop();
    assert!(wait_idle(&handle));

    handle.shutdown();
    worker.join().unwrap();
}

#[test]
fn test_stop_cancels_within_bounded_checkpoints() {
    let mut config = test_config();
    config.speed = 1; // 100 ms per comparison
    let (engine, handle) = VisualizerEngine::new(config);
    let worker = engine.spawn();

    assert!(handle.run(Algorithm::Sort(SortAlgorithm::Bubble)));
    handle.stop();

    let (_, outcome) = collect_until_finished(&handle);
    assert_eq!(outcome, Some(RunOutcome::Cancelled));
    assert!(wait_idle(&handle));

    // mutation halted early: a 50-bar bubble sort needs over a thousand
    // comparisons, a cancelled one only the few before the flag was seen
    assert!(handle.metrics().comparisons < 10);

    handle.shutdown();
    worker.join().unwrap();
}

#[test]
fn test_stop_while_idle_is_a_no_op() {
    let (worker, handle) = spawn_fast_engine();

    handle.stop();
    // a stale stop must not poison the next run
    assert!(handle.run(Algorithm::Sort(SortAlgorithm::Insertion)));
    let (_, outcome) = collect_until_finished(&handle);
    assert_eq!(outcome, Some(RunOutcome::Completed));

    handle.shutdown();
    worker.join().unwrap();
}

#[test]
fn test_reset_array_clamps_size() {
    let (worker, handle) = spawn_fast_engine();

    handle.reset_array(5);
    assert!(wait_until(Duration::from_secs(5), || {
        handle.array().len() == 10
    }));

    handle.reset_array(5000);
    assert!(wait_until(Duration::from_secs(5), || {
        handle.array().len() == 100
    }));

    handle.shutdown();
    worker.join().unwrap();
}

#[test]
fn test_set_speed_affects_subsequent_runs() {
    let mut config = test_config();
    config.speed = 1;
    let (engine, handle) = VisualizerEngine::new(config);
    let worker = engine.spawn();

    // crank the speed before running: the whole run now paces at 1 ms per
    // comparison and finishes quickly even with real sleeps
    handle.set_speed(100);
    assert_eq!(handle.speed(), 100);

    assert!(handle.run(Algorithm::Sort(SortAlgorithm::Insertion)));
    let (_, outcome) = collect_until_finished(&handle);
    assert_eq!(outcome, Some(RunOutcome::Completed));
    assert!(is_sorted(&handle.array()));

    handle.shutdown();
    worker.join().unwrap();
}
