//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use algovis_rs::config::EngineConfig;
use algovis_rs::engine::EngineHandle;
use algovis_rs::step::NoopPacer;
use algovis_rs::types::{EngineEvent, RunOutcome};
use algovis_rs::VisualizerEngine;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Deterministic config for engine tests
pub fn test_config() -> EngineConfig {
    EngineConfig {
        rng_seed: Some(7),
        ..Default::default()
    }
}

/// Spawn an engine with no pacing so runs finish instantly
pub fn spawn_fast_engine() -> (JoinHandle<()>, EngineHandle) {
    let (engine, handle) = VisualizerEngine::with_pacer(test_config(), Arc::new(NoopPacer));
    (engine.spawn(), handle)
}

/// Poll `pred` until it holds or `timeout` elapses
pub fn wait_until(timeout: Duration, mut pred: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if pred() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    pred()
}

/// Wait for the active run to finish
pub fn wait_idle(handle: &EngineHandle) -> bool {
    wait_until(Duration::from_secs(10), || !handle.is_running())
}

/// Drain events until a `RunFinished` arrives, returning everything seen
/// and the outcome
pub fn collect_until_finished(handle: &EngineHandle) -> (Vec<EngineEvent>, Option<RunOutcome>) {
    let mut events = Vec::new();
    let mut outcome = None;
    wait_until(Duration::from_secs(10), || {
        for event in handle.drain() {
            if let EngineEvent::RunFinished { outcome: o, .. } = event {
                outcome = Some(o);
            }
            events.push(event);
        }
        outcome.is_some()
    });
    (events, outcome)
}
