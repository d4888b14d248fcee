//! Execution controller for the visualization engine
//!
//! The engine runs on a dedicated worker thread that owns all four state
//! models, communicating with the UI thread through channels:
//!
//! - [`EngineCommand`] - Messages sent from UI to worker (run, resets,
//!   cell toggles, BST inserts)
//! - [`crate::types::EngineEvent`] - Notifications sent from worker to UI
//! - [`EngineHandle`] - UI-side handle for the control surface and
//!   snapshot accessors
//! - [`VisualizerEngine`] - Entry point that owns the worker
//!
//! Two controls bypass the command queue entirely, exactly so they take
//! effect while a run is in flight: `stop()` sets the shared cancellation
//! token, and `set_speed()` stores into the shared speed atomic. Everything
//! else queues and is processed between runs, preserving the single-writer
//! rule on the state models.
//!
//! # Example
//!
//! ```ignore
//! use algovis_rs::engine::VisualizerEngine;
//! use algovis_rs::config::EngineConfig;
//! use algovis_rs::types::{Algorithm, SortAlgorithm};
//!
//! let (engine, handle) = VisualizerEngine::new(EngineConfig::default());
//! std::thread::spawn(move || engine.run());
//!
//! handle.run(Algorithm::Sort(SortAlgorithm::Quick));
//! // render loop:
//! for _ in handle.drain() {
//!     let bars = handle.array(); // repaint from the snapshot
//! }
//! handle.stop();
//! handle.shutdown();
//! ```

pub mod worker;

pub use worker::EngineWorker;

use crate::config::EngineConfig;
use crate::model::{ArraySlot, Bst, CellToggle, GraphState, Grid};
use crate::step::{CancelToken, SleepPacer, SpeedHandle, StepPacer};
use crate::types::{Algorithm, EngineEvent, EngineSnapshot, EngineStatus, RunMetrics};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Message sent from the UI to the worker
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Start a run; rejected by the handle if one is active
    Run(Algorithm),
    /// Replace the array with a fresh random one of `size` bars
    ResetArray { size: usize },
    /// Restore a cleared grid (walls and run state discarded)
    ResetGrid,
    /// Discard the BST
    ResetTree,
    /// Restore the pristine demo graph
    ResetGraph,
    /// Toggle a wall or move a start/end marker
    ToggleCell {
        row: usize,
        col: usize,
        mode: CellToggle,
    },
    /// Insert a value into the BST, animating the descent
    InsertValue(f64),
    /// Shut the worker down
    Shutdown,
}

/// The engine entry point; owns the worker until a thread consumes it
pub struct VisualizerEngine {
    worker: EngineWorker,
}

impl VisualizerEngine {
    /// Create an engine and its UI-side handle with real pacing
    pub fn new(config: EngineConfig) -> (Self, EngineHandle) {
        Self::with_pacer(config, Arc::new(SleepPacer))
    }

    /// Create an engine with a custom pacer. Tests and headless drivers
    /// pass [`crate::step::NoopPacer`] to run at full speed.
    pub fn with_pacer(
        config: EngineConfig,
        pacer: Arc<dyn StepPacer>,
    ) -> (Self, EngineHandle) {
        let (command_tx, command_rx) = bounded(64);
        let (event_tx, event_rx) = bounded(config.event_capacity.max(16));
        let shared = Arc::new(RwLock::new(EngineSnapshot::default()));
        let cancel = CancelToken::new();
        let speed = SpeedHandle::new(config.speed);
        let run_active = Arc::new(AtomicBool::new(false));

        let worker = EngineWorker::new(
            config,
            command_rx,
            event_tx,
            shared.clone(),
            cancel.clone(),
            speed.clone(),
            run_active.clone(),
            pacer,
        );

        let handle = EngineHandle {
            commands: command_tx,
            events: event_rx,
            shared,
            cancel,
            speed,
            run_active,
        };

        (Self { worker }, handle)
    }

    /// Run the worker loop on the current thread until shutdown
    pub fn run(mut self) {
        self.worker.run();
    }

    /// Spawn the worker loop on a new thread
    pub fn spawn(self) -> std::thread::JoinHandle<()> {
        std::thread::spawn(move || self.run())
    }
}

/// UI-side handle: control surface plus read-only snapshot accessors.
///
/// Every accessor clones from the snapshot the worker publishes at each
/// checkpoint, so the renderer can read at any time without blocking the
/// run.
pub struct EngineHandle {
    commands: Sender<EngineCommand>,
    events: Receiver<EngineEvent>,
    shared: Arc<RwLock<EngineSnapshot>>,
    cancel: CancelToken,
    speed: SpeedHandle,
    run_active: Arc<AtomicBool>,
}

impl EngineHandle {
    /// Start a run. Returns `false` without side effects if a run is
    /// already active.
    pub fn run(&self, algorithm: Algorithm) -> bool {
        if self
            .run_active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("run({}) ignored: a run is already active", algorithm);
            return false;
        }
        self.cancel.clear();
        if self.commands.send(EngineCommand::Run(algorithm)).is_err() {
            self.run_active.store(false, Ordering::SeqCst);
            return false;
        }
        true
    }

    /// Request cooperative cancellation of the active run.
    ///
    /// Advisory: the run halts at its next checkpoint. While idle this is
    /// a no-op, since every run clears the token before starting.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Set the animation speed (clamped to 1..=100). Affects subsequent
    /// waits only, never an in-flight one.
    pub fn set_speed(&self, speed: u32) {
        self.speed.set(speed);
    }

    pub fn speed(&self) -> u32 {
        self.speed.get()
    }

    /// Whether a run is currently active
    pub fn is_running(&self) -> bool {
        self.run_active.load(Ordering::SeqCst)
    }

    /// Replace the array with a fresh random one of `size` bars
    /// (clamped to 10..=100)
    pub fn reset_array(&self, size: usize) {
        let _ = self.commands.send(EngineCommand::ResetArray { size });
    }

    /// Restore a cleared grid
    pub fn reset_grid(&self) {
        let _ = self.commands.send(EngineCommand::ResetGrid);
    }

    /// Discard the BST
    pub fn reset_tree(&self) {
        let _ = self.commands.send(EngineCommand::ResetTree);
    }

    /// Restore the pristine demo graph
    pub fn reset_graph(&self) {
        let _ = self.commands.send(EngineCommand::ResetGraph);
    }

    /// Toggle a wall or move a start/end marker; invalid toggles are
    /// silently ignored
    pub fn toggle_cell(&self, row: usize, col: usize, mode: CellToggle) {
        let _ = self
            .commands
            .send(EngineCommand::ToggleCell { row, col, mode });
    }

    /// Insert a value into the BST; non-finite values are silently ignored
    pub fn insert_value(&self, value: f64) {
        let _ = self.commands.send(EngineCommand::InsertValue(value));
    }

    /// Request worker shutdown, cancelling any active run
    pub fn shutdown(&self) {
        self.cancel.cancel();
        let _ = self.commands.send(EngineCommand::Shutdown);
    }

    /// Try to receive one event without blocking
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.events.try_recv().ok()
    }

    /// Receive all pending events
    pub fn drain(&self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Current array snapshot
    pub fn array(&self) -> Vec<ArraySlot> {
        self.read_shared().array.clone()
    }

    /// Current grid snapshot
    pub fn grid(&self) -> Grid {
        self.read_shared().grid.clone()
    }

    /// Current graph snapshot
    pub fn graph(&self) -> GraphState {
        self.read_shared().graph.clone()
    }

    /// Current tree snapshot
    pub fn tree(&self) -> Bst {
        self.read_shared().tree.clone()
    }

    /// Counters and message from the current or most recent run
    pub fn metrics(&self) -> RunMetrics {
        self.read_shared().metrics.clone()
    }

    /// Whether the published snapshot says a run is in progress
    pub fn status(&self) -> EngineStatus {
        self.read_shared().status
    }

    fn read_shared(&self) -> std::sync::RwLockReadGuard<'_, EngineSnapshot> {
        match self.shared.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
