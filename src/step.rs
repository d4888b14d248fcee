//! Step scheduling, pacing, and cooperative cancellation
//!
//! Every meaningful operation inside an algorithm (a comparison, a cell
//! visit, an accepted edge) is a **checkpoint**: the algorithm publishes the
//! current state model to the shared snapshot, notifies the event channel,
//! applies a speed-derived delay, and tests the cancellation token. A set
//! token makes the checkpoint return [`Cancelled`], which the algorithms
//! propagate with `?`.
//!
//! # Delay derivation
//!
//! All delays derive from a single speed parameter in 1..=100:
//!
//! - [`StepClass::Compare`], [`StepClass::GraphStep`], [`StepClass::TreeVisit`]:
//!   `101 - speed` ms
//! - [`StepClass::Visit`]: `11 - speed/10` ms
//! - [`StepClass::PathTrace`]: fixed 20 ms; path replay is not speed-scaled
//!   so the final path stays legible at high speeds
//!
//! Wall-clock delay is a presentation concern, so it goes through the
//! pluggable [`StepPacer`] trait: the engine installs [`SleepPacer`];
//! tests and benches install [`NoopPacer`] and run at full speed.
//!
//! # Cancellation semantics
//!
//! Cancellation is advisory and non-preemptive: the token is consulted only
//! at checkpoints, so recursive algorithms may execute bounded extra frames
//! after `stop()` before the next checkpoint is reached. This is expected
//! behavior, not a race: no checkpoint is skipped inside a tight loop, so
//! the bound is one checkpoint's worth of work.

use crate::model::{ArraySlot, Bst, GraphState, Grid};
use crate::types::{EngineEvent, EngineSnapshot, Family, RunMetrics};
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Slowest configurable speed
pub const MIN_SPEED: u32 = 1;

/// Fastest configurable speed
pub const MAX_SPEED: u32 = 100;

/// Speed used when none is configured
pub const DEFAULT_SPEED: u32 = 50;

/// A run was cancelled at a checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("run cancelled")]
pub struct Cancelled;

/// Result of a checkpoint
pub type StepResult = std::result::Result<(), Cancelled>;

/// Cancellation token shared between the controller and the running
/// algorithm. Setting it requests cooperative cancellation at the next
/// checkpoint.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Clear the token before a new run
    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Shared speed parameter, clamped to 1..=100 on every write.
///
/// Updated out-of-band by the UI thread; affects subsequent waits only,
/// never an in-flight one.
#[derive(Debug, Clone)]
pub struct SpeedHandle(Arc<AtomicU32>);

impl SpeedHandle {
    pub fn new(speed: u32) -> Self {
        Self(Arc::new(AtomicU32::new(speed.clamp(MIN_SPEED, MAX_SPEED))))
    }

    pub fn set(&self, speed: u32) {
        self.0
            .store(speed.clamp(MIN_SPEED, MAX_SPEED), Ordering::SeqCst);
    }

    pub fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for SpeedHandle {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

/// The kind of algorithmic event a checkpoint represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepClass {
    /// A sorting comparison or placement
    Compare,
    /// A grid cell visit
    Visit,
    /// One cell of path reconstruction replay
    PathTrace,
    /// An MST scan/acceptance step
    GraphStep,
    /// A BST node visit
    TreeVisit,
}

impl StepClass {
    /// Delay for this step at the given speed
    pub fn delay(self, speed: u32) -> Duration {
        let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        match self {
            StepClass::Compare | StepClass::GraphStep | StepClass::TreeVisit => {
                Duration::from_millis((101 - speed) as u64)
            }
            StepClass::Visit => Duration::from_secs_f64((11.0 - speed as f64 / 10.0) / 1000.0),
            StepClass::PathTrace => Duration::from_millis(20),
        }
    }
}

/// Pluggable wall-clock pacing seam.
///
/// The engine installs [`SleepPacer`]; non-visual runs (tests, benches)
/// install [`NoopPacer`].
#[cfg_attr(test, mockall::automock)]
pub trait StepPacer: Send + Sync {
    fn pace(&self, delay: Duration);
}

/// Pacer that blocks the worker thread for the requested delay
#[derive(Debug, Default)]
pub struct SleepPacer;

impl StepPacer for SleepPacer {
    fn pace(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Pacer that skips all delays
#[derive(Debug, Default)]
pub struct NoopPacer;

impl StepPacer for NoopPacer {
    fn pace(&self, _delay: Duration) {}
}

/// Per-run execution context handed to every algorithm.
///
/// Owns the working metrics and the publishing side of the snapshot; each
/// `yield_*` call is one checkpoint.
pub struct StepContext {
    cancel: CancelToken,
    speed: SpeedHandle,
    pacer: Arc<dyn StepPacer>,
    shared: Arc<RwLock<EngineSnapshot>>,
    events: Sender<EngineEvent>,
    /// Working counters, published at every checkpoint
    pub metrics: RunMetrics,
    dropped_events: u64,
}

impl StepContext {
    pub fn new(
        cancel: CancelToken,
        speed: SpeedHandle,
        pacer: Arc<dyn StepPacer>,
        shared: Arc<RwLock<EngineSnapshot>>,
        events: Sender<EngineEvent>,
    ) -> Self {
        Self {
            cancel,
            speed,
            pacer,
            shared,
            events,
            metrics: RunMetrics::default(),
            dropped_events: 0,
        }
    }

    /// Context with no pacing, no subscribers, and a private snapshot.
    ///
    /// For driving algorithms headlessly (property tests, benches, batch
    /// verification) at full speed.
    pub fn detached() -> Self {
        let (events, _) = crossbeam_channel::bounded(1);
        Self::new(
            CancelToken::new(),
            SpeedHandle::default(),
            Arc::new(NoopPacer),
            Arc::new(RwLock::new(EngineSnapshot::default())),
            events,
        )
    }

    /// The cancellation token this context consults
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Notifications dropped under backpressure so far
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    pub fn count_comparison(&mut self) {
        self.metrics.comparisons += 1;
    }

    pub fn count_swap(&mut self) {
        self.metrics.swaps += 1;
    }

    /// Set the current progress message and notify the UI
    pub fn emit_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.metrics.message = message.clone();
        self.notify(EngineEvent::Message(message));
    }

    /// Checkpoint for the sorting family
    pub fn yield_array(&mut self, slots: &[ArraySlot]) -> StepResult {
        {
            let mut shared = self.write_shared();
            shared.array.clear();
            shared.array.extend_from_slice(slots);
            shared.metrics = self.metrics.clone();
        }
        self.finish_step(Family::Sorting, StepClass::Compare)
    }

    /// Checkpoint for the pathfinding family
    pub fn yield_grid(&mut self, grid: &Grid, class: StepClass) -> StepResult {
        {
            let mut shared = self.write_shared();
            shared.grid = grid.clone();
            shared.metrics = self.metrics.clone();
        }
        self.finish_step(Family::Pathfinding, class)
    }

    /// Checkpoint for the MST family
    pub fn yield_graph(&mut self, graph: &GraphState) -> StepResult {
        {
            let mut shared = self.write_shared();
            shared.graph = graph.clone();
            shared.metrics = self.metrics.clone();
        }
        self.finish_step(Family::Graph, StepClass::GraphStep)
    }

    /// Checkpoint for the BST family
    pub fn yield_tree(&mut self, tree: &Bst) -> StepResult {
        {
            let mut shared = self.write_shared();
            shared.tree = tree.clone();
            shared.metrics = self.metrics.clone();
        }
        self.finish_step(Family::Tree, StepClass::TreeVisit)
    }

    fn write_shared(&self) -> std::sync::RwLockWriteGuard<'_, EngineSnapshot> {
        // A poisoned lock means a renderer panicked mid-read; the snapshot
        // itself is still consistent because writers never panic between
        // field updates.
        match self.shared.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn notify(&mut self, event: EngineEvent) {
        if self.events.try_send(event).is_err() {
            self.dropped_events += 1;
        }
    }

    /// Suspend: notify, pace, then test the cancellation token
    fn finish_step(&mut self, family: Family, class: StepClass) -> StepResult {
        self.notify(EngineEvent::StateChanged(family));
        self.pacer.pace(class.delay(self.speed.get()));
        if self.cancel.is_cancelled() {
            return Err(Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArraySlot;
    use crossbeam_channel::bounded;

    fn create_test_context() -> (
        StepContext,
        Arc<RwLock<EngineSnapshot>>,
        crossbeam_channel::Receiver<EngineEvent>,
    ) {
        let shared = Arc::new(RwLock::new(EngineSnapshot::default()));
        let (tx, rx) = bounded(64);
        let ctx = StepContext::new(
            CancelToken::new(),
            SpeedHandle::default(),
            Arc::new(NoopPacer),
            shared.clone(),
            tx,
        );
        (ctx, shared, rx)
    }

    #[test]
    fn test_delay_derivation() {
        assert_eq!(StepClass::Compare.delay(1), Duration::from_millis(100));
        assert_eq!(StepClass::Compare.delay(100), Duration::from_millis(1));
        assert_eq!(StepClass::PathTrace.delay(1), Duration::from_millis(20));
        assert_eq!(StepClass::PathTrace.delay(100), Duration::from_millis(20));
        assert_eq!(
            StepClass::Visit.delay(100),
            Duration::from_secs_f64(0.001)
        );
        // out-of-range speeds clamp instead of under/overflowing
        assert_eq!(StepClass::Compare.delay(0), Duration::from_millis(100));
        assert_eq!(StepClass::Compare.delay(500), Duration::from_millis(1));
    }

    #[test]
    fn test_speed_handle_clamps() {
        let speed = SpeedHandle::new(50);
        speed.set(0);
        assert_eq!(speed.get(), MIN_SPEED);
        speed.set(1000);
        assert_eq!(speed.get(), MAX_SPEED);
    }

    #[test]
    fn test_checkpoint_publishes_and_notifies() {
        let (mut ctx, shared, rx) = create_test_context();
        let slots = vec![ArraySlot::new(3), ArraySlot::new(1)];
        ctx.count_comparison();
        ctx.yield_array(&slots).unwrap();

        let snapshot = shared.read().unwrap();
        assert_eq!(snapshot.array.len(), 2);
        assert_eq!(snapshot.metrics.comparisons, 1);
        assert_eq!(rx.try_recv(), Ok(EngineEvent::StateChanged(Family::Sorting)));
    }

    #[test]
    fn test_cancelled_checkpoint() {
        let (mut ctx, _, _rx) = create_test_context();
        let token = ctx.cancel_token();
        token.cancel();
        assert_eq!(ctx.yield_array(&[ArraySlot::new(1)]), Err(Cancelled));
        token.clear();
        assert_eq!(ctx.yield_array(&[ArraySlot::new(1)]), Ok(()));
    }

    #[test]
    fn test_pacer_receives_derived_delay() {
        let shared = Arc::new(RwLock::new(EngineSnapshot::default()));
        let (tx, _rx) = bounded(64);
        let mut pacer = MockStepPacer::new();
        pacer
            .expect_pace()
            .withf(|d| *d == Duration::from_millis(51))
            .times(1)
            .return_const(());

        let speed = SpeedHandle::new(50);
        let mut ctx = StepContext::new(
            CancelToken::new(),
            speed,
            Arc::new(pacer),
            shared,
            tx,
        );
        ctx.yield_array(&[ArraySlot::new(1)]).unwrap();
    }

    #[test]
    fn test_dropped_events_counted() {
        let shared = Arc::new(RwLock::new(EngineSnapshot::default()));
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut ctx = StepContext::new(
            CancelToken::new(),
            SpeedHandle::default(),
            Arc::new(NoopPacer),
            shared,
            tx,
        );
        ctx.yield_array(&[ArraySlot::new(1)]).unwrap();
        assert_eq!(ctx.dropped_events(), 1);
    }
}
