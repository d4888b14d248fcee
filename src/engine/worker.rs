//! Engine worker thread implementation
//!
//! The worker owns all four state models and is their only writer. It
//! blocks on the command channel between runs; during a run the executing
//! algorithm publishes the model to the shared snapshot at every
//! checkpoint, where the UI thread reads it.
//!
//! # Responsibilities
//!
//! - **Command processing**: resets, cell toggles, BST inserts, run
//!   dispatch
//! - **Run lifecycle**: clears per-run state, resets metrics, emits
//!   `RunStarted`/`RunFinished`, releases the active-run flag
//! - **Publishing**: copies models into the shared snapshot and notifies
//!   the event channel with `try_send` backpressure (dropped notifications
//!   are counted, never blocked on)
//!
//! # Cancellation
//!
//! The cancel token is set out-of-band by the handle and consulted at
//! every checkpoint inside the running algorithm. Commands that arrive
//! during a run wait in the queue and are processed after it ends, so the
//! state models never see a second writer.

use crate::algorithms::{bst, mst, pathfinding, sorting};
use crate::config::EngineConfig;
use crate::engine::EngineCommand;
use crate::model::array::{random_array, ArraySlot};
use crate::model::{Bst, GraphState, Grid};
use crate::step::{CancelToken, SpeedHandle, StepContext, StepPacer};
use crate::types::{
    Algorithm, EngineEvent, EngineSnapshot, EngineStatus, Family, RunOutcome,
};
use crossbeam_channel::{Receiver, Sender};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// The worker that owns the state models and executes runs
pub struct EngineWorker {
    config: EngineConfig,
    command_rx: Receiver<EngineCommand>,
    event_tx: Sender<EngineEvent>,
    shared: Arc<RwLock<EngineSnapshot>>,
    cancel: CancelToken,
    speed: SpeedHandle,
    run_active: Arc<AtomicBool>,
    pacer: Arc<dyn StepPacer>,
    rng: StdRng,
    array: Vec<ArraySlot>,
    grid: Grid,
    graph: GraphState,
    tree: Bst,
}

impl EngineWorker {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        config: EngineConfig,
        command_rx: Receiver<EngineCommand>,
        event_tx: Sender<EngineEvent>,
        shared: Arc<RwLock<EngineSnapshot>>,
        cancel: CancelToken,
        speed: SpeedHandle,
        run_active: Arc<AtomicBool>,
        pacer: Arc<dyn StepPacer>,
    ) -> Self {
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let array = random_array(config.array.size, config.array.value_range(), &mut rng);
        let grid = Grid::new(
            config.grid.rows,
            config.grid.cols,
            config.grid.start,
            config.grid.end,
        );

        Self {
            config,
            command_rx,
            event_tx,
            shared,
            cancel,
            speed,
            run_active,
            pacer,
            rng,
            array,
            grid,
            graph: GraphState::demo(),
            tree: Bst::default(),
        }
    }

    /// Run the worker loop until shutdown or channel disconnect
    pub fn run(&mut self) {
        tracing::info!("Engine worker started");
        self.publish_all();

        loop {
            match self.command_rx.recv() {
                Ok(EngineCommand::Shutdown) => break,
                Ok(cmd) => self.handle_command(cmd),
                Err(_) => {
                    tracing::debug!("Command channel closed, shutting down");
                    break;
                }
            }
        }

        self.notify(EngineEvent::Shutdown);
        tracing::info!("Engine worker stopped");
    }

    fn handle_command(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::Run(algorithm) => self.execute(algorithm),
            EngineCommand::ResetArray { size } => {
                self.array = random_array(size, self.config.array.value_range(), &mut self.rng);
                self.reset_metrics();
                self.publish(Family::Sorting);
            }
            EngineCommand::ResetGrid => {
                self.grid = Grid::new(
                    self.config.grid.rows,
                    self.config.grid.cols,
                    self.config.grid.start,
                    self.config.grid.end,
                );
                self.publish(Family::Pathfinding);
            }
            EngineCommand::ResetTree => {
                self.tree = Bst::default();
                self.publish(Family::Tree);
            }
            EngineCommand::ResetGraph => {
                self.graph = GraphState::demo();
                self.reset_metrics();
                self.publish(Family::Graph);
            }
            EngineCommand::ToggleCell { row, col, mode } => {
                if self.grid.toggle(row, col, mode) {
                    self.publish(Family::Pathfinding);
                } else {
                    tracing::debug!("toggle_cell({}, {}, {:?}) ignored", row, col, mode);
                }
            }
            EngineCommand::InsertValue(value) => self.execute_insert(value),
            // handled by the run loop; nothing to do here
            EngineCommand::Shutdown => {}
        }
    }

    /// Execute one full run: dispatch, final publish, lifecycle events
    fn execute(&mut self, algorithm: Algorithm) {
        tracing::info!("Run started: {}", algorithm);
        {
            let mut shared = self.write_shared();
            shared.status = EngineStatus::Running(algorithm);
            shared.metrics.reset();
        }
        self.notify(EngineEvent::RunStarted(algorithm));

        let mut ctx = self.step_context();
        let result = match algorithm {
            Algorithm::Sort(algo) => sorting::run(algo, &mut self.array, &mut ctx),
            Algorithm::Path(algo) => pathfinding::run(algo, &mut self.grid, &mut ctx),
            Algorithm::Mst(algo) => mst::run(algo, &mut self.graph, &mut ctx),
            Algorithm::Traverse(order) => match bst::traverse(&mut self.tree, order, &mut ctx) {
                Ok(values) => {
                    ctx.emit_message(format!(
                        "{}: {}",
                        order.display_name(),
                        join_values(&values)
                    ));
                    Ok(())
                }
                Err(cancelled) => Err(cancelled),
            },
        };

        let outcome = match result {
            Ok(()) => RunOutcome::Completed,
            Err(_) => RunOutcome::Cancelled,
        };
        let dropped = ctx.dropped_events();
        let metrics = ctx.metrics;

        {
            let mut shared = self.write_shared();
            shared.status = EngineStatus::Idle;
            shared.metrics = metrics;
            shared.array = self.array.clone();
            shared.grid = self.grid.clone();
            shared.graph = self.graph.clone();
            shared.tree = self.tree.clone();
        }
        self.cancel.clear();
        self.run_active.store(false, Ordering::SeqCst);
        self.notify(EngineEvent::RunFinished { algorithm, outcome });

        if dropped > 0 {
            tracing::debug!("{} state notifications dropped during run", dropped);
        }
        tracing::info!("Run finished: {} ({:?})", algorithm, outcome);
    }

    /// Animate a BST insert. Inserts go through the same checkpoint
    /// machinery as runs but are dispatched directly from the queue.
    fn execute_insert(&mut self, value: f64) {
        if !value.is_finite() {
            tracing::debug!("insert_value ignored: not a finite number");
            return;
        }
        self.cancel.clear();
        let mut ctx = self.step_context();
        let result = bst::insert(&mut self.tree, value, &mut ctx);
        {
            let mut shared = self.write_shared();
            shared.tree = self.tree.clone();
            shared.metrics = ctx.metrics;
        }
        if result.is_err() {
            tracing::info!("Insert of {} cancelled", value);
        }
    }

    fn step_context(&self) -> StepContext {
        StepContext::new(
            self.cancel.clone(),
            self.speed.clone(),
            self.pacer.clone(),
            self.shared.clone(),
            self.event_tx.clone(),
        )
    }

    fn reset_metrics(&self) {
        self.write_shared().metrics.reset();
    }

    /// Copy one family's model into the shared snapshot and notify
    fn publish(&self, family: Family) {
        {
            let mut shared = self.write_shared();
            match family {
                Family::Sorting => shared.array = self.array.clone(),
                Family::Pathfinding => shared.grid = self.grid.clone(),
                Family::Graph => shared.graph = self.graph.clone(),
                Family::Tree => shared.tree = self.tree.clone(),
            }
        }
        self.notify(EngineEvent::StateChanged(family));
    }

    fn publish_all(&self) {
        {
            let mut shared = self.write_shared();
            shared.array = self.array.clone();
            shared.grid = self.grid.clone();
            shared.graph = self.graph.clone();
            shared.tree = self.tree.clone();
        }
        for family in [
            Family::Sorting,
            Family::Pathfinding,
            Family::Graph,
            Family::Tree,
        ] {
            self.notify(EngineEvent::StateChanged(family));
        }
    }

    fn notify(&self, event: EngineEvent) {
        // dropped notifications are fine: the snapshot is the source of
        // truth and the renderer re-reads it on the next event
        let _ = self.event_tx.try_send(event);
    }

    fn write_shared(&self) -> std::sync::RwLockWriteGuard<'_, EngineSnapshot> {
        match self.shared.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Render a traversal result like `1, 3, 4, 5, 8`
fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellToggle;
    use crate::step::NoopPacer;
    use crate::types::{MstAlgorithm, SortAlgorithm, Traversal};
    use crossbeam_channel::bounded;

    fn create_test_worker() -> (
        EngineWorker,
        Sender<EngineCommand>,
        Receiver<EngineEvent>,
        Arc<RwLock<EngineSnapshot>>,
    ) {
        let config = EngineConfig {
            rng_seed: Some(7),
            ..Default::default()
        };
        let (cmd_tx, cmd_rx) = bounded(64);
        let (event_tx, event_rx) = bounded(1024);
        let shared = Arc::new(RwLock::new(EngineSnapshot::default()));
        let worker = EngineWorker::new(
            config,
            cmd_rx,
            event_tx,
            shared.clone(),
            CancelToken::new(),
            SpeedHandle::default(),
            Arc::new(AtomicBool::new(false)),
            Arc::new(NoopPacer),
        );
        (worker, cmd_tx, event_rx, shared)
    }

    #[test]
    fn test_worker_initial_state() {
        let (worker, _, _, _) = create_test_worker();
        assert_eq!(worker.array.len(), 50);
        assert_eq!(worker.grid.rows(), 20);
        assert_eq!(worker.grid.cols(), 35);
        assert_eq!(worker.graph.nodes.len(), 7);
        assert!(worker.tree.is_empty());
    }

    #[test]
    fn test_seeded_workers_agree() {
        let (a, _, _, _) = create_test_worker();
        let (b, _, _, _) = create_test_worker();
        assert_eq!(a.array, b.array);
    }

    #[test]
    fn test_reset_array_command() {
        let (mut worker, _, _, shared) = create_test_worker();
        worker.handle_command(EngineCommand::ResetArray { size: 25 });
        assert_eq!(worker.array.len(), 25);
        assert_eq!(shared.read().unwrap().array.len(), 25);
    }

    #[test]
    fn test_toggle_cell_command_publishes() {
        let (mut worker, _, events, shared) = create_test_worker();
        worker.handle_command(EngineCommand::ToggleCell {
            row: 0,
            col: 0,
            mode: CellToggle::Wall,
        });
        assert!(shared.read().unwrap().grid.cell(0, 0).is_wall);
        assert_eq!(
            events.try_recv(),
            Ok(EngineEvent::StateChanged(Family::Pathfinding))
        );
    }

    #[test]
    fn test_invalid_insert_is_a_no_op() {
        let (mut worker, _, events, _) = create_test_worker();
        worker.handle_command(EngineCommand::InsertValue(f64::NAN));
        assert!(worker.tree.is_empty());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_insert_builds_tree() {
        let (mut worker, _, _, shared) = create_test_worker();
        for value in [5.0, 3.0, 8.0] {
            worker.handle_command(EngineCommand::InsertValue(value));
        }
        assert_eq!(worker.tree.len(), 3);
        assert_eq!(shared.read().unwrap().tree.len(), 3);
    }

    #[test]
    fn test_execute_sort_publishes_final_state() {
        let (mut worker, _, events, shared) = create_test_worker();
        worker.execute(Algorithm::Sort(SortAlgorithm::Quick));

        let snapshot = shared.read().unwrap();
        assert!(crate::model::array::is_sorted(&snapshot.array));
        assert!(!snapshot.status.is_running());
        assert!(snapshot.metrics.comparisons > 0);
        drop(snapshot);

        let drained: Vec<_> = events.try_iter().collect();
        assert!(drained.contains(&EngineEvent::RunStarted(Algorithm::Sort(
            SortAlgorithm::Quick
        ))));
        assert!(drained.iter().any(|e| matches!(
            e,
            EngineEvent::RunFinished {
                outcome: RunOutcome::Completed,
                ..
            }
        )));
    }

    #[test]
    fn test_execute_mst_sets_message() {
        let (mut worker, _, _, shared) = create_test_worker();
        worker.execute(Algorithm::Mst(MstAlgorithm::Kruskal));
        let snapshot = shared.read().unwrap();
        assert_eq!(snapshot.graph.mst_edge_count(), 6);
        assert!(snapshot.metrics.message.starts_with("Added edge"));
    }

    #[test]
    fn test_traversal_message_lists_values() {
        let (mut worker, _, _, shared) = create_test_worker();
        for value in [5.0, 3.0, 8.0, 1.0, 4.0] {
            worker.handle_command(EngineCommand::InsertValue(value));
        }
        worker.execute(Algorithm::Traverse(Traversal::Inorder));
        let snapshot = shared.read().unwrap();
        assert_eq!(
            snapshot.metrics.message,
            "Inorder Traversal: 1, 3, 4, 5, 8"
        );
        assert_eq!(snapshot.tree.last_traversal, vec![1.0, 3.0, 4.0, 5.0, 8.0]);
    }

    #[test]
    fn test_cancelled_run_reports_cancelled() {
        let (mut worker, _, events, _) = create_test_worker();
        worker.cancel.cancel();
        worker.execute(Algorithm::Sort(SortAlgorithm::Bubble));
        let drained: Vec<_> = events.try_iter().collect();
        assert!(drained.iter().any(|e| matches!(
            e,
            EngineEvent::RunFinished {
                outcome: RunOutcome::Cancelled,
                ..
            }
        )));
        // the token is cleared so the next run proceeds
        assert!(!worker.cancel.is_cancelled());
    }
}
