//! # AlgoVis-RS: Step-Instrumented Algorithm Engine
//!
//! A headless execution engine that runs classic sorting, grid
//! pathfinding, minimum-spanning-tree, and binary-search-tree algorithms
//! step by step, exposing every intermediate state for rendering. The
//! architecture separates the stepping backend from the (external) UI
//! frontend: the engine owns the state models and mutates them on its
//! worker thread; a renderer reads published snapshots after each
//! checkpoint and never writes.
//!
//! ## Architecture
//!
//! - **Model**: per-family state (annotated bars, grid cells, weighted
//!   graph, BST) with pure mutation helpers
//! - **Algorithms**: 6 sorts, 4 grid searches, 2 MST builders, BST
//!   insert + 3 traversals, each checkpointing after every meaningful
//!   operation
//! - **Step scheduling**: speed-derived delays behind a pluggable pacer,
//!   with a cancellation test at every checkpoint
//! - **Engine**: worker thread, command/event channels, at-most-one
//!   active run
//!
//! ## Example
//!
//! ```ignore
//! use algovis_rs::config::EngineConfig;
//! use algovis_rs::engine::VisualizerEngine;
//! use algovis_rs::types::{Algorithm, PathAlgorithm};
//!
//! let config = EngineConfig::load_or_default("algovis.toml");
//! let (engine, handle) = VisualizerEngine::new(config);
//! let worker = engine.spawn();
//!
//! handle.run(Algorithm::Path(PathAlgorithm::AStar));
//! while handle.is_running() {
//!     for event in handle.drain() {
//!         // repaint from handle.grid() / handle.metrics()
//!     }
//! }
//!
//! handle.shutdown();
//! worker.join().unwrap();
//! ```

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod step;
pub mod types;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{EngineCommand, EngineHandle, VisualizerEngine};
pub use error::{EngineError, Result};
pub use step::{CancelToken, NoopPacer, SleepPacer, StepContext, StepPacer};
pub use types::{Algorithm, EngineEvent, EngineSnapshot, Family, RunMetrics, RunOutcome};
