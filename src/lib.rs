//! moonwake
//!
//! A single-threaded orchestrator for a moonlit-water web scene. The crate
//! owns initialization gating, the frame scheduler, the scene data model and
//! the reactive configuration flow, while rendering, input, asset transport
//! and the parameter panel stay behind host-provided trait objects. The
//! design targets both native embedding and the web, with one asynchronous
//! suspension point (the asset load) and a deterministic frame loop after it.
//!
//! High-level modules
//! - `camera`: perspective camera state and view/projection matrices
//! - `config`: the configuration store and its subscription fan-out
//! - `content`: declarative scene content modules and the asset manifest
//! - `context`: host collaborator contracts and the context bundle
//! - `data_structures`: engine data models (scene graph, colours, materials)
//! - `orchestrator`: lifecycle sequencing and the per-refresh frame driver
//! - `panel`: parameter-panel widgets bound to the configuration store
//! - `reflector`: the animated planar reflection driver
//! - `resources`: asset manifest loading and the typed registry
//! - `scheduler`: the stoppable frame scheduler and its monotonic clock
//! - `starfield`: procedural star-field point cloud generation
//! - `timeline`: one-shot tween timelines (intro camera move, scale-ins)
//! - `viewport`: resize adaptation between host viewport and camera/surface
//!

pub mod camera;
pub mod config;
pub mod content;
pub mod context;
pub mod data_structures;
pub mod orchestrator;
pub mod panel;
pub mod reflector;
pub mod resources;
pub mod scheduler;
pub mod starfield;
pub mod timeline;
pub mod viewport;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use orchestrator::{OrchestratorOptions, SceneOrchestrator, bootstrap};
