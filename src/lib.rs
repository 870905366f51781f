// Domain layer - engine, rules and patterns
pub mod domain;

// Application layer - timer and bookkeeping around the engine
pub mod application;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{CellField, EngineConfig, EngineError, LifeEngine, Pattern, RuleSet, Topology, presets};
pub use application::{Mode, Simulation};
pub use rendering::{Bitmap, FieldCache, Palette, paint_field};
