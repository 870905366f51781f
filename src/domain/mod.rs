mod cell;
mod config;
mod engine;
mod error;
mod grid;
mod patterns;
mod rules;
mod topology;

pub(crate) use cell::CellStatus;
pub use config::{EngineConfig, InitialFill};
pub use engine::{CellField, LifeEngine, DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_SIDE};
pub use error::{EngineError, RuleParseError};
pub use patterns::{Pattern, presets};
pub use rules::{RuleSet, all_rules};
pub use topology::Topology;
