use rand::SeedableRng;
use rand::rngs::StdRng;

use super::engine::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::{EngineError, LifeEngine, RuleSet, Topology};

/// Initial contents of a freshly built field.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum InitialFill {
    #[default]
    Dead,
    /// Every cell alive. On a torus this dies out completely after one update.
    Live,
    /// Reproducible noise: each cell is alive with probability `density`.
    Random { density: f64, seed: u64 },
}

/// Everything needed to build a [`LifeEngine`].
///
/// ```
/// use sparse_life::domain::{EngineConfig, Topology};
///
/// let engine = EngineConfig {
///     width: 40,
///     height: 30,
///     topology: Topology::Bounded,
///     ..Default::default()
/// }
/// .build()
/// .unwrap();
/// assert_eq!(engine.population(), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub topology: Topology,
    pub rule: RuleSet,
    pub fill: InitialFill,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            topology: Topology::default(),
            rule: RuleSet::default(),
            fill: InitialFill::default(),
        }
    }
}

impl EngineConfig {
    pub fn build(&self) -> Result<LifeEngine, EngineError> {
        let mut engine =
            LifeEngine::with_options(self.width, self.height, self.topology, self.rule)?;
        match self.fill {
            InitialFill::Dead => {}
            InitialFill::Live => engine.fill_live(),
            InitialFill::Random { density, seed } => {
                engine.randomize(&mut StdRng::seed_from_u64(seed), density)?;
            }
        }
        Ok(engine)
    }
}
