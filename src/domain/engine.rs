//! Sparse Game of Life engine.
//!
//! The engine keeps a dense grid of cell states next to a hash set of the
//! coordinates that are currently alive. A generation step only visits live
//! cells and their neighborhoods, so its cost follows the population rather
//! than the field area.

use std::collections::HashSet;

use rand::Rng;

use super::grid::Grid;
use super::{CellStatus, EngineError, RuleSet, Topology};

/// Size of a default-constructed engine.
pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_HEIGHT: usize = 100;

/// Smallest accepted side length.
pub const MIN_SIDE: usize = 3;

/// Read-only view of a field, the only thing renderers get to see.
pub trait CellField {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn is_alive(&self, x: usize, y: usize) -> Result<bool, EngineError>;
}

/// Game of Life field with sparse live-cell tracking.
#[derive(Clone, Debug)]
pub struct LifeEngine {
    grid: Grid,
    /// All-dead buffer the next generation is written into.
    scratch: Grid,
    live: HashSet<(usize, usize)>,
    topology: Topology,
    rule: RuleSet,
}

impl LifeEngine {
    /// Create an all-dead toroidal Conway field.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        Self::with_options(width, height, Topology::default(), RuleSet::default())
    }

    pub fn with_options(
        width: usize,
        height: usize,
        topology: Topology,
        rule: RuleSet,
    ) -> Result<Self, EngineError> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        Ok(Self::blank(width, height, topology, rule))
    }

    fn blank(width: usize, height: usize, topology: Topology, rule: RuleSet) -> Self {
        Self {
            grid: Grid::filled(width, height, CellStatus::Dead),
            scratch: Grid::filled(width, height, CellStatus::Dead),
            live: HashSet::new(),
            topology,
            rule,
        }
    }

    pub const fn width(&self) -> usize {
        self.grid.dimensions().0
    }

    pub const fn height(&self) -> usize {
        self.grid.dimensions().1
    }

    pub const fn topology(&self) -> Topology {
        self.topology
    }

    pub const fn rule(&self) -> RuleSet {
        self.rule
    }

    pub fn set_rule(&mut self, rule: RuleSet) {
        self.rule = rule;
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.live.len()
    }

    fn check(&self, x: usize, y: usize) -> Result<(usize, usize), EngineError> {
        let (width, height) = self.grid.dimensions();
        if x < width && y < height {
            Ok((x, y))
        } else {
            Err(EngineError::OutOfRange { x, y, width, height })
        }
    }

    pub fn is_alive(&self, x: usize, y: usize) -> Result<bool, EngineError> {
        let pos = self.check(x, y)?;
        Ok(self.grid.get(pos).is_alive())
    }

    /// Bring a cell to life. No-op if it already is.
    pub fn revive(&mut self, x: usize, y: usize) -> Result<(), EngineError> {
        let pos = self.check(x, y)?;
        if self.live.insert(pos) {
            self.grid.set(pos, CellStatus::Live);
        }
        Ok(())
    }

    /// Kill a cell. No-op if it is already dead.
    pub fn kill(&mut self, x: usize, y: usize) -> Result<(), EngineError> {
        let pos = self.check(x, y)?;
        self.live.remove(&pos);
        self.grid.set(pos, CellStatus::Dead);
        Ok(())
    }

    /// Flip a cell and return whether it is alive afterwards.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<bool, EngineError> {
        if self.is_alive(x, y)? {
            self.kill(x, y)?;
            Ok(false)
        } else {
            self.revive(x, y)?;
            Ok(true)
        }
    }

    pub fn clear(&mut self) {
        self.grid.fill(CellStatus::Dead);
        self.live.clear();
    }

    /// Clear the field, then revive every cell with probability `density`.
    pub fn randomize<R: Rng>(
        &mut self,
        rng: &mut R,
        density: f64,
    ) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(EngineError::InvalidDensity(density));
        }
        self.clear();
        let (width, height) = self.grid.dimensions();
        for y in 0..height {
            for x in 0..width {
                if rng.random_bool(density) {
                    self.live.insert((x, y));
                    self.grid.set((x, y), CellStatus::Live);
                }
            }
        }
        Ok(())
    }

    /// Set every cell alive.
    pub(crate) fn fill_live(&mut self) {
        self.grid.fill(CellStatus::Live);
        self.live = self.grid.iter_cells().map(|(pos, _)| pos).collect();
    }

    /// Advance one generation.
    ///
    /// Only live cells and their neighbors are examined. Each dead neighbor is
    /// resolved at most once per call: it is either born into the scratch
    /// buffer or marked `Processed` there so later live cells skip it.
    pub fn update(&mut self) {
        let (width, height) = self.grid.dimensions();
        let topology = self.topology;
        let rule = self.rule;
        let current = &self.grid;
        let next = &mut self.scratch;
        let live = &mut self.live;

        // The set gains and loses members below, so walk a snapshot.
        let previous: Vec<(usize, usize)> = live.iter().copied().collect();
        let mut visited: Vec<(usize, usize)> = Vec::new();

        for &pos in &previous {
            let count = current.count_live_neighbors(pos, topology);
            if rule.survives(count) {
                next.set(pos, CellStatus::Live);
            } else {
                next.set(pos, CellStatus::Processed);
                visited.push(pos);
                live.remove(&pos);
            }

            for neighbor in topology.neighbors(pos, width, height) {
                // Live neighbors are decided by their own pass.
                if !next.get(neighbor).is_unresolved() || current.get(neighbor).is_alive() {
                    continue;
                }
                if rule.is_born(current.count_live_neighbors(neighbor, topology)) {
                    next.set(neighbor, CellStatus::Live);
                    live.insert(neighbor);
                } else {
                    next.set(neighbor, CellStatus::Processed);
                    visited.push(neighbor);
                }
            }
        }

        std::mem::swap(&mut self.grid, &mut self.scratch);

        // Scrub the markers from the published grid and return the old buffer
        // to all-dead so it can be reused next tick.
        for pos in visited {
            self.grid.set(pos, CellStatus::Dead);
        }
        for pos in previous {
            self.scratch.set(pos, CellStatus::Dead);
        }
    }
}

impl Default for LifeEngine {
    /// 100x100 torus running Conway's rule, every cell dead.
    fn default() -> Self {
        Self::blank(
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            Topology::default(),
            RuleSet::default(),
        )
    }
}

impl CellField for LifeEngine {
    fn width(&self) -> usize {
        LifeEngine::width(self)
    }

    fn height(&self) -> usize {
        LifeEngine::height(self)
    }

    fn is_alive(&self, x: usize, y: usize) -> Result<bool, EngineError> {
        LifeEngine::is_alive(self, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine_with(width: usize, height: usize, cells: &[(usize, usize)]) -> LifeEngine {
        let mut engine = LifeEngine::new(width, height).unwrap();
        for &(x, y) in cells {
            engine.revive(x, y).unwrap();
        }
        engine
    }

    fn live_cells(engine: &LifeEngine) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = (0..engine.height())
            .flat_map(|y| (0..engine.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| engine.is_alive(x, y).unwrap())
            .collect();
        cells.sort();
        cells
    }

    /// Full-grid scan against the live set; also rejects leaked markers.
    fn assert_consistent(engine: &LifeEngine) {
        for (pos, status) in engine.grid.iter_cells() {
            assert_ne!(status, CellStatus::Processed, "marker leaked at {:?}", pos);
            assert_eq!(
                status.is_alive(),
                engine.live.contains(&pos),
                "grid and live set disagree at {:?}",
                pos
            );
        }
        assert!(
            engine.scratch.iter_cells().all(|(_, s)| s == CellStatus::Dead),
            "scratch buffer not reset"
        );
    }

    /// Dense full-scan step used as the reference.
    fn dense_step(engine: &LifeEngine) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = engine
            .grid
            .iter_cells()
            .filter(|&(pos, status)| {
                let count = engine.grid.count_live_neighbors(pos, engine.topology);
                engine.rule.next_state(status.is_alive(), count)
            })
            .map(|(pos, _)| pos)
            .collect();
        cells.sort();
        cells
    }

    #[test]
    fn test_rejects_small_dimensions() {
        assert_eq!(
            LifeEngine::new(2, 10).unwrap_err(),
            EngineError::InvalidDimensions { width: 2, height: 10 }
        );
        assert!(LifeEngine::new(10, 0).is_err());
        assert!(LifeEngine::new(3, 3).is_ok());
    }

    #[test]
    fn test_default_is_empty_hundred_square() {
        let engine = LifeEngine::default();
        assert_eq!((engine.width(), engine.height()), (100, 100));
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.topology(), Topology::Torus);
        assert_consistent(&engine);
    }

    #[test]
    fn test_out_of_range_leaves_state_untouched() {
        let mut engine = engine_with(5, 4, &[(1, 1)]);
        let err = EngineError::OutOfRange { x: 5, y: 0, width: 5, height: 4 };
        assert_eq!(engine.is_alive(5, 0), Err(err.clone()));
        assert_eq!(engine.revive(5, 0), Err(err.clone()));
        assert_eq!(engine.kill(5, 0), Err(err));
        assert!(engine.toggle(0, 4).is_err());
        assert_eq!(live_cells(&engine), vec![(1, 1)]);
        assert_consistent(&engine);
    }

    #[test]
    fn test_revive_is_idempotent() {
        let mut engine = engine_with(5, 5, &[(2, 2)]);
        engine.revive(2, 2).unwrap();
        assert_eq!(engine.population(), 1);
        assert_consistent(&engine);
    }

    #[test]
    fn test_revive_then_kill_restores_state() {
        let mut engine = engine_with(6, 6, &[(0, 0), (3, 4)]);
        let before = live_cells(&engine);
        engine.revive(2, 2).unwrap();
        engine.kill(2, 2).unwrap();
        assert_eq!(live_cells(&engine), before);
        engine.kill(2, 2).unwrap();
        assert_eq!(live_cells(&engine), before);
        assert_consistent(&engine);
    }

    #[test]
    fn test_toggle_flips_cell() {
        let mut engine = LifeEngine::new(4, 4).unwrap();
        assert_eq!(engine.toggle(1, 2), Ok(true));
        assert!(engine.is_alive(1, 2).unwrap());
        assert_eq!(engine.toggle(1, 2), Ok(false));
        assert_eq!(engine.population(), 0);
        assert_consistent(&engine);
    }

    #[test]
    fn test_clear_kills_everything() {
        let mut engine = engine_with(8, 8, &[(0, 0), (7, 7), (3, 5)]);
        engine.clear();
        assert!(live_cells(&engine).is_empty());
        assert_eq!(engine.population(), 0);
        assert_consistent(&engine);
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut engine = engine_with(10, 10, &[(5, 5)]);
        engine.update();
        assert_eq!(engine.population(), 0);
        assert_consistent(&engine);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = vec![(1, 2), (2, 2), (3, 2)];
        let vertical = vec![(2, 1), (2, 2), (2, 3)];
        let mut engine = engine_with(5, 5, &horizontal);

        engine.update();
        assert_eq!(live_cells(&engine), vertical);
        assert_consistent(&engine);

        engine.update();
        assert_eq!(live_cells(&engine), horizontal);
        assert_consistent(&engine);
    }

    #[test]
    fn test_block_is_still_life() {
        let block = vec![(4, 4), (4, 5), (5, 4), (5, 5)];
        let mut engine = engine_with(10, 10, &block);
        for _ in 0..10 {
            engine.update();
            assert_eq!(live_cells(&engine), block);
            assert_consistent(&engine);
        }
    }

    #[test]
    fn test_empty_board_stays_empty() {
        let mut engine = LifeEngine::new(7, 7).unwrap();
        for _ in 0..5 {
            engine.update();
        }
        assert_eq!(engine.population(), 0);
        assert_consistent(&engine);
    }

    #[test]
    fn test_torus_corner_sees_opposite_corner() {
        let engine = engine_with(6, 5, &[(0, 0), (5, 4)]);
        assert_eq!(engine.grid.count_live_neighbors((0, 0), Topology::Torus), 1);
    }

    #[test]
    fn test_torus_births_across_the_seam() {
        // Three cells around the (0, 0) corner, spread over all four corners of the field.
        let mut engine = engine_with(6, 6, &[(5, 5), (0, 5), (5, 0)]);
        engine.update();
        assert!(engine.is_alive(0, 0).unwrap());
        assert_consistent(&engine);
    }

    #[test]
    fn test_bounded_edge_does_not_wrap() {
        let mut engine =
            LifeEngine::with_options(6, 6, Topology::Bounded, RuleSet::CONWAY).unwrap();
        for (x, y) in [(5, 5), (0, 5), (5, 0)] {
            engine.revive(x, y).unwrap();
        }
        engine.update();
        assert_eq!(engine.population(), 0);
        assert_consistent(&engine);
    }

    #[test]
    fn test_bounded_blinker_touching_edge_still_oscillates() {
        // The vertical phase reaches row 0 but never needs row -1.
        let mut engine =
            LifeEngine::with_options(5, 5, Topology::Bounded, RuleSet::CONWAY).unwrap();
        for (x, y) in [(0, 1), (1, 1), (2, 1)] {
            engine.revive(x, y).unwrap();
        }
        engine.update();
        assert_eq!(live_cells(&engine), vec![(1, 0), (1, 1), (1, 2)]);
        engine.update();
        assert_eq!(live_cells(&engine), vec![(0, 1), (1, 1), (2, 1)]);
        assert_consistent(&engine);
    }

    #[test]
    fn test_glider_returns_shifted_after_four_generations() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut engine = engine_with(8, 8, &glider);
        for _ in 0..4 {
            engine.update();
        }
        let mut expected: Vec<_> = glider.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        expected.sort();
        assert_eq!(live_cells(&engine), expected);
        assert_consistent(&engine);
    }

    #[test]
    fn test_sparse_update_matches_dense_scan() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for (topology, rule) in [
            (Topology::Torus, RuleSet::CONWAY),
            (Topology::Bounded, RuleSet::CONWAY),
            (Topology::Torus, RuleSet::HIGHLIFE),
            (Topology::Bounded, RuleSet::DAY_AND_NIGHT),
            (Topology::Torus, RuleSet::SEEDS),
        ] {
            let mut engine = LifeEngine::with_options(23, 17, topology, rule).unwrap();
            engine.randomize(&mut rng, 0.35).unwrap();
            for generation in 0..30 {
                let expected = dense_step(&engine);
                engine.update();
                assert_eq!(
                    live_cells(&engine),
                    expected,
                    "{} on {:?} diverged at generation {}",
                    rule,
                    topology,
                    generation
                );
                assert_consistent(&engine);
            }
        }
    }

    #[test]
    fn test_smallest_torus_matches_dense_scan() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = LifeEngine::new(3, 3).unwrap();
        for _ in 0..20 {
            engine.randomize(&mut rng, 0.5).unwrap();
            let expected = dense_step(&engine);
            engine.update();
            assert_eq!(live_cells(&engine), expected);
            assert_consistent(&engine);
        }
    }

    #[test]
    fn test_all_live_torus_dies_out() {
        // Every cell has 8 neighbors, so overpopulation kills the whole field.
        let mut engine = LifeEngine::new(10, 10).unwrap();
        engine.fill_live();
        assert_eq!(engine.population(), 100);
        assert_consistent(&engine);
        engine.update();
        assert_eq!(engine.population(), 0);
        assert_consistent(&engine);
    }

    #[test]
    fn test_randomize_validates_density() {
        let mut engine = engine_with(5, 5, &[(1, 1)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            engine.randomize(&mut rng, 1.5),
            Err(EngineError::InvalidDensity(1.5))
        );
        assert_eq!(live_cells(&engine), vec![(1, 1)]);

        engine.randomize(&mut rng, 1.0).unwrap();
        assert_eq!(engine.population(), 25);
        engine.randomize(&mut rng, 0.0).unwrap();
        assert_eq!(engine.population(), 0);
        assert_consistent(&engine);
    }

    #[test]
    fn test_mutations_between_updates_stay_consistent() {
        let mut engine = engine_with(12, 12, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
        engine.update();
        engine.revive(8, 8).unwrap();
        engine.kill(2, 2).unwrap();
        assert_consistent(&engine);
        engine.update();
        assert_consistent(&engine);
        engine.clear();
        engine.update();
        assert_consistent(&engine);
    }

    #[test]
    fn test_field_trait_reads_engine() {
        fn population<F: CellField>(field: &F) -> usize {
            (0..field.height())
                .flat_map(|y| (0..field.width()).map(move |x| (x, y)))
                .filter(|&(x, y)| field.is_alive(x, y).unwrap_or(false))
                .count()
        }
        let engine = engine_with(4, 4, &[(0, 0), (3, 3)]);
        assert_eq!(population(&engine), 2);
    }
}
