use std::time::Instant;

use crate::domain::{EngineConfig, EngineError, LifeEngine, Pattern, all_rules};

/// Slowest and fastest timer rates, in generations per second.
pub const MIN_SPEED: f32 = 1.0;
pub const MAX_SPEED: f32 = 60.0;
pub const DEFAULT_SPEED: f32 = 2.0;

/// Share of cells left alive by [`Simulation::randomize`].
pub const RANDOM_DENSITY: f64 = 0.3;

/// How generations are advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// One generation per explicit step.
    #[default]
    Manual,
    /// Generations follow the timer while running.
    Auto,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Manual => "Manual",
            Mode::Auto => "Auto",
        }
    }
}

/// Simulation couples the engine with the front-end timer and bookkeeping.
/// All engine mutations go through here so `revision` stays accurate.
pub struct Simulation {
    engine: LifeEngine,
    pub mode: Mode,
    pub is_running: bool,
    pub generation: u64,
    pub update_timer: f32,
    pub updates_per_second: f32,
    pub last_update_ms: f32,
    pub last_render_time_ms: f32,
    /// Index into `presets::all_patterns()` waiting for a click
    pub pending_pattern_index: Option<usize>,
    /// Last error worth showing to the user
    pub status: Option<String>,
    revision: u64,
}

impl Simulation {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::with_engine(config.build()?))
    }

    pub fn with_engine(engine: LifeEngine) -> Self {
        Self {
            engine,
            mode: Mode::default(),
            is_running: false,
            generation: 0,
            update_timer: 0.0,
            updates_per_second: DEFAULT_SPEED,
            last_update_ms: 0.0,
            last_render_time_ms: 0.0,
            pending_pattern_index: None,
            status: None,
            revision: 0,
        }
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    /// Changes whenever the visible field may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Advance exactly one generation.
    pub fn step(&mut self) {
        let start = Instant::now();
        self.engine.update();
        self.last_update_ms = start.elapsed().as_secs_f32() * 1000.0;
        self.generation += 1;
        self.touch();
    }

    /// Feed elapsed frame time; steps once the timer interval has passed.
    pub fn tick(mut self, delta_time: f32) -> Self {
        if self.mode != Mode::Auto || !self.is_running {
            return self;
        }

        self.update_timer += delta_time;
        if self.update_timer >= 1.0 / self.updates_per_second {
            self.step();
            self.update_timer = 0.0;
        }
        self
    }

    /// Start or stop the timer. Starting always switches to `Auto`.
    pub fn toggle_running(mut self) -> Self {
        if self.is_running {
            self.is_running = false;
        } else {
            self.mode = Mode::Auto;
            self.is_running = true;
            self.update_timer = 0.0;
        }
        self
    }

    /// Switching to `Manual` stops the timer.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode == Mode::Manual {
            self.is_running = false;
        }
    }

    pub fn toggle_mode(mut self) -> Self {
        let next = match self.mode {
            Mode::Manual => Mode::Auto,
            Mode::Auto => Mode::Manual,
        };
        self.set_mode(next);
        self
    }

    /// Step when stopped, ignored while the timer drives the field.
    pub fn manual_step(mut self) -> Self {
        if !self.is_running {
            self.step();
        }
        self
    }

    pub fn clear(mut self) -> Self {
        self.engine.clear();
        self.generation = 0;
        self.is_running = false;
        self.touch();
        self
    }

    pub fn randomize(mut self) -> Self {
        match self.engine.randomize(&mut rand::rng(), RANDOM_DENSITY) {
            Ok(()) => {
                self.generation = 0;
                self.is_running = false;
                self.touch();
            }
            Err(err) => self.report(err),
        }
        self
    }

    pub fn adjust_speed(mut self, delta: f32) -> Self {
        self.updates_per_second = (self.updates_per_second + delta).clamp(MIN_SPEED, MAX_SPEED);
        self
    }

    /// Switch to the next built-in rule, wrapping around.
    pub fn cycle_rule(mut self) -> Self {
        let rules = all_rules();
        let current = rules
            .iter()
            .position(|rule| *rule == self.engine.rule())
            .unwrap_or(rules.len() - 1);
        self.engine.set_rule(rules[(current + 1) % rules.len()]);
        self
    }

    /// Flip one cell, as a click on the field does.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<bool, EngineError> {
        let alive = self.engine.toggle(x, y)?;
        self.touch();
        Ok(alive)
    }

    /// Stamp `pattern` centered on `(x, y)` and leave placement mode.
    pub fn place_pattern(&mut self, pattern: &Pattern, x: usize, y: usize) -> Result<(), EngineError> {
        let (ox, oy) = pattern.centered_origin(x, y, self.engine.width(), self.engine.height());
        pattern.place_on(&mut self.engine, ox, oy)?;
        self.pending_pattern_index = None;
        self.touch();
        Ok(())
    }

    /// Keep an error around for the status line.
    pub fn report(&mut self, err: EngineError) {
        self.status = Some(err.to_string());
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::with_engine(LifeEngine::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RuleSet, presets};

    fn with_blinker() -> Simulation {
        let mut sim = Simulation::new(EngineConfig {
            width: 8,
            height: 8,
            ..Default::default()
        })
        .unwrap();
        for x in 2..5 {
            sim.toggle_cell(x, 3).unwrap();
        }
        sim
    }

    #[test]
    fn test_manual_mode_ignores_timer() {
        let sim = with_blinker().tick(10.0);
        assert_eq!(sim.generation, 0);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let sim = with_blinker().adjust_speed(2.0).toggle_running();
        assert_eq!(sim.mode, Mode::Auto);
        assert_eq!(sim.updates_per_second, 4.0);

        let sim = sim.tick(0.1);
        assert_eq!(sim.generation, 0);
        let sim = sim.tick(0.2);
        assert_eq!(sim.generation, 1);
        assert!(sim.engine().is_alive(3, 2).unwrap());
    }

    #[test]
    fn test_switching_to_manual_stops_timer() {
        let sim = with_blinker().toggle_running().toggle_mode();
        assert_eq!(sim.mode, Mode::Manual);
        assert!(!sim.is_running);
    }

    #[test]
    fn test_manual_step_only_when_stopped() {
        let sim = with_blinker().manual_step();
        assert_eq!(sim.generation, 1);
        let sim = sim.toggle_running().manual_step();
        assert_eq!(sim.generation, 1);
    }

    #[test]
    fn test_speed_is_clamped() {
        let sim = Simulation::default().adjust_speed(-100.0);
        assert_eq!(sim.updates_per_second, MIN_SPEED);
        let sim = sim.adjust_speed(1000.0);
        assert_eq!(sim.updates_per_second, MAX_SPEED);
    }

    #[test]
    fn test_mutations_bump_revision() {
        let mut sim = Simulation::default();
        let start = sim.revision();
        sim.toggle_cell(1, 1).unwrap();
        assert!(sim.revision() > start);

        let before = sim.revision();
        assert!(sim.toggle_cell(500, 1).is_err());
        assert_eq!(sim.revision(), before);

        sim.step();
        assert!(sim.revision() > before);
    }

    #[test]
    fn test_clear_resets_generation() {
        let mut sim = with_blinker();
        sim.step();
        let sim = sim.clear();
        assert_eq!(sim.generation, 0);
        assert_eq!(sim.engine().population(), 0);
    }

    #[test]
    fn test_randomize_populates_field() {
        let sim = Simulation::default();
        let before = sim.revision();
        let sim = sim.randomize();
        assert!(sim.engine().population() > 0);
        assert!(sim.revision() > before);
        assert!(sim.status.is_none());
    }

    #[test]
    fn test_cycle_rule_wraps_around() {
        let mut sim = Simulation::default();
        for _ in 0..all_rules().len() {
            sim = sim.cycle_rule();
        }
        assert_eq!(sim.engine().rule(), RuleSet::CONWAY);
        assert_eq!(sim.cycle_rule().engine().rule(), RuleSet::HIGHLIFE);
    }

    #[test]
    fn test_place_pattern_clears_pending() {
        let mut sim = Simulation::default();
        sim.pending_pattern_index = Some(0);
        sim.place_pattern(&presets::block(), 10, 10).unwrap();
        assert_eq!(sim.engine().population(), 4);
        assert!(sim.engine().is_alive(9, 9).unwrap());
        assert_eq!(sim.pending_pattern_index, None);
    }

    #[test]
    fn test_report_keeps_message() {
        let mut big = Simulation::default();
        assert!(big.place_pattern(&presets::glider_gun(), 0, 0).is_ok());
        assert!(big.status.is_none());

        let mut small = Simulation::new(EngineConfig {
            width: 10,
            height: 10,
            ..Default::default()
        })
        .unwrap();
        let err = small.place_pattern(&presets::glider_gun(), 0, 0).unwrap_err();
        small.report(err);
        assert!(small.status.unwrap().contains("Gosper gun"));
    }
}
