use crate::error::Result;
use crate::grid::{Cell, Grid};
use crate::patterns::{self, SeedPattern};
use crate::rules::{self, RuleParam, RuleParameters};
use crate::settings::{self, CellColor, SimulationConfig};
use crate::timer::{TickTicket, TickTimer};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// Whether the simulation is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl RunState {
    pub fn name(&self) -> &'static str {
        match self {
            RunState::Stopped => "PAUSED",
            RunState::Running => "RUNNING",
        }
    }
}

/// One simulation session.
///
/// Owns the grid, rule thresholds, configuration, and run state; everything
/// outside reads them through shared borrows and changes them only through
/// the command methods. Commands that fail return `Err` with no state
/// changed.
pub struct Controller {
    grid: Grid,
    rules: RuleParameters,
    config: SimulationConfig,
    run_state: RunState,
    generation: u64,
    timer: TickTimer,
    rng: ChaCha8Rng,
}

impl Controller {
    /// New stopped session with an empty grid and an entropy-seeded RNG
    pub fn new(config: SimulationConfig, rules: RuleParameters) -> Result<Self> {
        Self::with_rng(config, rules, ChaCha8Rng::from_entropy())
    }

    /// Same as `new`, but `randomize` draws from a reproducible sequence
    pub fn with_seed(config: SimulationConfig, rules: RuleParameters, seed: u64) -> Result<Self> {
        Self::with_rng(config, rules, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, rules: RuleParameters, rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        rules.validate()?;
        let grid = Grid::empty(config.rows, config.cols)?;
        Ok(Self {
            grid,
            rules,
            config,
            run_state: RunState::Stopped,
            generation: 0,
            timer: TickTimer::new(),
            rng,
        })
    }

    // === Read accessors ===

    /// Current grid; replaced wholesale, never observed mid-step
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn rules(&self) -> &RuleParameters {
        &self.rules
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Ticks applied since the grid was last replaced
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// How long a host may wait before the next `poll` has work to do
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    // === Run state ===

    /// Start running; the first tick fires on the next poll. No-op if running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.run_state = RunState::Running;
        self.timer.schedule_now();
        tracing::info!(generation = self.generation, "simulation started");
    }

    /// Stop running and cancel any pending tick. Safe when already stopped.
    pub fn pause(&mut self) {
        let was_running = self.is_running();
        self.halt();
        if was_running {
            tracing::info!(generation = self.generation, "simulation paused");
        }
    }

    pub fn toggle_run(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    fn halt(&mut self) {
        self.run_state = RunState::Stopped;
        self.timer.cancel();
    }

    // === Grid commands ===

    /// Flip one cell directly, in either run state
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<Cell> {
        self.grid.toggle(row, col)
    }

    /// Kill every cell and stop
    pub fn clear(&mut self) {
        let empty = self.grid.map(|_, _, _| Cell::Dead);
        self.replace_grid(empty);
        tracing::info!("grid cleared");
    }

    /// Fill randomly with `probability` (or the configured default) and stop
    pub fn randomize(&mut self, probability: Option<f64>) -> Result<()> {
        let p = probability.unwrap_or(self.config.alive_probability);
        let grid = Grid::random(self.grid.rows(), self.grid.cols(), p, &mut self.rng)?;
        self.replace_grid(grid);
        tracing::info!(probability = p, population = self.grid.population(), "grid randomized");
        Ok(())
    }

    /// Replace the grid with a centered seed pattern and stop
    pub fn seed_pattern(&mut self, pattern: SeedPattern) -> Result<()> {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let grid = match pattern {
            SeedPattern::Glider => patterns::glider_at(rows, cols)?,
            SeedPattern::Blinker => patterns::blinker_at(rows, cols)?,
        };
        self.replace_grid(grid);
        tracing::info!(pattern = pattern.name(), "seeded pattern");
        Ok(())
    }

    pub fn seed_glider(&mut self) -> Result<()> {
        self.seed_pattern(SeedPattern::Glider)
    }

    pub fn seed_blinker(&mut self) -> Result<()> {
        self.seed_pattern(SeedPattern::Blinker)
    }

    /// Switch to an empty grid of the given size and stop
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        settings::check_dimensions(rows, cols)?;
        let grid = Grid::empty(rows, cols)?;
        self.config.rows = rows;
        self.config.cols = cols;
        self.replace_grid(grid);
        tracing::info!(rows, cols, "grid resized");
        Ok(())
    }

    /// Stopping here keeps a tick scheduled for the old grid from running
    /// against the new one.
    fn replace_grid(&mut self, grid: Grid) {
        self.halt();
        self.grid = grid;
        self.generation = 0;
    }

    // === Configuration commands ===

    /// Change one rule threshold. Applies from the next tick; run state unchanged.
    pub fn set_rule_parameter(&mut self, which: RuleParam, value: u8) -> Result<()> {
        self.rules.set(which, value)?;
        tracing::info!(parameter = which.name(), value, rule = %self.rules.notation(), "rule changed");
        Ok(())
    }

    pub fn set_survive_min(&mut self, n: u8) -> Result<()> {
        self.set_rule_parameter(RuleParam::SurviveMin, n)
    }

    pub fn set_survive_max(&mut self, n: u8) -> Result<()> {
        self.set_rule_parameter(RuleParam::SurviveMax, n)
    }

    pub fn set_birth_count(&mut self, n: u8) -> Result<()> {
        self.set_rule_parameter(RuleParam::BirthCount, n)
    }

    /// Replace all three thresholds at once
    pub fn set_rules(&mut self, rules: RuleParameters) -> Result<()> {
        rules.validate()?;
        self.rules = rules;
        tracing::info!(rule = %rules.notation(), "rules replaced");
        Ok(())
    }

    /// Change the delay between ticks. An already-armed tick keeps the
    /// delay it was scheduled with; the new value applies from the next one.
    pub fn set_tick_interval(&mut self, ms: u64) -> Result<()> {
        settings::check_tick_interval(ms)?;
        self.config.tick_interval_ms = ms;
        tracing::debug!(ms, "tick interval changed");
        Ok(())
    }

    pub fn set_cell_size(&mut self, size: u16) -> Result<()> {
        settings::check_cell_size(size)?;
        self.config.cell_size = size;
        Ok(())
    }

    pub fn set_live_color(&mut self, color: CellColor) {
        self.config.live_color = color;
    }

    // === Ticking ===

    /// Fire and apply the pending tick if it is due. Returns true when the
    /// grid advanced.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.fire_due(now) {
            Some(ticket) => self.apply_tick(ticket, now),
            None => false,
        }
    }

    /// Take the pending tick if it is due at `now`
    pub fn fire_due(&mut self, now: Instant) -> Option<TickTicket> {
        self.timer.fire(now)
    }

    /// Advance one generation for a fired tick and schedule the next one.
    ///
    /// The tick is discarded, leaving the grid untouched, if the simulation
    /// stopped or was restarted after the ticket was issued.
    pub fn apply_tick(&mut self, ticket: TickTicket, now: Instant) -> bool {
        if !self.is_running() || !self.timer.is_current(&ticket) {
            tracing::debug!(generation = self.generation, "discarded stale tick");
            return false;
        }

        // Rules are read here, at fire time
        self.grid = rules::step(&self.grid, &self.rules);
        self.generation += 1;
        self.timer.schedule_after(now, self.config.tick_interval());

        tracing::debug!(
            generation = self.generation,
            population = self.grid.population(),
            "tick applied"
        );
        true
    }
}
