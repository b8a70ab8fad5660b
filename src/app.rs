use crate::controller::Controller;
use crate::error::Result;
use crate::presets::PresetManager;
use crate::rules::RuleParam;
use std::time::Instant;

/// Delta applied to the tick interval per Up/Down press (ms)
const INTERVAL_STEP_MS: i64 = 50;

/// Focus state for parameter editing in the sidebar
/// Alphabetically ordered for consistent UI display
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    /// Arrow keys move the cell cursor
    #[default]
    Canvas,
    // Alphabetical order
    Birth,
    CellSize,
    Color,
    Cols,
    Interval,
    Preset,
    Rows,
    SurviveMax,
    SurviveMin,
    // Controls box (not a param)
    Controls,
}

impl Focus {
    /// Tab cycles through parameters in alphabetical order
    pub fn next(&self) -> Focus {
        match self {
            Focus::Canvas => Focus::Birth,
            Focus::Birth => Focus::CellSize,
            Focus::CellSize => Focus::Color,
            Focus::Color => Focus::Cols,
            Focus::Cols => Focus::Interval,
            Focus::Interval => Focus::Preset,
            Focus::Preset => Focus::Rows,
            Focus::Rows => Focus::SurviveMax,
            Focus::SurviveMax => Focus::SurviveMin,
            Focus::SurviveMin => Focus::Controls,
            Focus::Controls => Focus::Canvas,
        }
    }

    /// Shift+Tab goes the other way
    pub fn prev(&self) -> Focus {
        match self {
            Focus::Canvas => Focus::Controls,
            Focus::Birth => Focus::Canvas,
            Focus::CellSize => Focus::Birth,
            Focus::Color => Focus::CellSize,
            Focus::Cols => Focus::Color,
            Focus::Interval => Focus::Cols,
            Focus::Preset => Focus::Interval,
            Focus::Rows => Focus::Preset,
            Focus::SurviveMax => Focus::Rows,
            Focus::SurviveMin => Focus::SurviveMax,
            Focus::Controls => Focus::SurviveMin,
        }
    }

    /// Line index in the parameters box
    pub fn line_index(&self) -> u16 {
        match self {
            Focus::Canvas | Focus::Controls => 0,
            Focus::Birth => 0,
            Focus::CellSize => 1,
            Focus::Color => 2,
            Focus::Cols => 3,
            Focus::Interval => 4,
            Focus::Preset => 5,
            Focus::Rows => 6,
            Focus::SurviveMax => 7,
            Focus::SurviveMin => 8,
        }
    }

    /// Check if focus is on a parameter (not Canvas or Controls)
    pub fn is_param(&self) -> bool {
        !matches!(self, Focus::Canvas | Focus::Controls)
    }
}

/// Main application state
pub struct App {
    pub controller: Controller,
    pub presets: PresetManager,
    preset_index: usize,
    pub focus: Focus,
    /// Selected cell as (row, col)
    pub cursor: (usize, usize),
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    pub controls_scroll: u16,
    /// Last rejected command, shown until the next successful one
    pub status: Option<String>,
}

impl App {
    pub fn new(controller: Controller, presets: PresetManager) -> Self {
        let grid = controller.grid();
        let cursor = (grid.rows() / 2, grid.cols() / 2);
        let preset_index = presets.position_of(controller.rules()).unwrap_or(0);
        Self {
            controller,
            presets,
            preset_index,
            focus: Focus::Canvas,
            cursor,
            fullscreen_mode: false,
            show_help: false,
            help_scroll: 0,
            controls_scroll: 0,
            status: None,
        }
    }

    /// Advance the simulation if a tick is due
    pub fn tick(&mut self) {
        self.controller.poll(Instant::now());
    }

    /// Record the outcome of a controller command for the status line
    fn report<T>(&mut self, result: Result<T>) {
        match result {
            Ok(_) => self.status = None,
            Err(e) => {
                tracing::warn!("command rejected: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn toggle_run(&mut self) {
        self.controller.toggle_run();
    }

    pub fn clear(&mut self) {
        self.controller.clear();
        self.status = None;
    }

    pub fn randomize(&mut self) {
        let result = self.controller.randomize(None);
        self.report(result);
    }

    pub fn seed_glider(&mut self) {
        let result = self.controller.seed_glider();
        self.report(result);
    }

    pub fn seed_blinker(&mut self) {
        let result = self.controller.seed_blinker();
        self.report(result);
    }

    /// Flip the cell under the cursor
    pub fn toggle_cursor_cell(&mut self) {
        let (row, col) = self.cursor;
        let result = self.controller.toggle_cell(row, col);
        self.report(result);
    }

    /// Move the cursor, stopping at the grid edges
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let grid = self.controller.grid();
        let (row, col) = self.cursor;
        self.cursor = (
            row.saturating_add_signed(d_row).min(grid.rows() - 1),
            col.saturating_add_signed(d_col).min(grid.cols() - 1),
        );
    }

    fn clamp_cursor(&mut self) {
        self.move_cursor(0, 0);
    }

    /// Step to another rule preset, wrapping around the list
    pub fn cycle_preset(&mut self, delta: isize) {
        let count = self.presets.len();
        if count == 0 {
            return;
        }
        // Step from the preset the rules currently match, if any
        let current = self
            .presets
            .position_of(self.controller.rules())
            .unwrap_or(self.preset_index);
        self.preset_index = (current as isize + delta).rem_euclid(count as isize) as usize;
        if let Some(preset) = self.presets.get_wrapped(self.preset_index) {
            let (name, description, rules) = (preset.name.clone(), preset.description.clone(), preset.rules);
            let result = self.controller.set_rules(rules);
            if result.is_ok() {
                tracing::info!(preset = %name, %description, "rule preset applied");
            }
            self.report(result);
        }
    }

    /// Preset matching the current rules, or "Custom"
    pub fn preset_name(&self) -> &str {
        self.presets
            .name_of(self.controller.rules())
            .unwrap_or("Custom")
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused(&mut self, delta: i32) {
        let config = self.controller.config().clone();
        let result = match self.focus {
            Focus::Canvas | Focus::Controls => return,
            Focus::Birth => self.adjust_rule(RuleParam::BirthCount, delta),
            Focus::SurviveMin => self.adjust_rule(RuleParam::SurviveMin, delta),
            Focus::SurviveMax => self.adjust_rule(RuleParam::SurviveMax, delta),
            Focus::Interval => {
                let ms = config
                    .tick_interval_ms
                    .saturating_add_signed(delta as i64 * INTERVAL_STEP_MS);
                self.controller.set_tick_interval(ms)
            }
            Focus::Rows => {
                let rows = config.rows.saturating_add_signed(delta as isize);
                self.resize(rows, config.cols)
            }
            Focus::Cols => {
                let cols = config.cols.saturating_add_signed(delta as isize);
                self.resize(config.rows, cols)
            }
            Focus::CellSize => {
                let size = config.cell_size.saturating_add_signed(delta as i16);
                self.controller.set_cell_size(size)
            }
            Focus::Color => {
                let color = if delta >= 0 {
                    config.live_color.next()
                } else {
                    config.live_color.prev()
                };
                self.controller.set_live_color(color);
                Ok(())
            }
            Focus::Preset => {
                self.cycle_preset(delta.signum() as isize);
                return;
            }
        };
        self.report(result);
    }

    fn adjust_rule(&mut self, which: RuleParam, delta: i32) -> Result<()> {
        let value = self.controller.rules().get(which).saturating_add_signed(delta as i8);
        match which {
            RuleParam::SurviveMin => self.controller.set_survive_min(value),
            RuleParam::SurviveMax => self.controller.set_survive_max(value),
            RuleParam::BirthCount => self.controller.set_birth_count(value),
        }
    }

    fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        self.controller.resize(rows, cols)?;
        self.clamp_cursor();
        Ok(())
    }

    /// Up arrow: adjust a focused parameter, move the cursor, or scroll controls
    pub fn handle_up(&mut self) {
        match self.focus {
            Focus::Canvas => self.move_cursor(-1, 0),
            Focus::Controls => self.scroll_controls_up(),
            _ => self.adjust_focused(1),
        }
    }

    /// Down arrow counterpart of `handle_up`
    pub fn handle_down(&mut self, controls_max_scroll: u16) {
        match self.focus {
            Focus::Canvas => self.move_cursor(1, 0),
            Focus::Controls => self.scroll_controls_down(controls_max_scroll),
            _ => self.adjust_focused(-1),
        }
    }

    /// Cycle to next focus
    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Navigate to previous focus (Shift+Tab)
    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0;
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }

    pub fn scroll_controls_up(&mut self) {
        self.controls_scroll = self.controls_scroll.saturating_sub(1);
    }

    pub fn scroll_controls_down(&mut self, max_scroll: u16) {
        self.controls_scroll = (self.controls_scroll + 1).min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RunState;
    use crate::rules::RuleParameters;
    use crate::settings::{CellColor, SimulationConfig};

    fn app() -> App {
        let config = SimulationConfig {
            rows: 10,
            cols: 12,
            ..Default::default()
        };
        let controller = Controller::with_seed(config, RuleParameters::default(), 1).unwrap();
        App::new(controller, PresetManager::builtin_only())
    }

    #[test]
    fn test_focus_cycle_round_trips() {
        let mut focus = Focus::Canvas;
        for _ in 0..11 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Canvas);
        assert_eq!(Focus::Birth.prev(), Focus::Canvas);
        assert!(!Focus::Controls.is_param());
        assert!(Focus::Rows.is_param());
    }

    #[test]
    fn test_cursor_stays_on_grid() {
        let mut app = app();
        assert_eq!(app.cursor, (5, 6));
        app.move_cursor(-100, 100);
        assert_eq!(app.cursor, (0, 11));
        app.toggle_cursor_cell();
        assert!(app.controller.grid().is_alive(0, 11));
    }

    #[test]
    fn test_rule_adjust_rejected_past_eight() {
        let mut app = app();
        app.focus = Focus::SurviveMax;
        // 3 -> 8, then one rejected press
        for _ in 0..6 {
            app.handle_up();
        }
        assert_eq!(app.controller.rules().survive_max, 8);
        assert!(app.status.is_some());

        app.handle_down(0);
        assert_eq!(app.controller.rules().survive_max, 7);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_rule_adjust_saturates_at_zero() {
        let mut app = app();
        app.focus = Focus::Birth;
        for _ in 0..5 {
            app.handle_down(0);
        }
        assert_eq!(app.controller.rules().birth_count, 0);
    }

    #[test]
    fn test_rows_adjust_resizes_and_clamps_cursor() {
        let mut app = app();
        app.move_cursor(100, 0);
        app.controller.start();
        app.focus = Focus::Rows;
        app.handle_down(0);
        assert_eq!(app.controller.grid().rows(), 9);
        assert_eq!(app.cursor.0, 8);
        assert_eq!(app.controller.run_state(), RunState::Stopped);
    }

    #[test]
    fn test_interval_below_minimum_is_reported() {
        let mut app = app();
        app.focus = Focus::Interval;
        for _ in 0..4 {
            app.handle_down(0);
        }
        // 200 -> 150 -> 100 -> 50 -> rejected at 0
        assert_eq!(app.controller.config().tick_interval_ms, 50);
        assert!(app.status.as_deref().unwrap().contains("tick interval"));
    }

    #[test]
    fn test_preset_cycle_sets_rules() {
        let mut app = app();
        assert_eq!(app.preset_name(), "Conway");
        app.cycle_preset(1);
        assert_eq!(app.preset_name(), "Life Without Death");
        app.cycle_preset(-2);
        assert_eq!(app.preset_name(), "Birth Zero");
        app.controller.set_birth_count(7).unwrap();
        assert_eq!(app.preset_name(), "Custom");
    }

    #[test]
    fn test_preset_cycle_starts_from_current_rule() {
        let presets = PresetManager::builtin_only();
        let maze = presets.find("maze").unwrap().rules;
        let controller = Controller::with_seed(SimulationConfig::default(), maze, 1).unwrap();
        let mut app = App::new(controller, presets);
        assert_eq!(app.preset_name(), "Maze");
        app.cycle_preset(1);
        assert_eq!(app.preset_name(), "Mazectric");
    }

    #[test]
    fn test_preset_cycle_follows_hand_edited_rules() {
        let mut app = app();
        // Conway -> Maze by hand: S1-5/B3
        app.focus = Focus::SurviveMin;
        app.handle_down(0);
        app.focus = Focus::SurviveMax;
        app.handle_up();
        app.handle_up();
        assert_eq!(app.preset_name(), "Maze");

        app.cycle_preset(1);
        assert_eq!(app.preset_name(), "Mazectric");
    }

    #[test]
    fn test_preset_cycle_from_custom_uses_last_index() {
        let mut app = app();
        app.cycle_preset(1);
        app.controller.set_birth_count(7).unwrap();
        assert_eq!(app.preset_name(), "Custom");
        app.cycle_preset(1);
        assert_eq!(app.preset_name(), "Maze");
    }

    #[test]
    fn test_survive_min_adjust_updates_rules() {
        let mut app = app();
        app.focus = Focus::SurviveMin;
        app.handle_up();
        assert_eq!(app.controller.rules().survive_min, 3);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_color_adjust() {
        let mut app = app();
        app.focus = Focus::Color;
        app.handle_up();
        assert_eq!(app.controller.config().live_color, CellColor::Cyan);
    }
}
