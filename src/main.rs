mod app;
mod braille;
mod config;
mod controller;
mod error;
mod grid;
mod patterns;
mod presets;
mod rules;
mod settings;
mod timer;
mod ui;

use app::{App, Focus};
use clap::Parser;
use config::{AppConfig, StartGrid};
use controller::Controller;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use presets::PresetManager;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const CONFIG_VERSION: u32 = 1;

#[derive(Parser, Debug)]
#[command(name = "life-simulator")]
#[command(about = "Life-like cellular automaton simulation in the terminal")]
struct Args {
    // === Grid ===
    /// Number of rows (5-100)
    #[arg(long)]
    rows: Option<usize>,

    /// Number of columns (5-100)
    #[arg(long)]
    cols: Option<usize>,

    /// Delay between generations in milliseconds (10-5000)
    #[arg(short = 'i', long)]
    interval: Option<u64>,

    // === Rules ===
    /// Fewest live neighbors a live cell needs to survive (0-8)
    #[arg(long = "survive-min")]
    survive_min: Option<u8>,

    /// Most live neighbors a live cell can have and survive (0-8)
    #[arg(long = "survive-max")]
    survive_max: Option<u8>,

    /// Exact live-neighbor count that brings a dead cell to life (0-8)
    #[arg(short = 'b', long)]
    birth: Option<u8>,

    /// Start from a named rule preset (conway, maze, seeds, ...); the
    /// individual rule flags are applied on top
    #[arg(long)]
    rule: Option<String>,

    // === Starting grid ===
    /// Starting grid (none, glider, blinker, random)
    #[arg(short = 's', long)]
    seed: Option<String>,

    /// Alive probability for random grids (0.0-1.0)
    #[arg(short = 'd', long)]
    density: Option<f64>,

    /// Seed for the random number generator, for reproducible random grids
    #[arg(long = "random-seed")]
    random_seed: Option<u64>,

    // === Files ===
    /// Startup configuration file (JSON)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long = "print-config")]
    print_config: bool,
}

fn parse_start_grid(s: &str) -> Option<StartGrid> {
    match s.to_lowercase().as_str() {
        "none" | "empty" => Some(StartGrid::Empty),
        "glider" => Some(StartGrid::Glider),
        "blinker" => Some(StartGrid::Blinker),
        "random" | "rand" => Some(StartGrid::Random),
        _ => None,
    }
}

/// Log to a file, since the terminal belongs to the UI. No file, no subscriber.
fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("life_simulator=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Config file (or defaults) with CLI overrides applied on top
fn build_config(args: &Args, presets: &PresetManager) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };
    if config.version != CONFIG_VERSION {
        tracing::warn!(version = config.version, "unexpected config version, reading anyway");
    }

    let sim = &mut config.simulation;
    if let Some(rows) = args.rows {
        sim.rows = rows;
    }
    if let Some(cols) = args.cols {
        sim.cols = cols;
    }
    if let Some(interval) = args.interval {
        sim.tick_interval_ms = interval;
    }
    if let Some(density) = args.density {
        sim.alive_probability = density;
    }

    if let Some(name) = &args.rule {
        config.rules = presets.find(name)?.rules;
    }
    if let Some(n) = args.survive_min {
        config.rules.survive_min = n;
    }
    if let Some(n) = args.survive_max {
        config.rules.survive_max = n;
    }
    if let Some(n) = args.birth {
        config.rules.birth_count = n;
    }

    if let Some(seed) = &args.seed {
        config.start = parse_start_grid(seed).ok_or_else(|| format!("Unknown starting grid: {}", seed))?;
    }
    if args.random_seed.is_some() {
        config.random_seed = args.random_seed;
    }

    Ok(config)
}

/// Validating construction of the session, then the starting grid
fn build_controller(config: &AppConfig) -> error::Result<Controller> {
    let simulation = config.simulation.clone();
    let mut controller = match config.random_seed {
        Some(seed) => Controller::with_seed(simulation, config.rules, seed)?,
        None => Controller::new(simulation, config.rules)?,
    };

    if config.start == StartGrid::Random {
        controller.randomize(None)?;
    } else if let Some(pattern) = config.start.pattern() {
        controller.seed_pattern(pattern)?;
    }
    Ok(controller)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref())?;

    let presets = PresetManager::new();
    let config = build_config(&args, &presets)?;

    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    // Reject bad values before the terminal is taken over
    let controller = build_controller(&config)?;
    tracing::info!(
        rows = config.simulation.rows,
        cols = config.simulation.cols,
        rule = %config.rules.notation(),
        "session created"
    );

    let mut app = App::new(controller, presets);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("terminal error: {}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    // Target ~60fps for smooth animation
    const FRAME_DURATION: Duration = Duration::from_millis(16);

    loop {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Wake early if the next generation is due before the frame ends
        let timeout = app
            .controller
            .time_until_next_tick(Instant::now())
            .map_or(FRAME_DURATION, |due| due.min(FRAME_DURATION));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process Press events
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Handle Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                match key.code {
                    // System controls
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                    KeyCode::Char(' ') => app.toggle_run(),
                    KeyCode::Char('v') | KeyCode::Char('V') => app.toggle_fullscreen(),
                    KeyCode::Char('h') | KeyCode::Char('H') => app.toggle_help(),

                    // Grid commands
                    KeyCode::Char('c') | KeyCode::Char('C') => app.clear(),
                    KeyCode::Char('r') | KeyCode::Char('R') => app.randomize(),
                    KeyCode::Char('g') | KeyCode::Char('G') => app.seed_glider(),
                    KeyCode::Char('b') | KeyCode::Char('B') => app.seed_blinker(),
                    KeyCode::Char('x') | KeyCode::Char('X') => app.toggle_cursor_cell(),
                    KeyCode::Enter if app.focus == Focus::Canvas => app.toggle_cursor_cell(),
                    KeyCode::Char('p') | KeyCode::Char('P') => app.cycle_preset(1),

                    // Navigation
                    KeyCode::Tab => app.next_focus(),
                    KeyCode::BackTab => app.prev_focus(),
                    KeyCode::Up => {
                        if !app.show_help {
                            app.handle_up();
                        }
                    }
                    KeyCode::Down => {
                        if !app.show_help {
                            let term_size = terminal.size().unwrap_or_default();
                            let visible = ui::get_controls_visible_lines(term_size.height, app);
                            app.handle_down(ui::CONTROLS_CONTENT_LINES.saturating_sub(visible));
                        }
                    }
                    KeyCode::Left => {
                        if app.focus == Focus::Canvas {
                            app.move_cursor(0, -1);
                        } else if app.focus.is_param() {
                            app.adjust_focused(-1);
                        }
                    }
                    KeyCode::Right => {
                        if app.focus == Focus::Canvas {
                            app.move_cursor(0, 1);
                        } else if app.focus.is_param() {
                            app.adjust_focused(1);
                        }
                    }
                    KeyCode::Esc => {
                        if app.show_help {
                            app.toggle_help();
                        } else {
                            app.focus = Focus::Canvas;
                        }
                    }
                    KeyCode::Char('j') | KeyCode::Char('J') => {
                        if app.show_help {
                            app.scroll_help_down(ui::HELP_CONTENT_LINES);
                        }
                    }
                    KeyCode::Char('k') | KeyCode::Char('K') => {
                        if app.show_help {
                            app.scroll_help_up();
                        }
                    }
                    _ => {}
                }
            }
        }

        // Advance the simulation if a generation is due
        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("life-simulator").chain(extra.iter().copied()))
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let presets = PresetManager::builtin_only();
        let config = build_config(
            &args(&["--rows", "20", "--rule", "maze", "--birth", "2", "--seed", "glider"]),
            &presets,
        )
        .unwrap();

        assert_eq!(config.simulation.rows, 20);
        assert_eq!(config.simulation.cols, 60);
        assert_eq!(config.rules.survive_min, 1);
        assert_eq!(config.rules.survive_max, 5);
        assert_eq!(config.rules.birth_count, 2);
        assert_eq!(config.start, StartGrid::Glider);
    }

    #[test]
    fn test_unknown_rule_and_seed_rejected() {
        let presets = PresetManager::builtin_only();
        assert!(build_config(&args(&["--rule", "highlife"]), &presets).is_err());
        assert!(build_config(&args(&["--seed", "pulsar"]), &presets).is_err());
    }

    #[test]
    fn test_out_of_range_cli_value_rejected_by_controller() {
        let presets = PresetManager::builtin_only();
        let config = build_config(&args(&["--interval", "5"]), &presets).unwrap();
        assert!(build_controller(&config).is_err());

        let config = build_config(&args(&["--survive-max", "9"]), &presets).unwrap();
        assert!(build_controller(&config).is_err());
    }

    #[test]
    fn test_start_grid_applied() {
        let presets = PresetManager::builtin_only();
        let config = build_config(&args(&["--seed", "random", "--random-seed", "7", "--density", "1.0"]), &presets)
            .unwrap();
        let controller = build_controller(&config).unwrap();
        assert_eq!(controller.population(), 40 * 60);
        assert!(!controller.is_running());

        let config = build_config(&args(&["--seed", "blinker"]), &presets).unwrap();
        assert_eq!(build_controller(&config).unwrap().population(), 3);
    }
}
