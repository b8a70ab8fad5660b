use crate::app::{App, Focus};
use crate::braille;
use crate::controller::RunState;
use crate::settings::CellColor;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 24;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

/// Number of lines in controls content
pub const CONTROLS_CONTENT_LINES: u16 = 14;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;
const DEAD_CELL_COLOR: Color = Color::DarkGray;
const CURSOR_BG: Color = Color::Blue;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

fn live_color(color: CellColor) -> Color {
    match color {
        CellColor::Green => Color::Green,
        CellColor::Cyan => Color::Cyan,
        CellColor::Yellow => Color::Yellow,
        CellColor::Magenta => Color::Magenta,
        CellColor::White => Color::White,
    }
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.fullscreen_mode {
        render_canvas(frame, area, app);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app);
        render_canvas(frame, layout[1], app);
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

/// Lines the controls box can show for a terminal of `height` rows
pub fn get_controls_visible_lines(height: u16, app: &App) -> u16 {
    // Status + parameters (11) + borders (2)
    height.saturating_sub(status_box_height(app) + 11 + 2)
}

/// Status box height: three fixed lines plus the wrapped status message
fn status_box_height(app: &App) -> u16 {
    let message_lines = app
        .status
        .as_deref()
        .map_or(0, |status| wrapped_line_count(status, SIDEBAR_WIDTH - 2));
    3 + message_lines + 2
}

/// Lines `text` takes when word-wrapped to `width` columns
fn wrapped_line_count(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let mut lines = 0;
    let mut used = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if used > 0 && used + 1 + len <= width {
            used += 1 + len;
        } else {
            // Words longer than a line are broken across several
            lines += len.max(1).div_ceil(width) as u16;
            used = match len % width {
                0 => width,
                rest => rest,
            };
        }
    }
    lines
}

/// First cell to show so that `cursor` stays inside a window of `visible`
/// cells over `len`, keeping it centered where possible
fn viewport_offset(cursor: usize, len: usize, visible: usize) -> usize {
    if visible == 0 || len <= visible {
        return 0;
    }
    cursor.saturating_sub(visible / 2).min(len - visible)
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(status_box_height(app)), // Status
            Constraint::Length(11),                     // Parameters
            Constraint::Min(5),                         // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2], app);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Life Simulator ");
    let controller = &app.controller;
    let grid = controller.grid();

    let status_color = match controller.run_state() {
        RunState::Running => Color::Green,
        RunState::Stopped => HIGHLIGHT_COLOR,
    };

    let mut content = vec![
        Line::from(Span::styled(
            controller.run_state().name(),
            Style::default().fg(status_color),
        )),
        Line::from(Span::styled(
            format!("Gen {}", controller.generation()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("Alive {} / {}", controller.population(), grid.rows() * grid.cols()),
            Style::default().fg(TEXT_COLOR),
        )),
    ];

    if let Some(status) = &app.status {
        content.push(Line::from(Span::styled(status.as_str(), Style::default().fg(Color::Red))));
    }

    let paragraph = Paragraph::new(content).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(format!("{}{}: {}", prefix, label, value), style))
    };

    let rules = app.controller.rules();
    let config = app.controller.config();

    let content = vec![
        make_line("Birth", format!("{}", rules.birth_count), app.focus == Focus::Birth),
        make_line("Cell", format!("{}", config.cell_size), app.focus == Focus::CellSize),
        make_line("Color", config.live_color.name().to_string(), app.focus == Focus::Color),
        make_line("Cols", format!("{}", config.cols), app.focus == Focus::Cols),
        make_line(
            "Tick",
            format!("{}ms", config.tick_interval_ms),
            app.focus == Focus::Interval,
        ),
        make_line("Rule", app.preset_name().to_string(), app.focus == Focus::Preset),
        make_line("Rows", format!("{}", config.rows), app.focus == Focus::Rows),
        make_line("Surv max", format!("{}", rules.survive_max), app.focus == Focus::SurviveMax),
        make_line("Surv min", format!("{}", rules.survive_min), app.focus == Focus::SurviveMin),
    ];

    // Keep the focused line visible
    let focus_line = app.focus.line_index();
    let visible_height = area.height.saturating_sub(2);
    let content_height = content.len() as u16;

    let scroll = if visible_height == 0 || visible_height >= content_height {
        0
    } else if focus_line >= visible_height {
        focus_line.saturating_sub(visible_height - 1)
    } else {
        0
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    let make_control = |key: &str, desc: String| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Space", "start/pause".to_string()),
        make_control("Enter", "toggle cell".to_string()),
        make_control("Arrows", "cursor/adjust".to_string()),
        make_control("Tab", "next param".to_string()),
        make_control("C", "clear".to_string()),
        make_control("R", "randomize".to_string()),
        make_control("G", "glider".to_string()),
        make_control("B", "blinker".to_string()),
        make_control("P", format!("rule: {}", app.controller.rules().notation())),
        make_control("V", "fullscreen".to_string()),
        make_control("H", "help".to_string()),
        make_control("Esc", "canvas focus".to_string()),
        make_control("Q", "quit".to_string()),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = area.height.saturating_sub(2);
    let is_scrollable = content_height > visible_height;

    let title = match (is_scrollable, app.focus == Focus::Controls) {
        (true, true) => " Controls (↑↓) ",
        (true, false) => " Controls (Tab) ",
        _ => " Controls ",
    };

    let paragraph = Paragraph::new(content)
        .block(styled_block(title))
        .scroll((app.controls_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let config = app.controller.config();
    let title = format!(
        " {}x{}  {} ",
        config.rows,
        config.cols,
        app.controller.rules().notation()
    );
    let block = styled_block(&title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cursor = (app.focus == Focus::Canvas).then_some(app.cursor);
    let fg = live_color(config.live_color);

    if config.cell_size <= 1 {
        render_braille_canvas(frame, inner, app, cursor, fg);
    } else {
        render_block_canvas(frame, inner, app, cursor, fg, config.cell_size as usize);
    }
}

/// One character per 2x4 cells, scrolled to keep the cursor in view
fn render_braille_canvas(frame: &mut Frame, inner: Rect, app: &App, cursor: Option<(usize, usize)>, fg: Color) {
    let grid = app.controller.grid();
    let (width, height) = braille::canvas_size(grid);
    let (row, col) = app.cursor;
    let offset_x = viewport_offset(col / 2, width as usize, inner.width as usize) as u16;
    let offset_y = viewport_offset(row / 4, height as usize, inner.height as usize) as u16;

    for cell in braille::render_to_braille(grid, cursor) {
        if cell.x < offset_x || cell.y < offset_y {
            continue;
        }
        let x = inner.x + cell.x - offset_x;
        let y = inner.y + cell.y - offset_y;

        if x < inner.x + inner.width && y < inner.y + inner.height {
            let mut style = Style::default().fg(fg);
            if cell.has_cursor {
                style = style.bg(CURSOR_BG);
            }
            let cell_rect = Rect {
                x,
                y,
                width: 1,
                height: 1,
            };
            let span = Span::styled(cell.char.to_string(), style);
            frame.render_widget(Paragraph::new(Line::from(span)), cell_rect);
        }
    }
}

/// One line per row, `cell_width` characters per cell, scrolled to keep
/// the cursor in view
fn render_block_canvas(
    frame: &mut Frame,
    inner: Rect,
    app: &App,
    cursor: Option<(usize, usize)>,
    fg: Color,
    cell_width: usize,
) {
    let alive_text = "█".repeat(cell_width);
    let dead_text = format!("·{}", " ".repeat(cell_width - 1));

    let grid = app.controller.grid();
    let visible_rows = inner.height as usize;
    let visible_cols = inner.width as usize / cell_width;
    let first_row = viewport_offset(app.cursor.0, grid.rows(), visible_rows);
    let first_col = viewport_offset(app.cursor.1, grid.cols(), visible_cols);

    let lines: Vec<Line> = grid
        .iter_rows()
        .enumerate()
        .skip(first_row)
        .take(visible_rows)
        .map(|(row, cells)| {
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .skip(first_col)
                .take(visible_cols)
                .map(|(col, cell)| {
                    let (text, mut style) = if cell.is_alive() {
                        (alive_text.as_str(), Style::default().fg(fg))
                    } else {
                        (dead_text.as_str(), Style::default().fg(DEAD_CELL_COLOR))
                    };
                    if cursor == Some((row, col)) {
                        style = style.bg(CURSOR_BG).add_modifier(Modifier::BOLD);
                    }
                    Span::styled(text.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Center the help dialog within the canvas (exclude sidebar unless fullscreen)
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(32);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("LIFE-LIKE CELLULAR AUTOMATA", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("Every tick, each cell looks at its 8 neighbors. The grid edge is a wall: cells outside it count as dead."),
        Line::from(""),
        Line::from(Span::styled("RULE PARAMETERS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Surv min/max - a live cell survives with this many live neighbors"),
        Line::from("Birth - a dead cell is born with exactly this many"),
        Line::from("Min above max means nothing survives."),
        Line::from(""),
        Line::from(Span::styled("GRID:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Rows/Cols (5-100) start a fresh empty grid and pause."),
        Line::from("Clear, randomize, glider and blinker also pause."),
        Line::from(""),
        Line::from(Span::styled("DISPLAY:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Cell 1 packs 2x4 cells into one Braille character; 2-4 draws one block per cell."),
        Line::from(""),
        Line::from(Span::styled("BASIC CONTROLS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Space=Start/Pause, Enter/X=Toggle cell, C=Clear, R=Random, G=Glider, B=Blinker, P=Next rule, Tab/Arrows=Adjust, V=Fullscreen, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2);
    let is_scrollable = content_height > visible_height;

    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::presets::PresetManager;
    use crate::rules::RuleParameters;
    use crate::settings::SimulationConfig;

    fn app() -> App {
        let controller = Controller::with_seed(SimulationConfig::default(), RuleParameters::default(), 1).unwrap();
        App::new(controller, PresetManager::builtin_only())
    }

    #[test]
    fn test_wrapped_line_count() {
        assert_eq!(wrapped_line_count("", 22), 0);
        assert_eq!(wrapped_line_count("short", 22), 1);
        // "tick interval out of" / "range: 0 (expected" / "10..=5000)"
        assert_eq!(
            wrapped_line_count("tick interval out of range: 0 (expected 10..=5000)", 22),
            3
        );
        assert_eq!(wrapped_line_count("abcdefghij", 4), 3);
    }

    #[test]
    fn test_status_box_grows_with_message() {
        let mut app = app();
        assert_eq!(status_box_height(&app), 5);
        app.focus = Focus::Interval;
        for _ in 0..4 {
            app.handle_down(0);
        }
        let message = app.status.clone().unwrap();
        let lines = wrapped_line_count(&message, SIDEBAR_WIDTH - 2);
        assert!(lines >= 2);
        assert_eq!(status_box_height(&app), 5 + lines);
        assert_eq!(get_controls_visible_lines(40, &app), 40 - (5 + lines) - 13);
    }

    #[test]
    fn test_viewport_keeps_cursor_visible() {
        // Whole grid fits
        assert_eq!(viewport_offset(59, 60, 60), 0);
        // 60 columns through a 28-cell window
        assert_eq!(viewport_offset(0, 60, 28), 0);
        assert_eq!(viewport_offset(30, 60, 28), 16);
        assert_eq!(viewport_offset(59, 60, 28), 32);
        for cursor in 0..60 {
            let first = viewport_offset(cursor, 60, 28);
            assert!(first <= cursor && cursor < first + 28);
        }
    }
}
