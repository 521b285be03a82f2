use std::io::{self, Write};

use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};
use serde::Serialize;

use crate::Cell;
use crate::config::{GridSize, Mode, Theme};
use crate::game::{EngineStatus, GameEngine, Notice};
use crate::input::Direction;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_notice;

const GLYPH_SNAKE: &str = "██";
const GLYPH_APPLE: &str = "▐▌";

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_COLUMNS: u16 = 2;

/// Immutable view of the engine handed to renderers after each update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub grid: GridSize,
    /// Head first.
    pub snake: Vec<Cell>,
    pub apple: Cell,
    pub score: u32,
    pub contrast: f64,
    pub mode: Mode,
    pub steps_taken: u64,
    pub status: EngineStatus,
    pub heading: Option<Direction>,
    pub notice: Option<Notice>,
}

impl Snapshot {
    #[must_use]
    pub fn capture(engine: &GameEngine) -> Self {
        let state = engine.state();
        Self {
            grid: state.board.bounds(),
            snake: state.snake().segments().copied().collect(),
            apple: state.apple(),
            score: state.score,
            contrast: state.contrast,
            mode: state.mode,
            steps_taken: state.steps_taken,
            status: engine.status(),
            heading: state.head_direction(),
            notice: engine.notice(),
        }
    }
}

/// Consumer of engine snapshots.
pub trait Renderer {
    /// Called after every state mutation.
    fn on_tick(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

/// Draws snapshots onto a ratatui terminal.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    theme: &'static Theme,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(backend: B, theme: &'static Theme) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            theme,
        })
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn on_tick(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let theme = self.theme;
        self.terminal.draw(|frame| render(frame, snapshot, theme))?;
        Ok(())
    }
}

/// Writes one JSON object per snapshot.
pub struct JsonLinesRenderer<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn on_tick(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, snapshot).map_err(io::Error::other)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Renders the full frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, theme: &Theme) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, theme);

    let board_area = centered_board(play_area, snapshot.grid);
    let block = Block::bordered().border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_board(frame, inner, snapshot, theme);

    if snapshot.status == EngineStatus::Idle {
        render_notice(frame, play_area, snapshot, theme);
    }
}

fn render_board(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let ink = Style::new()
        .fg(faded_ink(theme, snapshot.contrast))
        .bg(rgb(theme.play_bg));

    let buffer = frame.buffer_mut();
    buffer.set_style(inner, Style::new().bg(rgb(theme.play_bg)));

    if let Some((x, y)) = cell_to_terminal(inner, snapshot.grid, snapshot.apple) {
        buffer.set_string(x, y, GLYPH_APPLE, ink);
    }

    for cell in &snapshot.snake {
        let Some((x, y)) = cell_to_terminal(inner, snapshot.grid, *cell) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_SNAKE, ink);
    }
}

/// Ink color blended toward the background as contrast drops.
#[must_use]
pub fn faded_ink(theme: &Theme, contrast: f64) -> Color {
    let contrast = contrast.clamp(0.0, 1.0);
    let blend = |ink: u8, bg: u8| {
        let value = f64::from(bg) + (f64::from(ink) - f64::from(bg)) * contrast;
        value.round() as u8
    };

    Color::Rgb(
        blend(theme.ink.0, theme.play_bg.0),
        blend(theme.ink.1, theme.play_bg.1),
        blend(theme.ink.2, theme.play_bg.2),
    )
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn centered_board(area: Rect, grid: GridSize) -> Rect {
    let width = grid.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = grid.height.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    board
}

fn cell_to_terminal(inner: Rect, grid: GridSize, cell: Cell) -> Option<(u16, u16)> {
    let (column, row) = grid.coordinates(cell)?;

    let x = inner.x.saturating_add(column.saturating_mul(CELL_COLUMNS));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
