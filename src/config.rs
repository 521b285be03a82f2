use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Cell;
use crate::input::Direction;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when `cell` addresses a cell of this grid.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell < self.total_cells()
    }

    /// Returns `(column, row)` for an in-bounds cell.
    #[must_use]
    pub fn coordinates(self, cell: Cell) -> Option<(u16, u16)> {
        if !self.contains(cell) {
            return None;
        }

        let width = usize::from(self.width);
        let column = u16::try_from(cell % width).ok()?;
        let row = u16::try_from(cell / width).ok()?;
        Some((column, row))
    }

    /// Returns the orthogonal neighbour of `cell`, or `None` past a wall.
    ///
    /// Horizontal steps never wrap onto the adjacent row.
    #[must_use]
    pub fn neighbor(self, cell: Cell, direction: Direction) -> Option<Cell> {
        if !self.contains(cell) {
            return None;
        }

        let width = usize::from(self.width);
        let column = cell % width;
        match direction {
            Direction::Left => (column > 0).then(|| cell - 1),
            Direction::Right => (column + 1 < width).then(|| cell + 1),
            Direction::Up => cell.checked_sub(width),
            Direction::Down => Some(cell + width).filter(|next| self.contains(*next)),
        }
    }

    /// Returns the direction that leads from `from` to the adjacent `to`.
    #[must_use]
    pub fn direction_between(self, from: Cell, to: Cell) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| self.neighbor(from, *direction) == Some(to))
    }
}

/// Difficulty preset selected from the idle screen.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Easy,
    Hard,
}

impl Mode {
    /// Returns the fade constants for this mode.
    #[must_use]
    pub fn fade(self) -> FadePreset {
        match self {
            Self::Easy => FadePreset {
                fade_ms: 5000.0,
                exponential: 1.024,
            },
            Self::Hard => FadePreset {
                fade_ms: 4000.0,
                exponential: 1.025,
            },
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Hard => "Hard",
        }
    }
}

/// Contrast decay constants.
///
/// A full fade from 1.0 to 0.0 takes `fade_ms / exponential^score`
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadePreset {
    pub fade_ms: f64,
    pub exponential: f64,
}

/// Colors applied to all visual elements.
///
/// Snake and apple are drawn with `ink`, blended toward `play_bg` as the
/// contrast drops.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub ink: (u8, u8, u8),
    pub play_bg: (u8, u8, u8),
    pub border_fg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub notice: Color,
}

/// Black ink on paper.
pub const THEME_PAPER: Theme = Theme {
    name: "Paper",
    ink: (0, 0, 0),
    play_bg: (236, 236, 228),
    border_fg: Color::Gray,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    notice: Color::Gray,
};

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 15;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 15;

/// Fixed step interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Snake cells at reset, head first, so the opening move heads left.
///
/// Listed tail-first these cells would describe a snake heading right.
pub const DEFAULT_SNAKE: [Cell; 4] = [168, 169, 170, 171];

/// Apple cell at reset.
pub const DEFAULT_APPLE: Cell = 100;

/// Shortest snake a round may start with.
pub const MIN_SNAKE_LENGTH: usize = 4;

/// Contrast restored per apple.
pub const CONTRAST_INCREASE: f64 = 0.5;

/// Upper bound for contrast.
pub const MAX_CONTRAST: f64 = 1.0;

/// Configuration-time failures. Gameplay itself never errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} cannot hold a snake")]
    GridTooSmall { width: u16, height: u16 },
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("starting snake has {len} cells, at least {min} required", min = MIN_SNAKE_LENGTH)]
    SnakeTooShort { len: usize },
    #[error("cell {cell} lies outside the grid")]
    CellOutOfBounds { cell: Cell },
    #[error("snake cells {from} and {to} are not adjacent")]
    SnakeNotContiguous { from: Cell, to: Cell },
    #[error("snake occupies cell {cell} more than once")]
    SnakeOverlaps { cell: Cell },
    #[error("apple cell {cell} is covered by the snake")]
    AppleOnSnake { cell: Cell },
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
}

/// Everything needed to build a [`crate::game::GameEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub tick_interval_ms: u64,
    /// Head first.
    pub initial_snake: Vec<Cell>,
    pub initial_apple: Cell,
    pub mode: Mode,
    /// Fixed RNG seed for reproducible apple placement.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            initial_snake: DEFAULT_SNAKE.to_vec(),
            initial_apple: DEFAULT_APPLE,
            mode: Mode::Easy,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Checks that the starting layout satisfies the board invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.grid;
        if grid.total_cells() <= MIN_SNAKE_LENGTH {
            return Err(ConfigError::GridTooSmall {
                width: grid.width,
                height: grid.height,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        if self.initial_snake.len() < MIN_SNAKE_LENGTH {
            return Err(ConfigError::SnakeTooShort {
                len: self.initial_snake.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.initial_snake.len());
        for &cell in &self.initial_snake {
            if !grid.contains(cell) {
                return Err(ConfigError::CellOutOfBounds { cell });
            }
            if !seen.insert(cell) {
                return Err(ConfigError::SnakeOverlaps { cell });
            }
        }

        for pair in self.initial_snake.windows(2) {
            if grid.direction_between(pair[0], pair[1]).is_none() {
                return Err(ConfigError::SnakeNotContiguous {
                    from: pair[0],
                    to: pair[1],
                });
            }
        }

        if !grid.contains(self.initial_apple) {
            return Err(ConfigError::CellOutOfBounds {
                cell: self.initial_apple,
            });
        }
        if seen.contains(&self.initial_apple) {
            return Err(ConfigError::AppleOnSnake {
                cell: self.initial_apple,
            });
        }

        Ok(())
    }
}
