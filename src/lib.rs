pub mod apple;
pub mod board;
pub mod clock;
pub mod config;
pub mod contrast;
pub mod game;
pub mod input;
pub mod renderer;
pub mod script;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;

/// Row-major index of a grid cell.
pub type Cell = usize;
