use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::Serialize;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Left, Self::Up, Self::Right, Self::Down];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    EasyMode,
    HardMode,
    Quit,
}

/// Most turns that may wait for upcoming ticks.
pub const MAX_PENDING_TURNS: usize = 3;

/// Pending turns, consumed one per tick.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
}

impl InputQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `direction` unless it repeats the last queued turn, reverses
    /// the committed `head_direction`, or the queue already holds
    /// [`MAX_PENDING_TURNS`]. Returns whether it was accepted.
    ///
    /// Only the most recent queued turn is compared, so two queued
    /// perpendicular turns can still add up to a reversal.
    pub fn push(&mut self, direction: Direction, head_direction: Direction) -> bool {
        if self.pending.back() == Some(&direction) {
            return false;
        }
        if direction == head_direction.opposite() {
            return false;
        }
        if self.pending.len() >= MAX_PENDING_TURNS {
            return false;
        }

        self.pending.push_back(direction);
        true
    }

    /// Takes the oldest queued turn.
    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    /// Returns the most recently queued turn.
    #[must_use]
    pub fn last(&self) -> Option<Direction> {
        self.pending.back().copied()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Maps a terminal key press to a game input. Unmapped keys yield `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Char(' ') => Some(GameInput::Restart),
        KeyCode::Char('e' | 'E') => Some(GameInput::EasyMode),
        KeyCode::Char('h' | 'H') => Some(GameInput::HardMode),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

/// Polls crossterm for key presses.
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    poll_timeout: Duration,
}

impl InputHandler {
    #[must_use]
    pub fn new(poll_timeout: Duration) -> Self {
        Self { poll_timeout }
    }

    /// Waits up to the poll timeout for one mapped key press.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}
