use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::Cell;
use crate::board::Board;
use crate::clock::GameClock;
use crate::config::{ConfigError, GameConfig, MAX_CONTRAST, Mode};
use crate::contrast;
use crate::input::{Direction, GameInput, InputQueue};
use crate::renderer::Snapshot;
use crate::snake::Snake;

/// Whether ticks are currently being applied.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    Idle,
    Running,
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundEnd {
    WallCollision,
    SelfCollision,
    /// The snake filled every cell, so no apple could be placed.
    BoardFilled,
}

/// Final numbers of a finished round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct RoundSummary {
    pub score: u32,
    pub steps_taken: u64,
    pub reason: RoundEnd,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The engine is idle and nothing changed.
    Suspended,
    Moved,
    AteApple { score: u32, apple: Cell },
    RoundOver(RoundSummary),
}

/// Message shown while idle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    ModeSelected { mode: Mode },
    RoundOver(RoundSummary),
}

/// Complete mutable game state for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: Board,
    pub score: u32,
    pub contrast: f64,
    pub steps_taken: u64,
    pub mode: Mode,
    pub started: bool,
}

impl GameState {
    /// Fresh, not yet started state for `mode`.
    #[must_use]
    pub fn reset(config: &GameConfig, mode: Mode) -> Self {
        Self {
            board: Board::new(
                config.grid,
                Snake::from_cells(config.initial_snake.iter().copied()),
                config.initial_apple,
            ),
            score: 0,
            contrast: MAX_CONTRAST,
            steps_taken: 0,
            mode,
            started: false,
        }
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        self.board.snake()
    }

    #[must_use]
    pub fn apple(&self) -> Cell {
        self.board.apple()
    }

    /// Committed direction of travel.
    #[must_use]
    pub fn head_direction(&self) -> Option<Direction> {
        self.board.snake().head_direction(self.board.bounds())
    }
}

/// Drives a [`GameState`] from inputs and elapsed frame time.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    inputs: InputQueue,
    clock: GameClock,
    rng: StdRng,
    notice: Option<Notice>,
}

impl GameEngine {
    /// Builds an idle engine after validating `config`.
    ///
    /// Without a configured seed the apple placement is seeded from entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            state: GameState::reset(&config, config.mode),
            inputs: InputQueue::new(),
            clock: GameClock::new(Duration::from_millis(config.tick_interval_ms)),
            rng,
            notice: None,
            config,
        })
    }

    /// Applies one external input event. Returns whether it had an effect.
    pub fn handle_input(&mut self, input: GameInput) -> bool {
        match input {
            GameInput::Direction(direction) => self.queue_direction(direction),
            GameInput::Restart => {
                info!(score = self.state.score, "restart requested");
                self.reset();
                self.notice = None;
                true
            }
            GameInput::EasyMode => self.select_mode(Mode::Easy),
            GameInput::HardMode => self.select_mode(Mode::Hard),
            GameInput::Quit => false,
        }
    }

    /// Per-frame entry point: fades contrast and ticks when a step is due.
    pub fn advance(&mut self, elapsed: Duration) -> Option<TickOutcome> {
        if !self.state.started {
            return None;
        }

        self.state.contrast = contrast::fade(
            self.state.contrast,
            elapsed,
            self.state.score,
            self.state.mode.fade(),
        );

        self.clock.advance(elapsed).then(|| self.tick())
    }

    /// Advances the snake by exactly one cell.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.started {
            return TickOutcome::Suspended;
        }

        let bounds = self.state.board.bounds();
        let (Some(head), Some(current)) = (self.state.snake().head(), self.state.head_direction())
        else {
            return TickOutcome::Suspended;
        };

        let direction = self.inputs.pop().unwrap_or(current);
        let Some(next) = bounds.neighbor(head, direction) else {
            return self.end_round(RoundEnd::WallCollision);
        };

        let grow = next == self.state.apple();
        if self.state.snake().blocks(next, grow) {
            return self.end_round(RoundEnd::SelfCollision);
        }

        self.state.board.snake_mut().advance(next, grow);
        self.state.steps_taken += 1;

        if !grow {
            return TickOutcome::Moved;
        }

        self.state.score += 1;
        self.state.contrast = contrast::boost(self.state.contrast);
        let Some(apple) = self.state.board.place_apple(&mut self.rng) else {
            return self.end_round(RoundEnd::BoardFilled);
        };

        debug!(score = self.state.score, apple, "apple eaten");
        TickOutcome::AteApple {
            score: self.state.score,
            apple,
        }
    }

    /// Immutable view handed to renderers.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        if self.state.started {
            EngineStatus::Running
        } else {
            EngineStatus::Idle
        }
    }

    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    #[must_use]
    pub fn pending_inputs(&self) -> &InputQueue {
        &self.inputs
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh state for the current mode, as after a restart.
    #[must_use]
    pub fn fresh_state(&self) -> GameState {
        GameState::reset(&self.config, self.state.mode)
    }

    fn queue_direction(&mut self, direction: Direction) -> bool {
        let Some(current) = self.state.head_direction() else {
            return false;
        };

        if !self.inputs.push(direction, current) {
            trace!(?direction, ?current, "direction rejected");
            return false;
        }

        if !self.state.started {
            self.start();
        }
        true
    }

    fn select_mode(&mut self, mode: Mode) -> bool {
        if self.state.started {
            trace!(?mode, "mode change ignored while running");
            return false;
        }

        info!(mode = mode.label(), "mode selected");
        self.state.mode = mode;
        self.reset();
        self.notice = Some(Notice::ModeSelected { mode });
        true
    }

    fn start(&mut self) {
        info!(mode = self.state.mode.label(), "round started");
        self.state.started = true;
        self.clock.start();
        self.notice = None;
    }

    fn reset(&mut self) {
        self.state = GameState::reset(&self.config, self.state.mode);
        self.inputs.clear();
        self.clock.stop();
    }

    fn end_round(&mut self, reason: RoundEnd) -> TickOutcome {
        let summary = RoundSummary {
            score: self.state.score,
            steps_taken: self.state.steps_taken,
            reason,
        };
        info!(
            score = summary.score,
            steps = summary.steps_taken,
            ?reason,
            "round over"
        );

        self.reset();
        self.notice = Some(Notice::RoundOver(summary));
        TickOutcome::RoundOver(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{GameConfig, GridSize, Mode};
    use crate::input::{Direction, GameInput};

    use super::{EngineStatus, GameEngine, Notice, RoundEnd, TickOutcome};

    fn engine() -> GameEngine {
        GameEngine::new(GameConfig {
            seed: Some(11),
            ..GameConfig::default()
        })
        .expect("default config is valid")
    }

    #[test]
    fn engine_starts_idle_and_ignores_ticks() {
        let mut engine = engine();

        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(engine.tick(), TickOutcome::Suspended);
        assert_eq!(engine.advance(Duration::from_secs(1)), None);
        assert_eq!(engine.state().contrast, 1.0);
    }

    #[test]
    fn first_valid_direction_starts_round() {
        let mut engine = engine();

        assert!(!engine.handle_input(GameInput::Direction(Direction::Right)));
        assert_eq!(engine.status(), EngineStatus::Idle);

        assert!(engine.handle_input(GameInput::Direction(Direction::Up)));
        assert_eq!(engine.status(), EngineStatus::Running);
        assert_eq!(engine.pending_inputs().len(), 1);
    }

    #[test]
    fn mode_switch_only_from_idle() {
        let mut engine = engine();

        assert!(engine.handle_input(GameInput::HardMode));
        assert_eq!(engine.state().mode, Mode::Hard);
        assert_eq!(
            engine.notice(),
            Some(Notice::ModeSelected { mode: Mode::Hard })
        );

        engine.handle_input(GameInput::Direction(Direction::Left));
        assert!(!engine.handle_input(GameInput::EasyMode));
        assert_eq!(engine.state().mode, Mode::Hard);
        assert_eq!(engine.notice(), None);
    }

    #[test]
    fn restart_returns_to_fresh_idle_state() {
        let mut engine = engine();
        engine.handle_input(GameInput::Direction(Direction::Left));
        engine.tick();
        engine.tick();

        assert!(engine.handle_input(GameInput::Restart));

        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(engine.state(), &engine.fresh_state());
        assert!(engine.pending_inputs().is_empty());
    }

    #[test]
    fn advance_ticks_on_the_fixed_step() {
        let mut engine = engine();
        engine.handle_input(GameInput::Direction(Direction::Left));

        assert_eq!(engine.advance(Duration::from_millis(150)), None);
        assert_eq!(
            engine.advance(Duration::from_millis(50)),
            Some(TickOutcome::Moved)
        );
        assert_eq!(engine.state().steps_taken, 1);
        assert!(engine.state().contrast < 1.0);
    }

    #[test]
    fn queued_turns_are_consumed_one_per_tick() {
        let mut engine = engine();
        engine.handle_input(GameInput::Direction(Direction::Up));
        engine.handle_input(GameInput::Direction(Direction::Left));

        engine.tick();
        assert_eq!(engine.state().snake().head(), Some(153));

        engine.tick();
        assert_eq!(engine.state().snake().head(), Some(152));

        engine.tick();
        assert_eq!(engine.state().snake().head(), Some(151));
    }

    #[test]
    fn two_queued_turns_can_reverse_into_the_body() {
        let mut engine = engine();
        engine.handle_input(GameInput::Direction(Direction::Up));
        assert!(engine.handle_input(GameInput::Direction(Direction::Down)));

        assert_eq!(engine.tick(), TickOutcome::Moved);
        let outcome = engine.tick();

        assert!(matches!(
            outcome,
            TickOutcome::RoundOver(summary) if summary.reason == RoundEnd::SelfCollision
        ));
        assert_eq!(engine.status(), EngineStatus::Idle);
    }

    #[test]
    fn filling_the_board_ends_the_round() {
        // 5x1 strip: snake 1..=4 heading left, apple on the last free cell.
        let mut engine = GameEngine::new(GameConfig {
            grid: GridSize {
                width: 5,
                height: 1,
            },
            initial_snake: vec![1, 2, 3, 4],
            initial_apple: 0,
            seed: Some(1),
            ..GameConfig::default()
        })
        .expect("strip layout is valid");

        engine.handle_input(GameInput::Direction(Direction::Left));
        let outcome = engine.tick();

        assert!(matches!(
            outcome,
            TickOutcome::RoundOver(summary)
                if summary.reason == RoundEnd::BoardFilled && summary.score == 1
        ));
        assert_eq!(engine.state(), &engine.fresh_state());
    }
}
