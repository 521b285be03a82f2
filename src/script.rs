//! Scripted, clock-free play for headless runs and reproducible traces.
//!
//! A script is a sequence of single-character tokens; whitespace is ignored.
//!
//! | token | effect            |
//! |-------|-------------------|
//! | `L` `U` `R` `D` | queue a direction |
//! | `X`   | restart           |
//! | `E` `H` | easy / hard mode |
//! | `.`   | one tick          |

use std::io;

use thiserror::Error;
use tracing::debug;

use crate::game::GameEngine;
use crate::input::{Direction, GameInput};
use crate::renderer::Renderer;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ScriptStep {
    Input(GameInput),
    Tick,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ScriptError {
    #[error("unknown script token {token:?} at position {position}")]
    UnknownToken { token: char, position: usize },
}

/// Parses a script. Tokens are case-insensitive.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, token)| !token.is_whitespace())
        .map(|(position, token)| {
            let step = match token.to_ascii_uppercase() {
                'L' => ScriptStep::Input(GameInput::Direction(Direction::Left)),
                'U' => ScriptStep::Input(GameInput::Direction(Direction::Up)),
                'R' => ScriptStep::Input(GameInput::Direction(Direction::Right)),
                'D' => ScriptStep::Input(GameInput::Direction(Direction::Down)),
                'X' => ScriptStep::Input(GameInput::Restart),
                'E' => ScriptStep::Input(GameInput::EasyMode),
                'H' => ScriptStep::Input(GameInput::HardMode),
                '.' => ScriptStep::Tick,
                _ => return Err(ScriptError::UnknownToken { token, position }),
            };
            Ok(step)
        })
        .collect()
}

/// Plays `steps` against `engine`, handing a snapshot to `renderer` after
/// every tick and after every accepted restart or mode switch, since both
/// reset the state. Returns the number of ticks played.
pub fn run_script<R: Renderer + ?Sized>(
    engine: &mut GameEngine,
    steps: &[ScriptStep],
    renderer: &mut R,
) -> io::Result<usize> {
    let mut ticks = 0;
    for step in steps {
        match *step {
            ScriptStep::Input(input) => {
                let accepted = engine.handle_input(input);
                debug!(?input, accepted, "script input");

                let resets_state = matches!(
                    input,
                    GameInput::Restart | GameInput::EasyMode | GameInput::HardMode
                );
                if accepted && resets_state {
                    renderer.on_tick(&engine.snapshot())?;
                }
            }
            ScriptStep::Tick => {
                let outcome = engine.tick();
                debug!(?outcome, "script tick");
                renderer.on_tick(&engine.snapshot())?;
                ticks += 1;
            }
        }
    }

    Ok(ticks)
}
