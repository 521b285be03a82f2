use std::io;
use std::panic;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::config::Theme;
use crate::game::GameEngine;
use crate::input::{GameInput, InputHandler};
use crate::renderer::{Renderer, TerminalRenderer};

/// Frame pacing for the interactive loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Renderer bound to the real terminal.
pub type AppRenderer = TerminalRenderer<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode + alternate screen) for one session.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    renderer: AppRenderer,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates the renderer.
    pub fn enter(theme: &'static Theme) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match TerminalRenderer::new(CrosstermBackend::new(stdout), theme) {
            Ok(renderer) => Ok(Self { renderer }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort();
                Err(error)
            }
        }
    }

    pub fn renderer_mut(&mut self) -> &mut AppRenderer {
        &mut self.renderer
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort();
    }
}

/// Restores the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}

/// Runs the interactive frame loop until the player quits.
///
/// Input only enqueues; the engine advances by measured frame time.
pub fn run_interactive(
    engine: &mut GameEngine,
    session: &mut TerminalSession,
    input: &mut InputHandler,
) -> io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        session.renderer_mut().on_tick(&engine.snapshot())?;

        if let Some(game_input) = input.poll_input()? {
            if game_input == GameInput::Quit {
                info!("quit requested");
                return Ok(());
            }
            engine.handle_input(game_input);
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last_frame);
        last_frame = now;

        engine.advance(elapsed);
    }
}

fn cleanup_terminal_best_effort() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
