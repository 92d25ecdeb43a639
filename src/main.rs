//! Terminal match-3 runner (default binary).
//!
//! Environment:
//! - `GEM_RUSH_CONFIG`: path to a JSON level configuration
//! - `GEM_RUSH_SEED`: fixed RNG seed for a reproducible session
//! - `RUST_LOG`: log filter (default `warn`; redirect stderr to keep the
//!   screen clean)

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use gem_rush::core::{GameConfig, GameSnapshot, GameState, SimpleRng};
use gem_rush::input::{command_to_action, handle_key_event, should_quit, Cursor, UiCommand};
use gem_rush::term::{CascadeAnimator, FrameBuffer, GameView, TerminalRenderer, Viewport};
use gem_rush::types::{SessionPhase, TICK_MS};

/// Startup options read from the environment
struct LaunchConfig {
    config_path: Option<PathBuf>,
    seed: u32,
}

impl LaunchConfig {
    fn from_env() -> Self {
        use std::env;

        let config_path = env::var("GEM_RUSH_CONFIG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let seed = match env::var("GEM_RUSH_SEED") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("ignoring unparsable GEM_RUSH_SEED {:?}", raw);
                clock_seed()
            }),
            Err(_) => clock_seed(),
        };

        Self { config_path, seed }
    }

    fn game_config(&self) -> Result<GameConfig> {
        match &self.config_path {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("loading level config from {}", path.display())),
            None => Ok(GameConfig::default()),
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let launch = LaunchConfig::from_env();
    let config = launch.game_config()?;
    let game = GameState::with_source(config, SimpleRng::new(launch.seed))
        .context("invalid level config")?;
    let config = game.config();
    log::info!(
        "starting session: {}x{} board, {} gem kinds, {} levels, seed {}",
        config.grid_size,
        config.grid_size,
        config.gem_kinds,
        config.level_count(),
        game.rng().seed()
    );

    let mut term = TerminalRenderer::new();
    term.enter().context("failed to set up the terminal")?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game: GameState) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut anim = CascadeAnimator::new();
    let mut cursor = Cursor::new(game.config().grid_size);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        cursor.resize(snap.size);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let shown_cursor = (snap.phase == SessionPhase::Playing).then(|| cursor.pos());
        view.render_into(&snap, &anim.overlay(shown_cursor), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    // Presentation-side lock: the board on screen is still
                    // catching up with the engine.
                    if anim.is_busy() {
                        continue;
                    }
                    let Some(cmd) = handle_key_event(key) else {
                        continue;
                    };
                    match cmd {
                        UiCommand::CursorUp => {
                            cursor.step(-1, 0);
                        }
                        UiCommand::CursorDown => {
                            cursor.step(1, 0);
                        }
                        UiCommand::CursorLeft => {
                            cursor.step(0, -1);
                        }
                        UiCommand::CursorRight => {
                            cursor.step(0, 1);
                        }
                        UiCommand::Confirm | UiCommand::Cancel => {
                            let action =
                                command_to_action(cmd, snap.phase, cursor.pos(), snap.selected);
                            if let Some(action) = action {
                                game.apply_action(action);
                                if let Some(event) = game.take_last_event() {
                                    anim.play(event);
                                }
                            }
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            anim.tick(TICK_MS);
        }
    }
}
