//! Console state: the running session plus the clock and RNG that drive it.

use std::io::Write;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use wheelshow_core::clock::{Clock, SystemClock};
use wheelshow_core::event::DomainEvent;
use wheelshow_core::rng::{DeterministicRng, SeededRng};
use wheelshow_puzzles::application::loader::{FilePuzzleSource, PuzzleSource};
use wheelshow_session::application::command_handlers::{handle_host_command, handle_tick};
use wheelshow_session::domain::aggregates::GamePhaseController;
use wheelshow_session::domain::events::GameEvent;

use crate::config::ConsoleConfig;
use crate::error::AppError;
use crate::input::{ConsoleInput, parse_line};

/// Whether the console keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// The host asked to quit.
    Quit,
}

/// A session being hosted from the terminal.
pub struct Console {
    controller: GamePhaseController,
    clock: Box<dyn Clock>,
    rng: Box<dyn DeterministicRng>,
    origin: DateTime<Utc>,
}

impl Console {
    /// Wraps a controller. Session time starts now.
    #[must_use]
    pub fn new(
        controller: GamePhaseController,
        clock: Box<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        let origin = clock.now();
        Self {
            controller,
            clock,
            rng,
            origin,
        }
    }

    /// Loads puzzles and rules from the configured files and seats the
    /// players, on the system clock.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if a file cannot be loaded or the game cannot be
    /// set up.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, AppError> {
        let catalog = FilePuzzleSource::new(&config.puzzles).load()?.into_catalog()?;
        let game = config.load_game_config()?;
        let rng = match config.seed {
            Some(seed) => SeededRng::from_seed(seed),
            None => SeededRng::from_entropy(),
        };
        info!(seed = ?config.seed, players = config.players.len(), "starting show");
        let controller =
            GamePhaseController::new(game, catalog, config.players.iter().cloned(), &SystemClock)?;
        Ok(Self::new(controller, Box::new(SystemClock), Box::new(rng)))
    }

    /// The session.
    #[must_use]
    pub fn controller(&self) -> &GamePhaseController {
        &self.controller
    }

    /// Milliseconds since the console started.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.elapsed_ms(self.origin)
    }

    /// Session time of the next pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.controller.next_deadline()
    }

    /// Parses and applies one line at `now_ms`, writing the resulting
    /// events. Lines that do not parse are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the events cannot be written.
    pub fn apply_line(
        &mut self,
        line: &str,
        now_ms: u64,
        out: &mut impl Write,
    ) -> Result<Flow, AppError> {
        let command = match parse_line(line) {
            Ok(Some(ConsoleInput::Command(command))) => command,
            Ok(Some(ConsoleInput::Quit)) => return Ok(Flow::Quit),
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                warn!(line, error = %e, "unrecognised input");
                return Ok(Flow::Continue);
            }
        };
        let (_, events) = handle_host_command(
            &mut self.controller,
            &command,
            now_ms,
            self.clock.as_ref(),
            self.rng.as_mut(),
        );
        write_events(out, &events)?;
        Ok(Flow::Continue)
    }

    /// Fires the timers due by `now_ms` and writes the resulting events.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the events cannot be written.
    pub fn tick(&mut self, now_ms: u64, out: &mut impl Write) -> Result<(), AppError> {
        let events = handle_tick(
            &mut self.controller,
            now_ms,
            self.clock.as_ref(),
            self.rng.as_mut(),
        );
        write_events(out, &events)
    }

    /// Writes events produced outside a command or tick, such as the setup
    /// announcement.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the events cannot be written.
    pub fn flush(&mut self, out: &mut impl Write) -> Result<(), AppError> {
        let events = self.controller.take_events();
        write_events(out, &events)
    }
}

fn write_events(out: &mut impl Write, events: &[GameEvent]) -> Result<(), AppError> {
    for event in events {
        writeln!(out, "{}", event.to_stream_line())?;
    }
    out.flush()?;
    Ok(())
}
