use crate::audio::{Cue, Sounds};
use crate::consts;
use crate::display::Renderer;
use crate::game::{Game, GameState, Hazard, Summary};
use crate::input::Controller;
use rand::Rng;
use std::io;
use std::thread::sleep;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Runs a game at a fixed frame rate, wiring it up to input, display, and
/// sound
#[derive(Debug)]
pub(crate) struct App<C, D, S, R> {
    game: Game<R>,
    controller: C,
    display: D,
    sounds: S,

    /// Target length of each frame
    frame_duration: Duration,

    /// How often the frame count is reported in the title
    title_interval: Duration,
}

impl<C: Controller, D: Renderer, S: Sounds, R: Rng> App<C, D, S, R> {
    pub(crate) fn new(
        game: Game<R>,
        controller: C,
        display: D,
        sounds: S,
        frame_duration: Duration,
    ) -> Self {
        App {
            game,
            controller,
            display,
            sounds,
            frame_duration,
            title_interval: consts::TITLE_INTERVAL,
        }
    }

    /// Play the game until the snake dies, the board fills up, or the player
    /// quits
    ///
    /// # Errors
    ///
    /// Returns `Err` if reading input or drawing fails.  Failing to play a
    /// sound is logged and otherwise ignored.
    pub(crate) fn run(&mut self) -> io::Result<Summary> {
        info!(frame_duration = ?self.frame_duration, "Starting game");
        self.play(Cue::Start);
        let mut frames = 0u32;
        let mut title_timer = Instant::now();
        loop {
            let frame_start = Instant::now();
            let was_paused = self.game.paused();
            for cmd in self.controller.poll()? {
                self.game.handle_command(cmd);
            }
            if self.game.paused() && !was_paused {
                self.display.pause_title()?;
            }
            match self.game.update() {
                Some(Hazard::Safe) => self.play(Cue::Success),
                Some(Hazard::Hazardous) => self.play(Cue::Error),
                None => (),
            }
            self.display.draw(self.game.view())?;
            if self.game.is_over() {
                if self.game.state() != GameState::Quit {
                    self.play(Cue::GameOver);
                }
                let summary = self.game.summary();
                info!(
                    state = ?summary.state,
                    score = summary.score,
                    size = summary.size,
                    "Game over"
                );
                return Ok(summary);
            }
            frames = frames.saturating_add(1);
            if title_timer.elapsed() >= self.title_interval {
                if !self.game.paused() {
                    self.display.update_title(self.game.score(), frames)?;
                }
                frames = 0;
                title_timer = Instant::now();
            }
            let remaining = self.frame_duration.saturating_sub(frame_start.elapsed());
            if !remaining.is_zero() {
                sleep(remaining);
            }
        }
    }

    fn play(&mut self, cue: Cue) {
        debug!(?cue, "Playing sound");
        if let Err(e) = self.sounds.play(cue) {
            warn!(?cue, error = %e, "Failed to play sound");
        }
    }
}
