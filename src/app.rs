use crate::consts;
use crate::game::{Control, Game, Pace, TickEvent};
use crate::highscores::HighScoreStore;
use crate::input::{toggle_pause, InputError, InputSource, Signal};
use crate::util::ErrorChain;
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::time::Instant;
use thiserror::Error;

/// The control loop: draws the game, waits for input until the next tick is
/// due, and feeds the game whatever direction the input source resolved.
#[derive(Debug)]
pub(crate) struct App<S, H, R = rand::rngs::ThreadRng> {
    game: Game<R>,
    source: S,
    store: H,
    pace: Pace,
    next_tick: Option<Instant>,
    quitting: bool,
}

impl<S: InputSource, H: HighScoreStore, R: Rng> App<S, H, R> {
    pub(crate) fn new(game: Game<R>, source: S, store: H, pace: Pace) -> App<S, H, R> {
        App {
            game,
            source,
            store,
            pace,
            next_tick: None,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        while !self.quitting {
            self.draw(terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> std::io::Result<()> {
        let scene = self.game.scene().with_hint(self.source.hint());
        terminal.draw(|frame| frame.render_widget(scene, frame.area()))?;
        Ok(())
    }

    fn process_input(&mut self) -> Result<(), InputError> {
        if !self.game.running() {
            if let Some(sig) = self.source.next_signal(consts::IDLE_WAIT)? {
                self.handle_signal(sig);
            }
            return Ok(());
        }
        let when = *self.next_tick.get_or_insert_with(|| {
            Instant::now()
                + self
                    .pace
                    .interval(self.game.snake_len(), self.game.rules().initial_length())
        });
        let wait = when.saturating_duration_since(Instant::now());
        let signal = if wait.is_zero() {
            None
        } else {
            self.source.next_signal(wait)?
        };
        if let Some(sig) = signal {
            self.handle_signal(sig);
        } else {
            self.next_tick = None;
            self.advance();
        }
        Ok(())
    }

    fn advance(&mut self) {
        if let TickEvent::GameOver {
            cause,
            score,
            record,
        } = self.game.tick(self.source.take_direction())
        {
            log::info!("Game over ({}) with a score of {score}", cause.describe());
            if let Some(best) = record {
                log::info!("New high score: {best}");
                if let Err(e) = self.store.save(best) {
                    log::warn!("{}", ErrorChain(&e));
                }
            }
        }
    }

    fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::Control(control) => self.control(control),
            Signal::TogglePause => {
                if let Some(control) = toggle_pause(self.game.state()) {
                    self.control(control);
                }
            }
            Signal::Quit => self.quitting = true,
            Signal::Redraw => (),
        }
    }

    fn control(&mut self, control: Control) {
        if !self.game.control(control) {
            return;
        }
        self.next_tick = None;
        match control {
            Control::Pause => log::debug!("Game paused at a score of {}", self.game.score()),
            Control::Resume => log::debug!("Game resumed"),
            Control::Restart => {
                // Steering requested during the last game does not carry over.
                let _ = self.source.take_direction();
                log::info!(
                    "Starting new game; high score to beat is {}",
                    self.game.high_score()
                );
            }
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to draw to terminal")]
    Draw(#[from] std::io::Error),
    #[error(transparent)]
    Input(#[from] InputError),
}
