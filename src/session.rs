use std::time::{Duration, Instant};

use log::{debug, info};
use rand::{rngs::ThreadRng, Rng};

use crate::config::GameConfig;
use crate::input::Command;
use crate::state::{GameState, TickOutcome};
use crate::ticker::Ticker;

/// What the screen has to do after the session handled a command or a tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Update {
    Nothing,
    Redraw,
    /// Drop the game-over box and redraw.
    Restarted,
    Paused,
    Resumed,
    Quit,
}

/// The game state and the timer that paces it, without any terminal.
///
/// The ticker runs while a game is in progress and stops on game over and
/// while paused, so a stopped ticker on a live game means paused.
pub struct Session<R = ThreadRng> {
    state: GameState<R>,
    ticker: Ticker,
}

impl Session<ThreadRng> {
    pub fn new(config: &GameConfig) -> Self {
        Session::with_state(GameState::new(config.grid_size), config.tick_interval())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_state(state: GameState<R>, period: Duration) -> Self {
        Session { state, ticker: Ticker::new(period) }
    }

    pub fn start(&mut self, now: Instant) {
        self.ticker.start(now);
        info!(
            "game started on a {0}x{0} board, one tick every {1:?}",
            self.state.grid_size(),
            self.ticker.period()
        );
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn is_paused(&self) -> bool {
        !self.state.is_game_over() && !self.ticker.is_running()
    }

    /// How long the caller may wait for input, `None` while no tick is scheduled.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.ticker.timeout(now)
    }

    /// Clicks must already be resolved to `Restart` by whoever knows the screen.
    pub fn apply(&mut self, cmd: Command, now: Instant) -> Update {
        match cmd {
            Command::Quit => {
                info!("quit with score {}", self.state.score());
                Update::Quit
            }
            Command::Turn(dir) => {
                if !self.is_paused() && self.state.turn(dir) {
                    debug!("queued turn {:?}", self.state.direction());
                }
                Update::Nothing
            }
            Command::TogglePause => self.toggle_pause(now),
            Command::Restart => {
                if !self.state.is_game_over() {
                    return Update::Nothing;
                }
                self.state.reset();
                self.ticker.start(now);
                info!("restarted");
                Update::Restarted
            }
            Command::Click { .. } => Update::Nothing,
        }
    }

    /// Runs the tick if one is due at `now`.
    pub fn poll_tick(&mut self, now: Instant) -> Update {
        if !self.ticker.poll(now) {
            return Update::Nothing;
        }

        match self.state.tick() {
            TickOutcome::Idle => {
                self.ticker.stop();
                Update::Nothing
            }
            TickOutcome::Moved => Update::Redraw,
            TickOutcome::Ate => {
                debug!("ate, score is now {}", self.state.score());
                Update::Redraw
            }
            TickOutcome::Crashed(collision) => {
                self.ticker.stop();
                info!("game over ({:?}), final score {}", collision, self.state.score());
                Update::Redraw
            }
            TickOutcome::BoardFilled => {
                self.ticker.stop();
                info!("board filled, final score {}", self.state.score());
                Update::Redraw
            }
        }
    }

    fn toggle_pause(&mut self, now: Instant) -> Update {
        if self.state.is_game_over() {
            return Update::Nothing;
        }

        if self.is_paused() {
            self.ticker.start(now);
            debug!("resumed");
            Update::Resumed
        } else {
            self.ticker.stop();
            debug!("paused");
            Update::Paused
        }
    }
}
