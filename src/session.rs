use log::{debug, info};
use rand::Rng;

use crate::board::Tile;
use crate::game::{Host, MemoryGame};
use crate::round::TapOutcome;

pub const DEFAULT_SESSION_SECS: u32 = 180;
const CLOCK_TICK_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub player_name: String,
    pub session_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            session_secs: DEFAULT_SESSION_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    Waiting,
    Playing,
    Finished,
}

/// Player-facing totals; this is what the game reports scores into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub name: String,
    pub score: u32,
    pub round: u32,
    pub rounds_won: u32,
}

impl Scoreboard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            round: 0,
            rounds_won: 0,
        }
    }
}

impl Host for Scoreboard {
    fn round(&self) -> u32 {
        self.round
    }

    fn on_score(&mut self, points: u32) {
        self.score += points;
        self.round += 1;
        self.rounds_won += 1;
    }
}

/// A timed play session: owns the countdown, the scoreboard and the game
#[derive(Debug)]
pub struct Session<R = rand::rngs::StdRng> {
    pub config: SessionConfig,
    pub scoreboard: Scoreboard,
    pub game: MemoryGame<R>,
    state: SessionState,
    seconds_remaining: u32,
    next_clock_tick_at: u64,
}

impl<R: Rng> Session<R> {
    pub fn new(config: SessionConfig, game: MemoryGame<R>) -> Self {
        Self {
            scoreboard: Scoreboard::new(config.player_name.clone()),
            seconds_remaining: config.session_secs,
            config,
            game,
            state: SessionState::Waiting,
            next_clock_tick_at: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Remaining time as a fraction of the whole session, for the gauge
    pub fn time_ratio(&self) -> f64 {
        if self.config.session_secs == 0 {
            return 0.0;
        }
        self.seconds_remaining as f64 / self.config.session_secs as f64
    }

    pub fn has_started(&self) -> bool {
        self.state != SessionState::Waiting
    }

    pub fn has_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.state != SessionState::Waiting {
            return;
        }
        info!(
            "session started for {} ({}s)",
            self.scoreboard.name, self.config.session_secs
        );
        self.set_state(SessionState::Playing);
        self.seconds_remaining = self.config.session_secs;
        self.scoreboard.round = 1;
        self.next_clock_tick_at = now_ms + CLOCK_TICK_MS;
        self.game.start_round(now_ms, &self.scoreboard);
    }

    /// Applies a tap after everything due up to `now_ms` has run
    pub fn tap(&mut self, tile: Tile, now_ms: u64) -> TapOutcome {
        self.advance(now_ms);
        if self.state != SessionState::Playing {
            return TapOutcome::Ignored;
        }
        self.game.tap(tile, now_ms, &mut self.scoreboard)
    }

    /// Runs the countdown and any game transitions due at `now_ms`
    pub fn advance(&mut self, now_ms: u64) {
        if self.state != SessionState::Playing {
            return;
        }

        while now_ms >= self.next_clock_tick_at {
            self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
            self.next_clock_tick_at += CLOCK_TICK_MS;
            if self.seconds_remaining == 0 {
                self.finish();
                return;
            }
        }

        self.game.advance(now_ms, &self.scoreboard);
    }

    fn finish(&mut self) {
        info!(
            "session finished: {} scored {} over {} rounds",
            self.scoreboard.name, self.scoreboard.score, self.scoreboard.rounds_won
        );
        self.game.halt();
        self.set_state(SessionState::Finished);
    }

    /// Back to the waiting screen with a clean scoreboard and a fresh game
    pub fn restart(&mut self) {
        self.game.reset();
        self.scoreboard = Scoreboard::new(self.config.player_name.clone());
        self.seconds_remaining = self.config.session_secs;
        self.set_state(SessionState::Waiting);
    }

    fn set_state(&mut self, state: SessionState) {
        debug!("session {} -> {}", self.state, state);
        self.state = state;
    }
}
