use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::board::{self, Tile};
use crate::difficulty::{
    display_time_after, CORRECT_PAUSE_MS, INITIAL_DISPLAY_MS, TOUCH_FEEDBACK_MS, WRONG_PAUSE_MS,
};
use crate::round::{Round, TapOutcome};
use crate::scheduler::Scheduler;
use crate::scoring::{score_round, ScoreBreakdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameStatus {
    Waiting,
    Showing,
    Input,
    Correct,
    Wrong,
}

/// Delayed transitions owned by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    EndReveal,
    ClearFeedback,
    RetryRound,
    NextRound { display_ms: u64 },
}

/// The screen hosting a game: supplies the round number and receives scores
pub trait Host {
    fn round(&self) -> u32;
    /// Called exactly once per completed round with the snapped total
    fn on_score(&mut self, points: u32);
}

/// Memory sequence engine: generation, input validation, scoring and ramp.
///
/// Time never comes from the ambient clock; every call carries the caller's
/// monotonic `now_ms`, and delayed transitions run from [`MemoryGame::advance`].
#[derive(Debug)]
pub struct MemoryGame<R = StdRng> {
    rng: R,
    status: GameStatus,
    round: Option<Round>,
    streak: u32,
    display_ms: u64,
    touch_feedback: Option<Tile>,
    last_score: Option<ScoreBreakdown>,
    timers: Scheduler<Transition>,
}

impl MemoryGame<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> MemoryGame<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            status: GameStatus::Waiting,
            round: None,
            streak: 0,
            display_ms: INITIAL_DISPLAY_MS,
            touch_feedback: None,
            last_score: None,
            timers: Scheduler::new(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn display_ms(&self) -> u64 {
        self.display_ms
    }

    pub fn touch_feedback(&self) -> Option<Tile> {
        self.touch_feedback
    }

    /// Breakdown of the last completed round, while the success indicator is up
    pub fn last_score(&self) -> Option<&ScoreBreakdown> {
        match self.status {
            GameStatus::Correct => self.last_score.as_ref(),
            _ => None,
        }
    }

    pub fn is_revealing(&self) -> bool {
        self.status == GameStatus::Showing
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Replaces the current round with a fresh one and starts the reveal
    pub fn start_round<H: Host + ?Sized>(&mut self, now_ms: u64, host: &H) {
        self.timers.invalidate();

        let grid_size = board::grid_size(host.round());
        let round = Round::generate(grid_size, &mut self.rng);
        debug!(
            "round {} generated: grid {}x{}, {} tiles, reveal {}ms",
            host.round(),
            grid_size,
            grid_size,
            round.sequence().len(),
            self.display_ms
        );

        self.round = Some(round);
        self.status = GameStatus::Showing;
        self.touch_feedback = None;
        self.timers
            .schedule(now_ms + self.display_ms, Transition::EndReveal);
    }

    pub fn tap<H: Host + ?Sized>(
        &mut self,
        tile: Tile,
        now_ms: u64,
        host: &mut H,
    ) -> TapOutcome {
        if self.status != GameStatus::Input {
            return TapOutcome::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return TapOutcome::Ignored;
        };

        let outcome = round.tap(tile);
        if outcome == TapOutcome::Ignored {
            return outcome;
        }

        self.touch_feedback = Some(tile);
        self.timers
            .schedule(now_ms + TOUCH_FEEDBACK_MS, Transition::ClearFeedback);

        match outcome {
            TapOutcome::Wrong => {
                info!("wrong tile {tile}, streak lost at {}", self.streak);
                self.status = GameStatus::Wrong;
                self.streak = 1;
                self.timers
                    .schedule(now_ms + WRONG_PAUSE_MS, Transition::RetryRound);
            }
            TapOutcome::Accepted { .. } => {
                round.reshuffle(&mut self.rng);
            }
            TapOutcome::Completed => {
                round.reshuffle(&mut self.rng);
                self.streak += 1;

                let breakdown = score_round(
                    self.streak,
                    round.grid_size(),
                    round.sequence().len(),
                    round.elapsed_ms(now_ms),
                );
                info!(
                    "round {} complete: +{} (streak {}, {}ms)",
                    host.round(),
                    breakdown.total,
                    self.streak,
                    round.elapsed_ms(now_ms)
                );

                let display_ms = display_time_after(host.round());
                self.last_score = Some(breakdown);
                self.status = GameStatus::Correct;
                host.on_score(breakdown.total);
                self.timers.schedule(
                    now_ms + CORRECT_PAUSE_MS,
                    Transition::NextRound { display_ms },
                );
            }
            TapOutcome::Ignored => {}
        }

        outcome
    }

    /// Runs every delayed transition due at `now_ms`
    pub fn advance<H: Host + ?Sized>(&mut self, now_ms: u64, host: &H) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            if fired.epoch != self.timers.epoch() {
                debug!("dropping stale {:?}", fired.task);
                continue;
            }

            match fired.task {
                Transition::EndReveal => {
                    debug!("{} -> {}", self.status, GameStatus::Input);
                    self.status = GameStatus::Input;
                    if let Some(round) = self.round.as_mut() {
                        round.begin_input(now_ms);
                    }
                }
                Transition::ClearFeedback => self.touch_feedback = None,
                Transition::RetryRound => self.start_round(now_ms, host),
                Transition::NextRound { display_ms } => {
                    self.display_ms = display_ms;
                    self.start_round(now_ms, host);
                }
            }
        }
    }

    /// Cancels everything pending; the game stops reacting until the next start
    pub fn halt(&mut self) {
        self.timers.invalidate();
        self.status = GameStatus::Waiting;
        self.touch_feedback = None;
    }

    /// Halts and forgets all progress, as if the game had just been created
    pub fn reset(&mut self) {
        self.halt();
        self.round = None;
        self.streak = 0;
        self.display_ms = INITIAL_DISPLAY_MS;
        self.last_score = None;
    }
}
