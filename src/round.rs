use rand::Rng;
use std::collections::HashSet;

use crate::board::{self, Tile};

/// Result of a single tap against the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Tap had no effect (repeat tap, tile not on the grid, or input closed)
    Ignored,
    /// Tile belongs to the target and more are still expected
    Accepted { remaining: usize },
    /// Final tile entered and every entered tile belongs to the target
    Completed,
    /// Tile is not part of the target; the round is over
    Wrong,
}

/// One generate-display-input cycle
#[derive(Debug, Clone)]
pub struct Round {
    grid_size: u32,
    sequence: Vec<Tile>,
    target: HashSet<Tile>,
    tiles: Vec<Tile>,
    entered: Vec<Tile>,
    input_started_at: Option<u64>,
    finished: bool,
}

impl Round {
    pub fn generate<R: Rng + ?Sized>(grid_size: u32, rng: &mut R) -> Self {
        let sequence = board::generate_sequence(grid_size, rng);
        let tiles = board::tile_order(grid_size, rng);
        Self::with_layout(grid_size, sequence, tiles)
    }

    /// Builds a round from a known target and layout
    pub fn with_layout(grid_size: u32, sequence: Vec<Tile>, tiles: Vec<Tile>) -> Self {
        Self {
            grid_size,
            target: sequence.iter().copied().collect(),
            sequence,
            tiles,
            entered: Vec::new(),
            input_started_at: None,
            finished: false,
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn sequence(&self) -> &[Tile] {
        &self.sequence
    }

    /// Tiles in display order, row by row
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn entered(&self) -> &[Tile] {
        &self.entered
    }

    pub fn is_target(&self, tile: Tile) -> bool {
        self.target.contains(&tile)
    }

    pub fn has_entered(&self, tile: Tile) -> bool {
        self.entered.contains(&tile)
    }

    pub fn accepts_input(&self) -> bool {
        self.input_started_at.is_some() && !self.finished
    }

    pub fn input_started_at(&self) -> Option<u64> {
        self.input_started_at
    }

    /// Opens the round for taps; `now_ms` is the reference for the speed bonus
    pub fn begin_input(&mut self, now_ms: u64) {
        self.input_started_at = Some(now_ms);
    }

    /// Milliseconds since input opened, or zero if it never did
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.input_started_at
            .map(|start| now_ms.saturating_sub(start))
            .unwrap_or(0)
    }

    pub fn tap(&mut self, tile: Tile) -> TapOutcome {
        if !self.accepts_input()
            || tile == 0
            || tile > board::total_tiles(self.grid_size)
            || self.has_entered(tile)
        {
            return TapOutcome::Ignored;
        }

        self.entered.push(tile);

        if !self.is_target(tile) {
            self.finished = true;
            return TapOutcome::Wrong;
        }

        if self.entered.len() == self.sequence.len()
            && self.entered.iter().all(|t| self.target.contains(t))
        {
            self.finished = true;
            return TapOutcome::Completed;
        }

        TapOutcome::Accepted {
            remaining: self.sequence.len() - self.entered.len(),
        }
    }

    /// Reorders the displayed tiles, leaving target and input untouched
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        board::shuffle(&mut self.tiles, rng);
    }
}
