use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, Rng};
use ratatui::layout::Rect;

use crate::board::Tile;
use crate::round::TapOutcome;
use crate::session::{Session, SessionState};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Terminal-facing wrapper around a session: cursor, key and mouse mapping
#[derive(Debug)]
pub struct App<R = StdRng> {
    pub session: Session<R>,
    /// Grid position (row-major) under the keyboard cursor
    pub cursor: usize,
}

impl<R: Rng> App<R> {
    pub fn new(session: Session<R>) -> Self {
        Self { session, cursor: 0 }
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    fn grid_size(&self) -> Option<u32> {
        self.session
            .game
            .current_round()
            .map(|round| round.grid_size())
    }

    /// Tile currently under the cursor
    pub fn cursor_tile(&self) -> Option<Tile> {
        self.session
            .game
            .current_round()
            .and_then(|round| round.tiles().get(self.cursor).copied())
    }

    pub fn on_tick(&mut self, now_ms: u64) {
        self.session.advance(now_ms);
        if let Some(n) = self.grid_size() {
            let cells = (n * n) as usize;
            if self.cursor >= cells {
                self.cursor = cells - 1;
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now_ms: u64) -> AppAction {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return AppAction::Quit;
        }

        match self.session.state() {
            SessionState::Waiting => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.cursor = 0;
                    self.session.start(now_ms);
                }
            }
            SessionState::Playing => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
                KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
                KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
                KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.tap_cursor(now_ms);
                }
                _ => {}
            },
            SessionState::Finished => match key.code {
                KeyCode::Char('r') => self.session.restart(),
                KeyCode::Char('q') => return AppAction::Quit,
                _ => {}
            },
        }

        AppAction::Continue
    }

    /// Mouse press at terminal cell (`column`, `row`) within a frame of `area`
    pub fn on_click(&mut self, area: Rect, column: u16, row: u16, now_ms: u64) -> TapOutcome {
        let Some(n) = self.grid_size() else {
            return TapOutcome::Ignored;
        };
        let board = ui::screen_layout(area).board;
        match ui::tile_at(board, n, column, row) {
            Some(position) => {
                self.cursor = position;
                self.tap_cursor(now_ms)
            }
            None => TapOutcome::Ignored,
        }
    }

    fn tap_cursor(&mut self, now_ms: u64) -> TapOutcome {
        match self.cursor_tile() {
            Some(tile) => self.session.tap(tile, now_ms),
            None => TapOutcome::Ignored,
        }
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let Some(n) = self.grid_size() else {
            return;
        };
        let n = n as i32;
        let col = (self.cursor as i32 % n + dx).rem_euclid(n);
        let row = (self.cursor as i32 / n + dy).rem_euclid(n);
        self.cursor = (row * n + col) as usize;
    }
}
