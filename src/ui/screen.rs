use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::{
    render_board, render_centered, render_footer, render_header, render_status, screen_layout,
};
use crate::{app::App, session::SessionState};

/// A UI Screen boundary: one per session state
pub trait Screen<R: Rng> {
    fn render(&self, app: &App<R>, area: Rect, buf: &mut Buffer);
}

/// "Ready to Start?" prompt before the clock runs
pub struct WaitingScreen;

impl<R: Rng> Screen<R> for WaitingScreen {
    fn render(&self, app: &App<R>, area: Rect, buf: &mut Buffer) {
        let layout = screen_layout(area);
        render_header(&app.session, layout.header, buf);

        let lines = vec![
            Line::from(Span::styled(
                "Ready to Start?",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::raw("Test your memory skills! The grid will get larger as you progress."),
            Line::raw(""),
            Line::from(Span::styled(
                "enter/space start · esc quit",
                Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
            )),
        ];
        render_centered(lines, layout.board.union(layout.status), buf);
    }
}

/// Live round: status, board and streak
pub struct PlayingScreen;

impl<R: Rng> Screen<R> for PlayingScreen {
    fn render(&self, app: &App<R>, area: Rect, buf: &mut Buffer) {
        let layout = screen_layout(area);
        render_header(&app.session, layout.header, buf);
        render_status(&app.session, layout.status, buf);
        render_board(app, layout.board, buf);
        render_footer(app, layout.footer, buf);
    }
}

/// End-of-session summary
pub struct FinishedScreen;

impl<R: Rng> Screen<R> for FinishedScreen {
    fn render(&self, app: &App<R>, area: Rect, buf: &mut Buffer) {
        let layout = screen_layout(area);
        render_header(&app.session, layout.header, buf);

        let scoreboard = &app.session.scoreboard;
        let lines = vec![
            Line::from(Span::styled(
                "Game Over!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::raw(format!("You scored {} points", scoreboard.score)),
            Line::raw(format!("Rounds completed: {}", scoreboard.rounds_won)),
            Line::raw(""),
            Line::from(Span::styled(
                "(r)play again · (q)uit",
                Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
            )),
        ];
        render_centered(lines, layout.board.union(layout.status), buf);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen<R: Rng>(state: &SessionState) -> Box<dyn Screen<R>> {
    match state {
        SessionState::Waiting => Box::new(WaitingScreen),
        SessionState::Playing => Box::new(PlayingScreen),
        SessionState::Finished => Box::new(FinishedScreen),
    }
}
