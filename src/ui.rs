pub mod screen;

use itertools::Itertools;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    difficulty::speed_up_secs,
    game::{GameStatus, MemoryGame},
    scoring::{streak_multiplier, ScoreBreakdown},
    session::Session,
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

/// Regions of the game screen, shared by the renderer and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub status: Rect,
    pub board: Rect,
    pub footer: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // player, clock, gauge
            Constraint::Length(3), // round status
            Constraint::Min(3),    // board
            Constraint::Length(2), // streak, help
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        status: chunks[1],
        board: square_board(chunks[2]),
        footer: chunks[3],
    }
}

/// Largest centred area that looks square given 2:1 terminal cells
fn square_board(area: Rect) -> Rect {
    if area.is_empty() {
        return area;
    }
    let width = area.width.min(area.height.saturating_mul(2));
    let height = area.height.min(width / 2).max(1);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Cell rectangles for an `n`x`n` board, row-major
pub fn tile_rects(board: Rect, n: u32) -> Vec<Rect> {
    let n = n as u16;
    if n == 0 {
        return vec![];
    }
    let cell_w = board.width / n;
    let cell_h = board.height / n;
    (0..n)
        .cartesian_product(0..n)
        .map(|(row, col)| Rect {
            x: board.x + col * cell_w,
            y: board.y + row * cell_h,
            width: cell_w,
            height: cell_h,
        })
        .collect()
}

/// Grid position under a terminal cell, if any
pub fn tile_at(board: Rect, n: u32, column: u16, row: u16) -> Option<usize> {
    tile_rects(board, n)
        .iter()
        .position(|r| r.width > 0 && r.height > 0 && r.contains((column, row).into()))
}

/// `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn streak_label(streak: u32) -> Option<String> {
    match streak {
        0 => None,
        1 => Some("Streak: 1".to_string()),
        s => Some(format!("Streak: {s} ({:.1}x)", streak_multiplier(s))),
    }
}

/// Score badges for the success indicator; zero bonuses are left out
pub fn breakdown_badges(score: &ScoreBreakdown) -> Vec<String> {
    let mut badges = vec![format!("Base: +{}", score.base)];
    for (label, points) in [
        ("Streak", score.streak),
        ("Grid", score.grid),
        ("Length", score.length),
        ("Speed", score.speed),
    ] {
        if points > 0 {
            badges.push(format!("{label}: +{points}"));
        }
    }
    badges.push(format!("Total: +{}", score.total));
    badges
}

/// Headline and detail lines for the round status area
pub fn status_lines<R: Rng>(game: &MemoryGame<R>, level: u32) -> (String, Option<String>) {
    let Some(round) = game.current_round() else {
        return (String::new(), None);
    };
    let len = round.sequence().len();
    let n = round.grid_size();

    match game.status() {
        GameStatus::Waiting => (String::new(), None),
        GameStatus::Showing => {
            let mut badges = vec![
                format!("Time: {:.2}s", game.display_ms() as f64 / 1000.0),
                format!("Level {level}"),
                format!("{n}x{n}"),
            ];
            if let Some(secs) = speed_up_secs(game.display_ms()) {
                badges.push(format!("Speed +{secs:.2}s"));
            }
            (format!("Remember {len} tiles..."), Some(badges.join("  ·  ")))
        }
        GameStatus::Input => (
            format!("Repeat the sequence! ({}/{len})", round.entered().len()),
            None,
        ),
        GameStatus::Correct => (
            "Perfect! 🎯".to_string(),
            game.last_score()
                .map(|score| breakdown_badges(score).join("  ")),
        ),
        GameStatus::Wrong => ("Wrong tile! ❌".to_string(), None),
    }
}

pub fn draw<R: Rng>(app: &App<R>, f: &mut Frame) {
    let area = f.area();
    screen::current_screen::<R>(&app.state()).render(app, area, f.buffer_mut());
}

fn render_header<R: Rng>(session: &Session<R>, area: Rect, buf: &mut Buffer) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    Paragraph::new(Line::from(vec![
        Span::styled(session.scoreboard.name.clone(), bold),
        Span::raw("  "),
        Span::styled(
            session.scoreboard.score.to_string(),
            bold.fg(Color::Magenta),
        ),
    ]))
    .render(cols[0], buf);

    Paragraph::new(Span::styled(
        format!("Time {}", format_time(session.seconds_remaining())),
        bold,
    ))
    .alignment(Alignment::Right)
    .render(cols[1], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(session.time_ratio().clamp(0.0, 1.0))
        .label("")
        .render(rows[1], buf);
}

fn render_status<R: Rng>(session: &Session<R>, area: Rect, buf: &mut Buffer) {
    let (headline, detail) = status_lines(&session.game, session.scoreboard.round);
    let color = match session.game.status() {
        GameStatus::Correct => Color::Green,
        GameStatus::Wrong => Color::Red,
        GameStatus::Showing => Color::Cyan,
        _ => Color::Reset,
    };

    let mut lines = vec![Line::from(Span::styled(
        headline,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if let Some(detail) = detail {
        lines.push(Line::from(Span::styled(
            detail,
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_board<R: Rng>(app: &App<R>, area: Rect, buf: &mut Buffer) {
    let game = &app.session.game;
    let Some(round) = game.current_round() else {
        return;
    };
    let accepting = game.status() == GameStatus::Input;

    for (position, (rect, &tile)) in tile_rects(area, round.grid_size())
        .into_iter()
        .zip(round.tiles())
        .enumerate()
    {
        if rect.width < 3 || rect.height < 3 {
            continue;
        }

        let entered = round.has_entered(tile);
        let target = round.is_target(tile);
        let fill = if game.is_revealing() && target {
            Style::default().bg(Color::Cyan).fg(Color::Black)
        } else if entered && target {
            Style::default().bg(Color::Green).fg(Color::Black)
        } else if entered {
            Style::default().bg(Color::Red).fg(Color::White)
        } else if accepting {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let mut border = Style::default();
        if position == app.cursor && accepting {
            border = border.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        }
        let border_type = if game.touch_feedback() == Some(tile) {
            BorderType::Double
        } else {
            BorderType::Rounded
        };

        let label = tile.to_string();
        let inner_height = rect.height - 2;
        let mut lines = vec![Line::raw(""); ((inner_height.saturating_sub(1)) / 2) as usize];
        if label.width() as u16 <= rect.width - 2 {
            lines.push(Line::raw(label));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(fill.add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(border),
            )
            .render(rect, buf);
    }
}

fn render_footer<R: Rng>(app: &App<R>, area: Rect, buf: &mut Buffer) {
    let mut lines = Vec::new();
    if let Some(streak) = streak_label(app.session.game.streak()) {
        lines.push(Line::from(Span::styled(
            streak,
            Style::default().fg(Color::Rgb(255, 165, 0)),
        )));
    } else {
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(Span::styled(
        "arrows/hjkl move · enter/space tap · click a tile · esc quit",
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    )));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_centered(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let height = lines.len() as u16;
    let top = area.y + area.height.saturating_sub(height) / 2;
    let rect = Rect {
        x: area.x,
        y: top,
        width: area.width,
        height: height.min(area.height),
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rect, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn app() -> App {
        App::new(Session::new(
            SessionConfig {
                player_name: "Ada".into(),
                session_secs: 90,
            },
            MemoryGame::seeded(12),
        ))
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(180), "3:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(9), "0:09");
        assert_eq!(format_time(0), "0:00");
    }

    #[test]
    fn test_streak_label() {
        assert_eq!(streak_label(0), None);
        assert_eq!(streak_label(1).as_deref(), Some("Streak: 1"));
        assert_eq!(streak_label(3).as_deref(), Some("Streak: 3 (2.0x)"));
    }

    #[test]
    fn test_breakdown_badges_hide_zero_bonuses() {
        let score = crate::scoring::score_round(1, 3, 4, 2000);
        assert_eq!(
            breakdown_badges(&score),
            vec!["Base: +10", "Grid: +1", "Length: +2", "Total: +15"]
        );
    }

    #[test]
    fn test_tile_rects_and_hit_testing() {
        let board = Rect::new(10, 5, 30, 15);
        let rects = tile_rects(board, 3);
        assert_eq!(rects.len(), 9);
        assert_eq!(rects[0], Rect::new(10, 5, 10, 5));
        assert_eq!(rects[5], Rect::new(30, 10, 10, 5));

        assert_eq!(tile_at(board, 3, 10, 5), Some(0));
        assert_eq!(tile_at(board, 3, 35, 12), Some(5));
        assert_eq!(tile_at(board, 3, 9, 5), None);
        assert_eq!(tile_at(board, 3, 39, 20), None);
    }

    #[test]
    fn test_screen_layout_board_is_inside_area() {
        let area = Rect::new(0, 0, 80, 30);
        let layout = screen_layout(area);
        assert!(layout.board.width > 0 && layout.board.height > 0);
        assert!(layout.board.y >= layout.status.y + layout.status.height);
        assert!(layout.board.y + layout.board.height <= layout.footer.y);
        assert!(layout.board.width <= layout.board.height * 2);
    }

    #[test]
    fn test_status_lines_while_showing() {
        let mut app = app();
        app.session.start(0);
        let (headline, detail) = status_lines(&app.session.game, 1);
        assert_eq!(headline, "Remember 4 tiles...");
        let detail = detail.unwrap();
        assert!(detail.contains("Time: 3.00s"));
        assert!(detail.contains("Level 1"));
        assert!(detail.contains("3x3"));
        assert!(!detail.contains("Speed"));
    }

    #[test]
    fn test_status_lines_during_input() {
        let mut app = app();
        app.session.start(0);
        app.session.advance(3_000);
        let (headline, detail) = status_lines(&app.session.game, 1);
        assert_eq!(headline, "Repeat the sequence! (0/4)");
        assert_eq!(detail, None);
    }

    #[test]
    fn test_render_waiting_screen() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(&app, f)).unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("Ready to Start?"));
        assert!(content.contains("Ada"));
        assert!(content.contains("1:30"));
    }

    #[test]
    fn test_render_playing_screen() {
        let mut app = app();
        app.session.start(0);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw(&app, f)).unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("Remember 4 tiles..."));
        for tile in 1..=9 {
            assert!(content.contains(&tile.to_string()));
        }
    }

    #[test]
    fn test_render_finished_screen() {
        let mut app = app();
        app.session.start(0);
        app.session.advance(90_000);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(&app, f)).unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("Game Over!"));
        assert!(content.contains("You scored 0 points"));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let mut app = app();
        app.session.start(0);
        let mut terminal = Terminal::new(TestBackend::new(12, 6)).unwrap();
        terminal.draw(|f| draw(&app, f)).unwrap();
    }
}
