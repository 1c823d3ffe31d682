use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::info;
use mind_brawl::{
    app::{App, AppAction},
    config::{Config, ConfigStore, FileConfigStore},
    game::MemoryGame,
    logging,
    runtime::{
        Clock, CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, SystemClock,
        Ticker,
    },
    session::{Session, SessionConfig},
    ui,
};
use rand::Rng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

const TICK_RATE_MS: u64 = 50;

/// memory sequence recall: remember the highlighted tiles, then tap them back
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Remember the highlighted tiles, then tap them back before the clock runs out. The grid grows and the reveal gets shorter as you progress; streaks and speed earn bonus points."
)]
pub struct Cli {
    /// player display name
    #[clap(short = 'n', long, value_parser = parse_name)]
    name: Option<String>,

    /// session length in seconds
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    secs: Option<u32>,

    /// fixed random seed for a reproducible session
    #[clap(long)]
    seed: Option<u64>,

    /// store the effective name and session length as the new defaults
    #[clap(long)]
    save_config: bool,
}

fn parse_name(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err("name must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

impl Cli {
    /// CLI flags override the stored config
    fn merge(&self, stored: Config) -> Config {
        Config {
            player_name: self.name.clone().unwrap_or(stored.player_name),
            session_secs: self.secs.unwrap_or(stored.session_secs),
            seed: self.seed.or(stored.seed),
        }
    }
}

fn build_app(cfg: &Config) -> App {
    let game = match cfg.seed {
        Some(seed) => MemoryGame::seeded(seed),
        None => MemoryGame::from_entropy(),
    };
    App::new(Session::new(SessionConfig::from(cfg), game))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init();

    let store = FileConfigStore::new();
    let cfg = cli.merge(store.load());
    if let Err(e) = cfg.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, e.to_string()).exit();
    }
    if cli.save_config {
        store.save(&cfg)?;
        info!("saved defaults to {}", store.path().display());
    }

    let mut app = build_app(&cfg);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = start_tui(&mut terminal, &mut app, &runner, &SystemClock::new());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B, R, E, T, C>(
    terminal: &mut Terminal<B>,
    app: &mut App<R>,
    runner: &Runner<E, T>,
    clock: &C,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    R: Rng,
    E: GameEventSource,
    T: Ticker,
    C: Clock,
{
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        let event = runner.step();
        let now = clock.now_ms();

        // Bring timers up to date before any input is applied
        app.on_tick(now);

        match event {
            GameEvent::Tick | GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if key.kind == KeyEventKind::Press && app.on_key(key, now) == AppAction::Quit {
                    break;
                }
            }
            GameEvent::Mouse(mouse) => {
                let size = terminal.size()?;
                app.on_click(
                    Rect::new(0, 0, size.width, size.height),
                    mouse.column,
                    mouse.row,
                    now,
                );
            }
        }

        terminal.draw(|f| ui::draw(app, f))?;
    }

    Ok(())
}
