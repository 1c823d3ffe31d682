// Library surface for the binary, headless/integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod board;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod game;
pub mod logging;
pub mod round;
pub mod runtime;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod ui;

pub use app::{App, AppAction};
pub use game::{GameStatus, Host, MemoryGame};
pub use round::TapOutcome;
pub use scoring::ScoreBreakdown;
pub use session::{Session, SessionConfig, SessionState};
