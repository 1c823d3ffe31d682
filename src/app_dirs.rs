use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "mind-brawl";

/// Per-user directories the game writes to
pub struct AppDirs;

impl AppDirs {
    /// `$HOME/.local/state/mind-brawl`, or the platform data-local dir without `HOME`
    pub fn state_dir() -> Option<PathBuf> {
        match std::env::var_os("HOME") {
            Some(home) => Some(state_dir_under(PathBuf::from(home))),
            None => ProjectDirs::from("", "", APP_NAME)
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf()),
        }
    }
}

fn state_dir_under(home: PathBuf) -> PathBuf {
    home.join(".local").join("state").join(APP_NAME)
}
