/// How long the target tiles stay highlighted in the first round
pub const INITIAL_DISPLAY_MS: u64 = 3000;
pub const MIN_DISPLAY_MS: u64 = 500;
const DISPLAY_DECAY: f64 = 0.85;

/// Tap highlight duration
pub const TOUCH_FEEDBACK_MS: u64 = 200;
/// Pause on the failure indicator before the round is regenerated
pub const WRONG_PAUSE_MS: u64 = 1500;
/// Pause on the success indicator and score breakdown before the next round
pub const CORRECT_PAUSE_MS: u64 = 2000;

/// Display time to use after the given round was completed
pub fn display_time_after(round: u32) -> u64 {
    let decayed = INITIAL_DISPLAY_MS as f64 * DISPLAY_DECAY.powi(round as i32 + 1);
    (decayed.round() as u64).max(MIN_DISPLAY_MS)
}

/// Seconds shaved off the initial display time, shown as the speed-up badge
pub fn speed_up_secs(display_ms: u64) -> Option<f64> {
    (display_ms < INITIAL_DISPLAY_MS)
        .then(|| (INITIAL_DISPLAY_MS - display_ms) as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_time_after_round_five() {
        assert_eq!(display_time_after(5), 1131);
    }

    #[test]
    fn test_display_time_decays_then_floors() {
        assert_eq!(display_time_after(0), 2550);
        let times: Vec<u64> = (0..30).map(display_time_after).collect();
        assert!(times.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(display_time_after(10), 502);
        assert_eq!(display_time_after(11), MIN_DISPLAY_MS);
        assert_eq!(display_time_after(29), MIN_DISPLAY_MS);
    }

    #[test]
    fn test_speed_up_secs() {
        assert_eq!(speed_up_secs(INITIAL_DISPLAY_MS), None);
        assert_eq!(speed_up_secs(2550), Some(0.45));
    }
}
