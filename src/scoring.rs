pub const BASE_POINTS: u32 = 10;
/// Completion time (ms) under which a speed bonus is awarded
pub const SPEED_BONUS_THRESHOLD_MS: u64 = 1500;
/// Totals are snapped to the nearest multiple of this
const SCORE_GRANULARITY: u32 = 5;

/// Per-component points awarded for a completed round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub streak: u32,
    pub grid: u32,
    pub length: u32,
    pub speed: u32,
    pub total: u32,
}

impl ScoreBreakdown {
    /// Sum of the components before snapping to the score granularity
    pub fn raw_total(&self) -> u32 {
        self.base + self.streak + self.grid + self.length + self.speed
    }
}

pub fn streak_multiplier(streak: u32) -> f64 {
    1.0 + streak.saturating_sub(1) as f64 * 0.5
}

/// Scores a completed round.
///
/// `streak` is the streak count including this round, `grid_size` the grid
/// dimension, `sequence_len` the number of tiles recalled and `elapsed_ms` the
/// time from the start of input to the final tap.
pub fn score_round(
    streak: u32,
    grid_size: u32,
    sequence_len: usize,
    elapsed_ms: u64,
) -> ScoreBreakdown {
    let base = BASE_POINTS as f64;

    let with_streak = (base * streak_multiplier(streak)).floor() as u32;

    let span = grid_size.saturating_sub(2) as f64;
    let grid = (base * (span * span * 0.1)).floor() as u32;

    let length = (sequence_len.saturating_sub(3) * 2) as u32;

    let speed = if elapsed_ms < SPEED_BONUS_THRESHOLD_MS {
        let remaining = 1.0 - elapsed_ms as f64 / SPEED_BONUS_THRESHOLD_MS as f64;
        (remaining * 5.0 * sequence_len as f64).floor() as u32
    } else {
        0
    };

    let raw = with_streak + grid + length + speed;

    ScoreBreakdown {
        base: BASE_POINTS,
        streak: with_streak - BASE_POINTS,
        grid,
        length,
        speed,
        total: snap_to_granularity(raw),
    }
}

fn snap_to_granularity(raw: u32) -> u32 {
    (raw + SCORE_GRANULARITY / 2) / SCORE_GRANULARITY * SCORE_GRANULARITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_round_slow() {
        let s = score_round(1, 3, 4, 2000);
        assert_eq!(
            s,
            ScoreBreakdown {
                base: 10,
                streak: 0,
                grid: 1,
                length: 2,
                speed: 0,
                total: 15,
            }
        );
        assert_eq!(s.raw_total(), 13);
    }

    #[test]
    fn test_streak_and_speed() {
        let s = score_round(3, 5, 7, 1000);
        assert_eq!(s.base, 10);
        assert_eq!(s.streak, 10);
        assert_eq!(s.grid, 9);
        assert_eq!(s.length, 8);
        assert_eq!(s.speed, 11);
        assert_eq!(s.raw_total(), 48);
        assert_eq!(s.total, 50);
    }

    #[test]
    fn test_streak_multiplier() {
        assert_eq!(streak_multiplier(1), 1.0);
        assert_eq!(streak_multiplier(2), 1.5);
        assert_eq!(streak_multiplier(5), 3.0);
        // Guard against a zero streak rather than underflowing
        assert_eq!(streak_multiplier(0), 1.0);
    }

    #[test]
    fn test_speed_bonus_threshold_is_exclusive() {
        assert_eq!(score_round(1, 3, 4, 1500).speed, 0);
        assert_eq!(score_round(1, 3, 4, 1499).speed, 0);
        assert_eq!(score_round(1, 3, 4, 0).speed, 20);
    }

    #[test]
    fn test_grid_bonus_per_size() {
        let bonuses: Vec<u32> = (3..=7).map(|n| score_round(1, n, 4, 5000).grid).collect();
        assert_eq!(bonuses, vec![1, 4, 9, 16, 25]);
    }

    #[test]
    fn test_length_bonus_floor_at_zero() {
        assert_eq!(score_round(1, 3, 1, 5000).length, 0);
        assert_eq!(score_round(1, 3, 3, 5000).length, 0);
        assert_eq!(score_round(1, 7, 10, 5000).length, 14);
    }

    #[test]
    fn test_total_always_multiple_of_five() {
        for streak in 1..8 {
            for n in 3..=7 {
                for elapsed in [0, 250, 700, 1200, 1499, 3000] {
                    let len = crate::board::sequence_length(n);
                    let s = score_round(streak, n, len, elapsed);
                    assert_eq!(s.total % 5, 0);
                    let diff = s.total as i64 - s.raw_total() as i64;
                    assert!(diff.abs() <= 2, "{s:?}");
                }
            }
        }
    }
}
