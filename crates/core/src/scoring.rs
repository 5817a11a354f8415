//! Scoring module - line clear points, level progression and gravity timing
//!
//! Classic rules: points for a clear are `LINE_SCORES[rows] * level`, the level is derived from
//! the cumulative line count and never goes down.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Score, cleared lines and level of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stats {
    pub score: u32,
    pub lines: u32,
    /// Starts at 1
    pub level: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
        }
    }
}

/// What a single line clear changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClearOutcome {
    pub points: u32,
    /// New level, only when it increased
    pub leveled_up: Option<u32>,
}

/// Base points for clearing `rows` rows at `level`.
///
/// Clears larger than four rows score like a four-row clear.
pub fn points_for(rows: u32, level: u32) -> u32 {
    let idx = (rows as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

/// Level reached after `lines` cumulative cleared lines
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level: `max(120, 1000 - (level - 1) * 70)`
///
/// # Examples
///
/// ```
/// use tera_tetris_core::scoring::drop_interval_ms;
///
/// assert_eq!(drop_interval_ms(1), 1000);
/// assert_eq!(drop_interval_ms(2), 930);
/// assert_eq!(drop_interval_ms(30), 120);
/// ```
pub fn drop_interval_ms(level: u32) -> u32 {
    let step = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(step)
        .max(DROP_INTERVAL_FLOOR_MS)
}

/// Apply a clear of `rows` rows to `stats`.
///
/// `rows == 0` leaves `stats` untouched.
pub fn apply_line_clear(stats: &mut Stats, rows: u32) -> LineClearOutcome {
    if rows == 0 {
        return LineClearOutcome::default();
    }

    let points = points_for(rows, stats.level);
    stats.score = stats.score.saturating_add(points);
    stats.lines = stats.lines.saturating_add(rows);

    let level = level_for_lines(stats.lines);
    let leveled_up = if level > stats.level {
        stats.level = level;
        Some(level)
    } else {
        None
    };

    LineClearOutcome { points, leveled_up }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table_scales_with_level() {
        for level in 1..=5 {
            assert_eq!(points_for(1, level), 40 * level);
            assert_eq!(points_for(2, level), 100 * level);
            assert_eq!(points_for(3, level), 300 * level);
            assert_eq!(points_for(4, level), 1200 * level);
        }
        assert_eq!(points_for(0, 7), 0);
    }

    #[test]
    fn test_points_caps_at_four_rows() {
        assert_eq!(points_for(6, 2), 2400);
    }

    #[test]
    fn test_zero_rows_changes_nothing() {
        let mut stats = Stats {
            score: 500,
            lines: 9,
            level: 1,
        };
        let outcome = apply_line_clear(&mut stats, 0);
        assert_eq!(outcome, LineClearOutcome::default());
        assert_eq!(stats.score, 500);
        assert_eq!(stats.lines, 9);
    }

    #[test]
    fn test_level_up_at_ten_lines() {
        let mut stats = Stats {
            score: 0,
            lines: 9,
            level: 1,
        };
        let outcome = apply_line_clear(&mut stats, 1);
        // Points use the level in effect before the clear.
        assert_eq!(outcome.points, 40);
        assert_eq!(outcome.leveled_up, Some(2));
        assert_eq!(stats.level, 2);
        assert_eq!(stats.lines, 10);
    }

    #[test]
    fn test_level_never_decreases() {
        let mut stats = Stats {
            score: 0,
            lines: 0,
            level: 5,
        };
        let outcome = apply_line_clear(&mut stats, 4);
        assert_eq!(outcome.leveled_up, None);
        assert_eq!(stats.level, 5);
        assert_eq!(outcome.points, 6000);
    }

    #[test]
    fn test_drop_interval_floor() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(5), 720);
        assert_eq!(drop_interval_ms(13), 160);
        assert_eq!(drop_interval_ms(14), 120);
        assert_eq!(drop_interval_ms(1000), 120);
        // Level 0 never happens in a session; treat it like level 1.
        assert_eq!(drop_interval_ms(0), 1000);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(35), 4);
    }
}
