//! Scoring module - line rewards, level progression and drop cadence
//!
//! Each cleared line is worth `BASE_LINE_REWARD / level`, so lines are worth
//! less as the game speeds up. After every line the level may advance by one
//! step, and the level picks the gravity cadence.

use crate::types::{BASE_LINE_REWARD, DROP_FRAMES, LEVEL_UP_SCORES, MAX_LEVEL, START_LEVEL};

/// Result of scoring one lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points added by this lock.
    pub gained: u32,
    /// Cumulative score afterwards.
    pub score: u32,
    /// Level afterwards.
    pub level: u32,
}

/// Points for a single cleared line at `level`
pub fn line_reward(level: u32) -> u32 {
    BASE_LINE_REWARD / level.max(START_LEVEL)
}

/// Level after one cleared line brings the total to `score`.
///
/// Moves up at most one step, however far past the next threshold the score is.
pub fn next_level(level: u32, score: u32) -> u32 {
    let level = level.clamp(START_LEVEL, MAX_LEVEL);
    if level == MAX_LEVEL {
        return level;
    }
    let idx = (level - START_LEVEL) as usize;
    if score >= LEVEL_UP_SCORES[idx] {
        level + 1
    } else {
        level
    }
}

/// Score `lines` cleared lines one at a time.
///
/// The level is re-evaluated between lines, so a multi-line clear that
/// crosses a threshold pays the later lines at the new level. The level never
/// goes down and rises by at most one per line.
pub fn score_lines(score: u32, level: u32, lines: u32) -> ScoreResult {
    let mut out = ScoreResult {
        gained: 0,
        score,
        level,
    };
    for _ in 0..lines {
        let reward = line_reward(out.level);
        out.gained = out.gained.saturating_add(reward);
        out.score = out.score.saturating_add(reward);
        out.level = next_level(out.level, out.score);
    }
    out
}

/// Frames between gravity steps at `level`
pub fn drop_frames(level: u32) -> u32 {
    let idx = level.clamp(START_LEVEL, MAX_LEVEL) - START_LEVEL;
    DROP_FRAMES[idx as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_reward_scales_down_with_level() {
        assert_eq!(line_reward(1), 200);
        assert_eq!(line_reward(2), 100);
        assert_eq!(line_reward(3), 66);
        assert_eq!(line_reward(7), 28);
        // Level 0 is treated as level 1 rather than dividing by zero.
        assert_eq!(line_reward(0), 200);
    }

    #[test]
    fn test_next_level_thresholds() {
        assert_eq!(next_level(1, 99), 1);
        assert_eq!(next_level(1, 100), 2);
        assert_eq!(next_level(2, 299), 2);
        assert_eq!(next_level(2, 300), 3);
        assert_eq!(next_level(3, 500), 4);
        assert_eq!(next_level(4, 799), 4);
        assert_eq!(next_level(4, 800), 5);
        assert_eq!(next_level(5, 800), 6);
        assert_eq!(next_level(6, 2000), 6);
        assert_eq!(next_level(6, 2001), 7);
        assert_eq!(next_level(7, u32::MAX), 7);
    }

    #[test]
    fn test_next_level_moves_one_step_at_a_time() {
        assert_eq!(next_level(1, 5000), 2);
        assert_eq!(next_level(0, 5000), 2);
    }

    #[test]
    fn test_line_after_level_five_reaches_level_six() {
        let r = score_lines(800, 5, 1);
        assert_eq!(
            r,
            ScoreResult {
                gained: 40,
                score: 840,
                level: 6
            }
        );
    }

    #[test]
    fn test_big_clear_climbs_one_level_per_line() {
        // 2000 points already banked, still level 1: four lines give four steps.
        let r = score_lines(2000, 1, 4);
        assert_eq!(r.level, 5);
        assert_eq!(r.gained, 200 + 100 + 66 + 50);
    }

    #[test]
    fn test_first_line_reaches_level_two() {
        let r = score_lines(0, 1, 1);
        assert_eq!(
            r,
            ScoreResult {
                gained: 200,
                score: 200,
                level: 2
            }
        );
    }

    #[test]
    fn test_multi_line_clear_rescored_between_lines() {
        // 200 at level 1 -> level 2, then 100 -> 300 -> level 3, then 66.
        let r = score_lines(0, 1, 3);
        assert_eq!(r.gained, 366);
        assert_eq!(r.score, 366);
        assert_eq!(r.level, 3);
    }

    #[test]
    fn test_zero_lines_changes_nothing() {
        let r = score_lines(450, 3, 0);
        assert_eq!(
            r,
            ScoreResult {
                gained: 0,
                score: 450,
                level: 3
            }
        );
    }

    #[test]
    fn test_drop_frames_by_level() {
        assert_eq!(drop_frames(1), 60);
        assert_eq!(drop_frames(2), 45);
        assert_eq!(drop_frames(7), 5);
        assert_eq!(drop_frames(0), 60);
        assert_eq!(drop_frames(99), 5);
    }
}
