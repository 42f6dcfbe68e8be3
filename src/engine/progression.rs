//! XP and level progression.
//!
//! A score earns XP (archive play at half rate), and cumulative XP maps onto
//! a level curve of `round(100 * level^1.5)`. The curve is deliberately
//! steep so late levels require disproportionately more play.

/// Levels above this are not representable; any XP beyond the level-1000
/// threshold maps to level 1000. An explicit cap, not an overflow guard.
pub const MAX_LEVEL: u32 = 1000;

/// XP earned for a single attempt. Archive/practice puzzles are worth half
/// XP so daily play stays the primary incentive loop.
pub fn calculate_xp(score: u32, is_daily: bool) -> i64 {
    let base_xp = (score / 10) as i64;
    if is_daily { base_xp } else { base_xp / 2 }
}

/// Cumulative XP needed to have reached `level`. Monotonically increasing;
/// level 1 (and below) costs nothing.
pub fn xp_required_for_level(level: u32) -> i64 {
    if level <= 1 {
        return 0;
    }
    (100.0 * (level as f64).powf(1.5)).round() as i64
}

/// Exact inverse of [`xp_required_for_level`] under floor semantics: the
/// largest level whose threshold is within `total_xp`, capped at
/// [`MAX_LEVEL`].
///
/// Upper-bound binary search over `[1, MAX_LEVEL]`. The midpoint is biased
/// upward so the search converges to the greatest satisfying level.
pub fn level_from_xp(total_xp: i64) -> u32 {
    if total_xp <= 0 {
        return 1;
    }
    let mut lo = 1u32;
    let mut hi = MAX_LEVEL;
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        if xp_required_for_level(mid) <= total_xp {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

/// Position within the current level, derived on demand from the running
/// total-XP counter owned by the account subsystem. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned past the current level's threshold.
    pub current_level_xp: i64,
    /// Span of the current level.
    pub xp_for_next_level: i64,
    /// Fraction of the span covered, in `[0, 1]`.
    pub progress: f64,
}

pub fn level_progress(total_xp: i64) -> LevelProgress {
    let level = level_from_xp(total_xp);
    let current_level_xp = (total_xp - xp_required_for_level(level)).max(0);
    let xp_for_next_level = xp_required_for_level(level + 1) - xp_required_for_level(level);
    let progress = if xp_for_next_level <= 0 {
        1.0
    } else {
        (current_level_xp as f64 / xp_for_next_level as f64).clamp(0.0, 1.0)
    };
    LevelProgress {
        level,
        current_level_xp,
        xp_for_next_level,
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_xp_is_score_over_ten() {
        assert_eq!(calculate_xp(1000, true), 100);
        assert_eq!(calculate_xp(930, true), 93);
        assert_eq!(calculate_xp(9, true), 0);
    }

    #[test]
    fn test_archive_xp_is_halved() {
        assert_eq!(calculate_xp(1000, false), 50);
        assert_eq!(calculate_xp(930, false), 46);
        assert_eq!(calculate_xp(19, false), 0);
    }

    #[test]
    fn test_known_level_thresholds() {
        assert_eq!(xp_required_for_level(1), 0);
        assert_eq!(xp_required_for_level(2), 283);
        assert_eq!(xp_required_for_level(10), 3162);
    }

    #[test]
    fn test_threshold_curve_strictly_increases() {
        for level in 1..MAX_LEVEL {
            assert!(xp_required_for_level(level) < xp_required_for_level(level + 1));
        }
    }

    #[test]
    fn test_level_starts_at_one() {
        assert_eq!(level_from_xp(0), 1);
        assert_eq!(level_from_xp(-5), 1);
        assert_eq!(level_from_xp(282), 1);
    }

    #[test]
    fn test_level_from_xp_inverts_thresholds() {
        for level in 1..MAX_LEVEL {
            let threshold = xp_required_for_level(level);
            assert_eq!(level_from_xp(threshold), level, "at threshold of {level}");
            if level > 1 {
                assert_eq!(
                    level_from_xp(threshold - 1),
                    level - 1,
                    "one XP short of {level}"
                );
            }
        }
    }

    #[test]
    fn test_level_caps_at_max() {
        assert_eq!(level_from_xp(xp_required_for_level(MAX_LEVEL)), MAX_LEVEL);
        assert_eq!(level_from_xp(i64::MAX), MAX_LEVEL);
    }

    #[test]
    fn test_progress_is_zero_at_exact_threshold() {
        for level in [2, 10, 100] {
            let p = level_progress(xp_required_for_level(level));
            assert_eq!(p.level, level);
            assert_eq!(p.current_level_xp, 0);
            assert_eq!(p.progress, 0.0);
        }
    }

    #[test]
    fn test_progress_stays_in_unit_interval() {
        for total_xp in [-10, 0, 1, 283, 3000, 3162, 1_000_000, i64::MAX] {
            let p = level_progress(total_xp);
            assert!((0.0..=1.0).contains(&p.progress), "progress for {total_xp}");
            assert!(p.current_level_xp >= 0);
            assert!(p.level >= 1);
        }
    }

    #[test]
    fn test_progress_midway_through_a_level() {
        let base = xp_required_for_level(2);
        let span = xp_required_for_level(3) - base;
        let p = level_progress(base + span / 2);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp_for_next_level, span);
        assert!((p.progress - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_progress_clamps_past_the_cap() {
        // Far beyond the level-1000 threshold the readout pins at the cap.
        let p = level_progress(i64::MAX);
        assert_eq!(p.level, MAX_LEVEL);
        assert_eq!(p.progress, 1.0);
    }
}
