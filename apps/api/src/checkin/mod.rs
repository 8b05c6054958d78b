//! Daily check-in streaks.

pub mod handlers;
pub mod store;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::check_in::CheckInRow;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Streak {
    pub streak: i32,
    pub best_streak: i32,
    pub already_checked_in: bool,
}

/// Streak after checking in on `today`, given the stored state.
///
/// Same day leaves it unchanged, the following day extends it, and any gap
/// (or a clock that moved backwards) restarts it at 1.
pub fn next_streak(previous: Option<&CheckInRow>, today: NaiveDate) -> Streak {
    let Some(prev) = previous else {
        return Streak {
            streak: 1,
            best_streak: 1,
            already_checked_in: false,
        };
    };

    let gap = (today - prev.last_check_in).num_days();
    if gap == 0 {
        return Streak {
            streak: prev.streak,
            best_streak: prev.best_streak,
            already_checked_in: true,
        };
    }

    let streak = if gap == 1 { prev.streak + 1 } else { 1 };
    Streak {
        streak,
        best_streak: prev.best_streak.max(streak),
        already_checked_in: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stored(last: NaiveDate, streak: i32, best: i32) -> CheckInRow {
        CheckInRow {
            user_id: Uuid::new_v4(),
            last_check_in: last,
            streak,
            best_streak: best,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_first_check_in_starts_at_one() {
        let s = next_streak(None, date(2026, 4, 1));
        assert_eq!((s.streak, s.best_streak, s.already_checked_in), (1, 1, false));
    }

    #[test]
    fn test_same_day_is_unchanged() {
        let prev = stored(date(2026, 4, 1), 4, 9);
        let s = next_streak(Some(&prev), date(2026, 4, 1));
        assert_eq!((s.streak, s.best_streak, s.already_checked_in), (4, 9, true));
    }

    #[test]
    fn test_consecutive_day_extends_and_raises_best() {
        let prev = stored(date(2026, 4, 30), 9, 9);
        let s = next_streak(Some(&prev), date(2026, 5, 1));
        assert_eq!((s.streak, s.best_streak), (10, 10));
    }

    #[test]
    fn test_gap_resets_but_keeps_best() {
        let prev = stored(date(2026, 4, 1), 6, 6);
        let s = next_streak(Some(&prev), date(2026, 4, 3));
        assert_eq!((s.streak, s.best_streak), (1, 6));
    }
}
