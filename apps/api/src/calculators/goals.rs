use chrono::{Datelike, NaiveDate};

use crate::models::goal::GoalStatus;

use super::{ceil_months, non_negative, positive};

/// Progress toward the target, capped at 100. `None` unless `target > 0`.
pub fn goal_percentage(current: f64, target: f64) -> Option<f64> {
    if !positive(target) || !non_negative(current) {
        return None;
    }
    Some((current / target * 100.0).min(100.0))
}

/// `Completed` iff `current >= target`.
pub fn goal_status(current: f64, target: f64) -> GoalStatus {
    if current >= target {
        GoalStatus::Completed
    } else {
        GoalStatus::Active
    }
}

/// Human label for the time left until `target_date`.
pub fn time_to_goal(target_date: NaiveDate, today: NaiveDate) -> String {
    let days = (target_date - today).num_days();
    match days {
        d if d < 0 => "Overdue".to_string(),
        0 => "Today".to_string(),
        1 => "1 day".to_string(),
        d if d <= 30 => format!("{d} days"),
        d => {
            let months = d / 30;
            format!("{months} month{}", if months > 1 { "s" } else { "" })
        }
    }
}

/// Where progress "should" be if saving evenly from `created` to `target_date`.
pub fn expected_percentage(created: NaiveDate, target_date: NaiveDate, today: NaiveDate) -> f64 {
    let total = (target_date - created).num_days().max(1) as f64;
    let elapsed = (today - created).num_days().max(0) as f64;
    (elapsed / total * 100.0).min(100.0)
}

/// Whole calendar months from `from` to `to`, rounding toward zero.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months =
        (to.year() - from.year()) as i64 * 12 + to.month() as i64 - from.month() as i64;
    if months > 0 && to.day() < from.day() {
        months -= 1;
    } else if months < 0 && to.day() > from.day() {
        months += 1;
    }
    months
}

/// Monthly amount needed to hit the target by `target_date` (at least one month left).
/// `Some(0)` once the target is met.
pub fn monthly_saving_suggestion(
    current: f64,
    target: f64,
    target_date: NaiveDate,
    today: NaiveDate,
) -> Option<f64> {
    if !positive(target) || !current.is_finite() {
        return None;
    }
    let remaining = target - current;
    if remaining <= 0.0 {
        return Some(0.0);
    }
    let months_left = months_between(today, target_date).max(1) as f64;
    Some((remaining / months_left).ceil())
}

/// Months of saving `monthly_saving` to accumulate `goal`.
pub fn months_to_goal(goal: f64, monthly_saving: f64) -> Option<u32> {
    if !positive(goal) || !positive(monthly_saving) {
        return None;
    }
    ceil_months(goal / monthly_saving)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_completed_iff_current_reaches_target() {
        assert_eq!(goal_status(50000.0, 50000.0), GoalStatus::Completed);
        assert_eq!(goal_status(60000.0, 50000.0), GoalStatus::Completed);
        assert_eq!(goal_status(49999.99, 50000.0), GoalStatus::Active);
        assert_eq!(goal_status(0.0, 1.0), GoalStatus::Active);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(goal_percentage(25000.0, 100000.0), Some(25.0));
        assert_eq!(goal_percentage(200.0, 100.0), Some(100.0));
        assert_eq!(goal_percentage(10.0, 0.0), None);
    }

    #[test]
    fn test_time_to_goal_labels() {
        let today = date(2026, 3, 1);
        assert_eq!(time_to_goal(date(2026, 2, 27), today), "Overdue");
        assert_eq!(time_to_goal(today, today), "Today");
        assert_eq!(time_to_goal(date(2026, 3, 2), today), "1 day");
        assert_eq!(time_to_goal(date(2026, 3, 21), today), "20 days");
        assert_eq!(time_to_goal(date(2026, 4, 10), today), "1 month");
        assert_eq!(time_to_goal(date(2026, 9, 1), today), "6 months");
    }

    #[test]
    fn test_expected_percentage_bounds() {
        let created = date(2026, 1, 1);
        let target = date(2026, 1, 11);
        assert_eq!(expected_percentage(created, target, date(2025, 12, 1)), 0.0);
        assert_eq!(expected_percentage(created, target, date(2026, 1, 6)), 50.0);
        assert_eq!(expected_percentage(created, target, date(2027, 1, 1)), 100.0);
    }

    #[test]
    fn test_months_between_counts_full_months() {
        assert_eq!(months_between(date(2026, 1, 15), date(2026, 4, 14)), 2);
        assert_eq!(months_between(date(2026, 1, 15), date(2026, 4, 15)), 3);
        assert_eq!(months_between(date(2026, 4, 15), date(2026, 1, 15)), -3);
    }

    #[test]
    fn test_monthly_saving_suggestion() {
        let today = date(2026, 1, 1);
        assert_eq!(
            monthly_saving_suggestion(10000.0, 70000.0, date(2026, 7, 1), today),
            Some(10000.0)
        );
        // past-due goals spread the remainder over a single month
        assert_eq!(
            monthly_saving_suggestion(0.0, 5000.0, date(2025, 6, 1), today),
            Some(5000.0)
        );
        assert_eq!(
            monthly_saving_suggestion(9000.0, 5000.0, date(2026, 6, 1), today),
            Some(0.0)
        );
    }

    #[test]
    fn test_months_to_goal() {
        assert_eq!(months_to_goal(50000.0, 5000.0), Some(10));
        assert_eq!(months_to_goal(50001.0, 5000.0), Some(11));
        assert_eq!(months_to_goal(50000.0, 0.0), None);
        assert_eq!(months_to_goal(1e12, 0.01), None);
    }
}
