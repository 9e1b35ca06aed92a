//! Daily prediction streak tracking.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::types::{Prediction, Streak, StreakKind};

/// Streak length that advances Week Warrior
pub const WEEK_STREAK: u32 = 7;
/// Streak length that advances Month Master
pub const MONTH_STREAK: u32 = 30;

/// Counter values before and after one update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub previous: u32,
    pub current: u32,
}

impl StreakUpdate {
    /// True when this update moved the counter onto or past `threshold`
    pub fn crossed(&self, threshold: u32) -> bool {
        self.previous < threshold && self.current >= threshold
    }
}

/// Update the daily-prediction streak after a resolution.
///
/// The streak grows when a prediction exists for today and either one exists
/// for yesterday or the streak has not started yet. It grows at most once
/// per calendar day. With no prediction today the streak goes inactive but
/// keeps its count.
pub fn update_daily(
    streaks: &mut BTreeMap<StreakKind, Streak>,
    predictions: &[Prediction],
    clock: &dyn Clock,
) -> StreakUpdate {
    let today = clock.today();
    let yesterday = today.pred_opt();
    let made_on = |day: NaiveDate| predictions.iter().any(|p| clock.date_of(p.created_at) == day);

    let streak = streaks
        .entry(StreakKind::DailyPrediction)
        .or_insert_with(|| Streak::new(StreakKind::DailyPrediction));
    let previous = streak.current;

    if made_on(today) {
        let counted_today = streak.last_activity_date == Some(today);
        let continues = yesterday.is_some_and(made_on) || streak.current == 0;
        if !counted_today && continues {
            streak.current += 1;
            streak.active = true;
            streak.last_activity_date = Some(today);
            tracing::debug!("Daily streak advanced to {}", streak.current);
        }
    } else if streak.active {
        streak.active = false;
        tracing::debug!("Daily streak inactive at {}", streak.current);
    }

    streak.best = streak.best.max(streak.current);

    StreakUpdate {
        previous,
        current: streak.current,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::clock::ManualClock;
    use crate::types::PredictionGuess;
    use chrono::{DateTime, TimeZone, Utc};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn prediction_at(created_at: DateTime<Utc>) -> Prediction {
        Prediction {
            id: created_at.to_rfc3339(),
            created_at,
            location: "Oslo".to_string(),
            guess: PredictionGuess::new(12.0, "Clear", false),
            actual: None,
            accuracy: 0.0,
            points: 0,
            completed: false,
            shared: false,
        }
    }

    #[test]
    fn test_first_prediction_bootstraps_streak() {
        let clock = ManualClock::new(start());
        let mut streaks = BTreeMap::new();
        let predictions = vec![prediction_at(clock.now())];

        let update = update_daily(&mut streaks, &predictions, &clock);

        assert_eq!(update, StreakUpdate { previous: 0, current: 1 });
        let streak = &streaks[&StreakKind::DailyPrediction];
        assert!(streak.active);
        assert_eq!(streak.best, 1);
        assert_eq!(streak.last_activity_date, Some(clock.today()));
    }

    #[test]
    fn test_same_day_updates_count_once() {
        let clock = ManualClock::new(start());
        let mut streaks = BTreeMap::new();
        let predictions = vec![prediction_at(clock.now())];

        update_daily(&mut streaks, &predictions, &clock);
        let update = update_daily(&mut streaks, &predictions, &clock);

        assert_eq!(update.current, 1);
        assert!(!update.crossed(1));
    }

    #[test]
    fn test_consecutive_days_extend_streak() {
        let clock = ManualClock::new(start());
        let mut streaks = BTreeMap::new();
        let mut predictions = Vec::new();

        for _ in 0..3 {
            predictions.push(prediction_at(clock.now()));
            update_daily(&mut streaks, &predictions, &clock);
            clock.advance_days(1);
        }

        assert_eq!(streaks[&StreakKind::DailyPrediction].current, 3);
    }

    #[test]
    fn test_gap_keeps_count_without_growing() {
        let clock = ManualClock::new(start());
        let mut streaks = BTreeMap::new();
        let mut predictions = vec![prediction_at(clock.now())];
        update_daily(&mut streaks, &predictions, &clock);

        clock.advance_days(3);
        predictions.push(prediction_at(clock.now()));
        let update = update_daily(&mut streaks, &predictions, &clock);

        assert_eq!(update.current, 1);
        assert!(streaks[&StreakKind::DailyPrediction].best >= update.current);
    }

    #[test]
    fn test_no_prediction_today_marks_inactive() {
        let clock = ManualClock::new(start());
        let mut streaks = BTreeMap::new();
        let predictions = vec![prediction_at(clock.now())];
        update_daily(&mut streaks, &predictions, &clock);

        clock.advance_days(1);
        update_daily(&mut streaks, &predictions, &clock);

        let streak = &streaks[&StreakKind::DailyPrediction];
        assert!(!streak.active);
        assert_eq!(streak.current, 1);
    }

    #[test]
    fn test_crossed_is_edge_triggered() {
        assert!(StreakUpdate { previous: 6, current: 7 }.crossed(WEEK_STREAK));
        assert!(!StreakUpdate { previous: 7, current: 7 }.crossed(WEEK_STREAK));
        assert!(!StreakUpdate { previous: 7, current: 8 }.crossed(WEEK_STREAK));
    }
}
